use {
    shared_components::Icon,
    skin_components::{AssetKind, AssetSource},
    upgrades::Upgrades,
};

use crate::{config::SelectorConfig, registry::SkinVariant};

/// Heavenly cookies that come with the selector, as `(upgrade, image file)`.
pub const HEAVENLY_COOKIES: [(&str, &str); 9] = [
    ("Heavenly cookies", "heavenly_cookies.png"),
    ("Snowflake biscuits", "snowflake_biscuits.png"),
    ("Pure heart biscuits", "pure_heart_biscuits.png"),
    ("Ardent heart biscuits", "ardent_heart_biscuits.png"),
    ("Sour heart biscuits", "sour_heart_biscuits.png"),
    ("Weeping heart biscuits", "weeping_heart_biscuits.png"),
    ("Golden heart biscuits", "golden_heart_biscuits.png"),
    ("Eternal heart biscuits", "eternal_heart_biscuits.png"),
    ("Prism heart biscuits", "prism_heart_biscuits.png"),
];

/// The host's own cookie, shown whenever nothing else applies.
pub fn default_variant(config: &SelectorConfig) -> SkinVariant {
    AssetKind::ALL.into_iter().fold(
        SkinVariant::new(&config.default_variant, AssetSource::Builtin).with_icon(Icon::new(10, 0)),
        |variant, kind| variant.with_source(kind, AssetSource::Builtin),
    )
}

/// Skins for the heavenly cookies the host knows about. Returns the names of
/// the cookies it does not know next to them.
pub fn heavenly_variants(config: &SelectorConfig, upgrades: &Upgrades) -> (Vec<SkinVariant>, Vec<&'static str>) {
    let mut variants = Vec::new();
    let mut missing = Vec::new();
    for (name, file) in HEAVENLY_COOKIES {
        match upgrades.get(name) {
            Some(upgrade) => variants.push(SkinVariant::from_upgrade(
                upgrade,
                config.resource(&format!("cookieImages/{file}")),
            )),
            None => missing.push(name),
        }
    }
    (variants, missing)
}
