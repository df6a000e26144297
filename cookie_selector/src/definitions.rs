use {
    bevy::prelude::*,
    serde::Deserialize,
    shared_components::Icon,
    skin_components::{AssetKind, AssetSource},
    std::collections::BTreeMap,
};

use crate::registry::{SkinVariant, UnlockRule};

/// A cookie skin described in a `*.skin.ron` file.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct SkinDefinition {
    pub name: String,
    #[serde(default)]
    pub icon: Icon,
    /// Upgrade that has to be bought before the skin can be shown.
    #[serde(default)]
    pub unlocked_by: Option<String>,
    pub sources: BTreeMap<AssetKind, AssetSource>,
}

impl SkinDefinition {
    pub fn to_variant(&self) -> SkinVariant {
        SkinVariant {
            name: self.name.clone(),
            icon: self.icon.clone(),
            unlock: self.unlocked_by.clone().map(UnlockRule::UpgradeBought),
            purchase: None,
            sources: self.sources.clone(),
        }
    }
}

/// Definition files requested at startup. Registered once the selector is
/// ready.
#[derive(Resource, Debug, Default)]
pub struct SkinDefinitionHandles(pub Vec<Handle<SkinDefinition>>);

impl SkinDefinitionHandles {
    pub fn contains(&self, id: AssetId<SkinDefinition>) -> bool {
        self.0.iter().any(|handle| handle.id() == id)
    }
}

/// Skins other plugins want registered, queued until the selector is ready.
#[derive(Resource, Debug, Default)]
pub struct PendingSkins(Vec<SkinVariant>);

impl PendingSkins {
    pub fn push(&mut self, variant: SkinVariant) {
        self.0.push(variant);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = SkinVariant> + '_ {
        self.0.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_skin_file() {
        let definition: SkinDefinition = ron::from_str(
            r#"(
                name: "Mint chip",
                icon: (x: 3, y: 7),
                unlocked_by: Some("Heavenly cookies"),
                sources: {
                    PerfectCookie: Path("skins/mint.png"),
                    Shadow: Builtin,
                },
            )"#,
        )
        .unwrap();

        let variant = definition.to_variant();
        assert_eq!(variant.name, "Mint chip");
        assert_eq!(variant.icon, Icon::new(3, 7));
        assert_eq!(variant.sources[&AssetKind::Shadow], AssetSource::Builtin);
        assert!(matches!(
            variant.unlock,
            Some(UnlockRule::UpgradeBought(ref name)) if name == "Heavenly cookies"
        ));
        assert!(variant.purchase.is_none());
    }

    #[test]
    fn icon_and_unlock_are_optional() {
        let definition: SkinDefinition =
            ron::from_str(r#"(name: "Plain", sources: { PerfectCookie: Path("plain.png") })"#)
                .unwrap();

        assert_eq!(definition.icon, Icon::default());
        assert!(definition.to_variant().unlock.is_none());
    }
}
