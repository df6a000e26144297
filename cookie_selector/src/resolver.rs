//! Picks the skin that should be on screen.

use {
    rand::{Rng, seq::IndexedRandom},
    upgrades::{UpgradePool, Upgrades},
};

use crate::{
    registry::{RegisteredSkin, SkinRegistry},
    selection::SelectionState,
};

/// Resolves the active skin.
///
/// Until `gate` is bought the default skin is forced. Otherwise the selected
/// skin (or, in automatic mode, the last purchased one) wins when it exists
/// and is unlocked; anything else falls back to the default skin, which is
/// always considered unlocked. `None` means the default skin is not
/// registered yet.
pub fn resolve_active<'r>(
    registry: &'r SkinRegistry,
    selection: &SelectionState,
    upgrades: &Upgrades,
    gate: &str,
) -> Option<&'r RegisteredSkin> {
    let fallback = registry.default_skin();
    if !upgrades.is_bought(gate) {
        return fallback;
    }

    match registry.get(selection.candidate()) {
        Some(skin) if registry.is_default(skin) || skin.variant.is_unlocked(upgrades) => Some(skin),
        _ => fallback,
    }
}

/// Skins a soft reset may leave the player with: the default skin and every
/// skin backed by a bought prestige purchase, in registration order.
pub fn soft_reset_candidates<'r>(registry: &'r SkinRegistry, upgrades: &Upgrades) -> Vec<&'r str> {
    let kept = registry.iter().filter_map(|skin| {
        let purchase = upgrades.get(skin.variant.purchase.as_deref()?)?;
        (purchase.pool == UpgradePool::Prestige && purchase.bought).then_some(skin.name())
    });

    std::iter::once(registry.default_name())
        .chain(kept.filter(|name| *name != registry.default_name()))
        .collect()
}

/// Uniformly picks the cookie a soft reset leaves the player with.
pub fn pick_last_purchased(registry: &SkinRegistry, upgrades: &Upgrades, rng: &mut impl Rng) -> String {
    let candidates = soft_reset_candidates(registry, upgrades);
    candidates
        .choose(rng)
        .copied()
        .unwrap_or(registry.default_name())
        .to_string()
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::registry::{LoadImage, SkinVariant, UnlockRule},
        bevy::prelude::*,
        rand::{SeedableRng, rngs::StdRng},
        skin_components::AssetSource,
        upgrades::UpgradeSpec,
    };

    const GATE: &str = "Dessert showcase";

    struct NoImages;

    impl LoadImage for NoImages {
        fn load_image(&mut self, _path: &str) -> Handle<Image> {
            Handle::default()
        }
    }

    fn setup() -> (SkinRegistry, Upgrades) {
        let mut upgrades = Upgrades::default();
        upgrades.create(UpgradeSpec::new(GATE, 999, UpgradePool::Prestige));
        for name in ["Heavenly cookies", "Snowflake biscuits", "Pure heart biscuits"] {
            upgrades.create(UpgradeSpec::new(name, 10, UpgradePool::Prestige));
        }
        upgrades.create(UpgradeSpec::new("Plain cookies", 10, UpgradePool::Regular));

        let mut registry = SkinRegistry::new("D");
        registry
            .register(SkinVariant::new("D", AssetSource::Builtin), &mut NoImages)
            .unwrap();
        registry
            .register(
                SkinVariant::new("X", AssetSource::path("x.png"))
                    .unlocked_by(UnlockRule::UpgradeBought("X marks".to_string())),
                &mut NoImages,
            )
            .unwrap();
        for name in ["Heavenly cookies", "Snowflake biscuits", "Pure heart biscuits", "Plain cookies"] {
            let variant = SkinVariant::from_upgrade(upgrades.get(name).unwrap(), format!("{name}.png"));
            registry.register(variant, &mut NoImages).unwrap();
        }
        registry.seal();
        (registry, upgrades)
    }

    fn resolved<'r>(registry: &'r SkinRegistry, selection: &SelectionState, upgrades: &Upgrades) -> &'r str {
        resolve_active(registry, selection, upgrades, GATE).unwrap().name()
    }

    #[test]
    fn locked_feature_always_shows_the_default() {
        let (registry, mut upgrades) = setup();
        upgrades.get_mut("Heavenly cookies").unwrap().bought = true;

        let selection = SelectionState {
            selected_type: Some("Heavenly cookies".to_string()),
            unlock_bought: true,
            last_cookie_purchased: "Heavenly cookies".to_string(),
        };
        assert_eq!(resolved(&registry, &selection, &upgrades), "D");

        let automatic = SelectionState {
            selected_type: None,
            ..selection
        };
        assert_eq!(resolved(&registry, &automatic, &upgrades), "D");
    }

    #[test]
    fn selected_skin_needs_its_unlock() {
        let (registry, mut upgrades) = setup();
        upgrades.get_mut(GATE).unwrap().bought = true;

        let heavenly = SelectionState {
            selected_type: Some("Heavenly cookies".to_string()),
            ..default()
        };
        assert_eq!(resolved(&registry, &heavenly, &upgrades), "D");

        upgrades.get_mut("Heavenly cookies").unwrap().bought = true;
        assert_eq!(resolved(&registry, &heavenly, &upgrades), "Heavenly cookies");

        // "X" waits on an upgrade nobody created.
        let x = SelectionState {
            selected_type: Some("X".to_string()),
            ..default()
        };
        assert_eq!(resolved(&registry, &x, &upgrades), "D");
    }

    #[test]
    fn automatic_mode_follows_the_last_purchase() {
        let (registry, mut upgrades) = setup();
        upgrades.get_mut(GATE).unwrap().bought = true;
        upgrades.get_mut("Snowflake biscuits").unwrap().bought = true;

        let selection = SelectionState {
            selected_type: None,
            unlock_bought: true,
            last_cookie_purchased: "Snowflake biscuits".to_string(),
        };
        assert_eq!(resolved(&registry, &selection, &upgrades), "Snowflake biscuits");
    }

    #[test]
    fn unknown_names_fall_back_to_default() {
        let (registry, mut upgrades) = setup();
        upgrades.get_mut(GATE).unwrap().bought = true;

        let selection = SelectionState {
            selected_type: Some("Removed mod cookie".to_string()),
            ..default()
        };
        assert_eq!(resolved(&registry, &selection, &upgrades), "D");
    }

    #[test]
    fn never_resolves_a_locked_skin() {
        let (registry, mut upgrades) = setup();
        upgrades.get_mut(GATE).unwrap().bought = true;
        upgrades.get_mut("Pure heart biscuits").unwrap().bought = true;

        for skin in registry.iter() {
            let selection = SelectionState {
                selected_type: Some(skin.name().to_string()),
                ..default()
            };
            let active = resolve_active(&registry, &selection, &upgrades, GATE).unwrap();
            assert!(registry.is_default(active) || active.variant.is_unlocked(&upgrades));
        }
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let registry = SkinRegistry::new("D");
        let upgrades = Upgrades::default();
        assert!(resolve_active(&registry, &SelectionState::default(), &upgrades, GATE).is_none());
    }

    #[test]
    fn soft_reset_keeps_only_bought_prestige_cookies() {
        let (registry, mut upgrades) = setup();
        upgrades.get_mut("Heavenly cookies").unwrap().bought = true;
        upgrades.get_mut("Pure heart biscuits").unwrap().bought = true;
        upgrades.get_mut("Plain cookies").unwrap().bought = true;

        assert_eq!(
            soft_reset_candidates(&registry, &upgrades),
            vec!["D", "Heavenly cookies", "Pure heart biscuits"]
        );

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let pick = pick_last_purchased(&registry, &upgrades, &mut rng);
            assert!(["D", "Heavenly cookies", "Pure heart biscuits"].contains(&pick.as_str()));
        }
    }

    #[test]
    fn soft_reset_pick_is_reproducible_with_a_seed() {
        let (registry, mut upgrades) = setup();
        for name in ["Heavenly cookies", "Snowflake biscuits", "Pure heart biscuits"] {
            upgrades.get_mut(name).unwrap().bought = true;
        }

        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|_| pick_last_purchased(&registry, &upgrades, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(42), picks(42));
    }

    #[test]
    fn nothing_bought_means_default() {
        let (registry, upgrades) = setup();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_last_purchased(&registry, &upgrades, &mut rng), "D");
    }
}
