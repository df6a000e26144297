//! What the selector control offers and how a pick maps back to a skin.
//!
//! Index 0 is the automatic mode; index `i` is registry entry `i - 1`.

use {shared_components::Icon, thiserror::Error, upgrades::Upgrades};

use crate::{registry::SkinRegistry, selection::SelectionState};

pub const AUTOMATIC: &str = "Automatic";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorChoice {
    pub name: String,
    pub icon: Icon,
    pub selected: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PickError {
    #[error("there is no cookie choice number {0}")]
    OutOfRange(usize),
    #[error("the `{0}` cookie isn't unlocked yet")]
    Locked(String),
}

/// Entries of the selector control, aligned with the pick indices. Locked
/// skins are `None` so the remaining entries keep their index.
pub fn selector_choices(
    registry: &SkinRegistry,
    selection: &SelectionState,
    upgrades: &Upgrades,
    automatic_icon: &Icon,
) -> Vec<Option<SelectorChoice>> {
    let automatic = SelectorChoice {
        name: AUTOMATIC.to_string(),
        icon: automatic_icon.clone(),
        selected: selection.is_automatic(),
    };

    let skins = registry.iter().map(|skin| {
        let visible = registry.is_default(skin) || skin.variant.is_unlocked(upgrades);
        visible.then(|| SelectorChoice {
            name: skin.name().to_string(),
            icon: skin.variant.icon.clone(),
            selected: selection.selected_type.as_deref() == Some(skin.name()),
        })
    });

    std::iter::once(Some(automatic)).chain(skins).collect()
}

/// Turns a pick into the new `selected_type`. `Ok(None)` is automatic mode.
pub fn pick_choice(
    index: usize,
    registry: &SkinRegistry,
    upgrades: &Upgrades,
) -> Result<Option<String>, PickError> {
    let Some(position) = index.checked_sub(1) else {
        return Ok(None);
    };
    let skin = registry
        .by_index(position)
        .ok_or(PickError::OutOfRange(index))?;
    if !registry.is_default(skin) && !skin.variant.is_unlocked(upgrades) {
        return Err(PickError::Locked(skin.name().to_string()));
    }
    Ok(Some(skin.name().to_string()))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::registry::{LoadImage, SkinVariant, UnlockRule},
        bevy::prelude::*,
        skin_components::AssetSource,
        upgrades::{UpgradePool, UpgradeSpec},
    };

    struct NoImages;

    impl LoadImage for NoImages {
        fn load_image(&mut self, _path: &str) -> Handle<Image> {
            Handle::default()
        }
    }

    fn setup() -> (SkinRegistry, Upgrades) {
        let mut upgrades = Upgrades::default();
        upgrades.create(UpgradeSpec::new("Heavenly cookies", 10, UpgradePool::Prestige));

        let mut registry = SkinRegistry::new("Default");
        for variant in [
            SkinVariant::new("Default", AssetSource::Builtin).with_icon(Icon::new(10, 0)),
            SkinVariant::new("Heavenly cookies", AssetSource::path("heavenly.png"))
                .unlocked_by(UnlockRule::UpgradeBought("Heavenly cookies".to_string())),
            SkinVariant::new("Always", AssetSource::path("always.png")),
        ] {
            registry.register(variant, &mut NoImages).unwrap();
        }
        registry.seal();
        (registry, upgrades)
    }

    #[test]
    fn locked_entries_keep_their_slot() {
        let (registry, upgrades) = setup();
        let selection = SelectionState::default();

        let choices = selector_choices(&registry, &selection, &upgrades, &Icon::default());

        assert_eq!(choices.len(), registry.len() + 1);
        assert_eq!(choices[0].as_ref().unwrap().name, AUTOMATIC);
        assert!(choices[0].as_ref().unwrap().selected);
        assert_eq!(choices[1].as_ref().unwrap().icon, Icon::new(10, 0));
        assert!(choices[2].is_none());
        assert_eq!(choices[3].as_ref().unwrap().name, "Always");
    }

    #[test]
    fn marks_the_selected_skin() {
        let (registry, mut upgrades) = setup();
        upgrades.get_mut("Heavenly cookies").unwrap().bought = true;
        let selection = SelectionState {
            selected_type: Some("Heavenly cookies".to_string()),
            ..default()
        };

        let choices = selector_choices(&registry, &selection, &upgrades, &Icon::default());
        let selected: Vec<_> = choices
            .iter()
            .flatten()
            .filter(|choice| choice.selected)
            .map(|choice| choice.name.as_str())
            .collect();

        assert_eq!(selected, vec!["Heavenly cookies"]);
    }

    #[test]
    fn picks_map_to_registry_entries() {
        let (registry, mut upgrades) = setup();

        assert_eq!(pick_choice(0, &registry, &upgrades), Ok(None));
        assert_eq!(pick_choice(1, &registry, &upgrades), Ok(Some("Default".to_string())));
        assert_eq!(
            pick_choice(2, &registry, &upgrades),
            Err(PickError::Locked("Heavenly cookies".to_string()))
        );
        assert_eq!(pick_choice(4, &registry, &upgrades), Err(PickError::OutOfRange(4)));

        upgrades.get_mut("Heavenly cookies").unwrap().bought = true;
        assert_eq!(
            pick_choice(2, &registry, &upgrades),
            Ok(Some("Heavenly cookies".to_string()))
        );
    }
}
