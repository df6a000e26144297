use {
    bevy::prelude::*,
    rand::{SeedableRng, rngs::StdRng},
    serde::{Deserialize, Deserializer, Serialize},
};

use crate::config::DEFAULT_VARIANT;

/// The player's persisted skin preference.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    /// `None` is automatic mode: show the last purchased cookie.
    #[serde(default)]
    pub selected_type: Option<String>,
    #[serde(default, alias = "huBought")]
    pub unlock_bought: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_cookie_purchased: String,
}

impl SelectionState {
    pub fn new(default_variant: impl Into<String>) -> Self {
        Self {
            selected_type: None,
            unlock_bought: false,
            last_cookie_purchased: default_variant.into(),
        }
    }

    pub fn is_automatic(&self) -> bool {
        self.selected_type.is_none()
    }

    /// The skin name the player asked for, directly or through automatic mode.
    pub fn candidate(&self) -> &str {
        self.selected_type
            .as_deref()
            .unwrap_or(&self.last_cookie_purchased)
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new(DEFAULT_VARIANT)
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Random source for the soft reset pick. Seeded from config for
/// reproducible runs.
#[derive(Resource)]
pub struct SelectorRng(pub StdRng);

impl SelectorRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_os_rng()),
        }
    }
}
