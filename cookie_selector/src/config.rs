use {
    bevy::prelude::*,
    serde::Deserialize,
    std::time::Duration,
    thiserror::Error,
};

/// Name of the skin that stands for the host's own cookie.
pub const DEFAULT_VARIANT: &str = "Default";

/// Tunables of the selector. Every field has a default, so a RON file only
/// needs the fields it changes.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Skin used whenever nothing else applies.
    pub default_variant: String,
    /// Value old saves without a last purchase are backfilled with.
    pub legacy_last_purchased: String,
    /// Prestige purchase that unlocks the selector.
    pub gating_upgrade: String,
    /// Cost of the gating purchase, in heavenly chips.
    pub gating_cost: u64,
    /// Prestige purchase the gating purchase hangs off in the heavenly tree.
    pub gating_parent: String,
    /// Toggle entry that opens the selector control.
    pub selector_upgrade: String,
    /// Directory the selector's own images live in, relative to the asset root.
    pub resource_dir: String,
    pub poll_interval_ms: u64,
    /// `None` waits for host images forever.
    pub readiness_timeout_ms: Option<u64>,
    /// Fixed seed for the soft reset pick. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    /// `*.skin.ron` assets registered alongside the built-in skins.
    pub skin_definitions: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            default_variant: DEFAULT_VARIANT.to_string(),
            legacy_last_purchased: DEFAULT_VARIANT.to_string(),
            gating_upgrade: "Dessert showcase".to_string(),
            gating_cost: 999,
            gating_parent: "Basic wallpaper assortment".to_string(),
            selector_upgrade: "Perfect cookie selector".to_string(),
            resource_dir: "mods/perfect_cookie_selector".to_string(),
            poll_interval_ms: 100,
            readiness_timeout_ms: Some(30_000),
            rng_seed: None,
            skin_definitions: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid selector config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

impl SelectorConfig {
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Path of one of the selector's own resources.
    pub fn resource(&self, name: &str) -> String {
        format!("{}/{}", self.resource_dir.trim_end_matches('/'), name)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn readiness_timeout(&self) -> Option<Duration> {
        self.readiness_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ron_keeps_defaults() {
        let config = SelectorConfig::from_ron(
            "(rng_seed: Some(7), readiness_timeout_ms: None, skin_definitions: [\"skins/mint.skin.ron\"])",
        )
        .unwrap();

        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.readiness_timeout(), None);
        assert_eq!(config.skin_definitions, vec!["skins/mint.skin.ron".to_string()]);
        assert_eq!(config.gating_upgrade, "Dessert showcase");
        assert_eq!(config.poll_interval(), Duration::from_millis(100));
    }

    #[test]
    fn broken_ron_is_an_error() {
        assert!(SelectorConfig::from_ron("(rng_seed: \"seven\")").is_err());
    }

    #[test]
    fn resources_live_under_the_resource_dir() {
        let config = SelectorConfig {
            resource_dir: "mods/pcs/".to_string(),
            ..default()
        };
        assert_eq!(
            config.resource("cookieImages/heavenly_cookies.png"),
            "mods/pcs/cookieImages/heavenly_cookies.png"
        );
    }
}
