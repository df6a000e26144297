use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
};

/// Position of an icon inside a shared icon atlas.
///
/// `atlas` is `None` for the host's main icon sheet; otherwise it names the
/// resource path of a custom sheet.
#[derive(Reflect, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Icon {
    pub x: u32,
    pub y: u32,
    #[serde(default)]
    pub atlas: Option<String>,
}

impl Icon {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y, atlas: None }
    }

    pub fn with_atlas(x: u32, y: u32, atlas: impl Into<String>) -> Self {
        Self {
            x,
            y,
            atlas: Some(atlas.into()),
        }
    }
}

impl Default for Icon {
    /// The generic cookie icon of the main sheet.
    fn default() -> Self {
        Self::new(25, 12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_atlas_defaults_to_main_sheet_in_ron() {
        let icon: Icon = ron::from_str("(x: 10, y: 0)").unwrap();
        assert_eq!(icon, Icon::new(10, 0));
    }
}
