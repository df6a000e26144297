//! Plain data shared by everything that deals with cookie skins.

use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// A visual role of the perfect cookie.
///
/// Each kind maps to exactly one named slot in the host's asset table.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetKind {
    PerfectCookie,
    Shadow,
    BrokenHalo,
    BrokenCookie,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [
        AssetKind::PerfectCookie,
        AssetKind::Shadow,
        AssetKind::BrokenHalo,
        AssetKind::BrokenCookie,
    ];

    /// Kinds every skin has to provide a source for.
    pub const REQUIRED: [AssetKind; 1] = [AssetKind::PerfectCookie];

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    /// Name of the host asset table slot this kind is written to.
    pub fn slot(self) -> &'static str {
        match self {
            AssetKind::PerfectCookie => "perfectCookie.png",
            AssetKind::Shadow => "cookieShadow.png",
            AssetKind::BrokenHalo => "brokenCookieHalo.png",
            AssetKind::BrokenCookie => "brokenCookie.png",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::PerfectCookie => "perfect cookie",
            AssetKind::Shadow => "shadow",
            AssetKind::BrokenHalo => "broken cookie halo",
            AssetKind::BrokenCookie => "broken cookie",
        };
        f.write_str(name)
    }
}

/// Where a skin gets the image for one asset kind from.
#[derive(Reflect, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetSource {
    /// Reuse the image the host ships for this kind.
    Builtin,
    /// Load from a resource path relative to the asset root.
    Path(String),
}

impl AssetSource {
    pub fn path(path: impl Into<String>) -> Self {
        AssetSource::Path(path.into())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::collections::BTreeMap};

    #[test]
    fn slots_are_unique() {
        let mut slots: Vec<_> = AssetKind::ALL.iter().map(|kind| kind.slot()).collect();
        slots.sort();
        slots.dedup();
        assert_eq!(slots.len(), AssetKind::ALL.len());
    }

    #[test]
    fn only_perfect_cookie_is_required() {
        assert!(AssetKind::PerfectCookie.is_required());
        assert!(!AssetKind::Shadow.is_required());
        assert!(!AssetKind::BrokenHalo.is_required());
        assert!(!AssetKind::BrokenCookie.is_required());
    }

    #[test]
    fn sources_parse_from_ron_map() {
        let sources: BTreeMap<AssetKind, AssetSource> =
            ron::from_str(r#"{ PerfectCookie: Path("skins/mint.png"), Shadow: Builtin }"#)
                .unwrap();
        assert_eq!(
            sources.get(&AssetKind::PerfectCookie),
            Some(&AssetSource::path("skins/mint.png"))
        );
        assert_eq!(sources.get(&AssetKind::Shadow), Some(&AssetSource::Builtin));
    }
}
