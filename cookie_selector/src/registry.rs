//! Known cookie skins and the images they resolve to.
//!
//! Skins are registered once while the selector starts up and the registry
//! is sealed afterwards. It keeps insertion order, which is what the numeric
//! selector indices refer to, next to a name lookup used for resolution.

use {
    bevy::{platform::collections::HashMap, prelude::*},
    game_assets::HostAssetTable,
    shared_components::Icon,
    skin_components::{AssetKind, AssetSource},
    std::{collections::BTreeMap, fmt, sync::Arc},
    thiserror::Error,
    upgrades::{Upgrade, Upgrades},
};

use crate::config::DEFAULT_VARIANT;

pub type ImageBundle = BTreeMap<AssetKind, Handle<Image>>;

/// Decides whether a skin may currently be shown.
#[derive(Clone)]
pub enum UnlockRule {
    /// Unlocked once the named upgrade has been bought.
    UpgradeBought(String),
    /// Anything else, evaluated against live purchase state.
    Custom(Arc<dyn Fn(&Upgrades) -> bool + Send + Sync>),
}

impl UnlockRule {
    pub fn custom(rule: impl Fn(&Upgrades) -> bool + Send + Sync + 'static) -> Self {
        UnlockRule::Custom(Arc::new(rule))
    }

    pub fn is_met(&self, upgrades: &Upgrades) -> bool {
        match self {
            UnlockRule::UpgradeBought(name) => upgrades.is_bought(name),
            UnlockRule::Custom(rule) => rule(upgrades),
        }
    }
}

impl fmt::Debug for UnlockRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnlockRule::UpgradeBought(name) => f.debug_tuple("UpgradeBought").field(name).finish(),
            UnlockRule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Description of a skin before its images are resolved.
#[derive(Debug, Clone)]
pub struct SkinVariant {
    pub name: String,
    pub icon: Icon,
    /// `None` means always unlocked.
    pub unlock: Option<UnlockRule>,
    /// Purchase this skin stands for, if any.
    pub purchase: Option<String>,
    pub sources: BTreeMap<AssetKind, AssetSource>,
}

impl SkinVariant {
    pub fn new(name: impl Into<String>, perfect_cookie: AssetSource) -> Self {
        Self {
            name: name.into(),
            icon: Icon::default(),
            unlock: None,
            purchase: None,
            sources: BTreeMap::from([(AssetKind::PerfectCookie, perfect_cookie)]),
        }
    }

    /// A skin backed by a cookie upgrade: same name and icon, unlocked once
    /// the upgrade is bought.
    pub fn from_upgrade(upgrade: &Upgrade, perfect_cookie: impl Into<String>) -> Self {
        Self {
            name: upgrade.name.clone(),
            icon: upgrade.icon.clone(),
            unlock: Some(UnlockRule::UpgradeBought(upgrade.name.clone())),
            purchase: Some(upgrade.name.clone()),
            sources: BTreeMap::from([(
                AssetKind::PerfectCookie,
                AssetSource::Path(perfect_cookie.into()),
            )]),
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_source(mut self, kind: AssetKind, source: AssetSource) -> Self {
        self.sources.insert(kind, source);
        self
    }

    pub fn unlocked_by(mut self, rule: UnlockRule) -> Self {
        self.unlock = Some(rule);
        self
    }

    pub fn is_unlocked(&self, upgrades: &Upgrades) -> bool {
        self.unlock.as_ref().is_none_or(|rule| rule.is_met(upgrades))
    }
}

/// Loads images by resource path.
pub trait LoadImage {
    fn load_image(&mut self, path: &str) -> Handle<Image>;
}

/// [`LoadImage`] backed by the asset server.
pub struct ServerImages<'a>(pub &'a AssetServer);

impl LoadImage for ServerImages<'_> {
    fn load_image(&mut self, path: &str) -> Handle<Image> {
        self.0.load(path.to_string())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("skin `{name}` has no {kind} image")]
    MissingRequiredAsset { name: String, kind: AssetKind },
    #[error("a skin named `{0}` is already registered")]
    Duplicate(String),
    #[error("skin `{0}` arrived after the skin list was sealed")]
    Sealed(String),
}

/// Outcome of a successful registration.
#[derive(Debug)]
pub struct Registered {
    pub index: usize,
    /// Problems that did not stop the registration.
    pub issues: Vec<String>,
}

#[derive(Debug)]
pub struct RegisteredSkin {
    pub variant: SkinVariant,
    pub images: ImageBundle,
}

impl RegisteredSkin {
    pub fn name(&self) -> &str {
        &self.variant.name
    }
}

#[derive(Resource, Debug)]
pub struct SkinRegistry {
    skins: Vec<RegisteredSkin>,
    by_name: HashMap<String, usize>,
    /// Keyed by raw source path so shared images load once.
    image_cache: HashMap<String, Handle<Image>>,
    /// The host's own images, captured before any skin was pushed.
    builtins: ImageBundle,
    failed: Vec<AssetId<Image>>,
    default_name: String,
    sealed: bool,
}

impl Default for SkinRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_VARIANT)
    }
}

impl SkinRegistry {
    pub fn new(default_name: impl Into<String>) -> Self {
        Self {
            skins: Vec::new(),
            by_name: HashMap::default(),
            image_cache: HashMap::default(),
            builtins: ImageBundle::new(),
            failed: Vec::new(),
            default_name: default_name.into(),
            sealed: false,
        }
    }

    /// Remembers the host's current image for every asset kind. Returns the
    /// kinds the host has no image for.
    pub fn capture_builtins(&mut self, table: &HostAssetTable) -> Vec<AssetKind> {
        let mut missing = Vec::new();
        for kind in AssetKind::ALL {
            match table.get(kind.slot()) {
                Some(handle) => {
                    self.builtins.insert(kind, handle.clone());
                }
                None => missing.push(kind),
            }
        }
        missing
    }

    pub fn builtin(&self, kind: AssetKind) -> Option<&Handle<Image>> {
        self.builtins.get(&kind)
    }

    /// Makes skins that name `path` reuse an image that is already loaded.
    pub fn preload(&mut self, path: impl Into<String>, handle: Handle<Image>) {
        self.image_cache.insert(path.into(), handle);
    }

    pub fn register(
        &mut self,
        variant: SkinVariant,
        images: &mut impl LoadImage,
    ) -> Result<Registered, RegistrationError> {
        if self.sealed {
            return Err(RegistrationError::Sealed(variant.name));
        }
        if self.by_name.contains_key(&variant.name) {
            return Err(RegistrationError::Duplicate(variant.name));
        }
        if let Some(kind) = AssetKind::REQUIRED
            .into_iter()
            .find(|kind| !variant.sources.contains_key(kind))
        {
            return Err(RegistrationError::MissingRequiredAsset {
                name: variant.name,
                kind,
            });
        }

        let mut issues = Vec::new();
        let mut bundle = ImageBundle::new();
        for (&kind, source) in &variant.sources {
            let handle = match source {
                AssetSource::Path(path) => self
                    .image_cache
                    .entry(path.clone())
                    .or_insert_with(|| images.load_image(path))
                    .clone(),
                AssetSource::Builtin => match self.builtins.get(&kind) {
                    Some(handle) => handle.clone(),
                    None => {
                        issues.push(format!(
                            "couldn't find the built-in {kind} image for {}",
                            variant.name
                        ));
                        Handle::default()
                    }
                },
            };
            bundle.insert(kind, handle);
        }

        let index = self.skins.len();
        debug!(skin = %variant.name, index, "registered cookie skin");
        self.by_name.insert(variant.name.clone(), index);
        self.skins.push(RegisteredSkin {
            variant,
            images: bundle,
        });

        Ok(Registered { index, issues })
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredSkin> {
        self.by_name.get(name).map(|&index| &self.skins[index])
    }

    pub fn by_index(&self, index: usize) -> Option<&RegisteredSkin> {
        self.skins.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredSkin> {
        self.skins.iter()
    }

    pub fn len(&self) -> usize {
        self.skins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skins.is_empty()
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    pub fn default_skin(&self) -> Option<&RegisteredSkin> {
        self.get(&self.default_name)
    }

    pub fn is_default(&self, skin: &RegisteredSkin) -> bool {
        skin.name() == self.default_name
    }

    /// Records that an image failed to load. Returns the skins and kinds
    /// that used it.
    pub fn mark_failed(&mut self, id: AssetId<Image>) -> Vec<(String, AssetKind)> {
        let owners: Vec<_> = self
            .skins
            .iter()
            .flat_map(|skin| {
                skin.images
                    .iter()
                    .filter(move |(_, handle)| handle.id() == id)
                    .map(move |(&kind, _)| (skin.name().to_string(), kind))
            })
            .collect();
        if !owners.is_empty() && !self.failed.contains(&id) {
            self.failed.push(id);
        }
        owners
    }

    pub fn has_failed(&self, id: AssetId<Image>) -> bool {
        self.failed.contains(&id)
    }

    fn is_usable(&self, handle: &Handle<Image>) -> bool {
        *handle != Handle::default() && !self.failed.contains(&handle.id())
    }

    /// The handles to write into the host table for `skin`, one per slot.
    ///
    /// Optional kinds the skin does not provide fall back to the host's
    /// built-in image. Fails with the first required kind that has no usable
    /// image.
    pub fn bundle_for(
        &self,
        skin: &RegisteredSkin,
    ) -> Result<Vec<(AssetKind, Handle<Image>)>, AssetKind> {
        let mut writes = Vec::with_capacity(AssetKind::ALL.len());
        for kind in AssetKind::ALL {
            let own = skin.images.get(&kind).filter(|h| self.is_usable(h));
            match own {
                Some(handle) => writes.push((kind, handle.clone())),
                None if kind.is_required() => return Err(kind),
                None => {
                    if let Some(builtin) = self.builtins.get(&kind).filter(|h| self.is_usable(h)) {
                        writes.push((kind, builtin.clone()));
                    }
                }
            }
        }
        Ok(writes)
    }
}
