//! The host's image table.
//!
//! Rendering code looks images up by fixed slot name, so swapping the handle
//! stored under a slot is all it takes to change what is drawn.

use {
    bevy::{asset::LoadState, platform::collections::HashMap, prelude::*},
    states::GameState,
};

/// Images the host ships with, as `(slot, path)`.
pub const BUILTIN_IMAGES: [(&str, &str); 5] = [
    ("perfectCookie.png", "img/perfectCookie.png"),
    ("cookieShadow.png", "img/cookieShadow.png"),
    ("brokenCookieHalo.png", "img/brokenCookieHalo.png"),
    ("brokenCookie.png", "img/brokenCookie.png"),
    ("icons.png", "img/icons.png"),
];

pub struct AssetsPlugin;

impl Plugin for AssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HostAssetTable>()
            .add_systems(Startup, start_loading)
            .add_systems(Update, check_assets.run_if(in_state(GameState::Loading)));
    }
}

#[derive(Resource, Default, Debug)]
pub struct HostAssetTable {
    slots: HashMap<String, Handle<Image>>,
}

impl HostAssetTable {
    pub fn get(&self, slot: &str) -> Option<&Handle<Image>> {
        self.slots.get(slot)
    }

    /// Stores `handle` under `slot`. Returns `false` when the slot already
    /// held that exact handle.
    pub fn set(&mut self, slot: &str, handle: Handle<Image>) -> bool {
        if self.slots.get(slot) == Some(&handle) {
            return false;
        }
        self.slots.insert(slot.to_string(), handle);
        true
    }

    pub fn slots(&self) -> impl Iterator<Item = (&str, &Handle<Image>)> {
        self.slots.iter().map(|(slot, handle)| (slot.as_str(), handle))
    }
}

fn start_loading(mut table: ResMut<HostAssetTable>, asset_server: Res<AssetServer>) {
    info!("started loading host images");
    for (slot, path) in BUILTIN_IMAGES {
        table.set(slot, asset_server.load(path));
    }
}

fn check_assets(
    mut next_state: ResMut<NextState<GameState>>,
    table: Res<HostAssetTable>,
    asset_server: Res<AssetServer>,
) {
    let mut failed = Vec::new();
    let settled = BUILTIN_IMAGES.iter().all(|(slot, _)| {
        let Some(handle) = table.get(slot) else {
            return false;
        };
        match asset_server.load_state(handle.id()) {
            LoadState::Loaded => true,
            LoadState::Failed(_) => {
                failed.push(*slot);
                true
            }
            _ => false,
        }
    });

    if settled {
        if !failed.is_empty() {
            warn!(?failed, "some host images failed to load");
        }
        info!("host images settled, entering Running state");
        next_state.set(GameState::Running);
    }
}
