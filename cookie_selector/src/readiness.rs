//! Startup of the selector.
//!
//! The selector creates its store entries right away but waits for the
//! host's own cookie image before it registers any skin, since the default
//! skin is a copy of that image.

use {
    bevy::{asset::LoadState, prelude::*},
    game_assets::{BUILTIN_IMAGES, HostAssetTable},
    shared_components::Icon,
    skin_components::AssetKind,
    states::SelectorPhase,
    std::time::Duration,
    upgrades::{UpgradePool, UpgradeSpec, Upgrades},
};

use crate::{
    builtin::{default_variant, heavenly_variants},
    config::SelectorConfig,
    definitions::{PendingSkins, SkinDefinition, SkinDefinitionHandles},
    issues::Issues,
    registry::{ServerImages, SkinRegistry},
};

#[derive(Resource, Debug)]
pub struct ReadinessPoll {
    timer: Timer,
    waited: Duration,
}

impl ReadinessPoll {
    pub fn new(interval: Duration) -> Self {
        Self {
            timer: Timer::new(interval, TimerMode::Repeating),
            waited: Duration::ZERO,
        }
    }

    pub fn waited(&self) -> Duration {
        self.waited
    }
}

/// Adds the gating prestige purchase and the selector toggle to the store.
pub fn create_selector_upgrades(mut upgrades: ResMut<Upgrades>, config: Res<SelectorConfig>) {
    let icon = Icon::with_atlas(0, 0, config.resource("pcs_icon.png"));

    let gate = upgrades.create(
        UpgradeSpec::new(&config.gating_upgrade, config.gating_cost, UpgradePool::Prestige)
            .describe(format!(
                "Unlocks the {}, letting you select your unlocked cookies as the perfect cookie on the left. \
                 Comes with a variety of basic flavors.",
                config.selector_upgrade
            ))
            .icon(icon.clone()),
    );
    gate.parents = vec![config.gating_parent.clone()];

    let toggle = upgrades.create(
        UpgradeSpec::new(&config.selector_upgrade, 0, UpgradePool::Toggle)
            .describe("Lets you change how the perfect cookie looks.")
            .icon(icon),
    );
    toggle.order = 50_000.0 + toggle.id as f32 / 1000.0;

    debug!(gate = %config.gating_upgrade, toggle = %config.selector_upgrade, "created selector upgrades");
}

pub fn load_skin_definitions(
    mut handles: ResMut<SkinDefinitionHandles>,
    asset_server: Res<AssetServer>,
    config: Res<SelectorConfig>,
) {
    handles.0 = config
        .skin_definitions
        .iter()
        .map(|path| asset_server.load(path.clone()))
        .collect();
    if !handles.0.is_empty() {
        info!(count = handles.0.len(), "loading cookie skin definitions");
    }
}

/// Waits until the host's perfect cookie image is loaded and every skin
/// definition has settled, or gives up after the configured timeout.
#[allow(clippy::too_many_arguments)]
pub fn poll_host_assets(
    time: Res<Time>,
    mut poll: ResMut<ReadinessPoll>,
    mut next_phase: ResMut<NextState<SelectorPhase>>,
    mut issues: Issues,
    table: Res<HostAssetTable>,
    images: Res<Assets<Image>>,
    handles: Res<SkinDefinitionHandles>,
    asset_server: Res<AssetServer>,
    config: Res<SelectorConfig>,
) {
    poll.waited += time.delta();
    if !poll.timer.tick(time.delta()).just_finished() {
        return;
    }

    let host_ready = table
        .get(AssetKind::PerfectCookie.slot())
        .is_some_and(|handle| images.contains(handle.id()));
    let definitions_settled = handles.0.iter().all(|handle| {
        matches!(
            asset_server.load_state(handle.id()),
            LoadState::Loaded | LoadState::Failed(_)
        )
    });

    if host_ready && definitions_settled {
        info!(waited = ?poll.waited, "host images ready, registering cookie skins");
        next_phase.set(SelectorPhase::Ready);
        return;
    }

    let timed_out = config
        .readiness_timeout()
        .is_some_and(|timeout| poll.waited >= timeout);
    if timed_out {
        error!(waited = ?poll.waited, host_ready, definitions_settled, "gave up waiting for host images");
        issues.report("couldn't find the asset image");
        next_phase.set(SelectorPhase::Unavailable);
    }
}

/// Registers every known skin and seals the registry.
///
/// Order: the default skin, the heavenly cookies, skins queued by other
/// plugins, then skin definition files.
#[allow(clippy::too_many_arguments)]
pub fn register_skins(
    mut registry: ResMut<SkinRegistry>,
    mut pending: ResMut<PendingSkins>,
    mut issues: Issues,
    table: Res<HostAssetTable>,
    upgrades: Res<Upgrades>,
    definitions: Res<Assets<SkinDefinition>>,
    handles: Res<SkinDefinitionHandles>,
    asset_server: Res<AssetServer>,
    config: Res<SelectorConfig>,
) {
    let missing = registry.capture_builtins(&table);
    if !missing.is_empty() {
        warn!(?missing, "host has no built-in image for some asset kinds");
    }
    for (slot, path) in BUILTIN_IMAGES {
        if let Some(handle) = table.get(slot) {
            registry.preload(path, handle.clone());
        }
    }

    let (heavenly, unknown) = heavenly_variants(&config, &upgrades);
    for name in unknown {
        issues.report(format!("couldn't find the {name} upgrade"));
    }

    let mut from_files = Vec::new();
    for handle in &handles.0 {
        match definitions.get(handle.id()) {
            Some(definition) => from_files.push(definition.to_variant()),
            None => {
                let path = handle.path().map(ToString::to_string).unwrap_or_default();
                issues.report(format!("couldn't load the skin definition {path}"));
            }
        }
    }

    let variants = std::iter::once(default_variant(&config))
        .chain(heavenly)
        .chain(pending.drain())
        .chain(from_files);

    let mut images = ServerImages(&asset_server);
    for variant in variants {
        match registry.register(variant, &mut images) {
            Ok(registered) => {
                for issue in registered.issues {
                    issues.report(issue);
                }
            }
            Err(err) => {
                error!(%err, "cookie skin rejected");
                issues.report(err.to_string());
            }
        }
    }

    registry.seal();
    info!(skins = registry.len(), "cookie skins registered");
}
