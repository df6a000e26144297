//! Reactions to host lifecycle events.
//!
//! Every reaction funnels into [`refresh_active_skin`], which resolves the
//! skin and writes its images into the host asset table.

use {
    bevy::{asset::AssetLoadFailedEvent, prelude::*},
    game_assets::HostAssetTable,
    game_events::{GameReset, PurchaseCompleted, Reincarnated},
    selector_events::{SkinApplied, SkinChoicePicked},
    upgrades::Upgrades,
};

use crate::{
    choices::pick_choice,
    config::SelectorConfig,
    definitions::{PendingSkins, SkinDefinition, SkinDefinitionHandles},
    issues::Issues,
    registry::{ServerImages, SkinRegistry},
    resolver::{pick_last_purchased, resolve_active},
    selection::{SelectionState, SelectorRng},
};

/// Name of the skin whose images are currently in the host table.
#[derive(Resource, Debug, Default)]
pub struct AppliedSkin(pub Option<String>);

/// Resolves the active skin and pushes its images into the host table.
///
/// Does nothing until the registry is sealed. Slots that already hold the
/// right image are left alone, so running this every frame is cheap. When
/// the skin or one of its required images cannot be found, the issue is
/// reported and the previous images stay, unless the image on screen is the
/// one that failed; then the default skin is shown.
#[allow(clippy::too_many_arguments)]
pub fn refresh_active_skin(
    mut commands: Commands,
    mut issues: Issues,
    mut table: ResMut<HostAssetTable>,
    mut applied: ResMut<AppliedSkin>,
    registry: Res<SkinRegistry>,
    selection: Res<SelectionState>,
    upgrades: Res<Upgrades>,
    config: Res<SelectorConfig>,
) {
    if !registry.is_sealed() {
        return;
    }

    let Some(skin) = resolve_active(&registry, &selection, &upgrades, &config.gating_upgrade)
    else {
        issues.report("couldn't find a perfect cookie type");
        return;
    };

    let (skin, writes) = match registry.bundle_for(skin) {
        Ok(writes) => {
            issues.resolved();
            (skin, writes)
        }
        Err(kind) => {
            issues.report(format!("couldn't find the {kind} image of {}", skin.name()));
            // A broken image already on screen gives way to the default skin.
            let broken = table
                .get(kind.slot())
                .is_some_and(|shown| registry.has_failed(shown.id()));
            let Some(fallback) = registry.default_skin().filter(|_| broken) else {
                return;
            };
            let Ok(writes) = registry.bundle_for(fallback) else {
                return;
            };
            warn!(variant = %fallback.name(), "shown cookie image failed, falling back");
            (fallback, writes)
        }
    };

    let mut changed = 0;
    for (kind, handle) in writes {
        if table.set(kind.slot(), handle) {
            changed += 1;
        }
    }

    if applied.0.as_deref() != Some(skin.name()) {
        info!(variant = %skin.name(), slots = changed, "applied cookie skin");
        applied.0 = Some(skin.name().to_string());
        commands.trigger(SkinApplied {
            variant: skin.name().to_string(),
        });
    } else if changed > 0 {
        debug!(variant = %skin.name(), slots = changed, "restored cookie skin images");
    }
}

/// Shows or hides the selector toggle in the store.
pub fn sync_toggle(upgrades: &mut Upgrades, config: &SelectorConfig, unlocked: bool) {
    if let Some(toggle) = upgrades.get_mut(&config.selector_upgrade) {
        toggle.unlocked = unlocked;
    }
}

/// Copies the gating purchase into the persisted flag and the toggle.
pub fn sync_unlock_flags(
    mut upgrades: ResMut<Upgrades>,
    mut selection: ResMut<SelectionState>,
    config: Res<SelectorConfig>,
) {
    let bought = upgrades.is_bought(&config.gating_upgrade);
    selection.unlock_bought = bought;
    sync_toggle(&mut upgrades, &config, bought);
}

pub fn on_game_reset(
    trigger: On<GameReset>,
    mut commands: Commands,
    mut selection: ResMut<SelectionState>,
    mut upgrades: ResMut<Upgrades>,
    mut rng: ResMut<SelectorRng>,
    registry: Res<SkinRegistry>,
    config: Res<SelectorConfig>,
) {
    if trigger.event().hard {
        info!("hard reset, clearing cookie selection");
        selection.selected_type = None;
        selection.unlock_bought = false;
        selection.last_cookie_purchased = config.default_variant.clone();
        sync_toggle(&mut upgrades, &config, false);
    } else {
        selection.last_cookie_purchased = pick_last_purchased(&registry, &upgrades, &mut rng.0);
        debug!(last_purchased = %selection.last_cookie_purchased, "soft reset picked a cookie");
    }
    commands.run_system_cached(refresh_active_skin);
}

pub fn on_reincarnated(
    _trigger: On<Reincarnated>,
    mut commands: Commands,
    mut selection: ResMut<SelectionState>,
    mut upgrades: ResMut<Upgrades>,
    mut rng: ResMut<SelectorRng>,
    registry: Res<SkinRegistry>,
    config: Res<SelectorConfig>,
) {
    let was_unlocked = selection.unlock_bought;
    let unlocked = upgrades.is_bought(&config.gating_upgrade);
    selection.unlock_bought = unlocked;
    sync_toggle(&mut upgrades, &config, unlocked);

    if unlocked && !was_unlocked {
        selection.last_cookie_purchased = pick_last_purchased(&registry, &upgrades, &mut rng.0);
        info!(last_purchased = %selection.last_cookie_purchased, "cookie selector unlocked");
    }
    commands.run_system_cached(refresh_active_skin);
}

pub fn on_purchase_completed(
    trigger: On<PurchaseCompleted>,
    mut selection: ResMut<SelectionState>,
    registry: Res<SkinRegistry>,
) {
    let event = trigger.event();
    if event.success && registry.get(&event.upgrade).is_some() {
        debug!(variant = %event.upgrade, "last purchased cookie changed");
        selection.last_cookie_purchased = event.upgrade.clone();
    }
}

pub fn on_choice_picked(
    trigger: On<SkinChoicePicked>,
    mut commands: Commands,
    mut issues: Issues,
    mut selection: ResMut<SelectionState>,
    registry: Res<SkinRegistry>,
    upgrades: Res<Upgrades>,
) {
    let index = trigger.event().index;
    match pick_choice(index, &registry, &upgrades) {
        Ok(selected) => {
            info!(index, selected = ?selected, "cookie skin picked");
            selection.selected_type = selected;
            commands.run_system_cached(refresh_active_skin);
        }
        Err(err) => issues.report(err.to_string()),
    }
}

/// Stops using skin images that failed to load.
pub fn report_failed_skin_images(
    mut failures: MessageReader<AssetLoadFailedEvent<Image>>,
    mut registry: ResMut<SkinRegistry>,
    mut issues: Issues,
) {
    for failure in failures.read() {
        for (skin, kind) in registry.mark_failed(failure.id) {
            error!(variant = %skin, %kind, path = %failure.path, "cookie skin image failed to load");
            issues.report(format!("couldn't load the {kind} image of {skin}"));
        }
    }
}

/// Skins pushed after the registry was sealed are refused.
pub fn reject_late_skins(
    mut pending: ResMut<PendingSkins>,
    mut registry: ResMut<SkinRegistry>,
    mut issues: Issues,
    asset_server: Res<AssetServer>,
) {
    if pending.is_empty() {
        return;
    }
    let mut images = ServerImages(&asset_server);
    for variant in pending.drain() {
        if let Err(err) = registry.register(variant, &mut images) {
            error!(%err, "cookie skin rejected");
            issues.report(err.to_string());
        }
    }
}

/// Same for definition assets that finished loading after the seal.
pub fn reject_late_definitions(
    mut events: MessageReader<AssetEvent<SkinDefinition>>,
    definitions: Res<Assets<SkinDefinition>>,
    handled: Res<SkinDefinitionHandles>,
    mut issues: Issues,
) {
    for event in events.read() {
        let AssetEvent::LoadedWithDependencies { id } = event else {
            continue;
        };
        if handled.contains(*id) {
            continue;
        }
        if let Some(definition) = definitions.get(*id) {
            warn!(variant = %definition.name, "skin definition arrived after the skin list was sealed");
            issues.report(format!(
                "skin `{}` arrived after the skin list was sealed",
                definition.name
            ));
        }
    }
}
