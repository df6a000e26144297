mod builtin;
mod choices;
mod config;
mod definitions;
mod hooks;
mod issues;
mod persistence;
mod readiness;
mod registry;
mod resolver;
mod selection;


pub use builtin::*;
pub use choices::*;
pub use config::*;
pub use definitions::*;
pub use hooks::{AppliedSkin, refresh_active_skin};
pub use issues::*;
pub use persistence::*;
pub use readiness::ReadinessPoll;
pub use registry::*;
pub use resolver::*;
pub use selection::*;

use {
    bevy::prelude::*, bevy_common_assets::ron::RonAssetPlugin, hooks::*, readiness::*,
    states::SelectorPhase,
};

/// Lets the player pick which unlocked cookie is drawn as the perfect cookie.
///
/// Needs the host's [`upgrades::UpgradesPlugin`], a
/// [`game_assets::HostAssetTable`] and the asset and state plugins.
#[derive(Default)]
pub struct SelectorPlugin {
    pub config: SelectorConfig,
}

impl SelectorPlugin {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }
}

impl Plugin for SelectorPlugin {
    fn build(&self, app: &mut App) {
        let config = &self.config;
        app
            // Asset loading
            .add_plugins(RonAssetPlugin::<SkinDefinition>::new(&["skin.ron"]))
            .init_state::<SelectorPhase>()
            // Resources
            .insert_resource(config.clone())
            .insert_resource(SkinRegistry::new(&config.default_variant))
            .insert_resource(SelectionState::new(&config.default_variant))
            .insert_resource(SelectorRng::new(config.rng_seed))
            .insert_resource(ReadinessPoll::new(config.poll_interval()))
            .init_resource::<AppliedSkin>()
            .init_resource::<IssueLog>()
            .init_resource::<PendingSkins>()
            .init_resource::<SkinDefinitionHandles>()
            // Startup and readiness
            .add_systems(Startup, (create_selector_upgrades, load_skin_definitions))
            .add_systems(
                Update,
                poll_host_assets.run_if(in_state(SelectorPhase::WaitingForHostAssets)),
            )
            .add_systems(
                OnEnter(SelectorPhase::Ready),
                (register_skins, sync_unlock_flags, refresh_active_skin).chain(),
            )
            // Logic tick
            .add_systems(
                Update,
                (
                    report_failed_skin_images,
                    reject_late_skins,
                    reject_late_definitions,
                    refresh_active_skin,
                )
                    .chain()
                    .run_if(in_state(SelectorPhase::Ready)),
            )
            // Host hooks
            .add_observer(on_game_reset)
            .add_observer(on_reincarnated)
            .add_observer(on_purchase_completed)
            .add_observer(on_choice_picked);
    }
}
