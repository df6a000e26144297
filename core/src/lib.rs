use {
    bevy::prelude::*,
    cookie_selector::{SelectorConfig, SelectorPlugin},
    game_assets::AssetsPlugin,
    notification_ui::NotificationUiPlugin,
    save_load::SaveLoadPlugin,
    selector_ui::SelectorUiPlugin,
    states::GameState,
    upgrades::UpgradesPlugin,
    wallet::WalletPlugin,
};

mod systems;

#[derive(Default)]
pub struct CorePlugin {
    pub selector: SelectorConfig,
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_plugins((WalletPlugin, UpgradesPlugin, AssetsPlugin))
            .add_plugins(SelectorPlugin::new(self.selector.clone()))
            .add_plugins((SaveLoadPlugin, NotificationUiPlugin, SelectorUiPlugin))
            .add_systems(Startup, (setup_camera, systems::seed_host_catalogue))
            .add_systems(OnEnter(GameState::Running), systems::spawn_perfect_cookie)
            .add_systems(
                Update,
                (systems::sync_perfect_cookie_sprites, systems::handle_host_keys)
                    .run_if(in_state(GameState::Running)),
            );
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
