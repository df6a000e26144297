use {
    bevy::{log::LogPlugin, prelude::*},
    cookie_selector::SelectorConfig,
    core::CorePlugin,
    std::fs,
};

const SELECTOR_CONFIG: &str = "selector.ron";

fn main() {
    let selector = load_selector_config();

    App::new()
        .add_plugins(
            DefaultPlugins.set(LogPlugin {
                filter: "error,cookie_selector=debug,\
                    game_assets=info,\
                    upgrades=info,\
                    wallet=debug,\
                    save_load=trace,\
                    selector_ui=debug,\
                    core=info"
                    .into(),
                level: bevy::log::Level::TRACE,
                ..Default::default()
            }),
        )
        .add_plugins(CorePlugin { selector })
        .run();
}

/// Reads `selector.ron` next to the binary when it exists. Logging is not up
/// yet, so problems go to stderr.
fn load_selector_config() -> SelectorConfig {
    let Ok(source) = fs::read_to_string(SELECTOR_CONFIG) else {
        return SelectorConfig::default();
    };
    match SelectorConfig::from_ron(&source) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ignoring {SELECTOR_CONFIG}: {e}");
            SelectorConfig::default()
        }
    }
}
