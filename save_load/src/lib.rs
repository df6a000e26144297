//! Save/Load system for persisting game state.
//!
//! This crate provides:
//! - F5 keyboard shortcut for manual saves
//! - F9 keyboard shortcut to load the latest manual save, F8 for the autosave
//! - Automatic saves every 1 minute
//! - DateTime-based save file naming
//!
//! Saves are JSON. Mods store an opaque string under their own key, which is
//! how the cookie selector's state travels with the game.

use {
    bevy::prelude::*,
    chrono::{DateTime, Local},
    cookie_selector::{
        PersistenceError, SelectionState, SelectorConfig, apply_selection, export_selection,
    },
    serde::{Deserialize, Serialize},
    states::GameState,
    std::{
        collections::{BTreeMap, HashMap},
        fs,
        path::{Path, PathBuf},
    },
    thiserror::Error,
    upgrades::Upgrades,
    wallet::Wallet,
};

/// Key of the cookie selector's blob in [`SaveFile::mods`].
pub const SELECTOR_SAVE_KEY: &str = "perfectCookieSelector";
pub const AUTOSAVE_FILE: &str = "autosave.json";

/// Event to trigger loading the latest save file.
#[derive(Event)]
pub struct LoadGame {
    pub is_autosave: bool,
}

/// Timer resource for automatic saves.
#[derive(Resource)]
pub struct AutosaveTimer(Timer);

impl Default for AutosaveTimer {
    fn default() -> Self {
        // 1 minute autosave interval
        Self(Timer::from_seconds(60.0, TimerMode::Repeating))
    }
}

/// Directory save files are written to.
#[derive(Resource, Debug, Clone)]
pub struct SaveDir(pub PathBuf);

impl Default for SaveDir {
    fn default() -> Self {
        Self(PathBuf::from("saves"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub saved_at: String,
    pub wallet: HashMap<String, u64>,
    /// Names of every bought upgrade.
    pub bought: Vec<String>,
    #[serde(default)]
    pub mods: BTreeMap<String, String>,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Selector(#[from] PersistenceError),
    #[error("no save files in {0}")]
    NoSaves(PathBuf),
}

pub struct SaveLoadPlugin;

impl Plugin for SaveLoadPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AutosaveTimer>()
            .init_resource::<SaveDir>()
            .add_systems(
                Update,
                trigger_load_on_keypress.run_if(in_state(GameState::Running)),
            )
            .add_systems(
                PostUpdate,
                execute_save.run_if(in_state(GameState::Running)),
            )
            .add_observer(execute_load)
            .add_systems(OnExit(GameState::Running), clean_up_save_load);
    }
}

pub fn save_file_name(is_autosave: bool, now: DateTime<Local>) -> String {
    if is_autosave {
        AUTOSAVE_FILE.to_string()
    } else {
        format!("save_{}.json", now.format("%Y-%m-%d_%H-%M-%S"))
    }
}

/// Collects everything that goes into a save.
pub fn snapshot(world: &mut World) -> Result<SaveFile, SaveError> {
    let selector = export_selection(world)?;
    let wallet = world.resource::<Wallet>().resources.clone();
    let bought = world
        .resource::<Upgrades>()
        .iter()
        .filter(|upgrade| upgrade.bought)
        .map(|upgrade| upgrade.name.clone())
        .collect();

    Ok(SaveFile {
        saved_at: Local::now().to_rfc3339(),
        wallet,
        bought,
        mods: BTreeMap::from([(SELECTOR_SAVE_KEY.to_string(), selector)]),
    })
}

/// Puts a save back into the world.
///
/// The selector blob is parsed before anything is touched, so a broken one
/// leaves the running game as it was. Host state is then restored ahead of
/// the selection so the selector sees the loaded purchases.
pub fn restore(world: &mut World, save: &SaveFile) -> Result<(), SaveError> {
    let selection = match save.mods.get(SELECTOR_SAVE_KEY) {
        Some(data) => {
            let legacy = world.resource::<SelectorConfig>().legacy_last_purchased.clone();
            Some(SelectionState::from_json(data, &legacy)?)
        }
        None => {
            debug!("save has no cookie selector data");
            None
        }
    };

    world.resource_mut::<Wallet>().resources = save.wallet.clone();

    let mut upgrades = world.resource_mut::<Upgrades>();
    let names: Vec<String> = upgrades.iter().map(|upgrade| upgrade.name.clone()).collect();
    for name in names {
        if let Some(upgrade) = upgrades.get_mut(&name) {
            upgrade.bought = save.bought.contains(&name);
        }
    }

    if let Some(selection) = selection {
        apply_selection(world, selection);
    }
    Ok(())
}

pub fn write_save(world: &mut World, dir: &Path, is_autosave: bool) -> Result<PathBuf, SaveError> {
    let save = snapshot(world)?;
    fs::create_dir_all(dir)?;
    let filepath = dir.join(save_file_name(is_autosave, Local::now()));
    fs::write(&filepath, serde_json::to_string_pretty(&save)?)?;
    Ok(filepath)
}

pub fn read_save(path: &Path) -> Result<SaveFile, SaveError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Exclusive system that handles manual and automatic saves.
fn execute_save(world: &mut World) {
    let manual_triggered = world
        .get_resource::<ButtonInput<KeyCode>>()
        .is_some_and(|keyboard| keyboard.just_pressed(KeyCode::F5));

    let is_autosave = if manual_triggered {
        info!("Manual save triggered (F5)");
        // Reset autosave timer on manual save to avoid back-to-back saves
        world.resource_mut::<AutosaveTimer>().0.reset();
        false
    } else {
        let delta = world.resource::<Time>().delta();
        if !world.resource_mut::<AutosaveTimer>().0.tick(delta).just_finished() {
            return;
        }
        info!("Autosave triggered");
        true
    };

    let dir = world.resource::<SaveDir>().0.clone();
    match write_save(world, &dir, is_autosave) {
        Ok(path) => info!("Game saved to {}", path.display()),
        Err(e) => error!("Failed to save game: {}", e),
    }
}

/// Triggers a load when F9 or F8 is pressed.
fn trigger_load_on_keypress(keyboard: Res<ButtonInput<KeyCode>>, mut commands: Commands) {
    if keyboard.just_pressed(KeyCode::F9) {
        info!("Load triggered (F9)");
        commands.trigger(LoadGame { is_autosave: false });
    }

    if keyboard.just_pressed(KeyCode::F8) {
        info!("Load triggered (F8)");
        commands.trigger(LoadGame { is_autosave: true });
    }
}

/// Observer that handles the LoadGame event.
fn execute_load(trigger: On<LoadGame>, mut commands: Commands, dir: Res<SaveDir>) {
    let is_autosave = trigger.event().is_autosave;
    let dir = dir.0.clone();

    commands.queue(move |world: &mut World| {
        let result = latest_save(&dir, is_autosave).and_then(|path| {
            info!("Loading save file: {}", path.display());
            let save = read_save(&path)?;
            restore(world, &save)
        });
        if let Err(e) = result {
            warn!("Failed to load game: {}", e);
        }
    });
}

fn latest_save(dir: &Path, is_autosave: bool) -> Result<PathBuf, SaveError> {
    if is_autosave {
        return Ok(dir.join(AUTOSAVE_FILE));
    }
    find_latest_save(dir).ok_or_else(|| SaveError::NoSaves(dir.to_path_buf()))
}

/// Finds the most recent manual save file in the saves directory.
fn find_latest_save(saves_dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(saves_dir).ok()?;

    entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| name.starts_with("save_"))
        })
        .max_by_key(|e| e.metadata().and_then(|m| m.modified()).ok())
        .map(|e| e.path())
}

pub fn clean_up_save_load(mut timer: ResMut<AutosaveTimer>) {
    // Reset timer to default (1 minute)
    *timer = AutosaveTimer::default();
}
