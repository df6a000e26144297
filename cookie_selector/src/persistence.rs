//! Save blob of the selector.
//!
//! The host asks for a string when it saves and hands one back when it
//! loads; the string is the JSON form of [`SelectionState`].

use {bevy::prelude::*, thiserror::Error, upgrades::Upgrades};

use crate::{
    config::SelectorConfig,
    hooks::{refresh_active_skin, sync_toggle},
    selection::SelectionState,
};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("malformed selector save: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("failed to encode selector save: {0}")]
    Encode(#[source] serde_json::Error),
}

impl SelectionState {
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        serde_json::to_string(self).map_err(PersistenceError::Encode)
    }

    /// Parses a save. Saves from before purchases were tracked carry no
    /// last purchase; those get `legacy_default`.
    pub fn from_json(data: &str, legacy_default: &str) -> Result<Self, PersistenceError> {
        let mut state: SelectionState = serde_json::from_str(data)?;
        if state.last_cookie_purchased.is_empty() {
            state.last_cookie_purchased = legacy_default.to_string();
        }
        Ok(state)
    }
}

/// Produces the save string, refreshing the unlock flag from the live
/// gating purchase first.
pub fn export_selection(world: &mut World) -> Result<String, PersistenceError> {
    let gate = world.resource::<SelectorConfig>().gating_upgrade.clone();
    let bought = world.resource::<Upgrades>().is_bought(&gate);

    let mut selection = world.resource_mut::<SelectionState>();
    selection.unlock_bought = bought;
    selection.to_json()
}

/// Replaces the selection with a saved one and shows the result right away.
///
/// On malformed input nothing is changed and the error is returned.
pub fn apply_loaded_selection(world: &mut World, data: &str) -> Result<(), PersistenceError> {
    let legacy = world.resource::<SelectorConfig>().legacy_last_purchased.clone();
    let loaded = SelectionState::from_json(data, &legacy)?;
    apply_selection(world, loaded);
    Ok(())
}

/// Installs an already parsed selection and pushes the resulting skin. The
/// gate purchase and the toggle follow its unlock flag.
pub fn apply_selection(world: &mut World, loaded: SelectionState) {
    let config = world.resource::<SelectorConfig>().clone();
    info!(
        selected = ?loaded.selected_type,
        last_purchased = %loaded.last_cookie_purchased,
        unlock_bought = loaded.unlock_bought,
        "loaded cookie selection"
    );

    {
        let mut upgrades = world.resource_mut::<Upgrades>();
        if let Some(gate) = upgrades.get_mut(&config.gating_upgrade) {
            gate.bought = loaded.unlock_bought;
        }
        sync_toggle(&mut upgrades, &config, loaded.unlock_bought);
    }
    world.insert_resource(loaded);

    if let Err(err) = world.run_system_cached(refresh_active_skin) {
        error!(%err, "could not refresh the cookie skin after loading");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_state_survives_a_round_trip() {
        let states = [
            SelectionState::default(),
            SelectionState {
                selected_type: Some("Prism heart biscuits".to_string()),
                unlock_bought: true,
                last_cookie_purchased: "Heavenly cookies".to_string(),
            },
        ];

        for state in states {
            let json = state.to_json().unwrap();
            assert_eq!(SelectionState::from_json(&json, "Legacy").unwrap(), state);
        }
    }

    #[test]
    fn uses_camel_case_field_names() {
        let json = SelectionState::default().to_json().unwrap();
        assert_eq!(
            json,
            r#"{"selectedType":null,"unlockBought":false,"lastCookiePurchased":"Default"}"#
        );
    }

    #[test]
    fn empty_or_missing_last_purchase_is_backfilled() {
        let empty = SelectionState::from_json(
            r#"{"selectedType":"Default","unlockBought":true,"lastCookiePurchased":""}"#,
            "Plain cookies",
        )
        .unwrap();
        assert_eq!(empty.last_cookie_purchased, "Plain cookies");

        let legacy =
            SelectionState::from_json(r#"{"selectedType":"Default","huBought":true}"#, "Plain cookies")
                .unwrap();
        assert_eq!(legacy.last_cookie_purchased, "Plain cookies");
        assert!(legacy.unlock_bought);
        assert_eq!(legacy.selected_type.as_deref(), Some("Default"));

        let null = SelectionState::from_json(r#"{"lastCookiePurchased":null}"#, "Plain cookies")
            .unwrap();
        assert_eq!(null.last_cookie_purchased, "Plain cookies");
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(matches!(
            SelectionState::from_json("{not json", "Default"),
            Err(PersistenceError::Malformed(_))
        ));
        assert!(matches!(
            SelectionState::from_json(r#"{"unlockBought":"yes"}"#, "Default"),
            Err(PersistenceError::Malformed(_))
        ));
    }
}
