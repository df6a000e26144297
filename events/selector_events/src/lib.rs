use bevy::prelude::*;

/// A recoverable problem the player should know about.
///
/// Raised for missing images or variants, rejected registrations and
/// readiness timeouts. The selector keeps running with its previous state.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SelectorIssue {
    pub reason: String,
}

impl SelectorIssue {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The player picked entry `index` of the selector control.
///
/// Index 0 is the automatic mode, index `i` is the `i - 1`th registered skin.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinChoicePicked {
    pub index: usize,
}

/// A different skin was written into the host asset table.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SkinApplied {
    pub variant: String,
}
