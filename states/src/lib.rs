use bevy::prelude::*;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Loading,
    Running,
}

/// Lifecycle of the perfect cookie selector.
///
/// The selector stays in `WaitingForHostAssets` until the host has its own
/// built-in cookie images in the asset table. Only `Ready` pushes skins.
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorPhase {
    #[default]
    WaitingForHostAssets,
    Ready,
    /// Host assets never showed up before the readiness timeout.
    Unavailable,
}

#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorPanelState {
    #[default]
    Closed,
    Open,
}
