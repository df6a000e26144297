use bevy::prelude::*;

/// Fired by the host when a run is reset.
///
/// A soft reset is the ascension reset that keeps prestige purchases; a hard
/// reset wipes everything.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameReset {
    pub hard: bool,
}

/// Fired by the host after the player comes back from ascension.
#[derive(Event, Debug, Clone, Copy)]
pub struct Reincarnated;

/// Fired by the host every time a purchase attempt finishes.
#[derive(Event, Debug, Clone)]
pub struct PurchaseCompleted {
    /// Name of the upgrade the player tried to buy.
    pub upgrade: String,
    pub success: bool,
}
