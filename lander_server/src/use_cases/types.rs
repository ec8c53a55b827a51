// Use-case level inputs and settings for the simulation loop.

use crate::domain::{GameTuning, Thruster};
use std::time::Duration;

/// Shortest tick or read timeout the runtime accepts; zero is raised to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Persistent change to the remote thruster latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchCommand {
    Set(Thruster),
    Clear(Thruster),
}

impl LatchCommand {
    pub fn thruster(self) -> Thruster {
        match self {
            LatchCommand::Set(t) | LatchCommand::Clear(t) => t,
        }
    }
}

/// Configuration handed to the simulation task at spawn time.
#[derive(Debug, Clone, Copy)]
pub struct GameSettings {
    /// Fixed tick interval for the simulation loop (at least [`MIN_INTERVAL`]).
    pub tick_interval: Duration,
    /// Physics constants and arena geometry.
    pub tuning: GameTuning,
    /// Whether the restart key also drops remotely latched thrusters.
    pub clear_latch_on_restart: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(10),
            tuning: GameTuning::default(),
            clear_latch_on_restart: false,
        }
    }
}
