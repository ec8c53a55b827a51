// Use cases layer: the engine state bus and the simulation loop.

pub mod engine_bus;
pub mod game;
pub mod types;

pub use engine_bus::{EngineBus, ThrusterLatch};
pub use types::{GameSettings, LatchCommand, MIN_INTERVAL};
