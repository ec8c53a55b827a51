// Domain layer: lander physics, thruster flags and the ports the simulation talks through.

pub mod ports;
pub mod state;
pub mod systems;
pub mod thrusters;
pub mod tuning;

pub use ports::{KeySource, Presenter};
pub use state::{DockRect, FrameSnapshot, KeyState, LanderPose};
pub use thrusters::{Thruster, ThrusterFlags};
pub use tuning::{Arena, GameTuning, PhysicsTuning};
