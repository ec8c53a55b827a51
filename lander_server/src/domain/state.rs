// Domain-level lander state, input snapshots and per-frame output.

use super::thrusters::{Thruster, ThrusterFlags};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LanderPose {
    pub x: f64,
    pub y: f64,
    pub vx: f64, // px/tick
    pub vy: f64, // px/tick
    pub dir: f64, // degrees, 0..360
}

/// Keys held during one poll of the local input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub escape: bool,
    pub restart: bool,
}

impl KeyState {
    /// Thrusters commanded by the held arrow keys.
    pub fn thrusters(&self) -> ThrusterFlags {
        let mut flags = ThrusterFlags::NONE;
        if self.down {
            flags.insert(Thruster::Bottom);
        }
        if self.up {
            flags.insert(Thruster::Top);
        }
        if self.left {
            flags.insert(Thruster::Left);
        }
        if self.right {
            flags.insert(Thruster::Right);
        }
        flags
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DockRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Everything a presenter needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub pose: LanderPose,
    pub thrusters: ThrusterFlags,
    pub dock: DockRect,
}
