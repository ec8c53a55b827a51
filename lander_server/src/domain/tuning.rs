// Gameplay tuning for the lander and the arena it flies in.
// Keep this separate from runtime configuration (tick rate, ports, timeouts).

use super::state::DockRect;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Velocity added per tick by the bottom or top thruster, in pixels/tick.
    pub thrust_accel: f64,

    /// Downward velocity added every tick, in pixels/tick.
    pub gravity: f64,

    /// Heading change per tick for each side thruster, in degrees.
    pub rotate_speed: f64,

    /// Velocity components below this magnitude snap to zero.
    pub zero_threshold: f64,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            thrust_accel: 0.2,
            gravity: 0.05,
            rotate_speed: 4.0,
            zero_threshold: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
    /// Edge length of the lander sprite, used to centre it on spawn.
    pub lander_size: f64,
    pub dock: DockRect,
}

impl Arena {
    /// Top-left corner that centres the lander sprite in the arena.
    pub fn spawn_point(&self) -> (f64, f64) {
        (
            ((self.width - self.lander_size) / 2.0).floor(),
            ((self.height - self.lander_size) / 2.0).floor(),
        )
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            lander_size: 64.0,
            dock: DockRect {
                x: 340.0,
                y: 560.0,
                w: 120.0,
                h: 16.0,
            },
        }
    }
}

/// Tuning file layout: a `[physics]` table and an `[arena]` table, both optional.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    pub physics: PhysicsTuning,
    pub arena: Arena,
}

impl GameTuning {
    pub fn validate(&self) -> Result<(), String> {
        let arena = &self.arena;
        let dock = &arena.dock;
        let arena_values = [
            ("arena.width", arena.width),
            ("arena.height", arena.height),
            ("arena.lander_size", arena.lander_size),
            ("arena.dock.x", dock.x),
            ("arena.dock.y", dock.y),
            ("arena.dock.w", dock.w),
            ("arena.dock.h", dock.h),
        ];
        if let Some((name, value)) = arena_values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{name} must be finite, got {value}"));
        }
        if !(arena.width > 0.0 && arena.height > 0.0) {
            return Err(format!(
                "arena must have a positive size, got {}x{}",
                arena.width, arena.height
            ));
        }
        if arena.lander_size < 0.0 || arena.lander_size > arena.width.min(arena.height) {
            return Err(format!(
                "lander_size {} does not fit the arena",
                arena.lander_size
            ));
        }

        let physics = &self.physics;
        let physics_values = [
            ("physics.thrust_accel", physics.thrust_accel),
            ("physics.gravity", physics.gravity),
            ("physics.rotate_speed", physics.rotate_speed),
            ("physics.zero_threshold", physics.zero_threshold),
        ];
        if let Some((name, value)) = physics_values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{name} must be finite, got {value}"));
        }
        // Gravity has to survive the zero snap or a resting lander never starts moving.
        let gravity = physics.gravity.abs();
        if gravity > 0.0 && physics.zero_threshold >= gravity {
            return Err(format!(
                "zero_threshold {} must be below |gravity| {}",
                physics.zero_threshold, gravity
            ));
        }
        Ok(())
    }
}
