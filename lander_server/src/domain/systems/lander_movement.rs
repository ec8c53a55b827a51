use crate::domain::state::LanderPose;
use crate::domain::thrusters::{Thruster, ThrusterFlags};
use crate::domain::tuning::{Arena, PhysicsTuning};

#[derive(Debug, Clone, Copy)]
pub struct MovementConfig {
    pub thrust_accel: f64,   // px/tick^2
    pub gravity: f64,        // px/tick^2
    pub rotate_speed: f64,   // deg/tick
    pub zero_threshold: f64, // px/tick

    pub width: f64,
    pub height: f64,
}

impl MovementConfig {
    pub fn new(physics: &PhysicsTuning, arena: &Arena) -> Self {
        Self {
            thrust_accel: physics.thrust_accel,
            gravity: physics.gravity,
            rotate_speed: physics.rotate_speed,
            zero_threshold: physics.zero_threshold,
            width: arena.width,
            height: arena.height,
        }
    }
}

/// Fresh lander: centred, at rest, nose up.
pub fn spawn_pose(arena: &Arena) -> LanderPose {
    let (x, y) = arena.spawn_point();
    LanderPose {
        x,
        y,
        vx: 0.0,
        vy: 0.0,
        dir: 0.0,
    }
}

/// Advances the lander by one tick under the given thrusters.
pub fn tick_lander(pose: &mut LanderPose, flags: ThrusterFlags, cfg: MovementConfig) {
    // direction (0 deg = up / -Y), screen coordinates grow downward.
    let rad = pose.dir.to_radians();
    let (sin, cos) = rad.sin_cos();

    // Main axis thrust. Top is evaluated last and replaces bottom rather than summing with it.
    let (mut dvx, mut dvy) = (0.0, 0.0);
    if flags.contains(Thruster::Bottom) {
        dvx = sin * cfg.thrust_accel;
        dvy = -cos * cfg.thrust_accel;
    }
    if flags.contains(Thruster::Top) {
        dvx = -sin * cfg.thrust_accel;
        dvy = cos * cfg.thrust_accel;
    }
    pose.vx += dvx;
    pose.vy += dvy;

    // rotation
    if flags.contains(Thruster::Left) {
        pose.dir += cfg.rotate_speed;
    }
    if flags.contains(Thruster::Right) {
        pose.dir -= cfg.rotate_speed;
    }
    pose.dir = wrap_into(pose.dir, 360.0);

    pose.vy += cfg.gravity;

    // position integrate
    pose.x += pose.vx;
    pose.y += pose.vy;

    if pose.vx.abs() < cfg.zero_threshold {
        pose.vx = 0.0;
    }
    if pose.vy.abs() < cfg.zero_threshold {
        pose.vy = 0.0;
    }

    // world wrap
    pose.x = wrap_into(pose.x, cfg.width);
    pose.y = wrap_into(pose.y, cfg.height);
}

/// Maps `value` into `[0, bound)`.
fn wrap_into(value: f64, bound: f64) -> f64 {
    let wrapped = value.rem_euclid(bound);
    // rem_euclid rounds tiny negative inputs up to `bound` itself.
    if wrapped >= bound { 0.0 } else { wrapped }
}
