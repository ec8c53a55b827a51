use super::engine_bus::{EngineBus, ThrusterLatch};
use super::types::{GameSettings, MIN_INTERVAL};
use crate::domain::systems::lander_movement::{self, MovementConfig};
use crate::domain::{Arena, FrameSnapshot, KeySource, LanderPose, Presenter};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Resolves once the shutdown flag turns true or its sender goes away.
pub async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}

/// Puts the lander back at the spawn point and drops this tick's local thrusters.
pub fn restart(bus: &mut EngineBus, arena: &Arena, clear_latch: bool) -> LanderPose {
    bus.end_tick();
    if clear_latch {
        bus.latch().reset();
    }
    lander_movement::spawn_pose(arena)
}

/// Fixed-cadence simulation loop.
///
/// Polls local keys, steps physics with local plus latched thrusters, presents the frame and
/// publishes it on `frame_tx`. Returns when escape is pressed or shutdown is signalled.
pub async fn lander_task<K, P>(
    mut keys: K,
    mut presenter: P,
    latch: Arc<ThrusterLatch>,
    frame_tx: watch::Sender<FrameSnapshot>,
    settings: GameSettings,
    mut shutdown: watch::Receiver<bool>,
) where
    K: KeySource,
    P: Presenter,
{
    let arena = settings.tuning.arena;
    let cfg = MovementConfig::new(&settings.tuning.physics, &arena);
    let mut bus = EngineBus::new(latch);
    let mut pose = lander_movement::spawn_pose(&arena);
    let mut tick: u64 = 0;

    // A late tick is delayed rather than replayed in a burst.
    let tick_interval = settings.tick_interval.max(MIN_INTERVAL);
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        tick_ms = tick_interval.as_millis() as u64,
        x = pose.x,
        y = pose.y,
        "simulation started"
    );

    loop {
        tokio::select! {
            _ = shutdown_requested(&mut shutdown) => {
                info!(tick, "simulation shutting down");
                break;
            }
            _ = interval.tick() => {}
        }

        let input = keys.poll();
        if input.escape {
            info!(tick, "escape pressed");
            break;
        }

        tick += 1;
        let flags = if input.restart {
            pose = restart(&mut bus, &arena, settings.clear_latch_on_restart);
            info!(
                tick,
                clear_latch = settings.clear_latch_on_restart,
                "lander restarted"
            );
            bus.effective_flags()
        } else {
            bus.apply_local(input.thrusters());
            let flags = bus.effective_flags();
            lander_movement::tick_lander(&mut pose, flags, cfg);
            flags
        };

        let frame = FrameSnapshot {
            tick,
            pose,
            thrusters: flags,
            dock: arena.dock,
        };
        presenter.present(&frame);
        frame_tx.send_replace(frame);

        bus.end_tick();
    }

    debug!(tick, "simulation loop exited");
}
