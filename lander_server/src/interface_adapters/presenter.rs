use crate::domain::{FrameSnapshot, Presenter, Thruster};
use tracing::info;

/// Headless presenter that reports the lander through tracing instead of drawing it.
///
/// Logging every frame at 100 Hz would drown everything else, so only every `every`-th tick
/// is reported.
#[derive(Debug, Clone, Copy)]
pub struct TracePresenter {
    every: u64,
}

impl TracePresenter {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
        }
    }

    fn should_report(&self, tick: u64) -> bool {
        tick % self.every == 0
    }
}

impl Presenter for TracePresenter {
    fn present(&mut self, frame: &FrameSnapshot) {
        if !self.should_report(frame.tick) {
            return;
        }
        let thrusters: Vec<&str> = frame.thrusters.iter().map(Thruster::name).collect();
        let pose = frame.pose;
        info!(
            tick = frame.tick,
            x = pose.x,
            y = pose.y,
            vx = pose.vx,
            vy = pose.vy,
            dir = pose.dir,
            ?thrusters,
            "frame"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_every_nth_tick() {
        let presenter = TracePresenter::new(50);
        assert!(!presenter.should_report(1));
        assert!(presenter.should_report(50));
        assert!(presenter.should_report(100));
    }

    #[test]
    fn zero_interval_reports_every_tick() {
        let presenter = TracePresenter::new(0);
        assert!(presenter.should_report(1));
        assert!(presenter.should_report(2));
    }
}
