use super::state::{FrameSnapshot, KeyState};

// Port for the local input device, polled once per tick.
pub trait KeySource: Send {
    fn poll(&mut self) -> KeyState;
}

// Port for whatever draws the lander (window, terminal, log).
pub trait Presenter: Send {
    fn present(&mut self, frame: &FrameSnapshot);
}
