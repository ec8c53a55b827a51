use crate::domain::{KeySource, KeyState};
use std::collections::VecDeque;

/// Key source with nothing ever pressed; used when no input device is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleKeys;

impl KeySource for IdleKeys {
    fn poll(&mut self) -> KeyState {
        KeyState::default()
    }
}

/// Replays a fixed sequence of key states, one per poll, then reports nothing pressed.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    script: VecDeque<KeyState>,
}

impl ScriptedKeys {
    pub fn new(script: impl IntoIterator<Item = KeyState>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl KeySource for ScriptedKeys {
    fn poll(&mut self) -> KeyState {
        self.script.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_runs_out_into_idle() {
        let pressed = KeyState {
            up: true,
            ..KeyState::default()
        };
        let mut keys = ScriptedKeys::new([pressed]);
        assert_eq!(keys.poll(), pressed);
        assert_eq!(keys.poll(), KeyState::default());
    }
}
