//! Keyboard state fed by the platform layer

use std::collections::HashSet;

use tether_core::input::KeyCode;

/// Keys held down during the current frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    down: HashSet<KeyCode>,
}

impl KeyboardState {
    pub fn press(&mut self, key: KeyCode) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.down.remove(&key);
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.down.clear();
    }
}
