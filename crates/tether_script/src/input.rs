//! Keyboard queries
//!
//! Polling happens in the engine; scripts only ask about the current frame.

use tether_core::input::KeyCode;

use crate::marshal;

pub struct Input;

impl Input {
    pub fn is_key_down(key: KeyCode) -> bool {
        marshal::call(|calls| calls.input_is_key_down(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glue;
    use crate::testing::RecordingCalls;
    use std::rc::Rc;

    #[test]
    fn test_is_key_down() {
        let calls = Rc::new(RecordingCalls::new());
        let _guard = glue::install(calls.clone());

        assert!(!Input::is_key_down(KeyCode::W));
        calls.press_key(KeyCode::W);
        assert!(Input::is_key_down(KeyCode::W));
        assert!(!Input::is_key_down(KeyCode::S));
        calls.release_key(KeyCode::W);
        assert!(!Input::is_key_down(KeyCode::W));
    }
}
