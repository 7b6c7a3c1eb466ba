//! Controller capability consumed by the game loop.

use crate::types::Button;

/// Per-button pressed state, indexed by [`Button::index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pressed: [bool; Button::COUNT],
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.pressed[button.index()]
    }

    pub fn set(&mut self, button: Button, pressed: bool) {
        self.pressed[button.index()] = pressed;
    }

    pub fn with(mut self, button: Button) -> Self {
        self.set(button, true);
        self
    }

    pub fn any(&self) -> bool {
        self.pressed.iter().any(|&p| p)
    }
}

/// A polled controller.
///
/// `update_state` is called once per loop iteration; `is_pressed` then
/// reports the state captured by that poll. A disconnected controller reports
/// every button as released.
pub trait Controller {
    fn update_state(&mut self) -> anyhow::Result<()>;

    fn is_connected(&self) -> bool;

    fn state(&self) -> ButtonState;

    fn is_pressed(&self, button: Button) -> bool {
        self.is_connected() && self.state().is_pressed(button)
    }
}

/// Controller driven by a script of button states, one per poll.
///
/// After the script runs out every button reads as released.
#[derive(Debug, Clone, Default)]
pub struct ScriptedController {
    script: std::collections::VecDeque<ButtonState>,
    current: ButtonState,
    connected: bool,
    polls: u64,
}

impl ScriptedController {
    pub fn new(script: impl IntoIterator<Item = ButtonState>) -> Self {
        Self {
            script: script.into_iter().collect(),
            current: ButtonState::default(),
            connected: true,
            polls: 0,
        }
    }

    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }
}

impl Controller for ScriptedController {
    fn update_state(&mut self) -> anyhow::Result<()> {
        self.polls += 1;
        self.current = self.script.pop_front().unwrap_or_default();
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn state(&self) -> ButtonState {
        self.current
    }
}
