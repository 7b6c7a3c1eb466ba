//! Per-button repeat limiting.
//!
//! Each button remembers when its last press was accepted. A held button is
//! eligible again once more than its repeat interval has passed, so holding a
//! direction moves at a steady rate without any key-repeat events.

use arrayvec::ArrayVec;

use crate::controller::ButtonState;
use crate::types::Button;

/// Last-accepted timestamps and repeat intervals, one per button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debounce {
    last_accepted_ms: [Option<u64>; Button::COUNT],
    repeat_ms: [u64; Button::COUNT],
}

impl Default for Debounce {
    fn default() -> Self {
        Self {
            last_accepted_ms: [None; Button::COUNT],
            repeat_ms: Button::ALL.map(Button::repeat_ms),
        }
    }
}

impl Debounce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the intervals for translations (left, right, down) and rotations (A, B).
    pub fn with_repeat_ms(mut self, move_ms: u64, rotate_ms: u64) -> Self {
        for button in [Button::Left, Button::Right, Button::Down] {
            self.repeat_ms[button.index()] = move_ms;
        }
        for button in [Button::A, Button::B] {
            self.repeat_ms[button.index()] = rotate_ms;
        }
        self
    }

    pub fn repeat_ms(&self, button: Button) -> u64 {
        self.repeat_ms[button.index()]
    }

    /// Whether enough time has passed since `button` was last accepted.
    pub fn ready(&self, button: Button, now_ms: u64) -> bool {
        match self.last_accepted_ms[button.index()] {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.repeat_ms(button),
        }
    }

    /// Record that a press of `button` took effect at `now_ms`.
    pub fn accept(&mut self, button: Button, now_ms: u64) {
        self.last_accepted_ms[button.index()] = Some(now_ms);
    }

    pub fn last_accepted_ms(&self, button: Button) -> Option<u64> {
        self.last_accepted_ms[button.index()]
    }

    /// Buttons to act on for this poll, in processing order.
    ///
    /// Start comes first and is never limited. Left shadows Right and A
    /// shadows B: the second of each pair is only offered when the first is
    /// not both pressed and ready.
    pub fn eligible(&self, state: ButtonState, now_ms: u64) -> ArrayVec<Button, { Button::COUNT }> {
        let mut out = ArrayVec::new();
        let live = |b: Button| state.is_pressed(b) && self.ready(b, now_ms);

        if state.is_pressed(Button::Start) {
            out.push(Button::Start);
        }
        if live(Button::Left) {
            out.push(Button::Left);
        } else if live(Button::Right) {
            out.push(Button::Right);
        }
        if live(Button::Down) {
            out.push(Button::Down);
        }
        if live(Button::A) {
            out.push(Button::A);
        } else if live(Button::B) {
            out.push(Button::B);
        }
        out
    }

    pub fn reset(&mut self) {
        self.last_accepted_ms = [None; Button::COUNT];
    }
}
