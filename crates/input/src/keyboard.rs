//! Keyboard stand-in for the hardware controller.
//!
//! Most terminals do not emit key release events, so a button counts as held
//! only for a short timeout after its last press (or auto-repeat) event.
//! Terminals that do report releases end the hold immediately.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::debug;

use crate::controller::{ButtonState, Controller};
use crate::map::{button_for_key, is_interrupt};
use crate::types::Button;

// Longer than the typical gap between OS auto-repeat events, shorter than a
// deliberate double tap.
const DEFAULT_RELEASE_TIMEOUT_MS: u64 = 150;

// Bounds how long one poll may block waiting for the first event.
const DEFAULT_POLL_TIMEOUT_MS: u64 = 5;

#[derive(Debug, Clone)]
pub struct KeyboardController {
    last_press: [Option<Instant>; Button::COUNT],
    state: ButtonState,
    release_timeout: Duration,
    poll_timeout: Duration,
    interrupted: bool,
}

impl KeyboardController {
    pub fn new() -> Self {
        Self {
            last_press: [None; Button::COUNT],
            state: ButtonState::default(),
            release_timeout: Duration::from_millis(DEFAULT_RELEASE_TIMEOUT_MS),
            poll_timeout: Duration::from_millis(DEFAULT_POLL_TIMEOUT_MS),
            interrupted: false,
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    /// True once Ctrl+C was seen. Ctrl+C also holds Start.
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    /// Forget every held key
    pub fn release_all(&mut self) {
        self.last_press = [None; Button::COUNT];
        self.state = ButtonState::default();
    }

    /// Apply one terminal event. Losing focus drops every held key, since the
    /// matching releases will never arrive.
    pub fn handle_event(&mut self, event: Event, at: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, at),
            Event::FocusLost => {
                debug!("focus lost, releasing keys");
                self.release_all();
            }
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, at: Instant) {
        if is_interrupt(key) {
            self.interrupted = true;
            self.last_press[Button::Start.index()] = Some(at);
            return;
        }
        let Some(button) = button_for_key(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_press[button.index()] = Some(at);
            }
            KeyEventKind::Release => {
                self.last_press[button.index()] = None;
            }
        }
    }

    /// Recompute held buttons as of `now`, expiring stale presses.
    pub fn refresh(&mut self, now: Instant) {
        for button in Button::ALL {
            let slot = &mut self.last_press[button.index()];
            let held = match *slot {
                Some(at) if now.saturating_duration_since(at) <= self.release_timeout => true,
                Some(_) => {
                    *slot = None;
                    false
                }
                None => false,
            };
            self.state.set(button, held);
        }
    }
}

impl Default for KeyboardController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for KeyboardController {
    fn update_state(&mut self) -> anyhow::Result<()> {
        let mut timeout = self.poll_timeout;
        while event::poll(timeout)? {
            timeout = Duration::ZERO;
            self.handle_event(event::read()?, Instant::now());
        }
        self.refresh(Instant::now());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn state(&self) -> ButtonState {
        self.state
    }
}
