//! Session: the cooperative game loop.
//!
//! Each iteration polls the controller, applies debounced input, spawns a
//! piece if none is falling, runs one physics tick when the quantum has
//! elapsed, and renders. Physics is gated by the clock, input and rendering
//! run at loop rate.

use anyhow::Result;
use tracing::{info, warn};

use sporktris_core::{BoardError, GameState};
use sporktris_input::{ButtonState, Controller, Debounce};
use sporktris_term::PixelDisplay;

use crate::clock::Clock;
use crate::config::SessionConfig;
use crate::render::render;
use crate::types::{Button, PlayOutcome};

#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    state: GameState,
    debounce: Debounce,
    last_tick_ms: u64,
    controller_connected: bool,
}

impl Session {
    pub fn new(config: SessionConfig, seed: u32) -> Result<Self, BoardError> {
        config.validate()?;
        let state = GameState::new(config.width, config.height, seed)?;
        Ok(Self::with_state(config, state))
    }

    /// Run `config`'s timing on an existing game state
    pub fn with_state(config: SessionConfig, state: GameState) -> Self {
        Self {
            config,
            state,
            debounce: Debounce::new().with_repeat_ms(config.move_repeat_ms, config.rotate_repeat_ms),
            last_tick_ms: 0,
            controller_connected: true,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn debounce(&self) -> &Debounce {
        &self.debounce
    }

    pub fn last_tick_ms(&self) -> u64 {
        self.last_tick_ms
    }

    /// Start the physics clock at `now_ms`
    pub fn start(&mut self, now_ms: u64) {
        self.last_tick_ms = now_ms;
        info!(
            width = self.config.width,
            height = self.config.height,
            tick_ms = self.config.tick_ms,
            "session started"
        );
    }

    /// Apply one poll's worth of buttons.
    ///
    /// Returns `Some(PlayOutcome::Exited)` when Start is held. A press only
    /// counts against its repeat interval if the move it asks for was made.
    pub fn handle_input(&mut self, buttons: ButtonState, now_ms: u64) -> Option<PlayOutcome> {
        for button in self.debounce.eligible(buttons, now_ms) {
            let committed = match button {
                Button::Start => return Some(PlayOutcome::Exited),
                Button::Left => self.state.try_move(-1, 0),
                Button::Right => self.state.try_move(1, 0),
                Button::Down => self.state.try_move(0, 1),
                Button::A => self.state.try_rotate(true),
                Button::B => self.state.try_rotate(false),
            };
            if committed {
                self.debounce.accept(button, now_ms);
            }
        }
        None
    }

    fn poll<C: Controller + ?Sized>(&mut self, controller: &mut C) -> Result<ButtonState> {
        controller.update_state()?;

        let connected = controller.is_connected();
        if connected != self.controller_connected {
            if connected {
                info!("controller reconnected");
            } else {
                warn!("controller disconnected");
            }
            self.controller_connected = connected;
        }

        let mut buttons = ButtonState::new();
        for button in Button::ALL {
            buttons.set(button, controller.is_pressed(button));
        }
        Ok(buttons)
    }

    /// Run one loop iteration at `now_ms`.
    ///
    /// Returns the outcome once the session has ended.
    pub fn step<C, D>(
        &mut self,
        now_ms: u64,
        controller: &mut C,
        display: &mut D,
    ) -> Result<Option<PlayOutcome>>
    where
        C: Controller + ?Sized,
        D: PixelDisplay + ?Sized,
    {
        let buttons = self.poll(controller)?;
        if let Some(outcome) = self.handle_input(buttons, now_ms) {
            return Ok(Some(outcome));
        }

        self.state.spawn_piece();

        if now_ms > self.last_tick_ms.saturating_add(self.config.tick_ms) {
            self.last_tick_ms = now_ms;
            self.state.tick();
        }

        render(&self.state, display)?;

        if self.state.game_over() {
            return Ok(Some(PlayOutcome::GameOver));
        }
        Ok(None)
    }

    /// Play until the player exits or the game ends
    pub fn play<C, D, K>(
        &mut self,
        controller: &mut C,
        display: &mut D,
        clock: &K,
    ) -> Result<PlayOutcome>
    where
        C: Controller + ?Sized,
        D: PixelDisplay + ?Sized,
        K: Clock + ?Sized,
    {
        self.start(clock.now_ms());
        let outcome = loop {
            if let Some(outcome) = self.step(clock.now_ms(), controller, display)? {
                break outcome;
            }
        };
        info!(
            outcome = ?outcome,
            pieces = self.state.pieces_landed(),
            lines = self.state.lines_cleared(),
            "session ended"
        );
        Ok(outcome)
    }
}
