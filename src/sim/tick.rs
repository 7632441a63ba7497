//! Fixed timestep frame driver
//!
//! One tick delivers the frame's input events, advances the host by one
//! step and feeds every contact that began back into the rules, in order.

use super::host::Simulate;
use super::state::{Game, GameEvent, InputEvent};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer events captured since the last tick, oldest first
    pub pointer: Vec<InputEvent>,
}

impl TickInput {
    pub fn single(event: InputEvent) -> Self {
        Self {
            pointer: vec![event],
        }
    }
}

/// Advance the game by one fixed timestep. Returns the signals emitted.
pub fn tick(game: &mut Game, host: &mut impl Simulate, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    for event in &input.pointer {
        game.handle_input(host, *event);
    }
    for contact in host.step(dt) {
        game.handle_contact(host, contact);
    }
    game.take_events()
}

/// Accumulates frame time into fixed simulation steps
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    /// Add a frame's elapsed time; returns how many ticks to run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() {
            return 0;
        }
        self.accumulator += frame_dt.clamp(0.0, 0.1);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop time we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }
}
