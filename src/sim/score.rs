//! Bounded per-side score counter

use crate::error::{GameError, GameResult};

/// Score in `[0, max]`. Reaching `max` ends the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    value: u8,
    max: u8,
}

impl Score {
    pub fn new(max: u8) -> Self {
        Self { value: 0, max }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    /// Fails without changing the value when already at max
    pub fn increment(&mut self) -> GameResult<()> {
        if self.is_at_max() {
            return Err(GameError::ScoreOutOfRange { max: self.max });
        }
        self.value += 1;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    pub fn is_at_max(&self) -> bool {
        self.value == self.max
    }
}
