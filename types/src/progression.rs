//! Level / experience arithmetic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Experience needed to gain one level. `xp` is always a percentage of this.
pub const XP_PER_LEVEL: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("experience amount must be positive")]
    NonPositiveAmount,
    #[error("invalid progression state: level {level}, xp {xp}")]
    InvalidState { level: u64, xp: u64 },
}

/// Level and experience-toward-next-level.
///
/// Invariants: `level >= 1`, `xp < XP_PER_LEVEL`, and `level` never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProgression")]
pub struct ProgressionState {
    level: u64,
    xp: u64,
}

#[derive(Deserialize)]
struct RawProgression {
    level: u64,
    xp: u64,
}

impl TryFrom<RawProgression> for ProgressionState {
    type Error = ProgressionError;

    fn try_from(raw: RawProgression) -> Result<Self, Self::Error> {
        Self::new(raw.level, raw.xp)
    }
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self { level: 1, xp: 0 }
    }
}

impl ProgressionState {
    pub fn new(level: u64, xp: u64) -> Result<Self, ProgressionError> {
        if level == 0 || xp >= XP_PER_LEVEL {
            return Err(ProgressionError::InvalidState { level, xp });
        }
        Ok(Self { level, xp })
    }

    #[must_use]
    pub fn level(&self) -> u64 {
        self.level
    }

    #[must_use]
    pub fn xp(&self) -> u64 {
        self.xp
    }

    /// Add `amount` experience, carrying whole levels.
    ///
    /// Returns the new state and the number of levels gained. A single call
    /// can cross any number of levels.
    pub fn gain(self, amount: u64) -> Result<(Self, u64), ProgressionError> {
        if amount == 0 {
            return Err(ProgressionError::NonPositiveAmount);
        }

        // xp < 100, so splitting amount first keeps the sum from overflowing.
        let total = self.xp + amount % XP_PER_LEVEL;
        let carry = amount / XP_PER_LEVEL + total / XP_PER_LEVEL;
        let next = Self {
            level: self.level.saturating_add(carry),
            xp: total % XP_PER_LEVEL,
        };
        Ok((next, carry))
    }

    /// Fill of the experience bar in `[0, 1)`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.xp as f32 / XP_PER_LEVEL as f32
    }
}
