//! Position tracking for stepper motors.
//!
//! Open-loop: the position is the count of steps emitted, nothing more.

use crate::motion::pattern::phase_of;
use crate::motion::Direction;

/// Current and target position in steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    current: i64,
    target: i64,
}

impl Position {
    /// Create a position tracker at the origin.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a position tracker at rest at a specific position.
    #[inline]
    pub fn at(steps: i64) -> Self {
        Self {
            current: steps,
            target: steps,
        }
    }

    /// Steps emitted so far, relative to the origin.
    #[inline]
    pub fn current(&self) -> i64 {
        self.current
    }

    /// Position being moved to.
    #[inline]
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Signed steps still to go; positive means clockwise.
    ///
    /// Saturates at the `i64` bounds when the target is further away than
    /// `i64` can express.
    #[inline]
    pub fn distance_to_go(&self) -> i64 {
        self.target.saturating_sub(self.current)
    }

    /// Whether the target has been reached.
    #[inline]
    pub fn is_at_target(&self) -> bool {
        self.current == self.target
    }

    /// Set an absolute target.
    #[inline]
    pub fn set_target(&mut self, target: i64) {
        self.target = target;
    }

    /// Redefine where the motor is, without moving. Clears any pending move.
    #[inline]
    pub fn reset_to(&mut self, steps: i64) {
        self.current = steps;
        self.target = steps;
    }

    /// Count one step and return the new phase.
    #[inline]
    pub fn advance(&mut self, direction: Direction) -> u8 {
        self.current += direction.sign();
        self.phase()
    }

    /// Pattern phase, the low three bits of the current position.
    #[inline]
    pub fn phase(&self) -> u8 {
        phase_of(self.current)
    }
}
