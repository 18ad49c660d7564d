//! Speed profile engine.
//!
//! Produces a trapezoidal accelerate/cruise/decelerate profile one step at a
//! time. Each call compares the squared current speed against the squared
//! deceleration envelope `2 * a * distance`, so no square root is taken on
//! the per-step path. The single `sqrt` is the kick-off from standstill.

use libm::{ceilf, fabsf, sqrtf};

use crate::error::ConfigError;

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Clockwise (positive step count).
    Clockwise,
    /// Counter-clockwise (negative step count).
    CounterClockwise,
}

impl Direction {
    /// Direction implied by a signed speed, `None` at standstill.
    #[inline]
    pub fn from_speed(speed: f32) -> Option<Self> {
        if speed > 0.0 {
            Some(Direction::Clockwise)
        } else if speed < 0.0 {
            Some(Direction::CounterClockwise)
        } else {
            None
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Conceptual phase of a move. Never stored, derived from position and speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPhase {
    /// At target and at rest.
    Idle,
    /// Speed magnitude increasing toward max speed.
    Accelerating,
    /// At the speed limit (`|speed| >= max_speed`), or moving with no
    /// distance left to go.
    Cruising,
    /// Braking toward the target (or toward a reversal).
    Decelerating,
}

/// Speed limit and acceleration, the two parameters of the profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedProfile {
    max_speed: f32,
    acceleration: f32,
}

impl SpeedProfile {
    /// Create a profile.
    ///
    /// # Errors
    ///
    /// `InvalidMaxSpeed` if `max_speed` is negative or not finite,
    /// `InvalidAcceleration` if `acceleration` is not finite and positive.
    pub fn new(max_speed: f32, acceleration: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            max_speed: check_max_speed(max_speed)?,
            acceleration: check_acceleration(acceleration)?,
        })
    }

    /// Ceiling on |speed| in steps/s.
    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Acceleration (and deceleration) in steps/s².
    #[inline]
    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    /// Replace the speed limit.
    pub fn set_max_speed(&mut self, max_speed: f32) -> Result<(), ConfigError> {
        self.max_speed = check_max_speed(max_speed)?;
        Ok(())
    }

    /// Replace the acceleration.
    pub fn set_acceleration(&mut self, acceleration: f32) -> Result<(), ConfigError> {
        self.acceleration = check_acceleration(acceleration)?;
        Ok(())
    }

    /// Clamp a speed to `[-max_speed, max_speed]`.
    #[inline]
    pub fn clamp(&self, speed: f32) -> f32 {
        if speed > self.max_speed {
            self.max_speed
        } else if speed < -self.max_speed {
            -self.max_speed
        } else {
            speed
        }
    }

    /// The speed that should be in effect after the current one, given the
    /// signed number of steps still to go.
    ///
    /// Call after every step and after any change of target, max speed or
    /// acceleration.
    pub fn next_speed(&self, distance_to_go: i64, speed: f32) -> f32 {
        if distance_to_go == 0 {
            return 0.0;
        }

        // Deceleration envelope and current speed, both squared with sign kept
        let envelope = 2.0 * distance_to_go as f32 * self.acceleration;
        let current = if speed > 0.0 { speed * speed } else { -(speed * speed) };

        if envelope > current {
            // Already cruising clockwise, skip the arithmetic
            if speed == self.max_speed {
                return self.max_speed;
            }
            let next = if speed == 0.0 {
                sqrtf(2.0 * self.acceleration)
            } else {
                speed + fabsf(self.acceleration / speed)
            };
            next.min(self.max_speed)
        } else if envelope < current {
            if speed == -self.max_speed {
                return -self.max_speed;
            }
            let next = if speed == 0.0 {
                -sqrtf(2.0 * self.acceleration)
            } else {
                speed - fabsf(self.acceleration / speed)
            };
            next.max(-self.max_speed)
        } else {
            speed
        }
    }

    /// Signed number of steps needed to brake from `speed` to rest.
    pub fn stopping_distance(&self, speed: f32) -> i64 {
        let steps = ceilf(speed * speed / (2.0 * self.acceleration)) as i64;
        if speed < 0.0 {
            -steps
        } else {
            steps
        }
    }

    /// Classify the motion for a given distance and speed.
    ///
    /// Any speed at the limit reports `Cruising`, even when the next
    /// [`next_speed`](Self::next_speed) will start braking. Below the limit
    /// the classification follows the direction of that next update.
    pub fn phase(&self, distance_to_go: i64, speed: f32) -> MotionPhase {
        if speed == 0.0 {
            return if distance_to_go == 0 {
                MotionPhase::Idle
            } else {
                MotionPhase::Accelerating
            };
        }
        if distance_to_go == 0 || fabsf(speed) >= self.max_speed {
            return MotionPhase::Cruising;
        }

        let next = self.next_speed(distance_to_go, speed);
        if next * speed > 0.0 && fabsf(next) > fabsf(speed) {
            MotionPhase::Accelerating
        } else {
            MotionPhase::Decelerating
        }
    }
}

impl Default for SpeedProfile {
    /// 1 step/s and 1 step/s², the controller's power-on values.
    fn default() -> Self {
        Self {
            max_speed: 1.0,
            acceleration: 1.0,
        }
    }
}

fn check_max_speed(max_speed: f32) -> Result<f32, ConfigError> {
    if max_speed.is_finite() && max_speed >= 0.0 {
        Ok(max_speed)
    } else {
        Err(ConfigError::InvalidMaxSpeed(max_speed))
    }
}

fn check_acceleration(acceleration: f32) -> Result<f32, ConfigError> {
    if acceleration.is_finite() && acceleration > 0.0 {
        Ok(acceleration)
    } else {
        Err(ConfigError::InvalidAcceleration(acceleration))
    }
}
