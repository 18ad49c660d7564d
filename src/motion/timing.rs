//! Step timing gate.
//!
//! Decides whether the next step is due on a free-running `u32` microsecond
//! counter. Both the clock reading and `last + interval` may wrap past
//! `u32::MAX`, independently of each other.

use libm::fabsf;

/// Step interval in microseconds for a speed in steps/s.
///
/// `None` at standstill. Very slow speeds saturate at `u32::MAX`.
#[inline]
pub fn interval_from_speed(speed: f32) -> Option<u32> {
    if speed == 0.0 || speed.is_nan() {
        None
    } else {
        Some((1_000_000.0 / fabsf(speed)) as u32)
    }
}

/// Whether a step is due at `now`, given the time of the last step.
///
/// A `None` interval (zero speed) is never due.
#[inline]
pub fn step_is_due(now: u32, last_step_us: u32, interval_us: Option<u32>) -> bool {
    let Some(interval_us) = interval_us else {
        return false;
    };

    let next_step_us = last_step_us.wrapping_add(interval_us);
    if next_step_us >= last_step_us {
        // Deadline did not wrap; `now < last` means the clock itself wrapped
        now >= next_step_us || now < last_step_us
    } else {
        // Deadline wrapped, so the clock must have wrapped too
        now >= next_step_us && now < last_step_us
    }
}

/// Last step timestamp plus the interval derived from the current speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepTimer {
    last_step_us: u32,
    interval_us: Option<u32>,
}

impl StepTimer {
    /// A timer at standstill whose last step is at t = 0.
    pub const fn new() -> Self {
        Self {
            last_step_us: 0,
            interval_us: None,
        }
    }

    /// Recompute the interval for a new speed.
    #[inline]
    pub fn set_speed(&mut self, speed: f32) {
        self.interval_us = interval_from_speed(speed);
    }

    /// Current step interval, `None` at standstill.
    #[inline]
    pub fn interval_us(&self) -> Option<u32> {
        self.interval_us
    }

    /// Timestamp of the last step.
    #[inline]
    pub fn last_step_us(&self) -> u32 {
        self.last_step_us
    }

    /// Check without consuming the step.
    #[inline]
    pub fn is_due(&self, now: u32) -> bool {
        step_is_due(now, self.last_step_us, self.interval_us)
    }

    /// Returns `true` and records `now` as the last step time if a step is due.
    #[inline]
    pub fn poll(&mut self, now: u32) -> bool {
        if self.is_due(now) {
            self.last_step_us = now;
            true
        } else {
            false
        }
    }
}
