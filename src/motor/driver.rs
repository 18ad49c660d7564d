//! Accelerating stepper motor controller.
//!
//! Generic over embedded-hal 1.0 pin and delay types and a [`Clock`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::clock::Clock;
use crate::config::Topology;
use crate::error::Result;
use crate::fmt::{trace, warning};
use crate::motion::{Direction, MotionPhase, SpeedProfile, StepTimer};

use super::drive::{Drive, NoCallbacks, StepCallbacks};
use super::position::Position;

/// Non-blocking stepper motor controller with acceleration.
///
/// Call [`run`](Self::run) as often as possible; it steps at most once per
/// call and costs almost nothing when no step is due. Speeds are in
/// steps/s, positive clockwise.
///
/// Generic over:
/// - `P`: output pin type (must implement `OutputPin`)
/// - `CLK`: microsecond time source
/// - `DELAY`: delay provider used for the STEP pulse
/// - `C`: per-step callbacks for the pinless topology
pub struct AccelStepper<P, CLK, DELAY, C = NoCallbacks>
where
    P: OutputPin,
    CLK: Clock,
    DELAY: DelayNs,
    C: StepCallbacks,
{
    /// Step outputs, fixed at construction.
    drive: Drive<P, C>,

    /// Microsecond time source.
    clock: CLK,

    /// Delay provider for the STEP pulse.
    delay: DELAY,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,

    /// Current and target position.
    position: Position,

    /// Max speed and acceleration.
    profile: SpeedProfile,

    /// Signed speed in steps/s, always within the profile's limit.
    speed: f32,

    /// Last step time and the interval derived from `speed`.
    timer: StepTimer,

    /// STEP pulse width in microseconds.
    min_pulse_width_us: u32,
}

impl<P, CLK, DELAY, C> AccelStepper<P, CLK, DELAY, C>
where
    P: OutputPin,
    CLK: Clock,
    DELAY: DelayNs,
    C: StepCallbacks,
{
    /// Create a motor at rest at position 0.
    pub(crate) fn new(
        drive: Drive<P, C>,
        clock: CLK,
        delay: DELAY,
        name: heapless::String<32>,
        profile: SpeedProfile,
        min_pulse_width_us: u32,
    ) -> Self {
        Self {
            drive,
            clock,
            delay,
            name,
            position: Position::new(),
            profile,
            speed: 0.0,
            timer: StepTimer::new(),
            min_pulse_width_us,
        }
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the pin topology.
    #[inline]
    pub fn topology(&self) -> Topology {
        self.drive.topology()
    }

    /// Current position in steps.
    #[inline]
    pub fn current_position(&self) -> i64 {
        self.position.current()
    }

    /// Most recently set target in steps.
    #[inline]
    pub fn target_position(&self) -> i64 {
        self.position.target()
    }

    /// `target_position() - current_position()`.
    #[inline]
    pub fn distance_to_go(&self) -> i64 {
        self.position.distance_to_go()
    }

    /// Current signed speed in steps/s.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Speed limit in steps/s.
    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.profile.max_speed()
    }

    /// Acceleration in steps/s².
    #[inline]
    pub fn acceleration(&self) -> f32 {
        self.profile.acceleration()
    }

    /// Interval between steps at the current speed, `None` when stopped.
    #[inline]
    pub fn step_interval_us(&self) -> Option<u32> {
        self.timer.interval_us()
    }

    /// Clock reading at the most recent step.
    #[inline]
    pub fn last_step_time_us(&self) -> u32 {
        self.timer.last_step_us()
    }

    /// STEP pulse width in microseconds.
    #[inline]
    pub fn min_pulse_width_us(&self) -> u32 {
        self.min_pulse_width_us
    }

    /// Whether the motor is moving or has somewhere to go.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.speed != 0.0 || !self.position.is_at_target()
    }

    /// Which part of the profile the motor is in.
    #[inline]
    pub fn phase(&self) -> MotionPhase {
        self.profile.phase(self.position.distance_to_go(), self.speed)
    }

    /// Set an absolute target position and recompute the speed.
    ///
    /// The motor does not move until [`run`](Self::run) is called.
    pub fn move_to(&mut self, absolute: i64) {
        trace!("move_to {}", absolute);
        self.position.set_target(absolute);
        self.compute_new_speed();
    }

    /// Set a target relative to the current position.
    pub fn move_by(&mut self, relative: i64) {
        self.move_to(self.position.current().saturating_add(relative));
    }

    /// Redefine the current position without moving. The target becomes the
    /// same position and the speed drops to zero.
    pub fn set_current_position(&mut self, position: i64) {
        self.position.reset_to(position);
        self.compute_new_speed();
    }

    /// Retarget to the closest position the motor can brake to at the
    /// configured acceleration.
    pub fn stop(&mut self) {
        let stop_at = self
            .position
            .current()
            .saturating_add(self.profile.stopping_distance(self.speed));
        self.move_to(stop_at);
    }

    /// Set the speed limit and recompute the speed.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidMaxSpeed` if negative or not finite; the old
    /// limit stays in force.
    pub fn set_max_speed(&mut self, max_speed: f32) -> Result<()> {
        self.profile.set_max_speed(max_speed).map_err(|e| {
            warning!("rejected max speed {}", max_speed);
            e
        })?;
        self.compute_new_speed();
        Ok(())
    }

    /// Set the acceleration and recompute the speed.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidAcceleration` unless finite and positive; the old
    /// acceleration stays in force.
    pub fn set_acceleration(&mut self, acceleration: f32) -> Result<()> {
        self.profile.set_acceleration(acceleration).map_err(|e| {
            warning!("rejected acceleration {}", acceleration);
            e
        })?;
        self.compute_new_speed();
        Ok(())
    }

    /// Set the speed for constant-speed stepping with
    /// [`run_speed`](Self::run_speed).
    ///
    /// Clamped to `[-max_speed, max_speed]`. The step interval is updated
    /// here; the acceleration profile is not rerun.
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_nan() {
            warning!("ignored NaN speed");
            return;
        }
        let speed = self.profile.clamp(speed);
        if speed == self.speed {
            return;
        }
        self.speed = speed;
        self.timer.set_speed(speed);
    }

    /// Set the STEP pulse width used by the driver topology.
    #[inline]
    pub fn set_min_pulse_width(&mut self, min_pulse_width_us: u32) {
        self.min_pulse_width_us = min_pulse_width_us;
    }

    /// Step once if the current interval has elapsed since the last step.
    ///
    /// Steps in the direction of the current speed and never at zero speed.
    /// Does not touch the speed, so it implements constant-speed motion.
    ///
    /// Returns `true` if a step was emitted.
    pub fn run_speed(&mut self) -> Result<bool> {
        let Some(direction) = Direction::from_speed(self.speed) else {
            return Ok(false);
        };

        let now = self.clock.now_us();
        if !self.timer.poll(now) {
            return Ok(false);
        }

        let phase = self.position.advance(direction);
        self.drive
            .step(phase, direction, self.min_pulse_width_us, &mut self.delay)?;
        Ok(true)
    }

    /// Poll the motor toward its target with acceleration.
    ///
    /// Steps at most once, then recomputes the speed. Returns `true` while
    /// the target has not been reached, whether or not a step happened.
    pub fn run(&mut self) -> Result<bool> {
        if self.position.is_at_target() {
            return Ok(false);
        }

        // A braking step can land on exactly zero speed short of the target
        if self.run_speed()? || self.speed == 0.0 {
            self.compute_new_speed();
        }
        Ok(true)
    }

    /// Constant-speed stepping that stops at the target.
    pub fn run_speed_to_position(&mut self) -> Result<bool> {
        if self.position.is_at_target() {
            return Ok(false);
        }
        self.run_speed()
    }

    /// Block until the target is reached.
    ///
    /// Busy-loops on [`run`](Self::run) without yielding. In a cooperative
    /// scheduler call `run` from the loop instead, or use
    /// [`run_to_position_until`](Self::run_to_position_until).
    pub fn run_to_position(&mut self) -> Result<()> {
        while self.run()? {}
        Ok(())
    }

    /// Set a new target and block until it is reached.
    pub fn run_to_new_position(&mut self, position: i64) -> Result<()> {
        self.move_to(position);
        self.run_to_position()
    }

    /// Run toward the target until it is reached or `cancelled` returns true.
    ///
    /// `cancelled` is checked between calls to [`run`](Self::run). Returns
    /// `true` on arrival and `false` if cancelled; a cancelled motor keeps
    /// its speed, so follow up with [`stop`](Self::stop) to brake.
    pub fn run_to_position_until<F>(&mut self, mut cancelled: F) -> Result<bool>
    where
        F: FnMut() -> bool,
    {
        loop {
            if !self.run()? {
                return Ok(true);
            }
            if cancelled() {
                return Ok(false);
            }
        }
    }

    /// Drive every output low to cut coil current.
    pub fn disable_outputs(&mut self) -> Result<()> {
        self.drive.disable()?;
        Ok(())
    }

    /// Give back the drive, clock and delay.
    pub fn release(self) -> (Drive<P, C>, CLK, DELAY) {
        (self.drive, self.clock, self.delay)
    }

    fn compute_new_speed(&mut self) {
        let speed = self
            .profile
            .next_speed(self.position.distance_to_go(), self.speed);
        self.set_speed(speed);
    }
}
