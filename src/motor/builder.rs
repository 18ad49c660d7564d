//! Builder pattern for AccelStepper.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::clock::Clock;
use crate::config::{MotorConfig, SystemConfig, Topology};
use crate::error::{ConfigError, Error, Result};
use crate::fmt::debug;
use crate::motion::SpeedProfile;

use super::drive::{Callbacks, Drive, NoCallbacks, NoDelay, NoPin, StepCallbacks};
use super::driver::AccelStepper;

/// Builder for creating AccelStepper instances.
///
/// Pins are given in wiring order: STEP then DIR for the driver topology,
/// pin 1 to pin N for the coil topologies.
pub struct AccelStepperBuilder<P, CLK, DELAY, C = NoCallbacks>
where
    P: OutputPin,
    CLK: Clock,
    DELAY: DelayNs,
    C: StepCallbacks,
{
    pins: heapless::Vec<P, 4>,
    surplus_pins: usize,
    callbacks: Option<C>,
    clock: Option<CLK>,
    delay: Option<DELAY>,
    name: Option<heapless::String<32>>,
    topology: Option<Topology>,
    max_speed: f32,
    acceleration: f32,
    min_pulse_width_us: u32,
    invert_direction: bool,
}

impl<P, CLK, DELAY, C> Default for AccelStepperBuilder<P, CLK, DELAY, C>
where
    P: OutputPin,
    CLK: Clock,
    DELAY: DelayNs,
    C: StepCallbacks,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<CLK, F, B> AccelStepperBuilder<NoPin, CLK, NoDelay, Callbacks<F, B>>
where
    CLK: Clock,
    F: FnMut(),
    B: FnMut(),
{
    /// Start a pinless motor that calls `forward` or `backward` on every step.
    pub fn functional(forward: F, backward: B) -> Self {
        Self::new()
            .topology(Topology::Functional)
            .callbacks(Callbacks::new(forward, backward))
            .delay(NoDelay)
    }
}

impl<P, CLK, DELAY, C> AccelStepperBuilder<P, CLK, DELAY, C>
where
    P: OutputPin,
    CLK: Clock,
    DELAY: DelayNs,
    C: StepCallbacks,
{
    /// Create a new builder with 1 step/s, 1 step/s² and a 1 µs pulse.
    pub fn new() -> Self {
        Self {
            pins: heapless::Vec::new(),
            surplus_pins: 0,
            callbacks: None,
            clock: None,
            delay: None,
            name: None,
            topology: None,
            max_speed: 1.0,
            acceleration: 1.0,
            min_pulse_width_us: 1,
            invert_direction: false,
        }
    }

    /// Set the pin topology.
    pub fn topology(mut self, topology: Topology) -> Self {
        self.topology = Some(topology);
        self
    }

    /// Add the next output pin.
    pub fn pin(mut self, pin: P) -> Self {
        if self.pins.push(pin).is_err() {
            self.surplus_pins += 1;
        }
        self
    }

    /// Add several output pins in wiring order.
    pub fn pins<I: IntoIterator<Item = P>>(self, pins: I) -> Self {
        pins.into_iter().fold(self, Self::pin)
    }

    /// Set the callbacks for the functional topology.
    pub fn callbacks(mut self, callbacks: C) -> Self {
        self.callbacks = Some(callbacks);
        self
    }

    /// Set the microsecond clock.
    pub fn clock(mut self, clock: CLK) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the motor name. Names longer than 32 bytes are cut at the last
    /// whole character that fits.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(truncated(name));
        self
    }

    /// Set the speed limit in steps/s.
    pub fn max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Set acceleration in steps/s².
    pub fn acceleration(mut self, acceleration: f32) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Set the STEP pulse width in microseconds.
    pub fn min_pulse_width_us(mut self, width: u32) -> Self {
        self.min_pulse_width_us = width;
        self
    }

    /// Set direction inversion (driver topology).
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.name = Some(config.name.clone());
        self.topology = Some(config.topology);
        self.max_speed = config.max_speed;
        self.acceleration = config.acceleration;
        self.min_pulse_width_us = config.min_pulse_width_us;
        self.invert_direction = config.invert_direction;
        self
    }

    /// Configure from SystemConfig by motor name.
    pub fn from_config(self, config: &SystemConfig, motor_name: &str) -> Result<Self> {
        let motor_config = config.motor(motor_name).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(truncated(motor_name)))
        })?;

        Ok(self.from_motor_config(motor_config))
    }

    /// Build the AccelStepper.
    ///
    /// # Errors
    ///
    /// Returns an error if the topology, clock, delay or callbacks are
    /// missing, the pin count does not match the topology, or the speed
    /// limit or acceleration is invalid.
    pub fn build(self) -> Result<AccelStepper<P, CLK, DELAY, C>> {
        let topology = self.topology.ok_or(ConfigError::MissingField("topology"))?;
        let clock = self.clock.ok_or(ConfigError::MissingField("clock"))?;
        let delay = self.delay.ok_or(ConfigError::MissingField("delay"))?;
        let profile = SpeedProfile::new(self.max_speed, self.acceleration)?;

        let found = self.pins.len() + self.surplus_pins;
        let mismatch = ConfigError::PinCountMismatch {
            topology: topology.code(),
            expected: topology.pin_count(),
            found,
        };
        if found != topology.pin_count() {
            return Err(mismatch.into());
        }

        let mut pins = self.pins.into_iter();
        let drive = match (topology, pins.next(), pins.next(), pins.next(), pins.next()) {
            (Topology::Functional, ..) => Drive::Functional(
                self.callbacks
                    .ok_or(ConfigError::MissingField("callbacks"))?,
            ),
            (Topology::Driver, Some(step), Some(dir), None, None) => Drive::Driver {
                step,
                dir,
                invert_direction: self.invert_direction,
            },
            (Topology::TwoWire, Some(p1), Some(p2), None, None) => Drive::TwoWire([p1, p2]),
            (Topology::FourWire, Some(p1), Some(p2), Some(p3), Some(p4)) => {
                Drive::FourWire([p1, p2, p3, p4])
            }
            (Topology::HalfStep, Some(p1), Some(p2), Some(p3), Some(p4)) => {
                Drive::HalfStep([p1, p2, p3, p4])
            }
            _ => return Err(mismatch.into()),
        };

        let name = self.name.unwrap_or_else(|| {
            let mut name = heapless::String::new();
            let _ = name.push_str("motor");
            name
        });

        debug!(
            "built motor '{}' topology {} max_speed {} acceleration {}",
            name.as_str(),
            topology.code(),
            profile.max_speed(),
            profile.acceleration()
        );

        Ok(AccelStepper::new(
            drive,
            clock,
            delay,
            name,
            profile,
            self.min_pulse_width_us,
        ))
    }
}

fn truncated(name: &str) -> heapless::String<32> {
    let mut out = heapless::String::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
