//! Step outputs.
//!
//! A [`Drive`] is chosen once when the motor is built and owns whatever the
//! topology needs: two callbacks, a STEP/DIR pair, or two or four coil pins.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::config::Topology;
use crate::error::MotorError;
use crate::motion::{pattern, Direction};

/// Per-step hooks for the pinless topology.
pub trait StepCallbacks {
    /// Called once for every clockwise step.
    fn forward(&mut self);
    /// Called once for every counter-clockwise step.
    fn backward(&mut self);
}

/// A pair of closures used as [`StepCallbacks`].
#[derive(Debug, Clone, Copy)]
pub struct Callbacks<F, B> {
    forward: F,
    backward: B,
}

impl<F, B> Callbacks<F, B>
where
    F: FnMut(),
    B: FnMut(),
{
    /// Wrap the two closures.
    pub fn new(forward: F, backward: B) -> Self {
        Self { forward, backward }
    }
}

impl<F, B> StepCallbacks for Callbacks<F, B>
where
    F: FnMut(),
    B: FnMut(),
{
    #[inline]
    fn forward(&mut self) {
        (self.forward)()
    }

    #[inline]
    fn backward(&mut self) {
        (self.backward)()
    }
}

/// Placeholder callbacks for pin-driven motors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCallbacks;

impl StepCallbacks for NoCallbacks {
    fn forward(&mut self) {}
    fn backward(&mut self) {}
}

/// Placeholder pin type for callback-driven motors.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Delay that returns immediately, for topologies that never pulse.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// The outputs of one motor, tagged by topology.
#[derive(Debug)]
pub enum Drive<P, C = NoCallbacks> {
    /// Topology 0: callbacks, no pins.
    Functional(C),
    /// Topology 1: step/direction driver.
    Driver {
        /// STEP pin, pulsed once per step.
        step: P,
        /// DIR pin, high for clockwise unless inverted.
        dir: P,
        /// Swap the DIR level.
        invert_direction: bool,
    },
    /// Topology 2: two-wire quadrature.
    TwoWire([P; 2]),
    /// Topology 4: four-wire full step.
    FourWire([P; 4]),
    /// Topology 8: four-wire half step.
    HalfStep([P; 4]),
}

impl<P, C> Drive<P, C>
where
    P: OutputPin,
    C: StepCallbacks,
{
    /// The topology this drive implements.
    pub fn topology(&self) -> Topology {
        match self {
            Drive::Functional(_) => Topology::Functional,
            Drive::Driver { .. } => Topology::Driver,
            Drive::TwoWire(_) => Topology::TwoWire,
            Drive::FourWire(_) => Topology::FourWire,
            Drive::HalfStep(_) => Topology::HalfStep,
        }
    }

    /// Emit one step.
    ///
    /// `phase` is the new position's low three bits. For the driver topology
    /// this blocks for `min_pulse_width_us` while STEP is held high.
    pub fn step<D: DelayNs>(
        &mut self,
        phase: u8,
        direction: Direction,
        min_pulse_width_us: u32,
        delay: &mut D,
    ) -> Result<(), MotorError> {
        let topology = self.topology();
        match self {
            Drive::Functional(callbacks) => {
                match direction {
                    Direction::Clockwise => callbacks.forward(),
                    Direction::CounterClockwise => callbacks.backward(),
                }
                Ok(())
            }
            Drive::Driver {
                step,
                dir,
                invert_direction,
            } => {
                set_level(dir, (direction == Direction::Clockwise) != *invert_direction)?;
                // Driver boards need ~200 ns of DIR setup before the STEP edge
                step.set_high().map_err(|_| MotorError::PinError)?;
                delay.delay_us(min_pulse_width_us);
                step.set_low().map_err(|_| MotorError::PinError)
            }
            coils => coils.write_coils(pattern::levels(topology, phase)),
        }
    }

    /// Drive every pin low so no coil draws current.
    pub fn disable(&mut self) -> Result<(), MotorError> {
        match self {
            Drive::Functional(_) => Ok(()),
            Drive::Driver { step, dir, .. } => {
                set_level(step, false)?;
                set_level(dir, false)
            }
            coils => coils.write_coils(&[false; 4]),
        }
    }

    /// Coil pins in wiring order, `None` for the functional and driver
    /// topologies.
    fn coils_mut(&mut self) -> Option<&mut [P]> {
        match self {
            Drive::TwoWire(pins) => Some(&mut pins[..]),
            Drive::FourWire(pins) | Drive::HalfStep(pins) => Some(&mut pins[..]),
            Drive::Functional(_) | Drive::Driver { .. } => None,
        }
    }

    /// Write one level per coil pin; extra levels are ignored.
    fn write_coils(&mut self, levels: &[bool]) -> Result<(), MotorError> {
        match self.coils_mut() {
            Some(pins) => write_levels(pins, levels),
            None => Ok(()),
        }
    }
}

#[inline]
fn set_level<P: OutputPin>(pin: &mut P, high: bool) -> Result<(), MotorError> {
    let result = if high { pin.set_high() } else { pin.set_low() };
    result.map_err(|_| MotorError::PinError)
}

fn write_levels<P: OutputPin>(pins: &mut [P], levels: &[bool]) -> Result<(), MotorError> {
    for (pin, &level) in pins.iter_mut().zip(levels) {
        set_level(pin, level)?;
    }
    Ok(())
}
