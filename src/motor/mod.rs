//! Motor module for accel-stepper.
//!
//! Provides the stepper controller, its builder and its output drives.

mod builder;
mod drive;
mod driver;
mod position;

pub use builder::AccelStepperBuilder;
pub use drive::{Callbacks, Drive, NoCallbacks, NoDelay, NoPin, StepCallbacks};
pub use driver::AccelStepper;
pub use position::Position;
