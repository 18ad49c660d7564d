//! Motion module for accel-stepper.
//!
//! Speed profile computation, step timing and coil patterns. Everything
//! here is pure and hardware-free.

pub mod pattern;
mod profile;
pub mod timing;

pub use profile::{Direction, MotionPhase, SpeedProfile};
pub use timing::{interval_from_speed, step_is_due, StepTimer};
