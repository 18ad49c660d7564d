//! # accel-stepper
//!
//! Non-blocking stepper motor control with acceleration, built on
//! embedded-hal 1.0.
//!
//! ## Features
//!
//! - **Non-blocking**: `run()` emits at most one step per call and does almost
//!   nothing when no step is due
//! - **Trapezoidal profiles**: accelerate, cruise and decelerate to a target
//!   with no square root on the per-step path
//! - **Wrap-safe timing**: works across the 32-bit microsecond counter wrap
//! - **Five topologies**: callbacks, step/direction drivers, 2-wire, 4-wire
//!   full step and 4-wire half step
//! - **no_std compatible**: the core library works without the standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use accel_stepper::{AccelStepperBuilder, Topology};
//!
//! let mut motor = AccelStepperBuilder::new()
//!     .topology(Topology::Driver)
//!     .pin(step_pin)
//!     .pin(dir_pin)
//!     .clock(timer)
//!     .delay(delay)
//!     .max_speed(200.0)
//!     .acceleration(50.0)
//!     .build()?;
//!
//! motor.move_to(1000);
//! loop {
//!     motor.run()?;
//!     // other work
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and `MonotonicClock`
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod fmt;

// Core modules
pub mod clock;
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use clock::Clock;
pub use config::{validate_config, MotorConfig, SystemConfig, Topology};
pub use error::{ConfigError, Error, MotorError, Result};
pub use motion::{Direction, MotionPhase, SpeedProfile, StepTimer};
pub use motor::{
    AccelStepper, AccelStepperBuilder, Callbacks, Drive, NoCallbacks, NoDelay, NoPin,
    StepCallbacks,
};

#[cfg(feature = "std")]
pub use clock::MonotonicClock;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
