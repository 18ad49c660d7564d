//! Configuration module for accel-stepper.
//!
//! Provides types for loading and validating motor configurations
//! from TOML files (with `std` feature) or pre-parsed data.

mod motor;
mod system;
mod topology;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::MotorConfig;
pub use system::SystemConfig;
pub use topology::Topology;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
