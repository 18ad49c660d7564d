//! Unit test harness for accel-stepper.
//!
//! This module organizes unit tests for each component of the library.

mod config_parsing;
mod config_validation;
mod pin_patterns;
