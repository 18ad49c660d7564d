//! Error types for accel-stepper.
//!
//! Configuration problems are reported when a motor is built; the only error
//! a running motor can produce is a failed pin write.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all accel-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor hardware error
    Motor(MotorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Pin topology outside {0, 1, 2, 4, 8}
    InvalidTopology(u8),
    /// Acceleration must be finite and > 0
    InvalidAcceleration(f32),
    /// Max speed must be finite and >= 0
    InvalidMaxSpeed(f32),
    /// Number of pins supplied does not match the topology
    PinCountMismatch {
        /// Topology code (0, 1, 2, 4 or 8)
        topology: u8,
        /// Pins the topology needs
        expected: usize,
        /// Pins actually supplied
        found: usize,
    },
    /// A required builder component was not supplied
    MissingField(&'static str),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidTopology(v) => {
                write!(f, "Invalid pin topology: {}. Valid values: 0, 1, 2, 4, 8", v)
            }
            ConfigError::InvalidAcceleration(v) => {
                write!(f, "Invalid acceleration: {}. Must be > 0", v)
            }
            ConfigError::InvalidMaxSpeed(v) => write!(f, "Invalid max speed: {}. Must be >= 0", v),
            ConfigError::PinCountMismatch {
                topology,
                expected,
                found,
            } => write!(
                f,
                "Topology {} needs {} pins, {} supplied",
                topology, expected, found
            ),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}
