//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::topology::Topology;

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Pin topology code: 0, 1, 2, 4 or 8.
    pub topology: Topology,

    /// Ceiling on |speed| in steps per second.
    #[serde(default = "default_max_speed", rename = "max_speed_steps_per_sec")]
    pub max_speed: f32,

    /// Acceleration and deceleration in steps per second squared.
    #[serde(default = "default_acceleration", rename = "acceleration_steps_per_sec2")]
    pub acceleration: f32,

    /// Minimum STEP pulse width in microseconds (driver topology).
    #[serde(default = "default_min_pulse_width_us")]
    pub min_pulse_width_us: u32,

    /// Invert direction pin logic (driver topology).
    #[serde(default)]
    pub invert_direction: bool,
}

fn default_max_speed() -> f32 {
    1.0
}

fn default_acceleration() -> f32 {
    1.0
}

fn default_min_pulse_width_us() -> u32 {
    1
}

impl MotorConfig {
    /// Create a configuration with the controller defaults
    /// (1 step/s, 1 step/s², 1 µs pulse).
    pub fn new(name: String<32>, topology: Topology) -> Self {
        Self {
            name,
            topology,
            max_speed: default_max_speed(),
            acceleration: default_acceleration(),
            min_pulse_width_us: default_min_pulse_width_us(),
            invert_direction: false,
        }
    }

    /// Step interval at max speed in microseconds, if the motor can move at all.
    pub fn min_step_interval_us(&self) -> Option<u32> {
        crate::motion::interval_from_speed(self.max_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MotorConfig::new(String::try_from("test").unwrap(), Topology::FourWire);

        assert_eq!(config.max_speed, 1.0);
        assert_eq!(config.acceleration, 1.0);
        assert_eq!(config.min_pulse_width_us, 1);
        assert!(!config.invert_direction);
    }

    #[test]
    fn test_min_step_interval() {
        let mut config = MotorConfig::new(String::try_from("test").unwrap(), Topology::Driver);
        config.max_speed = 200.0;
        assert_eq!(config.min_step_interval_us(), Some(5_000));

        config.max_speed = 0.0;
        assert_eq!(config.min_step_interval_us(), None);
    }
}
