//! Configuration validation.

use crate::error::Result;
use crate::motion::SpeedProfile;

use super::{MotorConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks every motor's max speed and acceleration. Topology codes are
/// already checked while deserialising.
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (name, motor) in config.motors.iter() {
        validate_motor(name.as_str(), motor)?;
    }

    Ok(())
}

fn validate_motor(_name: &str, config: &MotorConfig) -> Result<()> {
    SpeedProfile::new(config.max_speed, config.acceleration)?;
    Ok(())
}
