//! Unit tests for configuration validation and config-driven building.

use accel_stepper::config::{parse_config, validate_config, SystemConfig};
use accel_stepper::{AccelStepperBuilder, Clock, ConfigError, Error, NoDelay, NoPin, Topology};

struct ZeroClock;

impl Clock for ZeroClock {
    fn now_us(&mut self) -> u32 {
        0
    }
}

type Builder = AccelStepperBuilder<NoPin, ZeroClock, NoDelay>;

const CONFIG: &str = r#"
[motors.x]
name = "x"
topology = 1
max_speed_steps_per_sec = 800.0
acceleration_steps_per_sec2 = 400.0
min_pulse_width_us = 5
invert_direction = true

[motors.z]
name = "z"
topology = 8
max_speed_steps_per_sec = 300.0
acceleration_steps_per_sec2 = 100.0
"#;

#[test]
fn test_valid_config_passes() {
    let config: SystemConfig = toml::from_str(CONFIG).unwrap();
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_negative_max_speed_rejected() {
    let config: SystemConfig = toml::from_str(
        r#"
[motors.x]
name = "x"
topology = 1
max_speed_steps_per_sec = -10.0
"#,
    )
    .unwrap();

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMaxSpeed(v))) if v == -10.0
    ));
}

#[test]
fn test_zero_max_speed_allowed() {
    let config = parse_config(
        r#"
[motors.parked]
name = "parked"
topology = 2
max_speed_steps_per_sec = 0.0
"#,
    )
    .unwrap();

    let motor = config.motor("parked").unwrap();
    assert_eq!(motor.min_step_interval_us(), None);
}

#[test]
fn test_negative_acceleration_rejected() {
    let result = parse_config(
        r#"
[motors.x]
name = "x"
topology = 1
acceleration_steps_per_sec2 = -1.0
"#,
    );

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidAcceleration(_)))
    ));
}

#[test]
fn test_build_from_config() {
    let config = parse_config(CONFIG).unwrap();

    let motor = Builder::new()
        .from_config(&config, "x")
        .unwrap()
        .pins([NoPin; 2])
        .clock(ZeroClock)
        .delay(NoDelay)
        .build()
        .unwrap();

    assert_eq!(motor.name(), "x");
    assert_eq!(motor.topology(), Topology::Driver);
    assert_eq!(motor.max_speed(), 800.0);
    assert_eq!(motor.acceleration(), 400.0);
    assert_eq!(motor.min_pulse_width_us(), 5);
}

#[test]
fn test_build_from_config_wrong_pin_count() {
    let config = parse_config(CONFIG).unwrap();

    let result = Builder::new()
        .from_config(&config, "z")
        .unwrap()
        .pins([NoPin; 2])
        .clock(ZeroClock)
        .delay(NoDelay)
        .build();

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::PinCountMismatch {
            topology: 8,
            expected: 4,
            found: 2
        }))
    ));
}

#[test]
fn test_build_from_config_unknown_motor() {
    let config = parse_config(CONFIG).unwrap();

    let result = Builder::new().from_config(&config, "y");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MotorNotFound(ref name))) if name.as_str() == "y"
    ));
}

#[test]
fn test_error_messages() {
    let err = Error::from(ConfigError::InvalidTopology(3));
    assert_eq!(
        err.to_string(),
        "Configuration error: Invalid pin topology: 3. Valid values: 0, 1, 2, 4, 8"
    );
}
