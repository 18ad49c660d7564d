//! Unit tests for TOML configuration parsing.

use accel_stepper::config::{load_config, parse_config, SystemConfig};
use accel_stepper::{ConfigError, Error, Topology};

/// Test parsing a fully specified driver motor from TOML.
#[test]
fn test_parse_motor_config() {
    let toml_str = r#"
[motors.stepper1]
name = "main_axis"
topology = 1
max_speed_steps_per_sec = 200.0
acceleration_steps_per_sec2 = 50.0
min_pulse_width_us = 20
invert_direction = true
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let motor = config.motor("stepper1").expect("Motor not found");

    assert_eq!(motor.name.as_str(), "main_axis");
    assert_eq!(motor.topology, Topology::Driver);
    assert_eq!(motor.max_speed, 200.0);
    assert_eq!(motor.acceleration, 50.0);
    assert_eq!(motor.min_pulse_width_us, 20);
    assert!(motor.invert_direction);
    assert_eq!(motor.min_step_interval_us(), Some(5_000));
}

/// Test every topology code round-trips through the file format.
#[test]
fn test_parse_all_topologies() {
    let toml_str = r#"
[motors.spindle]
name = "spindle"
topology = 0

[motors.x]
name = "x"
topology = 1

[motors.y]
name = "y"
topology = 2

[motors.z]
name = "z"
topology = 4

[motors.feeder]
name = "feeder"
topology = 8
"#;

    let config = parse_config(toml_str).expect("Failed to parse TOML");
    let topologies: Vec<Topology> = ["spindle", "x", "y", "z", "feeder"]
        .iter()
        .map(|name| config.motor(name).expect("Motor not found").topology)
        .collect();

    assert_eq!(
        topologies,
        [
            Topology::Functional,
            Topology::Driver,
            Topology::TwoWire,
            Topology::FourWire,
            Topology::HalfStep,
        ]
    );
    assert_eq!(config.motor_names().count(), 5);
}

/// Test that omitted fields take the controller defaults.
#[test]
fn test_parse_defaults() {
    let toml_str = r#"
[motors.m]
name = "m"
topology = 4
"#;

    let config = parse_config(toml_str).expect("Failed to parse TOML");
    let motor = config.motor("m").expect("Motor not found");

    assert_eq!(motor.max_speed, 1.0);
    assert_eq!(motor.acceleration, 1.0);
    assert_eq!(motor.min_pulse_width_us, 1);
    assert!(!motor.invert_direction);
}

/// Test that a missing topology is a parse error.
#[test]
fn test_parse_missing_topology() {
    let toml_str = r#"
[motors.m]
name = "m"
max_speed_steps_per_sec = 100.0
"#;

    assert!(matches!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test that unknown topology codes are rejected.
#[test]
fn test_parse_invalid_topology_codes() {
    for code in [3, 5, 6, 7, 9, 16] {
        let toml_str = format!("[motors.m]\nname = \"m\"\ntopology = {code}\n");
        assert!(
            matches!(
                parse_config(&toml_str),
                Err(Error::Config(ConfigError::ParseError(_)))
            ),
            "topology {code} should be rejected"
        );
    }
}

/// Test loading configuration from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!(
        "accel-stepper-config-{}.toml",
        std::process::id()
    ));
    std::fs::write(
        &path,
        r#"
[motors.pan]
name = "pan"
topology = 8
max_speed_steps_per_sec = 500.0
acceleration_steps_per_sec2 = 250.0
"#,
    )
    .expect("Failed to write config");

    let config = load_config(&path);
    std::fs::remove_file(&path).ok();

    let config = config.expect("Failed to load config");
    let motor = config.motor("pan").expect("Motor not found");
    assert_eq!(motor.topology, Topology::HalfStep);
    assert_eq!(motor.max_speed, 500.0);
}

/// Test that an unknown motor name is None.
#[test]
fn test_motor_lookup_missing() {
    let config = SystemConfig::default();
    assert!(config.motor("nope").is_none());
    assert_eq!(config.motor_names().count(), 0);
}
