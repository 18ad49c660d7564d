//! Example: Configuration-driven motors.
//!
//! This example demonstrates how to:
//! - Load motor configuration from TOML
//! - Build motors by name with the builder
//! - Run two motors from one cooperative loop on a simulated clock
//!
//! Run with: `cargo run --example config_driven --features std`

use std::cell::Cell;
use std::rc::Rc;

use accel_stepper::{parse_config, AccelStepperBuilder, Clock, NoDelay, Result};

/// Mock coil or STEP/DIR pin for demonstration.
struct MockPin;

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

/// Simulated microsecond clock shared by every motor.
#[derive(Clone)]
struct SimClock(Rc<Cell<u32>>);

impl Clock for SimClock {
    fn now_us(&mut self) -> u32 {
        self.0.get()
    }
}

fn main() -> Result<()> {
    println!("=== Configuration-Driven Example ===\n");

    let toml_content = r#"
# Topology codes: 0 callbacks, 1 step/dir driver, 2 two-wire,
# 4 four-wire full step, 8 four-wire half step

[motors.x_axis]
name = "x_axis"
topology = 1
max_speed_steps_per_sec = 1600.0
acceleration_steps_per_sec2 = 3200.0
min_pulse_width_us = 5

[motors.feeder]
name = "feeder"
topology = 8
max_speed_steps_per_sec = 400.0
acceleration_steps_per_sec2 = 200.0
"#;

    let config = parse_config(toml_content)?;

    println!("Motor Configuration:");
    for name in config.motor_names() {
        if let Some(motor) = config.motor(name) {
            println!(
                "  - {}: topology {} ({} pins), {} steps/s max, {} steps/s², min interval {:?} µs",
                name,
                motor.topology,
                motor.topology.pin_count(),
                motor.max_speed,
                motor.acceleration,
                motor.min_step_interval_us()
            );
        }
    }
    println!();

    let now = Rc::new(Cell::new(u32::MAX - 500_000));

    let mut x_axis = AccelStepperBuilder::<MockPin, SimClock, NoDelay>::new()
        .from_config(&config, "x_axis")?
        .pins([MockPin, MockPin])
        .clock(SimClock(now.clone()))
        .delay(NoDelay)
        .build()?;

    let mut feeder = AccelStepperBuilder::<MockPin, SimClock, NoDelay>::new()
        .from_config(&config, "feeder")?
        .pins([MockPin, MockPin, MockPin, MockPin])
        .clock(SimClock(now.clone()))
        .delay(NoDelay)
        .build()?;

    x_axis.move_to(3200);
    feeder.move_to(-600);

    // The clock starts half a second before the counter wraps
    let mut elapsed_us: u64 = 0;
    loop {
        let x_running = x_axis.run()?;
        let feeder_running = feeder.run()?;
        if !x_running && !feeder_running {
            break;
        }

        if elapsed_us % 250_000 == 0 {
            println!(
                "t={:>5} ms  {}: {:>5} @ {:>7.1}   {}: {:>5} @ {:>7.1}",
                elapsed_us / 1000,
                x_axis.name(),
                x_axis.current_position(),
                x_axis.speed(),
                feeder.name(),
                feeder.current_position(),
                feeder.speed()
            );
        }

        now.set(now.get().wrapping_add(10));
        elapsed_us += 10;
    }

    println!(
        "\nDone after {} ms: {} at {}, {} at {}",
        elapsed_us / 1000,
        x_axis.name(),
        x_axis.current_position(),
        feeder.name(),
        feeder.current_position()
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
