//! Basic motor control example.
//!
//! Builds a step/direction motor on mock pins, runs a full move with the
//! non-blocking `run()` loop and then brakes a second move early.
//!
//! Run with: `cargo run --example basic_motor`

use accel_stepper::{AccelStepperBuilder, MonotonicClock, MotionPhase, Topology};

/// Mock delay provider for demonstration.
struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        // In real code, this would use hardware timer
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Mock output pin that counts rising edges.
struct MockPin {
    state: bool,
    rising_edges: u32,
}

impl MockPin {
    fn new() -> Self {
        Self {
            state: false,
            rising_edges: 0,
        }
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.state {
            self.rising_edges += 1;
        }
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

fn main() -> accel_stepper::Result<()> {
    println!("=== Basic Motor Control Example ===\n");

    let mut motor = AccelStepperBuilder::<MockPin, MonotonicClock, MockDelay>::new()
        .name("demo_motor")
        .topology(Topology::Driver)
        .pin(MockPin::new()) // STEP
        .pin(MockPin::new()) // DIR
        .clock(MonotonicClock::new())
        .delay(MockDelay)
        .max_speed(2000.0)
        .acceleration(4000.0)
        .min_pulse_width_us(2)
        .build()?;

    println!("Motor created: {}", motor.name());
    println!("Topology: {}", motor.topology());

    // Full move: accelerate, cruise, decelerate
    motor.move_to(4000);
    println!("\nMoving to {} steps", motor.target_position());

    let mut last_phase = motor.phase();
    println!("  {:?} at step {}", last_phase, motor.current_position());
    while motor.run()? {
        let phase = motor.phase();
        if phase != last_phase {
            println!(
                "  {:?} at step {} ({:.0} steps/s)",
                phase,
                motor.current_position(),
                motor.speed()
            );
            last_phase = phase;
        }
    }
    println!("Arrived at {} steps", motor.current_position());

    // Second move, braked halfway
    motor.move_to(0);
    while motor.current_position() > 2000 {
        motor.run()?;
    }
    motor.stop();
    println!(
        "\nStopping from {:.0} steps/s, braking to {}",
        motor.speed(),
        motor.target_position()
    );
    motor.run_to_position()?;
    assert_eq!(motor.phase(), MotionPhase::Idle);
    println!("Stopped at {} steps", motor.current_position());

    motor.disable_outputs()?;
    let (drive, _clock, _delay) = motor.release();
    if let accel_stepper::Drive::Driver { step, .. } = drive {
        println!("\nSTEP pulses emitted: {}", step.rising_edges);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
