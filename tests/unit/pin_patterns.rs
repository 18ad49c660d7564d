//! Unit tests for pin output sequences, checked against mock pins.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use accel_stepper::{AccelStepper, AccelStepperBuilder, Clock, NoDelay, Topology};
use embedded_hal::delay::DelayNs;
use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

/// Reference coil states, pin 1 first.
const TWO_WIRE: [&str; 4] = ["01", "11", "10", "00"];
const FOUR_WIRE: [&str; 4] = ["1010", "0110", "0101", "1001"];
const HALF_STEP: [&str; 8] = [
    "1000", "1010", "0010", "0110", "0100", "0101", "0001", "1001",
];

#[derive(Clone)]
struct ManualClock(Rc<Cell<u32>>);

impl Clock for ManualClock {
    fn now_us(&mut self) -> u32 {
        self.0.get()
    }
}

/// Delay that records every microsecond delay requested.
#[derive(Clone, Default)]
struct RecordingDelay(Rc<RefCell<Vec<u32>>>);

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(ns / 1_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().push(us);
    }
}

/// Expected writes for one pin while the motor visits `positions`.
fn expected_writes(rows: &[&str], positions: &[i64], pin: usize) -> Vec<Transaction> {
    positions
        .iter()
        .map(|position| {
            let row = rows[position.rem_euclid(8) as usize % rows.len()];
            if row.as_bytes()[pin] == b'1' {
                Transaction::set(State::High)
            } else {
                Transaction::set(State::Low)
            }
        })
        .collect()
}

/// Move to `target`, jumping the clock to each step's due time.
fn move_to<DELAY: DelayNs>(
    motor: &mut AccelStepper<PinMock, ManualClock, DELAY>,
    now: &Cell<u32>,
    target: i64,
) {
    motor.move_to(target);
    for _ in 0..10_000 {
        if let Some(interval) = motor.step_interval_us() {
            now.set(motor.last_step_time_us().wrapping_add(interval));
        }
        if !motor.run().unwrap() {
            return;
        }
    }
    panic!("move to {target} did not finish");
}

/// Drive a coil topology through `targets` and check every pin write.
fn check_coil_sequence(topology: Topology, rows: &[&str], targets: &[i64], visited: &[i64]) {
    let width = rows[0].len();
    let mut pins: Vec<PinMock> = (0..width)
        .map(|pin| {
            let mut writes = expected_writes(rows, visited, pin);
            // disable_outputs() at the end
            writes.push(Transaction::set(State::Low));
            PinMock::new(&writes)
        })
        .collect();

    let now = Rc::new(Cell::new(0));
    let mut motor = AccelStepperBuilder::<PinMock, ManualClock, NoDelay>::new()
        .topology(topology)
        .pins(pins.iter().cloned())
        .clock(ManualClock(now.clone()))
        .delay(NoDelay)
        .max_speed(100.0)
        .acceleration(100.0)
        .build()
        .unwrap();

    for &target in targets {
        move_to(&mut motor, &now, target);
        assert_eq!(motor.current_position(), target);
    }
    motor.disable_outputs().unwrap();

    for pin in pins.iter_mut() {
        pin.done();
    }
}

#[test]
fn test_two_wire_sequence() {
    check_coil_sequence(
        Topology::TwoWire,
        &TWO_WIRE,
        &[5, 3],
        &[1, 2, 3, 4, 5, 4, 3],
    );
}

#[test]
fn test_four_wire_sequence() {
    check_coil_sequence(
        Topology::FourWire,
        &FOUR_WIRE,
        &[5, 0],
        &[1, 2, 3, 4, 5, 4, 3, 2, 1, 0],
    );
}

#[test]
fn test_half_step_sequence_through_negative_positions() {
    check_coil_sequence(
        Topology::HalfStep,
        &HALF_STEP,
        &[-3, 2],
        &[-1, -2, -3, -2, -1, 0, 1, 2],
    );
}

#[test]
fn test_half_step_full_cycle() {
    check_coil_sequence(
        Topology::HalfStep,
        &HALF_STEP,
        &[9],
        &[1, 2, 3, 4, 5, 6, 7, 8, 9],
    );
}

#[test]
fn test_driver_pulses_with_min_width() {
    let pulse = |count: usize| {
        (0..count).flat_map(|_| [Transaction::set(State::High), Transaction::set(State::Low)])
    };
    let step_writes: Vec<Transaction> = pulse(3)
        .chain(pulse(2))
        .chain([Transaction::set(State::Low)])
        .collect();
    // DIR is written before every pulse, then dropped by disable_outputs()
    let dir_writes: Vec<Transaction> = [
        State::High,
        State::High,
        State::High,
        State::Low,
        State::Low,
        State::Low,
    ]
    .into_iter()
    .map(Transaction::set)
    .collect();

    let mut step = PinMock::new(&step_writes);
    let mut dir = PinMock::new(&dir_writes);
    let delay = RecordingDelay::default();
    let now = Rc::new(Cell::new(0));

    let mut motor = AccelStepperBuilder::<PinMock, ManualClock, RecordingDelay>::new()
        .topology(Topology::Driver)
        .pin(step.clone())
        .pin(dir.clone())
        .clock(ManualClock(now.clone()))
        .delay(delay.clone())
        .max_speed(100.0)
        .acceleration(100.0)
        .min_pulse_width_us(20)
        .build()
        .unwrap();

    move_to(&mut motor, &now, 3);
    move_to(&mut motor, &now, 1);
    motor.disable_outputs().unwrap();

    assert_eq!(*delay.0.borrow(), vec![20; 5]);

    step.done();
    dir.done();
}

#[test]
fn test_driver_inverted_direction_from_builder() {
    let mut step = PinMock::new(&[Transaction::set(State::High), Transaction::set(State::Low)]);
    let mut dir = PinMock::new(&[Transaction::set(State::Low)]);
    let now = Rc::new(Cell::new(0));

    let mut motor = AccelStepperBuilder::<PinMock, ManualClock, NoDelay>::new()
        .topology(Topology::Driver)
        .pins([step.clone(), dir.clone()])
        .clock(ManualClock(now.clone()))
        .delay(NoDelay)
        .invert_direction(true)
        .build()
        .unwrap();

    move_to(&mut motor, &now, 1);
    assert_eq!(motor.current_position(), 1);

    step.done();
    dir.done();
}
