//! Coil energising tables for the multi-wire topologies.
//!
//! Rows are indexed by phase (`position & 0x7`, narrowed to the table
//! length). Columns are pin 1 .. pin N. Hardware wiring depends on these
//! levels bit for bit.

use crate::config::Topology;

const H: bool = true;
const L: bool = false;

/// Two-wire quadrature, full step.
pub const TWO_WIRE: [[bool; 2]; 4] = [
    [L, H], // 01
    [H, H], // 11
    [H, L], // 10
    [L, L], // 00
];

/// Four-wire unipolar, full step with two coils on.
pub const FOUR_WIRE: [[bool; 4]; 4] = [
    [H, L, H, L], // 1010
    [L, H, H, L], // 0110
    [L, H, L, H], // 0101
    [H, L, L, H], // 1001
];

/// Four-wire unipolar, half step: single and dual coil states alternate.
pub const HALF_STEP: [[bool; 4]; 8] = [
    [H, L, L, L], // 1000
    [H, L, H, L], // 1010
    [L, L, H, L], // 0010
    [L, H, H, L], // 0110
    [L, H, L, L], // 0100
    [L, H, L, H], // 0101
    [L, L, L, H], // 0001
    [H, L, L, H], // 1001
];

/// Phase of a position: its low three bits, valid for negative positions too.
#[inline]
pub fn phase_of(position: i64) -> u8 {
    (position & 0x7) as u8
}

/// Pin levels for a topology at a phase. Empty for the functional and
/// driver topologies, which have no table.
pub fn levels(topology: Topology, phase: u8) -> &'static [bool] {
    match topology {
        Topology::TwoWire => &TWO_WIRE[usize::from(phase & 0x3)],
        Topology::FourWire => &FOUR_WIRE[usize::from(phase & 0x3)],
        Topology::HalfStep => &HALF_STEP[usize::from(phase & 0x7)],
        Topology::Functional | Topology::Driver => &[],
    }
}
