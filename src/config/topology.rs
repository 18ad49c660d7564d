//! Pin topology selector.

use core::fmt;

use serde::Deserialize;

use crate::error::ConfigError;

/// How a motor's steps are turned into outputs.
///
/// The numeric codes (0, 1, 2, 4, 8) are the wiring selectors used in
/// configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// 0: no pins, a forward or backward callback per step.
    Functional,
    /// 1: step/direction driver board (pin 1 = STEP, pin 2 = DIR).
    Driver,
    /// 2: two-wire quadrature, full step.
    TwoWire,
    /// 4: four-wire unipolar, full step, two coils energised.
    FourWire,
    /// 8: four-wire unipolar, half step.
    HalfStep,
}

impl Topology {
    /// Create from a configuration code.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTopology` for anything outside {0, 1, 2, 4, 8}.
    pub fn new(code: u8) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(Topology::Functional),
            1 => Ok(Topology::Driver),
            2 => Ok(Topology::TwoWire),
            4 => Ok(Topology::FourWire),
            8 => Ok(Topology::HalfStep),
            other => Err(ConfigError::InvalidTopology(other)),
        }
    }

    /// The configuration code of this topology.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Topology::Functional => 0,
            Topology::Driver => 1,
            Topology::TwoWire => 2,
            Topology::FourWire => 4,
            Topology::HalfStep => 8,
        }
    }

    /// Number of output pins the topology drives.
    #[inline]
    pub const fn pin_count(self) -> usize {
        match self {
            Topology::Functional => 0,
            Topology::Driver | Topology::TwoWire => 2,
            Topology::FourWire | Topology::HalfStep => 4,
        }
    }
}

impl TryFrom<u8> for Topology {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::new(code)
    }
}

impl From<Topology> for u8 {
    fn from(topology: Topology) -> Self {
        topology.code()
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topology::Functional => "functional",
            Topology::Driver => "driver",
            Topology::TwoWire => "two-wire",
            Topology::FourWire => "four-wire",
            Topology::HalfStep => "half-step",
        };
        write!(f, "{} ({})", name, self.code())
    }
}

impl<'de> Deserialize<'de> for Topology {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let code = u8::deserialize(deserializer)?;
        Topology::new(code).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}
