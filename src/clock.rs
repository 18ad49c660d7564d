//! Microsecond time source.
//!
//! The controller only needs a free-running counter that wraps at `u32::MAX`,
//! the same contract as a hardware timer or Arduino's `micros()`.

/// A monotonically increasing microsecond counter that wraps modulo 2^32.
pub trait Clock {
    /// Current counter value in microseconds.
    fn now_us(&mut self) -> u32;
}

impl<T: Clock + ?Sized> Clock for &mut T {
    #[inline]
    fn now_us(&mut self) -> u32 {
        (**self).now_us()
    }
}

/// Clock backed by [`std::time::Instant`], truncated to a wrapping `u32`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl MonotonicClock {
    /// Start a clock counting from zero now.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for MonotonicClock {
    fn now_us(&mut self) -> u32 {
        // Truncation keeps the low 32 bits, i.e. wraps every ~71.6 minutes.
        self.origin.elapsed().as_micros() as u32
    }
}
