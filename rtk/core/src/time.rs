//! Tick counters

use core::fmt;

/// Countdown measured in kernel ticks.
///
/// Used for thread sleeps and periodic event slots. Zero means idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Countdown(u32);

impl Countdown {
    /// An expired countdown
    pub const ZERO: Self = Self(0);

    pub const fn new(ticks: u32) -> Self {
        Self(ticks)
    }

    /// Remaining ticks
    pub const fn remaining(self) -> u32 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Advance the countdown by one tick.
    ///
    /// Returns true on the tick that brings it to zero. An expired countdown
    /// stays at zero and returns false.
    pub fn decrement(&mut self) -> bool {
        if self.0 > 0 {
            self.0 -= 1;
            self.0 == 0
        } else {
            false
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ticks", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Countdown {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}ticks", self.0);
    }
}

/// Monotonic tick counter, wraps at `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TickCount(u32);

impl TickCount {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Increment the counter, returning the new value
    pub fn tick(&mut self) -> Self {
        self.0 = self.0.wrapping_add(1);
        *self
    }

    /// Ticks elapsed since `earlier`, accounting for wrap-around
    pub const fn since(self, earlier: TickCount) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }
}

impl fmt::Display for TickCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TickCount {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "@{}", self.0);
    }
}
