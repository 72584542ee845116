//! Thread priorities

use core::fmt;

/// Scheduling priority of a thread.
///
/// Lower numbers are more urgent: a thread at priority 0 always wins over an
/// eligible thread at priority 1. Threads sharing the same value are served
/// round robin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Priority(u8);

impl Priority {
    /// Most urgent priority
    pub const HIGHEST: Priority = Priority(0);

    /// Least urgent priority, also used for threads registered without one
    pub const LOWEST: Priority = Priority(u8::MAX);

    /// Create a priority from its raw level
    pub const fn new(level: u8) -> Self {
        Priority(level)
    }

    /// Get the raw priority level
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// True when `self` should be scheduled ahead of `other`
    pub const fn is_more_urgent_than(self, other: Priority) -> bool {
        self.0 < other.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::LOWEST
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Priority({})", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Priority {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Priority({})", self.0);
    }
}

/// Macro to create compile-time priority constants
#[macro_export]
macro_rules! priority {
    ($value:literal) => {
        $crate::Priority::new($value)
    };
}
