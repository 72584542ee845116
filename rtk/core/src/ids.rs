//! Identifiers handed out by the kernel

use core::fmt;

/// Position of a thread in the registration batch.
///
/// Thread 0 is the first entry passed at registration and the first to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadId(u8);

impl ThreadId {
    pub const fn new(index: u8) -> Self {
        ThreadId(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "thread#{}", self.0)
    }
}

/// Handle to a registered periodic event slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventId(u8);

impl EventId {
    pub const fn new(index: u8) -> Self {
        EventId(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event#{}", self.0)
    }
}

/// Handle to a registered edge trigger.
///
/// Interrupt handlers pass it back to the kernel to identify their source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(u8);

impl EdgeId {
    pub const fn new(index: u8) -> Self {
        EdgeId(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge#{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ThreadId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "thread#{}", self.0);
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EventId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "event#{}", self.0);
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EdgeId {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "edge#{}", self.0);
    }
}
