//! Kernel error taxonomy

use rtk_core::{EdgeId, ThreadId};
use rtk_hal::HalError;
use thiserror::Error;

/// Result type used throughout the kernel
pub type KernelResult<T> = Result<T, KernelError>;

/// Errors reported by setup calls and queue operations.
///
/// Runtime synchronization (wait, signal, sleep, yield) never fails.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    #[error("threads are already registered")]
    AlreadyRegistered,
    #[error("kernel is already running")]
    AlreadyLaunched,
    #[error("no threads registered")]
    NotRegistered,
    #[error("{thread} stack holds {words} words, at least {required} required")]
    StackTooSmall {
        thread: ThreadId,
        words: usize,
        required: usize,
    },
    #[error("{table} table is full ({capacity} slots)")]
    CapacityExceeded {
        table: &'static str,
        capacity: usize,
    },
    #[error("event period must be at least one tick")]
    InvalidPeriod,
    #[error("quantum of {ticks} ticks does not fit the timer reload")]
    InvalidQuantum { ticks: u32 },
    #[error("{0} is not registered")]
    UnknownEdge(EdgeId),
    #[error("queue is full")]
    QueueFull,
    #[error("hardware: {0}")]
    Hal(#[from] HalError),
}

#[cfg(feature = "defmt")]
impl defmt::Format for KernelError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::AlreadyRegistered => defmt::write!(fmt, "AlreadyRegistered"),
            Self::AlreadyLaunched => defmt::write!(fmt, "AlreadyLaunched"),
            Self::NotRegistered => defmt::write!(fmt, "NotRegistered"),
            Self::StackTooSmall { thread, words, .. } => {
                defmt::write!(fmt, "StackTooSmall({}, {=usize})", thread, words)
            }
            Self::CapacityExceeded { capacity, .. } => {
                defmt::write!(fmt, "CapacityExceeded({=usize})", capacity)
            }
            Self::InvalidPeriod => defmt::write!(fmt, "InvalidPeriod"),
            Self::InvalidQuantum { ticks } => defmt::write!(fmt, "InvalidQuantum({=u32})", ticks),
            Self::UnknownEdge(id) => defmt::write!(fmt, "UnknownEdge({})", id),
            Self::QueueFull => defmt::write!(fmt, "QueueFull"),
            Self::Hal(e) => defmt::write!(fmt, "Hal({})", e),
        }
    }
}
