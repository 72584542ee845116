//! Hardware abstraction for the RTK kernel
//!
//! The kernel never touches registers. It drives the CPU through the narrow
//! set of traits in this crate: a quantum timer, a switch trigger that owns
//! the exception-return mechanism, and edge-sensitive inputs. A port
//! implements them once per target.

#![no_std]

pub mod error;
pub mod gpio;
pub mod switch;
pub mod timer;

// Re-export commonly used types
pub use error::{HalError, HalResult};
pub use gpio::EdgeInput;
pub use switch::SwitchTrigger;
pub use timer::QuantumTimer;

/// Interrupt priority (0 = highest on most platforms)
pub type InterruptPriority = u8;

/// Everything the kernel needs from its target.
///
/// Blanket-implemented for any type providing both the quantum timer and the
/// switch trigger.
pub trait Port: QuantumTimer + SwitchTrigger {}

impl<T: QuantumTimer + SwitchTrigger> Port for T {}
