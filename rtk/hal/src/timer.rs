//! Quantum timer abstraction

use crate::error::HalResult;
use crate::InterruptPriority;

/// Periodic interrupt source that preempts the running thread.
///
/// Every expiry must end up in the kernel's `switch_context`.
pub trait QuantumTimer {
    /// Program the reload value (timer counts per quantum) and the priority
    /// of the expiry interrupt, then start counting.
    fn configure(&self, reload: u32, priority: InterruptPriority) -> HalResult<()>;

    /// Restart the countdown from the full reload value.
    ///
    /// Called on every cooperative yield so the next thread gets a fresh
    /// quantum.
    fn restart(&self);
}
