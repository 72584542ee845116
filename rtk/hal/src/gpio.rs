//! Edge-sensitive input abstraction

use crate::error::HalResult;
use crate::InterruptPriority;

/// Digital input raising an interrupt on a signal edge.
///
/// Implementations are shared with interrupt handlers, hence the `Sync`
/// bound and `&self` receivers.
pub trait EdgeInput: Sync {
    /// Configure the input and its interrupt priority. Leaves it disarmed.
    fn configure(&self, priority: InterruptPriority) -> HalResult<()>;

    /// Clear the pending interrupt condition
    fn acknowledge(&self);

    /// Enable edge interrupts
    fn arm(&self);

    /// Disable edge interrupts. Further edges are ignored until `arm`.
    fn disarm(&self);

    /// Check whether edge interrupts are enabled
    fn is_armed(&self) -> bool;
}
