//! Quantum timer and cooperative yield

use rtk_hal::{InterruptPriority, Port, QuantumTimer};

use crate::error::{KernelError, KernelResult};

/// Longest quantum a 24-bit reload register can express
pub const MAX_QUANTUM: u32 = 1 << 24;

/// Check `quantum` against the timer range.
pub(crate) fn validate(quantum: u32) -> KernelResult<u32> {
    if quantum == 0 || quantum > MAX_QUANTUM {
        return Err(KernelError::InvalidQuantum { ticks: quantum });
    }
    Ok(quantum)
}

/// Program the quantum timer with an already validated quantum. Called once,
/// at launch.
pub(crate) fn start<T: QuantumTimer>(
    timer: &T,
    quantum: u32,
    priority: InterruptPriority,
) -> KernelResult<()> {
    timer.configure(quantum, priority)?;
    Ok(())
}

/// Give up the rest of the quantum.
///
/// The timer restarts first so the next thread gets a full quantum, then the
/// switch interrupt is pended.
pub(crate) fn request_reschedule<P: Port>(port: &P) {
    port.restart();
    port.pend_switch();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantum_bounds() {
        assert!(validate(0).is_err());
        assert_eq!(validate(1), Ok(1));
        assert_eq!(validate(MAX_QUANTUM), Ok(MAX_QUANTUM));
        assert_eq!(
            validate(MAX_QUANTUM + 1),
            Err(KernelError::InvalidQuantum {
                ticks: MAX_QUANTUM + 1
            })
        );
    }
}
