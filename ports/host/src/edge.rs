use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use rtk_hal::{EdgeInput, HalResult, InterruptPriority};

/// Simulated edge-sensitive input.
///
/// [`SimEdgeInput::press`] models a signal edge. It only raises an interrupt
/// while the input is armed, like a masked GPIO interrupt.
#[derive(Debug, Default)]
pub struct SimEdgeInput {
    armed: AtomicBool,
    pending: AtomicBool,
    priority: AtomicU8,
    acknowledged: AtomicU32,
}

impl SimEdgeInput {
    pub const fn new() -> Self {
        Self {
            armed: AtomicBool::new(false),
            pending: AtomicBool::new(false),
            priority: AtomicU8::new(0),
            acknowledged: AtomicU32::new(0),
        }
    }

    /// Apply an edge. Returns true when the interrupt handler should run.
    pub fn press(&self) -> bool {
        self.pending.store(true, Ordering::Release);
        self.armed.load(Ordering::Acquire)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub fn priority(&self) -> InterruptPriority {
        self.priority.load(Ordering::Acquire)
    }

    /// Number of acknowledgements so far.
    pub fn acknowledged(&self) -> u32 {
        self.acknowledged.load(Ordering::Acquire)
    }
}

impl EdgeInput for SimEdgeInput {
    fn configure(&self, priority: InterruptPriority) -> HalResult<()> {
        self.priority.store(priority, Ordering::Release);
        self.armed.store(false, Ordering::Release);
        Ok(())
    }

    fn acknowledge(&self) {
        self.pending.store(false, Ordering::Release);
        self.acknowledged.fetch_add(1, Ordering::AcqRel);
    }

    fn arm(&self) {
        self.armed.store(true, Ordering::Release);
    }

    fn disarm(&self) {
        self.armed.store(false, Ordering::Release);
    }

    fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }
}
