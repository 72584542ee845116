use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use rtk_core::StackPointer;
use rtk_hal::SwitchTrigger;

/// Stand-in for the context switch interrupt.
///
/// A pended switch is only recorded. The driver of the simulation decides
/// when to perform it.
#[derive(Debug, Default)]
pub struct SimSwitch {
    pending: AtomicBool,
    requests: AtomicU32,
}

impl SimSwitch {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            requests: AtomicU32::new(0),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Clear the pending flag, returning whether it was set.
    pub fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Total switch requests, pending or not.
    pub fn requests(&self) -> u32 {
        self.requests.load(Ordering::Acquire)
    }
}

impl SwitchTrigger for SimSwitch {
    fn pend_switch(&self) {
        self.requests.fetch_add(1, Ordering::AcqRel);
        self.pending.store(true, Ordering::Release);
    }

    fn start_first(&self, sp: StackPointer) -> ! {
        panic!("host port cannot enter a thread ({sp}); drive the kernel with start()")
    }

    fn wait_for_interrupt(&self) {
        panic!("no eligible thread and no interrupt source on the host port")
    }
}
