use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

use rtk_hal::{HalError, HalResult, InterruptPriority, QuantumTimer};

/// Stand-in for the hardware quantum timer.
///
/// Records the programmed reload and priority and counts restarts.
#[derive(Debug, Default)]
pub struct SimQuantumTimer {
    reload: AtomicU32,
    priority: AtomicU8,
    restarts: AtomicU32,
}

impl SimQuantumTimer {
    pub const fn new() -> Self {
        Self {
            reload: AtomicU32::new(0),
            priority: AtomicU8::new(0),
            restarts: AtomicU32::new(0),
        }
    }

    /// Reload programmed by the kernel, `None` before launch.
    pub fn reload(&self) -> Option<u32> {
        match self.reload.load(Ordering::Acquire) {
            0 => None,
            reload => Some(reload),
        }
    }

    pub fn priority(&self) -> InterruptPriority {
        self.priority.load(Ordering::Acquire)
    }

    /// Number of times the quantum was restarted early.
    pub fn restarts(&self) -> u32 {
        self.restarts.load(Ordering::Acquire)
    }
}

impl QuantumTimer for SimQuantumTimer {
    fn configure(&self, reload: u32, priority: InterruptPriority) -> HalResult<()> {
        if reload == 0 {
            return Err(HalError::InvalidParameter);
        }
        log::debug!("quantum timer: reload {} priority {}", reload, priority);
        self.priority.store(priority, Ordering::Release);
        self.reload.store(reload, Ordering::Release);
        Ok(())
    }

    fn restart(&self) {
        self.restarts.fetch_add(1, Ordering::AcqRel);
    }
}
