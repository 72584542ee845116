//! Counting semaphore
//!
//! The counter is signed. A negative value `-k` means `k` threads are blocked
//! on the semaphore. Blocking and waking are done by the kernel, which
//! implements [`Synchronizer`].

use core::cell::Cell;
use core::fmt;

use critical_section::{CriticalSection, Mutex};

/// Identity of a semaphore, as recorded in a blocked thread's descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SemaphoreId(usize);

impl SemaphoreId {
    pub const fn from_addr(addr: usize) -> Self {
        Self(addr)
    }
}

impl fmt::Display for SemaphoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sem@{:#x}", self.0)
    }
}

/// Counting semaphore.
///
/// Identified by address, so it must not move while threads are blocked on
/// it. In practice semaphores are `static`.
pub struct Semaphore {
    value: Mutex<Cell<i32>>,
}

impl Semaphore {
    pub const fn new(initial: i32) -> Self {
        Self {
            value: Mutex::new(Cell::new(initial)),
        }
    }

    /// Reset the counter. Any sign is accepted.
    pub fn init(&self, value: i32) {
        critical_section::with(|cs| self.value.borrow(cs).set(value));
    }

    pub fn value(&self) -> i32 {
        critical_section::with(|cs| self.get(cs))
    }

    pub fn id(&self) -> SemaphoreId {
        SemaphoreId(self as *const Self as usize)
    }

    pub(crate) fn get(&self, cs: CriticalSection<'_>) -> i32 {
        self.value.borrow(cs).get()
    }

    /// Decrement and return the new value. Saturates at `i32::MIN`.
    pub(crate) fn take(&self, cs: CriticalSection<'_>) -> i32 {
        let cell = self.value.borrow(cs);
        cell.set(cell.get().saturating_sub(1));
        cell.get()
    }

    /// Increment and return the new value. Saturates at `i32::MAX`.
    pub(crate) fn give(&self, cs: CriticalSection<'_>) -> i32 {
        let cell = self.value.borrow(cs);
        cell.set(cell.get().saturating_add(1));
        cell.get()
    }
}

impl fmt::Debug for Semaphore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Semaphore")
            .field("id", &self.id())
            .field("value", &self.value())
            .finish()
    }
}

/// Blocking wait/signal, provided by the kernel.
///
/// Data structures built on [`Semaphore`], like the FIFO, take this instead
/// of a concrete kernel type.
pub trait Synchronizer {
    /// Decrement `sem`, blocking the calling thread while the result is
    /// negative.
    fn wait(&self, sem: &Semaphore);

    /// Increment `sem` and wake one blocked thread if there is any. Never
    /// blocks and is safe from interrupt handlers.
    fn signal(&self, sem: &Semaphore);
}
