//! Bounded FIFO between one producer and one consumer
//!
//! Occupancy is the value of an internal semaphore, so a consumer blocks on
//! an empty queue through the ordinary `wait` path. A full queue never
//! blocks the producer: the item is dropped and counted instead.
//!
//! Only one producer and one consumer are supported. The fullness check and
//! the occupancy signal are separate steps, so two producers can both see
//! room for the last slot. Callers needing more must serialize access
//! themselves.

use core::cell::{Cell, RefCell};

use critical_section::Mutex;

use crate::error::{KernelError, KernelResult};
use crate::semaphore::{Semaphore, Synchronizer};

struct Ring<T, const N: usize> {
    slots: [T; N],
    put: usize,
    get: usize,
}

/// Fixed-capacity queue of `N` items of `T`.
pub struct Fifo<T: Copy, const N: usize> {
    ring: Mutex<RefCell<Ring<T, N>>>,
    size: Semaphore,
    lost: Mutex<Cell<u32>>,
}

impl<T: Copy, const N: usize> Fifo<T, N> {
    /// Empty queue. `blank` fills the unused slots.
    pub const fn new(blank: T) -> Self {
        Self {
            ring: Mutex::new(RefCell::new(Ring {
                slots: [blank; N],
                put: 0,
                get: 0,
            })),
            size: Semaphore::new(0),
            lost: Mutex::new(Cell::new(0)),
        }
    }

    /// Empty the queue and clear the lost counter.
    ///
    /// Must not be called while the consumer is blocked in [`Fifo::get`].
    pub fn init(&self) {
        critical_section::with(|cs| {
            let mut ring = self.ring.borrow_ref_mut(cs);
            ring.put = 0;
            ring.get = 0;
            self.lost.borrow(cs).set(0);
        });
        self.size.init(0);
    }

    /// Append `item`.
    ///
    /// Fails with [`KernelError::QueueFull`] when `N` items are already
    /// queued. The queue is left untouched and the lost counter is bumped.
    pub fn put<S: Synchronizer>(&self, sync: &S, item: T) -> KernelResult<()> {
        let stored = critical_section::with(|cs| {
            if self.size.get(cs) >= N as i32 {
                let lost = self.lost.borrow(cs);
                lost.set(lost.get().saturating_add(1));
                return false;
            }
            let mut ring = self.ring.borrow_ref_mut(cs);
            let at = ring.put;
            ring.slots[at] = item;
            ring.put = (at + 1) % N;
            true
        });

        if !stored {
            return Err(KernelError::QueueFull);
        }
        sync.signal(&self.size);
        Ok(())
    }

    /// Remove the oldest item, blocking while the queue is empty.
    pub fn get<S: Synchronizer>(&self, sync: &S) -> T {
        sync.wait(&self.size);
        critical_section::with(|cs| {
            let mut ring = self.ring.borrow_ref_mut(cs);
            let at = ring.get;
            ring.get = (at + 1) % N;
            ring.slots[at]
        })
    }

    /// Items dropped because the queue was full. Saturates at `u32::MAX`.
    pub fn lost(&self) -> u32 {
        critical_section::with(|cs| self.lost.borrow(cs).get())
    }

    /// Items currently queued
    pub fn len(&self) -> usize {
        self.size.value().max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Semaphore counting the queued items. A blocked consumer waits on it.
    pub fn occupancy(&self) -> &Semaphore {
        &self.size
    }
}
