//! Thread table
//!
//! Descriptors live in a fixed array and are chained into a ring by index.
//! The ring order is the scan order for scheduling and waiter lookup and is
//! never changed after registration.

use rtk_core::{Countdown, Priority, StackPointer, ThreadId};

use crate::error::{KernelError, KernelResult};
use crate::frame::{self, ThreadEntry, MIN_STACK_WORDS};
use crate::semaphore::SemaphoreId;

/// Upper bound on the thread population, set by the width of [`ThreadId`]
pub const MAX_THREADS: usize = u8::MAX as usize + 1;

/// One thread handed to `Kernel::register_threads`.
pub struct ThreadSpec {
    entry: ThreadEntry,
    priority: Priority,
    stack: &'static mut [u32],
}

impl ThreadSpec {
    /// Thread at [`Priority::LOWEST`]. A batch built only with `new` is
    /// scheduled pure round robin.
    pub fn new(entry: ThreadEntry, stack: &'static mut [u32]) -> Self {
        Self {
            entry,
            priority: Priority::LOWEST,
            stack,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Per-thread scheduling state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ThreadControl {
    pub sp: StackPointer,
    pub next: usize,
    pub blocked_on: Option<SemaphoreId>,
    pub sleep: Countdown,
    pub priority: Priority,
}

impl ThreadControl {
    const EMPTY: ThreadControl = ThreadControl {
        sp: StackPointer::NULL,
        next: 0,
        blocked_on: None,
        sleep: Countdown::ZERO,
        priority: Priority::LOWEST,
    };

    /// Neither blocked nor sleeping
    pub fn is_eligible(&self) -> bool {
        self.blocked_on.is_none() && self.sleep.is_zero()
    }
}

/// Snapshot of a thread's scheduling state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadInfo {
    pub id: ThreadId,
    pub priority: Priority,
    pub stack_pointer: StackPointer,
    pub blocked_on: Option<SemaphoreId>,
    pub sleep_remaining: u32,
    pub eligible: bool,
}

pub(crate) struct ThreadTable<const N: usize> {
    threads: [ThreadControl; N],
    current: usize,
}

impl<const N: usize> ThreadTable<N> {
    pub const fn new() -> Self {
        Self {
            threads: [ThreadControl::EMPTY; N],
            current: 0,
        }
    }

    /// Build every stack image and wire the ring. Thread 0 becomes current.
    ///
    /// All specs are checked before anything is written, so a rejected batch
    /// leaves the table untouched.
    pub fn load(&mut self, specs: [ThreadSpec; N]) -> KernelResult<()> {
        if N == 0 {
            return Err(KernelError::NotRegistered);
        }
        if N > MAX_THREADS {
            return Err(KernelError::CapacityExceeded {
                table: "thread",
                capacity: MAX_THREADS,
            });
        }
        if let Some((index, spec)) = specs
            .iter()
            .enumerate()
            .find(|(_, spec)| spec.stack.len() < MIN_STACK_WORDS)
        {
            return Err(stack_too_small(index, spec.stack.len()));
        }

        for (index, spec) in specs.into_iter().enumerate() {
            let words = spec.stack.len();
            let sp = frame::prepare(spec.stack, spec.entry)
                .ok_or_else(|| stack_too_small(index, words))?;
            self.threads[index] = ThreadControl {
                sp,
                next: (index + 1) % N,
                blocked_on: None,
                sleep: Countdown::ZERO,
                priority: spec.priority,
            };
        }
        self.current = 0;
        Ok(())
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn set_current(&mut self, index: usize) {
        self.current = index;
    }

    pub fn get(&self, index: usize) -> &ThreadControl {
        &self.threads[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut ThreadControl {
        &mut self.threads[index]
    }

    pub fn current_mut(&mut self) -> &mut ThreadControl {
        &mut self.threads[self.current]
    }

    /// Walk the whole ring once, starting after `start` and ending on it.
    pub fn ring_after(&self, start: usize) -> Ring<'_, N> {
        Ring {
            table: self,
            cursor: start,
            remaining: N,
        }
    }

    /// Advance every sleeping thread by one tick.
    pub fn tick_sleepers(&mut self) {
        for thread in self.threads.iter_mut() {
            thread.sleep.decrement();
        }
    }

    /// First thread blocked on `sem`, scanning from the one after current.
    pub fn find_waiter(&self, sem: SemaphoreId) -> Option<usize> {
        self.ring_after(self.current)
            .find(|&index| self.threads[index].blocked_on == Some(sem))
    }

    pub fn count_blocked_on(&self, sem: SemaphoreId) -> usize {
        self.threads
            .iter()
            .filter(|thread| thread.blocked_on == Some(sem))
            .count()
    }

    pub fn info(&self, index: usize) -> ThreadInfo {
        let thread = &self.threads[index];
        ThreadInfo {
            id: ThreadId::new(index as u8),
            priority: thread.priority,
            stack_pointer: thread.sp,
            blocked_on: thread.blocked_on,
            sleep_remaining: thread.sleep.remaining(),
            eligible: thread.is_eligible(),
        }
    }
}

fn stack_too_small(index: usize, words: usize) -> KernelError {
    KernelError::StackTooSmall {
        thread: ThreadId::new(index as u8),
        words,
        required: MIN_STACK_WORDS,
    }
}

/// Iterator over ring indices, bounded to one lap.
pub(crate) struct Ring<'a, const N: usize> {
    table: &'a ThreadTable<N>,
    cursor: usize,
    remaining: usize,
}

impl<const N: usize> Iterator for Ring<'_, N> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.cursor = self.table.threads[self.cursor].next;
        Some(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle() -> ! {
        loop {
            core::hint::spin_loop();
        }
    }

    fn stack(words: usize) -> &'static mut [u32] {
        Box::leak(vec![0u32; words].into_boxed_slice())
    }

    fn loaded<const N: usize>() -> ThreadTable<N> {
        let mut table = ThreadTable::new();
        table
            .load(core::array::from_fn(|_| ThreadSpec::new(idle, stack(64))))
            .unwrap();
        table
    }

    #[test]
    fn test_ring_visits_everyone_once_ending_on_start() {
        let table = loaded::<4>();
        let order: Vec<usize> = table.ring_after(1).collect();
        assert_eq!(order, vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_load_rejects_short_stack_without_side_effects() {
        let mut table = ThreadTable::<2>::new();
        let err = table
            .load([ThreadSpec::new(idle, stack(64)), ThreadSpec::new(idle, stack(8))])
            .unwrap_err();
        assert_eq!(
            err,
            KernelError::StackTooSmall {
                thread: ThreadId::new(1),
                words: 8,
                required: MIN_STACK_WORDS,
            }
        );
        assert!(table.get(0).sp.is_null());
    }

    #[test]
    fn test_waiter_lookup_starts_after_current() {
        let mut table = loaded::<4>();
        let sem = SemaphoreId::from_addr(0x2000_0000);
        table.get_mut(0).blocked_on = Some(sem);
        table.get_mut(2).blocked_on = Some(sem);
        table.set_current(1);
        assert_eq!(table.find_waiter(sem), Some(2));
        table.set_current(2);
        assert_eq!(table.find_waiter(sem), Some(0));
        assert_eq!(table.count_blocked_on(sem), 2);
    }

    #[test]
    fn test_sleepers_stop_at_zero() {
        let mut table = loaded::<2>();
        table.get_mut(1).sleep = Countdown::new(1);
        table.tick_sleepers();
        table.tick_sleepers();
        assert!(table.get(1).is_eligible());
        assert!(table.get(0).sleep.is_zero());
    }
}
