//! Thread selection
//!
//! The most urgent eligible thread wins. Ties go to the first candidate met
//! scanning forward from the thread after the current one, and the current
//! thread is looked at last, so equal-priority threads take turns.

use rtk_core::Priority;

use crate::registry::ThreadTable;

/// Pick the next thread to run, or `None` when every thread is blocked or
/// asleep. Visits each descriptor exactly once.
pub(crate) fn select<const N: usize>(table: &ThreadTable<N>) -> Option<usize> {
    let mut best: Option<(usize, Priority)> = None;

    for index in table.ring_after(table.current()) {
        let thread = table.get(index);
        if !thread.is_eligible() {
            continue;
        }
        match best {
            Some((_, priority)) if !thread.priority.is_more_urgent_than(priority) => {}
            _ => best = Some((index, thread.priority)),
        }
    }

    best.map(|(index, _)| index)
}
