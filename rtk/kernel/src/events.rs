//! Periodic and edge-triggered event slots
//!
//! The tables only hold registrations and countdowns. The kernel collects
//! fired actions while holding the critical section and runs them after
//! releasing it.

use heapless::Vec;
use rtk_core::{Countdown, EdgeId, EventId};
use rtk_hal::EdgeInput;

use crate::error::{KernelError, KernelResult};
use crate::semaphore::Semaphore;

/// Maximum number of periodic event registrations
pub const MAX_PERIODIC_EVENTS: usize = 6;

/// Maximum number of edge trigger registrations
pub const MAX_EDGE_TRIGGERS: usize = 2;

/// What a periodic event does when its countdown expires.
#[derive(Debug, Clone, Copy)]
pub enum EventAction {
    /// Signal a semaphore, typically one a periodic thread waits on
    Signal(&'static Semaphore),
    /// Run a short callback in tick context. Must not block.
    Call(fn()),
}

struct PeriodicSlot {
    period: u32,
    countdown: Countdown,
    action: EventAction,
}

pub(crate) struct EdgeSlot {
    pub input: &'static dyn EdgeInput,
    pub semaphore: &'static Semaphore,
}

pub(crate) type FiredActions = Vec<EventAction, MAX_PERIODIC_EVENTS>;

pub(crate) struct EventTable {
    periodic: Vec<PeriodicSlot, MAX_PERIODIC_EVENTS>,
    edges: Vec<EdgeSlot, MAX_EDGE_TRIGGERS>,
}

impl EventTable {
    pub const fn new() -> Self {
        Self {
            periodic: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn add_periodic(&mut self, period: u32, action: EventAction) -> KernelResult<EventId> {
        if period == 0 {
            return Err(KernelError::InvalidPeriod);
        }
        let id = EventId::new(self.periodic.len() as u8);
        self.periodic
            .push(PeriodicSlot {
                period,
                countdown: Countdown::new(period),
                action,
            })
            .map_err(|_| KernelError::CapacityExceeded {
                table: "periodic event",
                capacity: MAX_PERIODIC_EVENTS,
            })?;
        Ok(id)
    }

    /// Advance every countdown by one tick, collecting the actions that fire.
    pub fn advance(&mut self, fired: &mut FiredActions) {
        for slot in self.periodic.iter_mut() {
            if slot.countdown.decrement() {
                slot.countdown = Countdown::new(slot.period);
                // Same capacity as the slot table.
                let _ = fired.push(slot.action);
            }
        }
    }

    pub fn add_edge(&mut self, slot: EdgeSlot) -> KernelResult<EdgeId> {
        let id = EdgeId::new(self.edges.len() as u8);
        self.edges
            .push(slot)
            .map_err(|_| KernelError::CapacityExceeded {
                table: "edge trigger",
                capacity: MAX_EDGE_TRIGGERS,
            })?;
        Ok(id)
    }

    pub fn edge(&self, id: EdgeId) -> KernelResult<&EdgeSlot> {
        self.edges
            .get(id.index())
            .ok_or(KernelError::UnknownEdge(id))
    }

    pub fn edges_full(&self) -> bool {
        self.edges.is_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SEM: Semaphore = Semaphore::new(0);

    fn noop() {}

    #[test]
    fn test_periodic_fires_every_period() {
        let mut table = EventTable::new();
        table.add_periodic(3, EventAction::Signal(&SEM)).unwrap();

        let mut fired_at = std::vec::Vec::new();
        for tick in 1..=9 {
            let mut fired = FiredActions::new();
            table.advance(&mut fired);
            if !fired.is_empty() {
                fired_at.push(tick);
            }
        }
        assert_eq!(fired_at, [3, 6, 9]);
    }

    #[test]
    fn test_zero_period_rejected() {
        let mut table = EventTable::new();
        assert_eq!(
            table.add_periodic(0, EventAction::Call(noop)).unwrap_err(),
            KernelError::InvalidPeriod
        );
    }

    #[test]
    fn test_periodic_table_capacity() {
        let mut table = EventTable::new();
        for i in 0..MAX_PERIODIC_EVENTS {
            let id = table.add_periodic(1, EventAction::Call(noop)).unwrap();
            assert_eq!(id.index(), i);
        }
        assert!(matches!(
            table.add_periodic(1, EventAction::Call(noop)),
            Err(KernelError::CapacityExceeded { capacity: MAX_PERIODIC_EVENTS, .. })
        ));
    }
}
