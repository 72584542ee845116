//! The kernel facade
//!
//! One [`Kernel`] value owns the thread table, the event tables and the tick
//! bookkeeping for the whole system. It is built `const` so it can live in a
//! `static`, gets its threads once through
//! [`register_threads`](Kernel::register_threads), and starts scheduling with
//! [`launch`](Kernel::launch).

use core::cell::RefCell;
use core::convert::Infallible;

use critical_section::Mutex;
use log::{debug, info, trace, warn};
use rtk_core::{Countdown, EdgeId, EventId, StackPointer, ThreadId, TickCount};
use rtk_hal::{EdgeInput, InterruptPriority, Port};

use crate::config::KernelConfig;
use crate::error::{KernelError, KernelResult};
use crate::events::{EdgeSlot, EventAction, EventTable, FiredActions};
use crate::quantum;
use crate::registry::{ThreadInfo, ThreadSpec, ThreadTable};
use crate::scheduler;
use crate::semaphore::{Semaphore, Synchronizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Empty,
    Registered,
    Running,
}

struct KernelState<const N: usize> {
    phase: Phase,
    table: ThreadTable<N>,
    events: EventTable,
    ticks: TickCount,
    launched_at: TickCount,
    holdoff: Countdown,
    switches: u32,
}

/// Preemptive priority kernel for `N` threads on port `P`.
pub struct Kernel<P: Port, const N: usize> {
    port: P,
    config: KernelConfig,
    state: Mutex<RefCell<KernelState<N>>>,
}

impl<P: Port, const N: usize> Kernel<P, N> {
    pub const fn new(port: P, config: KernelConfig) -> Self {
        Self {
            port,
            config,
            state: Mutex::new(RefCell::new(KernelState {
                phase: Phase::Empty,
                table: ThreadTable::new(),
                events: EventTable::new(),
                ticks: TickCount::ZERO,
                launched_at: TickCount::ZERO,
                holdoff: Countdown::ZERO,
                switches: 0,
            })),
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Install the thread population.
    ///
    /// Builds each thread's initial stack image and chains the threads into
    /// a ring in array order. Thread 0 runs first. Allowed exactly once,
    /// before launch.
    pub fn register_threads(&self, specs: [ThreadSpec; N]) -> KernelResult<()> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            match state.phase {
                Phase::Registered => Err(KernelError::AlreadyRegistered),
                Phase::Running => Err(KernelError::AlreadyLaunched),
                Phase::Empty => {
                    state.table.load(specs)?;
                    state.phase = Phase::Registered;
                    Ok(())
                }
            }
        })?;
        info!("{}: registered {} threads", self.config.name, N);
        Ok(())
    }

    /// Start scheduling and return the first thread's stack image.
    ///
    /// `quantum` is in quantum timer counts. After this the kernel accepts
    /// ticks and context switches, but nothing jumps into a thread; use
    /// [`launch`](Kernel::launch) for that.
    pub fn start(&self, quantum: u32) -> KernelResult<StackPointer> {
        let quantum = quantum::validate(quantum)?;
        let first = critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            match state.phase {
                Phase::Empty => Err(KernelError::NotRegistered),
                Phase::Running => Err(KernelError::AlreadyLaunched),
                Phase::Registered => {
                    state.phase = Phase::Running;
                    state.launched_at = state.ticks;
                    state.holdoff = Countdown::new(self.config.event_holdoff_ticks);
                    Ok(state.table.get(state.table.current()).sp)
                }
            }
        })?;

        // Outside the critical section: a port may mask interrupts here and
        // leave them masked until the first thread starts.
        if let Err(err) = quantum::start(&self.port, quantum, self.config.switch_priority) {
            critical_section::with(|cs| self.state.borrow_ref_mut(cs).phase = Phase::Registered);
            return Err(err);
        }

        info!("{}: launched, quantum {} counts", self.config.name, quantum);
        Ok(first)
    }

    /// Start scheduling and enter the first thread. Only returns on error.
    pub fn launch(&self, quantum: u32) -> KernelResult<Infallible> {
        let first = self.start(quantum)?;
        self.port.start_first(first)
    }

    /// Context switch entry, called by the port's switch handler.
    ///
    /// Stores `saved` as the outgoing thread's stack pointer, selects the
    /// next thread and returns its stack pointer. While no thread is
    /// eligible it runs the idle callback and waits for an interrupt, then
    /// rescans.
    pub fn switch_context(&self, saved: StackPointer) -> StackPointer {
        let mut idle = false;
        loop {
            let next = critical_section::with(|cs| {
                let mut state = self.state.borrow_ref_mut(cs);
                if state.phase != Phase::Running {
                    return Some(saved);
                }
                if !idle {
                    state.table.current_mut().sp = saved;
                }
                let next = scheduler::select(&state.table)?;
                state.table.set_current(next);
                state.switches = state.switches.wrapping_add(1);
                trace!("switch to thread#{}", next);
                Some(state.table.get(next).sp)
            });

            match next {
                Some(sp) => return sp,
                None => {
                    if !idle {
                        warn!("{}: no eligible thread, idling", self.config.name);
                        idle = true;
                    }
                    if let Some(callback) = self.config.idle_callback {
                        callback();
                    }
                    self.port.wait_for_interrupt();
                }
            }
        }
    }

    /// Give up the rest of the current quantum.
    pub fn yield_now(&self) {
        if !self.is_running() {
            warn!("{}: yield before launch ignored", self.config.name);
            return;
        }
        quantum::request_reschedule(&self.port);
    }

    /// Suspend the calling thread for `ticks` kernel ticks.
    ///
    /// The thread becomes eligible on exactly the `ticks`-th tick from now.
    /// `sleep(0)` only yields. Ignored before launch.
    pub fn sleep(&self, ticks: u32) {
        let running = critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if state.phase != Phase::Running {
                return false;
            }
            if ticks > 0 {
                state.table.current_mut().sleep = Countdown::new(ticks);
            }
            true
        });
        if !running {
            warn!("{}: sleep before launch ignored", self.config.name);
            return;
        }
        self.yield_now();
    }

    /// Decrement `sem`, blocking the calling thread if the result is negative.
    ///
    /// Before launch there is no thread to block, so a wait that would block
    /// leaves the counter alone and returns.
    pub fn wait(&self, sem: &Semaphore) {
        let blocked = critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if state.phase != Phase::Running && sem.get(cs) <= 0 {
                warn!("wait on {} before launch ignored", sem.id());
                return false;
            }
            if sem.take(cs) >= 0 {
                return false;
            }
            state.table.current_mut().blocked_on = Some(sem.id());
            true
        });
        if blocked {
            self.yield_now();
        }
    }

    /// Increment `sem` and wake its first waiter, scanning from the thread
    /// after the current one. The woken thread runs at the next scheduling
    /// pass, not immediately.
    pub fn signal(&self, sem: &Semaphore) {
        critical_section::with(|cs| {
            if sem.give(cs) > 0 {
                return;
            }
            let mut state = self.state.borrow_ref_mut(cs);
            match state.table.find_waiter(sem.id()) {
                Some(index) => {
                    state.table.get_mut(index).blocked_on = None;
                    trace!("{} wakes thread#{}", sem.id(), index);
                }
                None => warn!("{} at {} but nobody is waiting", sem.id(), sem.get(cs)),
            }
        });
    }

    /// Fine-grained periodic tick.
    ///
    /// Advances sleeping threads, then the periodic event table. If any
    /// periodic event fired the current thread yields, once.
    pub fn tick(&self) {
        let mut fired = FiredActions::new();
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if state.phase != Phase::Running {
                return;
            }
            state.ticks.tick();
            state.table.tick_sleepers();
            if state.holdoff.is_zero() {
                state.events.advance(&mut fired);
            } else {
                state.holdoff.decrement();
            }
        });

        if fired.is_empty() {
            return;
        }
        for action in fired.iter() {
            match *action {
                EventAction::Signal(sem) => self.signal(sem),
                EventAction::Call(callback) => callback(),
            }
        }
        self.yield_now();
    }

    /// Register a periodic event firing every `period` ticks.
    pub fn add_periodic(&self, period: u32, action: EventAction) -> KernelResult<EventId> {
        let id = critical_section::with(|cs| {
            self.state.borrow_ref_mut(cs).events.add_periodic(period, action)
        })?;
        debug!("{} every {} ticks", id, period);
        Ok(id)
    }

    /// Register an edge-triggered input that signals `sem`.
    ///
    /// The input is configured at `priority` and armed.
    pub fn register_edge(
        &self,
        input: &'static dyn EdgeInput,
        sem: &'static Semaphore,
        priority: InterruptPriority,
    ) -> KernelResult<EdgeId> {
        let id = critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if state.events.edges_full() {
                return Err(KernelError::CapacityExceeded {
                    table: "edge trigger",
                    capacity: crate::events::MAX_EDGE_TRIGGERS,
                });
            }
            input.configure(priority)?;
            input.acknowledge();
            state.events.add_edge(EdgeSlot {
                input,
                semaphore: sem,
            })
        })?;
        input.arm();
        debug!("{} signals {} at priority {}", id, sem.id(), priority);
        Ok(id)
    }

    /// Body of an edge input's interrupt handler.
    ///
    /// Acknowledges the interrupt. If the input is armed, signals its
    /// semaphore, disarms the input so bounces are ignored, and yields.
    pub fn edge_interrupt(&self, id: EdgeId) {
        let slot = critical_section::with(|cs| {
            self.state
                .borrow_ref(cs)
                .events
                .edge(id)
                .map(|slot| (slot.input, slot.semaphore))
        });
        let Ok((input, sem)) = slot else {
            warn!("interrupt from unregistered {}", id);
            return;
        };

        input.acknowledge();
        if !input.is_armed() {
            return;
        }
        self.signal(sem);
        input.disarm();
        self.yield_now();
    }

    /// Re-enable an edge input after it fired.
    pub fn rearm_edge(&self, id: EdgeId) -> KernelResult<()> {
        let input = critical_section::with(|cs| {
            self.state.borrow_ref(cs).events.edge(id).map(|slot| slot.input)
        })?;
        input.acknowledge();
        input.arm();
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        critical_section::with(|cs| self.state.borrow_ref(cs).phase == Phase::Running)
    }

    /// The thread owning the CPU, once threads are registered
    pub fn current(&self) -> Option<ThreadId> {
        critical_section::with(|cs| {
            let state = self.state.borrow_ref(cs);
            (state.phase != Phase::Empty).then(|| ThreadId::new(state.table.current() as u8))
        })
    }

    pub fn thread(&self, id: ThreadId) -> Option<ThreadInfo> {
        critical_section::with(|cs| {
            let state = self.state.borrow_ref(cs);
            (state.phase != Phase::Empty && id.index() < N).then(|| state.table.info(id.index()))
        })
    }

    /// Number of threads currently blocked on `sem`
    pub fn blocked_on(&self, sem: &Semaphore) -> usize {
        critical_section::with(|cs| self.state.borrow_ref(cs).table.count_blocked_on(sem.id()))
    }

    /// Ticks seen since launch
    pub fn ticks(&self) -> TickCount {
        critical_section::with(|cs| {
            let state = self.state.borrow_ref(cs);
            TickCount::new(state.ticks.since(state.launched_at))
        })
    }

    /// Context switches performed since launch, wrapping
    pub fn switch_count(&self) -> u32 {
        critical_section::with(|cs| self.state.borrow_ref(cs).switches)
    }
}

impl<P: Port, const N: usize> Synchronizer for Kernel<P, N> {
    fn wait(&self, sem: &Semaphore) {
        Kernel::wait(self, sem)
    }

    fn signal(&self, sem: &Semaphore) {
        Kernel::signal(self, sem)
    }
}
