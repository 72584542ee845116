//! Hosted port for the RTK kernel.
//!
//! Nothing here touches hardware. The port records what the kernel asks of
//! it so tests and simulations can play the part of the interrupt
//! controller: when [`HostPort::take_pending_switch`] reports a pending
//! switch, the driver calls `Kernel::switch_context` itself.

pub mod edge;
pub mod switch;
pub mod timer;

pub use edge::SimEdgeInput;
pub use switch::SimSwitch;
pub use timer::SimQuantumTimer;

use rtk_core::StackPointer;
use rtk_hal::{HalResult, InterruptPriority, QuantumTimer, SwitchTrigger};

/// Aggregates the simulated subsystems.
#[derive(Debug, Default)]
pub struct HostPort {
    timer: SimQuantumTimer,
    switch: SimSwitch,
}

impl HostPort {
    pub const fn new() -> Self {
        Self {
            timer: SimQuantumTimer::new(),
            switch: SimSwitch::new(),
        }
    }

    /// Returns the simulated quantum timer.
    pub const fn timer(&self) -> &SimQuantumTimer {
        &self.timer
    }

    /// Returns the simulated switch trigger.
    pub const fn switch(&self) -> &SimSwitch {
        &self.switch
    }

    /// Consume a pending switch request, if any.
    pub fn take_pending_switch(&self) -> bool {
        self.switch.take_pending()
    }
}

impl QuantumTimer for HostPort {
    fn configure(&self, reload: u32, priority: InterruptPriority) -> HalResult<()> {
        self.timer.configure(reload, priority)
    }

    fn restart(&self) {
        self.timer.restart();
    }
}

impl SwitchTrigger for HostPort {
    fn pend_switch(&self) {
        self.switch.pend_switch();
    }

    fn start_first(&self, sp: StackPointer) -> ! {
        self.switch.start_first(sp)
    }

    fn wait_for_interrupt(&self) {
        self.switch.wait_for_interrupt();
    }
}
