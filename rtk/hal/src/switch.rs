//! Context switch collaborator

use rtk_core::StackPointer;

/// Owner of the register save/restore path.
///
/// This is the only code allowed to manipulate the exception-return
/// mechanism. The kernel hands it stack pointers and asks for switches.
pub trait SwitchTrigger {
    /// Request a context switch as soon as interrupts allow it.
    ///
    /// The switch must run the same path as a quantum expiry.
    fn pend_switch(&self);

    /// Restore the register image at `sp` and jump into it.
    ///
    /// Used once, to enter the first thread.
    fn start_first(&self, sp: StackPointer) -> !;

    /// Sleep until the next interrupt.
    ///
    /// Used by the idle fallback when no thread is eligible.
    fn wait_for_interrupt(&self);
}
