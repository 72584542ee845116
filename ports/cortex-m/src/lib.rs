#![no_std]

//! ARMv7-M port for the RTK kernel.
//!
//! SysTick is both the quantum timer and the context switch interrupt: a
//! cooperative yield clears the counter and pends SysTick. Threads and
//! handlers all run on the main stack, so the switch handler saves R4-R11 on
//! the outgoing thread's stack and resumes the incoming one from its saved
//! image.
//!
//! Requirements:
//! - ARMv7-M or ARMv7E-M core (Cortex-M3/M4/M7)
//! - no floating point context in threads (soft-float ABI or FPU unused)
//! - [`init`] called before registering threads, leaving interrupts masked
//!   until the first thread starts
//! - [`bind_kernel!`] invoked once on the kernel `static`
//! - a periodic interrupt of the application's choosing calling
//!   `Kernel::tick`, typically every millisecond
//!
//! ```ignore
//! static KERNEL: Kernel<CortexMPort, 3> =
//!     Kernel::new(CortexMPort::new(3), KernelConfig::DEFAULT);
//! rtk_port_cortex_m::bind_kernel!(KERNEL);
//! ```

pub mod systick;

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod arch;

pub use rtk_core::StackPointer;

/// Cortex-M implementation of the kernel's hardware collaborators.
#[derive(Debug, Clone, Copy)]
pub struct CortexMPort {
    priority_bits: u8,
}

impl CortexMPort {
    /// Port for a core implementing `priority_bits` NVIC priority bits.
    pub const fn new(priority_bits: u8) -> Self {
        Self { priority_bits }
    }
}

/// Mask interrupts until the first thread starts.
#[cfg(all(target_arch = "arm", target_os = "none"))]
pub fn init() {
    cortex_m::interrupt::disable();
}

/// Export the switch entry point the SysTick handler calls into.
///
/// Takes the path of the `static` kernel and
/// must be used exactly once per image.
#[macro_export]
macro_rules! bind_kernel {
    ($kernel:path) => {
        #[no_mangle]
        extern "C" fn rtk_switch_context(saved: u32) -> u32 {
            $kernel
                .switch_context($crate::StackPointer::from_addr(saved as usize))
                .addr() as u32
        }
    };
}
