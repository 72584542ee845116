use core::arch::global_asm;

use cortex_m::peripheral::scb::SystemHandler;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::{Peripherals, SCB, SYST};
use rtk_core::StackPointer;
use rtk_hal::{HalResult, InterruptPriority, QuantumTimer, SwitchTrigger};

use crate::systick::{encode_priority, reload_register};
use crate::CortexMPort;

// Vector table and reset handler. The `SysTick` symbol below overrides the
// default handler it provides.
use cortex_m_rt as _;

extern "C" {
    fn rtk_start_first(sp: u32) -> !;
}

// SysTick: save R4-R11 below the hardware frame, hand the resulting stack
// pointer to the kernel, then unwind the image it returns. LR holds
// EXC_RETURN across the call.
global_asm!(
    ".section .text.SysTick,\"ax\",%progbits",
    ".global SysTick",
    ".type SysTick,%function",
    ".thumb_func",
    "SysTick:",
    "    push {{r4-r11}}",
    "    mov r0, sp",
    "    push {{r0, lr}}",
    "    bl rtk_switch_context",
    "    pop {{r1, lr}}",
    "    mov sp, r0",
    "    pop {{r4-r11}}",
    "    bx lr",
    ".size SysTick, . - SysTick",
);

// Unwind a never-run image by hand and branch to its entry point with
// interrupts enabled.
global_asm!(
    ".section .text.rtk_start_first,\"ax\",%progbits",
    ".global rtk_start_first",
    ".type rtk_start_first,%function",
    ".thumb_func",
    "rtk_start_first:",
    "    mov sp, r0",
    "    pop {{r4-r11}}",
    "    pop {{r0-r3}}",
    "    pop {{r12}}",
    "    add sp, sp, #4",
    "    pop {{lr}}",
    "    add sp, sp, #4",
    "    orr lr, lr, #1",
    "    cpsie i",
    "    bx lr",
    ".size rtk_start_first, . - rtk_start_first",
);

impl QuantumTimer for CortexMPort {
    fn configure(&self, reload: u32, priority: InterruptPriority) -> HalResult<()> {
        let reload = reload_register(reload)?;
        let priority = encode_priority(priority, self.priority_bits)?;

        // Stays masked until rtk_start_first.
        cortex_m::interrupt::disable();

        // SAFETY: after launch the kernel is the only user of SysTick and of
        // the SysTick priority field.
        let mut cp = unsafe { Peripherals::steal() };
        cp.SYST.disable_counter();
        cp.SYST.set_clock_source(SystClkSource::Core);
        cp.SYST.set_reload(reload);
        cp.SYST.clear_current();
        unsafe { cp.SCB.set_priority(SystemHandler::SysTick, priority) };
        cp.SYST.enable_interrupt();
        cp.SYST.enable_counter();
        Ok(())
    }

    fn restart(&self) {
        // SAFETY: a write to CVR only clears the current count.
        unsafe { (*SYST::PTR).cvr.write(0) };
    }
}

impl SwitchTrigger for CortexMPort {
    fn pend_switch(&self) {
        SCB::set_pendst();
    }

    fn start_first(&self, sp: StackPointer) -> ! {
        // SAFETY: `sp` points at an image laid out by the kernel's frame
        // builder; nothing returns to this stack afterwards.
        unsafe { rtk_start_first(sp.addr() as u32) }
    }

    fn wait_for_interrupt(&self) {
        cortex_m::asm::wfi();
    }
}
