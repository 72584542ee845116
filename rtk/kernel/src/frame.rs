//! Initial stack images for never-run threads
//!
//! A thread that has not run yet must look exactly like one that was
//! preempted: the switch handler pops R4-R11 by hand, then exception return
//! unstacks R0-R3, R12, LR, PC and xPSR. Lowest address first, the image is
//!
//! ```text
//! sp -> R4 R5 R6 R7 R8 R9 R10 R11 | R0 R1 R2 R3 R12 LR PC xPSR
//! ```

use rtk_core::StackPointer;

/// Thread entry point. Threads never return.
pub type ThreadEntry = fn() -> !;

/// Words in a saved register image
pub const FRAME_WORDS: usize = 16;

/// Smallest stack accepted at registration
pub const MIN_STACK_WORDS: usize = 2 * FRAME_WORDS;

/// xPSR with only the Thumb bit set
pub const INITIAL_XPSR: u32 = 0x0100_0000;

// Word offsets from the saved stack pointer.
const R4: usize = 0;
const R0: usize = 8;
const R12: usize = 12;
const LR: usize = 13;
const PC: usize = 14;
const XPSR: usize = 15;

/// Placeholder value for register `reg`, e.g. R12 holds `0x1212_1212`.
///
/// Makes an untouched image easy to spot in a debugger.
pub const fn marker(reg: u32) -> u32 {
    let bcd = ((reg / 10) << 4) | (reg % 10);
    bcd * 0x0101_0101
}

/// Lay out the initial register image for `entry` at the top of `stack`.
///
/// The top is trimmed by one word when needed so the image stays 8-byte
/// aligned. Returns `None` when the stack is shorter than
/// [`MIN_STACK_WORDS`].
pub fn prepare(stack: &mut [u32], entry: ThreadEntry) -> Option<StackPointer> {
    if stack.len() < MIN_STACK_WORDS {
        return None;
    }

    let mut top = stack.len();
    if (stack.as_ptr() as usize + top * 4) % 8 != 0 {
        top -= 1;
    }
    let frame = &mut stack[top - FRAME_WORDS..top];

    for (offset, reg) in (4..=11).enumerate() {
        frame[R4 + offset] = marker(reg);
    }
    for (offset, reg) in (0..=3).enumerate() {
        frame[R0 + offset] = marker(reg);
    }
    frame[R12] = marker(12);
    frame[LR] = marker(14);
    // Exception return wants a halfword-aligned PC; drop the Thumb bit.
    frame[PC] = (entry as usize as u32) & !1;
    frame[XPSR] = INITIAL_XPSR;

    Some(StackPointer::from_ptr(frame.as_ptr()))
}
