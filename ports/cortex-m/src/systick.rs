//! SysTick and NVIC value encoding

use rtk_hal::{HalError, HalResult, InterruptPriority};

/// Largest value of the 24-bit SysTick reload register
pub const MAX_RELOAD: u32 = 0x00FF_FFFF;

/// Reload register value for a quantum of `counts` core clock cycles.
///
/// SysTick counts the reload value down to zero inclusive, so the register
/// holds `counts - 1`.
pub fn reload_register(counts: u32) -> HalResult<u32> {
    match counts.checked_sub(1) {
        Some(reload) if reload <= MAX_RELOAD => Ok(reload),
        _ => Err(HalError::InvalidParameter),
    }
}

/// Left-align a logical priority in the 8-bit priority field for a core
/// implementing `bits` priority bits.
pub fn encode_priority(priority: InterruptPriority, bits: u8) -> HalResult<u8> {
    if bits == 0 || bits > 8 {
        return Err(HalError::ConfigurationError);
    }
    if u16::from(priority) >= 1u16 << bits {
        return Err(HalError::InvalidParameter);
    }
    Ok(priority << (8 - bits))
}
