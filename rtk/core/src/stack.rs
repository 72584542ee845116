//! Saved stack pointers

use core::fmt;

/// Address of a thread's saved register image.
///
/// The kernel only stores and compares these; dereferencing is left to the
/// port's context-switch code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StackPointer(usize);

impl StackPointer {
    /// Placeholder for a slot that has never held a stack image
    pub const NULL: Self = Self(0);

    pub const fn from_addr(addr: usize) -> Self {
        Self(addr)
    }

    pub fn from_ptr(ptr: *const u32) -> Self {
        Self(ptr as usize)
    }

    pub const fn addr(self) -> usize {
        self.0
    }

    pub const fn as_ptr(self) -> *const u32 {
        self.0 as *const u32
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for StackPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sp={:#010x}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StackPointer {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "sp={=usize:#x}", self.0);
    }
}
