#![no_std]
#![forbid(unsafe_code)]

//! # RTK Core
//!
//! Value types shared by the kernel, the hardware abstraction traits and the
//! ports: thread priorities, identifiers for threads and event slots, tick
//! counters and saved stack pointers.

pub mod ids;
pub mod priority;
pub mod stack;
pub mod time;

pub use ids::*;
pub use priority::*;
pub use stack::*;
pub use time::*;

/// RTK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
