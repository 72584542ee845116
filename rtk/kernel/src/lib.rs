#![cfg_attr(not(test), no_std)]

//! RTK - preemptive priority kernel
//!
//! A fixed population of threads shares one core. The most urgent eligible
//! thread runs; threads of equal priority take turns each quantum. Threads
//! coordinate through counting semaphores, sleep on a fine-grained tick, and
//! are woken by periodic or edge-triggered events.
//!
//! Key features:
//! - Priority scheduling with round-robin among equals
//! - Blocking counting semaphores
//! - Tick-driven sleep
//! - Periodic and debounced edge-triggered events
//! - Bounded single-producer/single-consumer FIFO
//!
//! All shared state is guarded by `critical-section`. The hardware side is
//! reached only through the traits of `rtk-hal`.

pub mod config;
pub mod error;
pub mod events;
pub mod fifo;
pub mod frame;
pub mod kernel;
pub mod quantum;
pub mod registry;
mod scheduler;
pub mod semaphore;

pub use config::{KernelConfig, KernelConfigBuilder};
pub use error::{KernelError, KernelResult};
pub use events::{EventAction, MAX_EDGE_TRIGGERS, MAX_PERIODIC_EVENTS};
pub use fifo::Fifo;
pub use frame::{ThreadEntry, FRAME_WORDS, MIN_STACK_WORDS};
pub use kernel::Kernel;
pub use registry::{ThreadInfo, ThreadSpec, MAX_THREADS};
pub use semaphore::{Semaphore, SemaphoreId, Synchronizer};

pub use rtk_core::{EdgeId, EventId, Priority, StackPointer, ThreadId, TickCount};
