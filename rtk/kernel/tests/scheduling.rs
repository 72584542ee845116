//! Scheduling passes driven through the host port.

mod common;

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{current, eligible, kernel_with, kernel_with_config, reschedule, service};
use rtk_kernel::{KernelConfig, ThreadId};

#[test]
fn tied_threads_each_run_once_per_round() {
    let kernel = kernel_with([2, 2, 2, 2, 7]);

    let picked: Vec<usize> = (0..4).map(|_| reschedule(&kernel)).collect();
    let distinct: HashSet<usize> = picked.iter().copied().collect();

    assert_eq!(picked, vec![1, 2, 3, 0]);
    assert_eq!(distinct.len(), 4);
    assert!(!picked.contains(&4));
}

#[test]
fn urgent_thread_first_then_equals_alternate() {
    let kernel = kernel_with([1, 2, 2]);
    assert_eq!(reschedule(&kernel), 0);

    // Take the urgent thread out of the running.
    kernel.sleep(1_000);
    assert_eq!(service(&kernel), 1);
    assert_eq!(reschedule(&kernel), 2);
    assert_eq!(reschedule(&kernel), 1);
    assert_eq!(reschedule(&kernel), 2);
}

#[test]
fn sleep_expires_on_exact_tick() {
    let kernel = kernel_with([1, 2]);
    kernel.sleep(3);
    assert_eq!(service(&kernel), 1);

    kernel.tick();
    kernel.tick();
    assert!(!eligible(&kernel, 0));
    assert_eq!(reschedule(&kernel), 1);

    kernel.tick();
    assert!(eligible(&kernel, 0));
    assert_eq!(reschedule(&kernel), 0);
}

#[test]
fn sleep_zero_only_yields() {
    let kernel = kernel_with([3, 3]);
    let restarts = kernel.port().timer().restarts();

    kernel.sleep(0);

    assert!(eligible(&kernel, 0));
    assert_eq!(kernel.port().timer().restarts(), restarts + 1);
    assert_eq!(service(&kernel), 1);
}

#[test]
fn yield_restarts_quantum_and_pends_switch() {
    let kernel = kernel_with([4, 4]);
    kernel.yield_now();
    kernel.yield_now();

    assert_eq!(kernel.port().timer().restarts(), 2);
    assert_eq!(kernel.port().switch().requests(), 2);
    assert_eq!(service(&kernel), 1);
    assert_eq!(service(&kernel), 1);
}

#[test]
fn start_programs_quantum_timer() {
    let config = KernelConfig::builder().switch_priority(6).build();
    let kernel = kernel_with_config([0, 0], config);

    assert!(kernel.is_running());
    assert_eq!(kernel.port().timer().reload(), Some(common::QUANTUM));
    assert_eq!(kernel.port().timer().priority(), 6);
    assert_eq!(kernel.current(), Some(ThreadId::new(0)));
}

#[test]
fn switch_count_and_ticks_advance() {
    let kernel = kernel_with([1, 1]);
    reschedule(&kernel);
    reschedule(&kernel);
    kernel.tick();

    assert_eq!(kernel.switch_count(), 2);
    assert_eq!(kernel.ticks().value(), 1);
}

#[test]
fn lowest_priority_threads_are_scheduled() {
    let kernel = kernel_with([255, 255, 255]);
    assert_eq!(reschedule(&kernel), 1);
    assert_eq!(reschedule(&kernel), 2);
}

static IDLE_CALLS: AtomicUsize = AtomicUsize::new(0);

fn count_idle() {
    IDLE_CALLS.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn no_eligible_thread_falls_back_to_idle() {
    let config = KernelConfig::builder().idle_callback(count_idle).build();
    let kernel = kernel_with_config([1, 1], config);
    kernel.sleep(5);
    assert_eq!(service(&kernel), 1);
    kernel.sleep(5);

    // The host port has no interrupt source, so waiting panics.
    let result = panic::catch_unwind(AssertUnwindSafe(|| service(&kernel)));

    assert!(result.is_err());
    assert_eq!(IDLE_CALLS.load(Ordering::SeqCst), 1);
    assert_eq!(current(&kernel), 1);
}
