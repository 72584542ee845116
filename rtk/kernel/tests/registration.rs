//! Setup-time misuse is reported, never silently absorbed.

mod common;

use common::{park, stack, QUANTUM};
use rtk_kernel::{
    Kernel, KernelConfig, KernelError, Priority, Semaphore, ThreadId, ThreadSpec,
    MIN_STACK_WORDS,
};
use rtk_port_host::HostPort;

fn specs<const N: usize>() -> [ThreadSpec; N] {
    core::array::from_fn(|_| ThreadSpec::new(park, stack()))
}

#[test]
fn register_wires_threads_with_default_priority() {
    let kernel: Kernel<HostPort, 3> = Kernel::new(HostPort::new(), KernelConfig::DEFAULT);
    assert_eq!(kernel.current(), None);

    kernel.register_threads(specs()).unwrap();

    assert_eq!(kernel.current(), Some(ThreadId::new(0)));
    let info = kernel.thread(ThreadId::new(2)).unwrap();
    assert_eq!(info.priority, Priority::LOWEST);
    assert!(info.eligible);
    assert!(!info.stack_pointer.is_null());
    assert_eq!(info.sleep_remaining, 0);
    assert!(kernel.thread(ThreadId::new(3)).is_none());
    assert!(!kernel.is_running());
}

#[test]
fn register_twice_rejected() {
    let kernel: Kernel<HostPort, 2> = Kernel::new(HostPort::new(), KernelConfig::DEFAULT);
    kernel.register_threads(specs()).unwrap();
    let before = kernel.thread(ThreadId::new(0)).unwrap();

    assert_eq!(
        kernel.register_threads(specs()),
        Err(KernelError::AlreadyRegistered)
    );
    assert_eq!(kernel.thread(ThreadId::new(0)).unwrap(), before);
}

#[test]
fn register_after_start_rejected() {
    let kernel: Kernel<HostPort, 2> = Kernel::new(HostPort::new(), KernelConfig::DEFAULT);
    kernel.register_threads(specs()).unwrap();
    kernel.start(QUANTUM).unwrap();

    assert_eq!(
        kernel.register_threads(specs()),
        Err(KernelError::AlreadyLaunched)
    );
}

#[test]
fn start_requires_threads() {
    let kernel: Kernel<HostPort, 2> = Kernel::new(HostPort::new(), KernelConfig::DEFAULT);
    assert_eq!(kernel.start(QUANTUM), Err(KernelError::NotRegistered));
    assert_eq!(kernel.port().timer().reload(), None);
}

#[test]
fn start_twice_rejected() {
    let kernel: Kernel<HostPort, 1> = Kernel::new(HostPort::new(), KernelConfig::DEFAULT);
    kernel.register_threads(specs()).unwrap();
    let first = kernel.start(QUANTUM).unwrap();

    assert_eq!(
        first,
        kernel.thread(ThreadId::new(0)).unwrap().stack_pointer
    );
    assert_eq!(kernel.start(QUANTUM), Err(KernelError::AlreadyLaunched));
}

#[test]
fn invalid_quantum_leaves_kernel_stopped() {
    let kernel: Kernel<HostPort, 1> = Kernel::new(HostPort::new(), KernelConfig::DEFAULT);
    kernel.register_threads(specs()).unwrap();

    assert_eq!(
        kernel.start(0),
        Err(KernelError::InvalidQuantum { ticks: 0 })
    );
    assert!(!kernel.is_running());
    assert!(kernel.start(QUANTUM).is_ok());
}

#[test]
fn short_stack_rejected() {
    let kernel: Kernel<HostPort, 2> = Kernel::new(HostPort::new(), KernelConfig::DEFAULT);
    let short: &'static mut [u32] = Box::leak(vec![0u32; MIN_STACK_WORDS - 1].into_boxed_slice());

    let result = kernel.register_threads([
        ThreadSpec::new(park, stack()),
        ThreadSpec::new(park, short),
    ]);

    assert_eq!(
        result,
        Err(KernelError::StackTooSmall {
            thread: ThreadId::new(1),
            words: MIN_STACK_WORDS - 1,
            required: MIN_STACK_WORDS,
        })
    );
    assert_eq!(kernel.current(), None);
    // Nothing was committed, so a corrected batch is still accepted.
    assert!(kernel.register_threads(specs()).is_ok());
}

#[test]
fn ticks_before_launch_are_ignored() {
    let kernel: Kernel<HostPort, 1> = Kernel::new(HostPort::new(), KernelConfig::DEFAULT);
    kernel.register_threads(specs()).unwrap();
    kernel.tick();
    kernel.yield_now();

    assert_eq!(kernel.ticks().value(), 0);
    assert!(!kernel.port().switch().is_pending());
}

#[test]
fn sleep_and_wait_before_launch_leave_threads_alone() {
    let kernel: Kernel<HostPort, 2> = Kernel::new(HostPort::new(), KernelConfig::DEFAULT);
    kernel.register_threads(specs()).unwrap();
    let empty: &'static Semaphore = Box::leak(Box::new(Semaphore::new(0)));
    let ready: &'static Semaphore = Box::leak(Box::new(Semaphore::new(1)));

    kernel.sleep(5);
    kernel.wait(empty);
    kernel.wait(ready);

    let info = kernel.thread(ThreadId::new(0)).unwrap();
    assert!(info.eligible);
    assert_eq!(info.sleep_remaining, 0);
    assert_eq!(info.blocked_on, None);
    assert_eq!(empty.value(), 0);
    assert_eq!(ready.value(), 0);
    assert!(!kernel.port().switch().is_pending());
}

#[test]
#[should_panic(expected = "cannot enter a thread")]
fn launch_hands_first_thread_to_port() {
    let kernel: Kernel<HostPort, 1> = Kernel::new(HostPort::new(), KernelConfig::DEFAULT);
    kernel.register_threads(specs()).unwrap();
    let _ = kernel.launch(QUANTUM);
}

#[test]
fn errors_render_readably() {
    let err = KernelError::StackTooSmall {
        thread: ThreadId::new(1),
        words: 8,
        required: MIN_STACK_WORDS,
    };
    assert_eq!(
        err.to_string(),
        format!("thread#1 stack holds 8 words, at least {MIN_STACK_WORDS} required")
    );
}
