#![allow(dead_code)]

use rtk_kernel::{Kernel, KernelConfig, Priority, ThreadId, ThreadSpec};
use rtk_port_host::HostPort;

pub type HostKernel<const N: usize> = Kernel<HostPort, N>;

pub const QUANTUM: u32 = 80_000;

/// Thread body. Never entered on the host port.
pub fn park() -> ! {
    loop {
        std::thread::park();
    }
}

pub fn stack() -> &'static mut [u32] {
    Box::leak(vec![0u32; 128].into_boxed_slice())
}

/// Running kernel with one thread per entry of `priorities`.
pub fn kernel_with<const N: usize>(priorities: [u8; N]) -> HostKernel<N> {
    kernel_with_config(priorities, KernelConfig::DEFAULT)
}

pub fn kernel_with_config<const N: usize>(
    priorities: [u8; N],
    config: KernelConfig,
) -> HostKernel<N> {
    let kernel = Kernel::new(HostPort::new(), config);
    kernel
        .register_threads(
            priorities.map(|p| ThreadSpec::new(park, stack()).with_priority(Priority::new(p))),
        )
        .unwrap();
    kernel.start(QUANTUM).unwrap();
    kernel
}

pub fn current<const N: usize>(kernel: &HostKernel<N>) -> usize {
    kernel.current().unwrap().index()
}

pub fn eligible<const N: usize>(kernel: &HostKernel<N>, index: u8) -> bool {
    kernel.thread(ThreadId::new(index)).unwrap().eligible
}

/// Run one scheduling pass, as a quantum expiry would.
pub fn reschedule<const N: usize>(kernel: &HostKernel<N>) -> usize {
    let saved = kernel
        .thread(kernel.current().unwrap())
        .unwrap()
        .stack_pointer;
    kernel.switch_context(saved);
    current(kernel)
}

/// Take the switch interrupt if one was pended. Returns the current thread.
pub fn service<const N: usize>(kernel: &HostKernel<N>) -> usize {
    if kernel.port().take_pending_switch() {
        reschedule(kernel)
    } else {
        current(kernel)
    }
}
