//! Kernel configuration

use rtk_hal::InterruptPriority;

/// Static configuration of a kernel instance.
#[derive(Debug, Clone, Copy)]
pub struct KernelConfig {
    pub name: &'static str,
    /// Priority of the quantum timer interrupt that performs context switches.
    /// Should be the least urgent interrupt in the system.
    pub switch_priority: InterruptPriority,
    /// Ticks after launch before periodic events start counting down, so
    /// every thread gets a chance to run before the first event fires.
    pub event_holdoff_ticks: u32,
    /// Invoked on each idle iteration while no thread is eligible.
    pub idle_callback: Option<fn()>,
}

impl KernelConfig {
    pub const DEFAULT: KernelConfig = KernelConfig {
        name: "rtk",
        switch_priority: 7,
        event_holdoff_ticks: 0,
        idle_callback: None,
    };

    /// Creates a new kernel configuration builder.
    pub const fn builder() -> KernelConfigBuilder {
        KernelConfigBuilder {
            config: Self::DEFAULT,
        }
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Builder for kernel configuration, usable in `static` initializers.
#[derive(Debug, Clone, Copy)]
pub struct KernelConfigBuilder {
    config: KernelConfig,
}

impl Default for KernelConfigBuilder {
    fn default() -> Self {
        KernelConfig::builder()
    }
}

impl KernelConfigBuilder {
    /// Sets the kernel name.
    pub const fn name(mut self, name: &'static str) -> Self {
        self.config.name = name;
        self
    }

    /// Sets the priority of the context switch interrupt.
    pub const fn switch_priority(mut self, priority: InterruptPriority) -> Self {
        self.config.switch_priority = priority;
        self
    }

    /// Sets how many ticks periodic events wait after launch.
    pub const fn event_holdoff_ticks(mut self, ticks: u32) -> Self {
        self.config.event_holdoff_ticks = ticks;
        self
    }

    /// Sets a callback to run while no thread is eligible.
    pub const fn idle_callback(mut self, callback: fn()) -> Self {
        self.config.idle_callback = Some(callback);
        self
    }

    pub const fn build(self) -> KernelConfig {
        self.config
    }
}
