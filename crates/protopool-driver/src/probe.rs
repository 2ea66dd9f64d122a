//! Memory metric providers.

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Pull-based source of current process memory usage, in MiB.
///
/// Sampled periodically by the driver, never pushed. Implementations may
/// cache or smooth; the pool only compares the value against its
/// configured thresholds.
pub trait MemoryProbe: Send {
    /// Sample current memory usage.
    fn current_mib(&mut self) -> f64;
}

/// Probe reporting the resident set of the current process via sysinfo.
pub struct ProcessMemoryProbe {
    system: System,
    pid: Pid,
}

impl ProcessMemoryProbe {
    /// Create a probe bound to the current process.
    #[must_use]
    pub fn new() -> Self {
        Self {
            system: System::new(),
            pid: Pid::from_u32(std::process::id()),
        }
    }
}

impl Default for ProcessMemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for ProcessMemoryProbe {
    #[allow(clippy::cast_precision_loss)]
    fn current_mib(&mut self) -> f64 {
        let pid = self.pid;
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        self.system
            .process(pid)
            .map_or(0.0, |process| process.memory() as f64 / BYTES_PER_MIB)
    }
}

/// Probe returning a configurable fixed value, for tests and simulations.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedProbe {
    mib: f64,
}

impl FixedProbe {
    /// Create a probe that reports `mib`.
    #[must_use]
    pub fn new(mib: f64) -> Self {
        Self { mib }
    }

    /// Change the reported value.
    pub fn set(&mut self, mib: f64) {
        self.mib = mib;
    }
}

impl MemoryProbe for FixedProbe {
    fn current_mib(&mut self) -> f64 {
        self.mib
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_probe_reports_set_value() {
        let mut probe = FixedProbe::new(42.0);
        assert!((probe.current_mib() - 42.0).abs() < f64::EPSILON);
        probe.set(128.5);
        assert!((probe.current_mib() - 128.5).abs() < f64::EPSILON);
    }

    #[test]
    fn process_probe_reports_positive_memory() {
        let mut probe = ProcessMemoryProbe::new();
        // The test binary itself occupies memory.
        assert!(probe.current_mib() > 0.0);
    }
}
