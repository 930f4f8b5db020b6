//! Process resource monitoring for the title bar
//!
//! Tracks CPU and memory usage of the dashboard process itself, so a
//! misbehaving watcher is visible in the watcher.

use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};

/// Resource statistics for the current process
#[derive(Debug, Clone, Default)]
pub struct ProcessStats {
    /// CPU usage percentage (can exceed 100.0 on multi-core)
    pub cpu_usage: f32,
    /// Memory usage in bytes
    pub memory_bytes: u64,
}

/// Process resource monitor
///
/// Call `update()` periodically (each redraw tick) to refresh the stats.
/// The first sample may report zero CPU; sysinfo needs two samples.
pub struct ProcessMonitor {
    system: System,
    pid: sysinfo::Pid,
}

impl ProcessMonitor {
    /// Create a monitor for the current process
    pub fn new() -> anyhow::Result<Self> {
        let mut system = System::new_with_specifics(
            RefreshKind::nothing().with_processes(ProcessRefreshKind::everything()),
        );

        let pid = sysinfo::get_current_pid()
            .map_err(|e| anyhow::anyhow!("Failed to get current PID: {}", e))?;

        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        Ok(Self { system, pid })
    }

    /// Refresh and return current stats
    pub fn update(&mut self) -> ProcessStats {
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);

        self.system
            .process(self.pid)
            .map(|process| ProcessStats {
                cpu_usage: process.cpu_usage(),
                memory_bytes: process.memory(),
            })
            .unwrap_or_default()
    }
}
