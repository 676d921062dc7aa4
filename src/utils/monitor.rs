#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct ProcessStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub memory_usage_percent: f32,
    pub peak_memory_mb: u64,
    pub uptime: Duration,
}

/// 監控 Solr JVM 行程的資源使用量
#[cfg(feature = "cli")]
pub struct ProcessMonitor {
    system: System,
    pid: Pid,
    start_time: Instant,
    peak_memory: u64,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl ProcessMonitor {
    pub fn new(enabled: bool, pid: u32) -> Self {
        let mut system = System::new_all();

        // 初始刷新，CPU 使用率需要兩次取樣
        system.refresh_all();

        Self {
            system,
            pid: Pid::from_u32(pid),
            start_time: Instant::now(),
            peak_memory: 0,
            enabled,
        }
    }

    pub fn get_stats(&mut self) -> Option<ProcessStats> {
        if !self.enabled {
            return None;
        }

        self.system.refresh_all();

        let process = self.system.process(self.pid)?;
        let memory_mb = process.memory() / 1024 / 1024;
        let total_memory = self.system.total_memory() / 1024 / 1024;
        let memory_percent = if total_memory > 0 {
            (memory_mb as f32 / total_memory as f32) * 100.0
        } else {
            0.0
        };

        if memory_mb > self.peak_memory {
            self.peak_memory = memory_mb;
        }

        Some(ProcessStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            memory_usage_percent: memory_percent,
            peak_memory_mb: self.peak_memory,
            uptime: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&mut self) {
        let pid = self.pid;
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Solr (pid {}) - CPU: {:.1}%, Memory: {}MB ({:.1}%), Peak: {}MB, Uptime: {:?}",
                pid,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.memory_usage_percent,
                stats.peak_memory_mb,
                stats.uptime
            );
        }
    }

    pub fn log_final_stats(&mut self) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Final Stats - Uptime: {:?}, Peak Memory: {}MB",
                stats.uptime,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

// 沒有 cli feature 時的空實現
#[cfg(not(feature = "cli"))]
pub struct ProcessMonitor;

#[cfg(not(feature = "cli"))]
impl ProcessMonitor {
    pub fn new(_enabled: bool, _pid: u32) -> Self {
        Self
    }

    pub fn log_stats(&mut self) {}

    pub fn log_final_stats(&mut self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
