// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! KrakenSDR DSP process health via sysinfo

use async_trait::async_trait;
use sysinfo::{Process, System, MINIMUM_CPU_UPDATE_INTERVAL};
use tracing::debug;

use super::{ProcessInfo, ProcessMonitor, ProcessSnapshot};
use crate::config::ProcessPatterns;

/// Finds the KrakenSDR processes by command-line fragment
pub struct SysinfoMonitor {
    patterns: ProcessPatterns,
}

impl SysinfoMonitor {
    pub fn new(patterns: ProcessPatterns) -> Self {
        Self { patterns }
    }
}

fn matches(process: &Process, pattern: &str) -> bool {
    process.name().contains(pattern) || process.cmd().iter().any(|arg| arg.contains(pattern))
}

fn find(system: &System, pattern: &str) -> Option<ProcessInfo> {
    let own_pid = std::process::id();
    let info = system
        .processes()
        .values()
        .filter(|p| p.pid().as_u32() != own_pid)
        .filter(|p| matches(p, pattern))
        .min_by_key(|p| p.pid().as_u32())
        .map(|p| ProcessInfo {
            pid: p.pid().as_u32(),
            cpu_percent: p.cpu_usage(),
            memory_kb: p.memory() / 1024,
        });

    if info.is_none() {
        debug!("No process matching '{}'", pattern);
    }
    info
}

#[async_trait]
impl ProcessMonitor for SysinfoMonitor {
    async fn snapshot(&self) -> Option<ProcessSnapshot> {
        let mut system = System::new();
        system.refresh_processes();
        // CPU usage needs two samples
        tokio::time::sleep(MINIMUM_CPU_UPDATE_INTERVAL).await;
        system.refresh_processes();

        Some(ProcessSnapshot {
            synthetic_generator: find(&system, &self.patterns.synthetic_generator)?,
            delay_sync: find(&system, &self.patterns.delay_sync)?,
            rebuffer: find(&system, &self.patterns.rebuffer)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_processes_yield_none() {
        let monitor = SysinfoMonitor::new(ProcessPatterns {
            synthetic_generator: "kraken-test-absent-a".into(),
            delay_sync: "kraken-test-absent-b".into(),
            rebuffer: "kraken-test-absent-c".into(),
        });
        assert!(monitor.snapshot().await.is_none());
    }
}
