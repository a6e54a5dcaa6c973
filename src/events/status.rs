// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Process health records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Envelope, EventKind};
use crate::config::Config;
use crate::hardware::{ProcessInfo, ProcessSnapshot};

/// Nominal IQ throughput of the five-channel pipeline
const DATA_RATE_MBPS: f64 = 48.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessEntry {
    pub pid: u32,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_percent: Option<f64>,
}

impl ProcessEntry {
    fn running(info: &ProcessInfo, with_cpu: bool) -> Self {
        Self {
            pid: info.pid,
            status: "running".to_string(),
            cpu_percent: with_cpu.then_some(info.cpu_percent as f64),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemProcesses {
    pub synthetic_generator: ProcessEntry,
    pub delay_sync: ProcessEntry,
    pub rebuffer: ProcessEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Processes {
    Running(SystemProcesses),
    Error { status: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub processes: Processes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_usage_kb: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_rate_mbps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels_active: Option<u32>,
}

impl StatusRecord {
    pub fn is_healthy(&self) -> bool {
        matches!(self.processes, Processes::Running(_))
    }
}

/// Status record from a process snapshot; `None` yields the error form
pub fn build_status(
    snapshot: Option<&ProcessSnapshot>,
    config: &Config,
    timestamp: Option<DateTime<Utc>>,
) -> StatusRecord {
    let envelope = Envelope::new(
        EventKind::SystemStatus,
        timestamp.unwrap_or_else(Utc::now),
        config.sensor.channels,
    );

    match snapshot {
        Some(snapshot) => StatusRecord {
            envelope,
            processes: Processes::Running(SystemProcesses {
                synthetic_generator: ProcessEntry::running(&snapshot.synthetic_generator, false),
                delay_sync: ProcessEntry::running(&snapshot.delay_sync, true),
                rebuffer: ProcessEntry::running(&snapshot.rebuffer, false),
            }),
            memory_usage_kb: Some(snapshot.delay_sync.memory_kb),
            data_rate_mbps: Some(DATA_RATE_MBPS),
            channels_active: Some(config.sensor.channels),
        },
        None => StatusRecord {
            envelope,
            processes: Processes::Error {
                status: "error".to_string(),
                message: "KrakenSDR processes not running".to_string(),
            },
            memory_usage_kb: None,
            data_rate_mbps: None,
            channels_active: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(pid: u32) -> ProcessInfo {
        ProcessInfo {
            pid,
            cpu_percent: 12.5,
            memory_kb: 2048,
        }
    }

    #[test]
    fn test_missing_processes_is_error_form() {
        let record = build_status(None, &Config::default(), None);
        assert!(!record.is_healthy());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["processes"]["status"], "error");
        assert_eq!(json["processes"]["message"], "KrakenSDR processes not running");
        assert_eq!(json["event_type"], "system_status");
        assert!(json.get("memory_usage_kb").is_none());
    }

    #[test]
    fn test_running_processes() {
        let snapshot = ProcessSnapshot {
            synthetic_generator: info(100),
            delay_sync: info(200),
            rebuffer: info(300),
        };
        let record = build_status(Some(&snapshot), &Config::default(), None);
        assert!(record.is_healthy());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["processes"]["delay_sync"]["pid"], 200);
        assert_eq!(json["processes"]["delay_sync"]["cpu_percent"], 12.5);
        assert!(json["processes"]["rebuffer"].get("cpu_percent").is_none());
        assert_eq!(json["memory_usage_kb"], 2048);
        assert_eq!(json["data_rate_mbps"], 48.0);
        assert_eq!(json["channels_active"], 5);

        let parsed: StatusRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }
}
