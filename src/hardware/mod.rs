// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Hardware module - device probing, spectrum capture, process health

mod parse;
mod process;
mod rtl;

pub use parse::{parse_device_count, parse_power_sweep};
pub use process::SysinfoMonitor;
pub use rtl::RtlSdr;

use std::time::Duration;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Receiver devices found at session start
///
/// Set once by [`ReceiverHardware::probe`] and passed by value into every
/// builder afterwards. `device_count == 0` means synthetic-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInventory {
    pub device_count: u32,
}

impl DeviceInventory {
    pub fn new(device_count: u32) -> Self {
        Self { device_count }
    }

    /// No hardware, synthetic-only session
    pub fn none() -> Self {
        Self::default()
    }

    pub fn has_devices(&self) -> bool {
        self.device_count > 0
    }
}

/// Outcome of one capture attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleSource {
    Real,
    Unavailable,
}

/// Summary of one power sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSample {
    pub average_power_dbm: f64,
    pub max_power_dbm: f64,
    pub spectrum: Vec<f64>,
    pub source: SampleSource,
    pub device_index: u32,
}

impl MeasurementSample {
    /// Summarize parsed power readings; `None` when there are none
    pub fn from_readings(device_index: u32, spectrum: Vec<f64>) -> Option<Self> {
        if spectrum.is_empty() {
            return None;
        }

        let max_power_dbm = spectrum.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min_power_dbm = spectrum.iter().cloned().fold(f64::INFINITY, f64::min);
        let average_power_dbm =
            (spectrum.iter().sum::<f64>() / spectrum.len() as f64)
                .max(min_power_dbm)
                .min(max_power_dbm);

        Some(Self {
            average_power_dbm,
            max_power_dbm,
            spectrum,
            source: SampleSource::Real,
            device_index,
        })
    }

    pub fn unavailable(device_index: u32) -> Self {
        Self {
            average_power_dbm: 0.0,
            max_power_dbm: 0.0,
            spectrum: vec![],
            source: SampleSource::Unavailable,
            device_index,
        }
    }

    pub fn is_real(&self) -> bool {
        self.source == SampleSource::Real && !self.spectrum.is_empty()
    }
}

/// Narrow capability over the receiver hardware
///
/// Neither method fails: every error path degrades to
/// `device_count = 0` or an unavailable sample.
#[async_trait]
pub trait ReceiverHardware: Send + Sync {
    /// Count attached receivers
    async fn probe(&self) -> DeviceInventory;

    /// One power sweep around `center_frequency_hz`
    ///
    /// Callers check the inventory first; this does not re-probe.
    async fn acquire(
        &self,
        device_index: u32,
        center_frequency_hz: f64,
        duration: Duration,
    ) -> MeasurementSample;
}

/// One running KrakenSDR process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub cpu_percent: f32,
    pub memory_kb: u64,
}

/// The three DSP processes a healthy KrakenSDR runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    pub synthetic_generator: ProcessInfo,
    pub delay_sync: ProcessInfo,
    pub rebuffer: ProcessInfo,
}

/// Process enumeration capability
#[async_trait]
pub trait ProcessMonitor: Send + Sync {
    /// `None` unless all three processes are running
    async fn snapshot(&self) -> Option<ProcessSnapshot>;
}
