// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Event records - one fixed schema per event kind
//!
//! Every record flattens a common [`Envelope`] in front of its payload and
//! is self-contained: no record refers to another. Builders are pure
//! functions over their inputs, the [`DeviceInventory`], an optional
//! [`MeasurementSample`](crate::hardware::MeasurementSample) and a
//! [`SyntheticGenerator`](crate::synthetic::SyntheticGenerator) for the
//! fields nobody supplied.

mod beamforming;
mod doa;
mod radar;
mod spectrum;
mod status;
mod tdoa;

pub use beamforming::{antipode, build_beamforming, ArrayConfig, BeamPattern, BeamformingParams, BeamformingProcessing, BeamformingRecord};
pub use doa::{build_doa, DoaParams, DoaRecord};
pub use radar::{build_radar, doppler_shift, SPEED_OF_LIGHT, BistaticGeometry, RadarParams, RadarProcessing, RadarRecord, RadarTarget};
pub use spectrum::{build_spectrum, FrequencyRange, PowerStats, SpectrumParams, SpectrumRecord, VfoChannel};
pub use status::{build_status, ProcessEntry, Processes, StatusRecord, SystemProcesses};
pub use tdoa::{antenna_pairs, build_tdoa, SourceLocation, Synchronization, TdoaParams, TdoaProcessing, TdoaRecord};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::hardware::DeviceInventory;

/// Constant `sensor_type` on every record
pub const SENSOR_TYPE: &str = "kraken_sdr";

/// The six record kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    DirectionFinding,
    SpectrumAnalysis,
    PassiveRadarDetection,
    Beamforming,
    TdoaTriangulation,
    SystemStatus,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::DirectionFinding,
        EventKind::SpectrumAnalysis,
        EventKind::PassiveRadarDetection,
        EventKind::Beamforming,
        EventKind::TdoaTriangulation,
        EventKind::SystemStatus,
    ];

    /// Value of the `event_type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::DirectionFinding => "direction_finding",
            EventKind::SpectrumAnalysis => "spectrum_analysis",
            EventKind::PassiveRadarDetection => "passive_radar_detection",
            EventKind::Beamforming => "beamforming",
            EventKind::TdoaTriangulation => "tdoa_triangulation",
            EventKind::SystemStatus => "system_status",
        }
    }

    /// Short name used in log file names
    pub fn file_tag(&self) -> &'static str {
        match self {
            EventKind::DirectionFinding => "doa",
            EventKind::SpectrumAnalysis => "spectrum",
            EventKind::PassiveRadarDetection => "radar",
            EventKind::Beamforming => "beamforming",
            EventKind::TdoaTriangulation => "tdoa",
            EventKind::SystemStatus => "status",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the measured values of a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
    RealRtlSdrHardware,
    SimulatedSampleData,
}

/// Fields shared by every record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "@timestamp")]
    pub timestamp: String,
    pub event_type: EventKind,
    /// Milliseconds since the Unix epoch
    pub unix_epoch_time: i64,
    pub sensor_type: String,
    pub channels: u32,
    pub coherent_processing: bool,
}

impl Envelope {
    /// Envelope stamped at `at`; the ISO string and epoch millis agree
    pub fn new(event_type: EventKind, at: DateTime<Utc>, channels: u32) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Micros, false),
            event_type,
            unix_epoch_time: at.timestamp_millis(),
            sensor_type: SENSOR_TYPE.to_string(),
            channels,
            coherent_processing: true,
        }
    }
}

/// Direction finding needs the full coherent array
pub fn doa_uses_hardware(use_real_data: bool, inventory: DeviceInventory, min_devices: u32) -> bool {
    use_real_data && inventory.device_count >= min_devices.max(1)
}

/// Spectrum analysis needs any single receiver
pub fn spectrum_uses_hardware(use_real_data: bool, inventory: DeviceInventory) -> bool {
    use_real_data && inventory.has_devices()
}
