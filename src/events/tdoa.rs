// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! TDOA triangulation records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Envelope, EventKind};
use crate::config::Config;
use crate::synthetic::SyntheticGenerator;

#[derive(Debug, Clone, Default)]
pub struct TdoaParams {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Time differences per antenna pair, seconds
    pub measurements: Vec<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl TdoaParams {
    /// Position given as `[lat, lon]`; missing components stay unset
    pub fn from_position(position: &[f64], measurements: Vec<f64>) -> Self {
        Self {
            latitude: position.first().copied(),
            longitude: position.get(1).copied(),
            measurements,
            timestamp: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub estimated_accuracy_meters: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdoaProcessing {
    pub algorithm: String,
    pub antenna_pairs: u32,
    pub time_resolution_ns: f64,
    pub geometric_dilution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synchronization {
    pub clock_accuracy_ppm: f64,
    pub phase_locked: bool,
    pub timing_source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdoaRecord {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub source_location: SourceLocation,
    pub tdoa_measurements: Vec<f64>,
    pub processing: TdoaProcessing,
    pub synchronization: Synchronization,
}

/// Distinct antenna pairs in an array of `channels` elements
pub fn antenna_pairs(channels: u32) -> u32 {
    channels * channels.saturating_sub(1) / 2
}

pub fn build_tdoa(params: TdoaParams, config: &Config, gen: &mut SyntheticGenerator) -> TdoaRecord {
    let at = params.timestamp.unwrap_or_else(Utc::now);

    TdoaRecord {
        envelope: Envelope::new(EventKind::TdoaTriangulation, at, config.sensor.channels),
        source_location: SourceLocation {
            latitude: params.latitude,
            longitude: params.longitude,
            estimated_accuracy_meters: gen.location_accuracy_m(),
        },
        tdoa_measurements: params.measurements,
        processing: TdoaProcessing {
            algorithm: "hyperbolic_triangulation".to_string(),
            antenna_pairs: antenna_pairs(config.sensor.channels),
            time_resolution_ns: 1.0,
            geometric_dilution: gen.geometric_dilution(),
        },
        synchronization: Synchronization {
            clock_accuracy_ppm: 0.1,
            phase_locked: true,
            timing_source: "GPS_disciplined_oscillator".to_string(),
        },
    }
}
