// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Beamforming pattern records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Envelope, EventKind};
use crate::config::Config;

#[derive(Debug, Clone, Default)]
pub struct BeamformingParams {
    pub direction_degrees: f64,
    pub gain_db: f64,
    /// Defaults to the antipode of the beam
    pub null_directions: Option<Vec<f64>>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl BeamformingParams {
    pub fn new(direction_degrees: f64, gain_db: f64) -> Self {
        Self {
            direction_degrees,
            gain_db,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamPattern {
    pub main_lobe_direction: f64,
    pub main_lobe_gain_db: f64,
    pub null_directions: Vec<f64>,
    pub beamwidth_3db: f64,
    pub side_lobe_level_db: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayConfig {
    pub elements: u32,
    pub geometry: String,
    pub element_spacing_wavelengths: f64,
    pub array_diameter_meters: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamformingProcessing {
    /// Minimum Variance Distortionless Response
    pub algorithm: String,
    pub adaptive: bool,
    pub interference_suppression: bool,
    pub noise_reduction_db: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamformingRecord {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub beam_pattern: BeamPattern,
    pub array_config: ArrayConfig,
    pub processing: BeamformingProcessing,
}

/// Direction opposite `direction`, in 0..360
pub fn antipode(direction: f64) -> f64 {
    (direction + 180.0).rem_euclid(360.0)
}

pub fn build_beamforming(params: BeamformingParams, config: &Config) -> BeamformingRecord {
    let at = params.timestamp.unwrap_or_else(Utc::now);
    let null_directions = params
        .null_directions
        .unwrap_or_else(|| vec![antipode(params.direction_degrees)]);

    BeamformingRecord {
        envelope: Envelope::new(EventKind::Beamforming, at, config.sensor.channels),
        beam_pattern: BeamPattern {
            main_lobe_direction: params.direction_degrees,
            main_lobe_gain_db: params.gain_db,
            null_directions,
            beamwidth_3db: 30.0,
            side_lobe_level_db: -20.0,
        },
        array_config: ArrayConfig {
            elements: config.sensor.channels,
            geometry: "UCA".to_string(),
            element_spacing_wavelengths: 0.5,
            array_diameter_meters: 1.0,
        },
        processing: BeamformingProcessing {
            algorithm: "MVDR".to_string(),
            adaptive: true,
            interference_suppression: true,
            noise_reduction_db: 10.0,
        },
    }
}
