// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Passive radar detections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Envelope, EventKind};
use crate::config::Config;
use crate::synthetic::{Illuminator, SyntheticGenerator};

/// Speed of light, m/s
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

#[derive(Debug, Clone, Default)]
pub struct RadarParams {
    pub range_meters: f64,
    pub bearing_degrees: f64,
    /// Radial velocity, positive when receding
    pub velocity_ms: f64,
    /// Pins the illuminator to a custom transmitter
    pub illuminator_frequency_hz: Option<f64>,
    pub snr_db: Option<f64>,
    pub doppler_shift_hz: Option<f64>,
    pub range_resolution_m: Option<f64>,
    pub velocity_resolution_ms: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl RadarParams {
    pub fn new(range_meters: f64, bearing_degrees: f64, velocity_ms: f64) -> Self {
        Self {
            range_meters,
            bearing_degrees,
            velocity_ms,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarTarget {
    pub range_meters: f64,
    pub bearing_degrees: f64,
    pub velocity_ms: f64,
    pub snr_db: f64,
    pub doppler_shift_hz: f64,
    pub range_bin: i64,
    pub velocity_bin: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarProcessing {
    pub correlation_type: String,
    pub integration_time_ms: u32,
    pub range_gates: u32,
    pub doppler_bins: u32,
    /// Constant False Alarm Rate threshold
    pub cfar_threshold: f64,
    pub clutter_suppression: bool,
    pub moving_target_indication: bool,
}

impl Default for RadarProcessing {
    fn default() -> Self {
        Self {
            correlation_type: "cross_correlation".to_string(),
            integration_time_ms: 1000,
            range_gates: 512,
            doppler_bins: 256,
            cfar_threshold: 12.0,
            clutter_suppression: true,
            moving_target_indication: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BistaticGeometry {
    pub baseline_meters: f64,
    pub bistatic_angle_degrees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarRecord {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub target: RadarTarget,
    pub illuminator: Illuminator,
    pub processing: RadarProcessing,
    pub radar_mode: String,
    pub bistatic_geometry: BistaticGeometry,
}

/// Doppler shift of a reflector moving at `velocity_ms` under `carrier_hz`
pub fn doppler_shift(velocity_ms: f64, carrier_hz: f64) -> f64 {
    velocity_ms * carrier_hz / SPEED_OF_LIGHT
}

/// Assemble a passive radar record (always synthetic geometry)
pub fn build_radar(params: RadarParams, config: &Config, gen: &mut SyntheticGenerator) -> RadarRecord {
    let at = params.timestamp.unwrap_or_else(Utc::now);

    let illuminator = match params.illuminator_frequency_hz {
        Some(frequency) => Illuminator::custom(frequency),
        None => gen.illuminator(),
    };

    let range_resolution = params.range_resolution_m.unwrap_or(config.radar.range_resolution_m);
    let velocity_resolution = params
        .velocity_resolution_ms
        .unwrap_or(config.radar.velocity_resolution_ms);

    let target = RadarTarget {
        range_meters: params.range_meters,
        bearing_degrees: params.bearing_degrees,
        velocity_ms: params.velocity_ms,
        snr_db: params.snr_db.unwrap_or_else(|| gen.snr_db()),
        doppler_shift_hz: params
            .doppler_shift_hz
            .unwrap_or_else(|| doppler_shift(params.velocity_ms, illuminator.frequency)),
        // Truncation toward zero, negative velocities land in negative bins
        range_bin: (params.range_meters / range_resolution) as i64,
        velocity_bin: (params.velocity_ms / velocity_resolution) as i64,
    };

    RadarRecord {
        envelope: Envelope::new(EventKind::PassiveRadarDetection, at, config.sensor.channels),
        target,
        illuminator,
        processing: RadarProcessing::default(),
        radar_mode: "passive".to_string(),
        bistatic_geometry: BistaticGeometry {
            baseline_meters: gen.bistatic_baseline_m(),
            bistatic_angle_degrees: gen.bistatic_angle_deg(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::illuminator_catalog;

    #[test]
    fn test_derived_target_fields() {
        let mut gen = SyntheticGenerator::seeded(20);
        let record = build_radar(RadarParams::new(12_345.0, 87.0, -37.0), &Config::default(), &mut gen);

        assert!(illuminator_catalog().contains(&record.illuminator));
        assert_eq!(record.target.range_bin, 82);
        assert_eq!(record.target.velocity_bin, -18);
        let expected = doppler_shift(-37.0, record.illuminator.frequency);
        assert_eq!(record.target.doppler_shift_hz, expected);
        assert!((10.0..30.0).contains(&record.target.snr_db));
        assert!((1000.0..10000.0).contains(&record.bistatic_geometry.baseline_meters));
        assert_eq!(record.radar_mode, "passive");
    }

    #[test]
    fn test_custom_illuminator_and_overrides() {
        let mut params = RadarParams::new(3000.0, 10.0, 50.0);
        params.illuminator_frequency_hz = Some(1.0e9);
        params.snr_db = Some(0.0);
        params.doppler_shift_hz = Some(0.0);
        params.range_resolution_m = Some(1000.0);
        params.velocity_resolution_ms = Some(10.0);

        let mut gen = SyntheticGenerator::seeded(21);
        let record = build_radar(params, &Config::default(), &mut gen);

        assert_eq!(record.illuminator, Illuminator::custom(1.0e9));
        assert_eq!(record.illuminator.power_dbm, 50.0);
        assert_eq!(record.target.snr_db, 0.0);
        assert_eq!(record.target.doppler_shift_hz, 0.0);
        assert_eq!(record.target.range_bin, 3);
        assert_eq!(record.target.velocity_bin, 5);
    }

    #[test]
    fn test_doppler_at_fm() {
        // 100 m/s against a 98.5 MHz carrier is roughly 33 Hz
        assert!((doppler_shift(100.0, 98.5e6) - 32.856).abs() < 0.01);
    }

    #[test]
    fn test_json_layout() {
        let mut gen = SyntheticGenerator::seeded(22);
        let json = serde_json::to_value(build_radar(RadarParams::new(1.0, 2.0, 3.0), &Config::default(), &mut gen)).unwrap();
        assert_eq!(json["event_type"], "passive_radar_detection");
        assert!(json["illuminator"]["type"].is_string());
        assert_eq!(json["processing"]["range_gates"], 512);
        assert!(json["target"]["range_bin"].is_i64());
    }
}
