// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Direction-of-arrival records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{doa_uses_hardware, DataSource, Envelope, EventKind};
use crate::config::Config;
use crate::hardware::{DeviceInventory, MeasurementSample};
use crate::synthetic::SyntheticGenerator;

/// Inputs for one bearing estimate; `None` fields are synthesized
#[derive(Debug, Clone, Default)]
pub struct DoaParams {
    /// Compass convention, 90° = East
    pub bearing: f64,
    /// 0-99
    pub confidence: f64,
    pub frequency_hz: f64,
    pub rssi_db: Option<f64>,
    pub latency_ms: Option<f64>,
    pub station_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub gps_heading: Option<f64>,
    pub compass_heading: Option<f64>,
    pub array_arrangement: Option<String>,
    pub doa_spectrum: Option<Vec<f64>>,
    pub timestamp: Option<DateTime<Utc>>,
    pub use_real_data: bool,
}

impl DoaParams {
    pub fn new(bearing: f64, confidence: f64, frequency_hz: f64) -> Self {
        Self {
            bearing,
            confidence,
            frequency_hz,
            use_real_data: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoaRecord {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub bearing_degrees: f64,
    pub confidence: f64,
    pub rssi_db: f64,
    pub frequency_hz: f64,
    pub array_arrangement: String,
    pub latency_ms: f64,
    pub station_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub gps_heading: Option<f64>,
    pub compass_heading: Option<f64>,
    pub main_heading_sensor: String,
    pub doa_spectrum_360: Vec<f64>,
    pub processing_mode: String,
    pub vfo_bandwidth_hz: u64,
    pub sample_rate_hz: u64,
    pub data_source: DataSource,
    pub rtl_sdr_devices_available: u32,
}

/// Assemble a DOA record
///
/// Measured power is used only when real data was requested, the full
/// array is present and `sample` holds an actual capture; anything else is
/// tagged as simulated.
pub fn build_doa(
    params: DoaParams,
    config: &Config,
    inventory: DeviceInventory,
    sample: Option<&MeasurementSample>,
    gen: &mut SyntheticGenerator,
) -> DoaRecord {
    let at = params.timestamp.unwrap_or_else(Utc::now);

    let measured = sample
        .filter(|s| s.is_real())
        .filter(|_| doa_uses_hardware(params.use_real_data, inventory, config.hardware.doa_min_devices));

    let (data_source, measured_rssi) = match measured {
        Some(s) => (DataSource::RealRtlSdrHardware, Some(s.average_power_dbm)),
        None => (DataSource::SimulatedSampleData, None),
    };

    let rssi_db = params
        .rssi_db
        .or(measured_rssi)
        .unwrap_or_else(|| gen.rssi_db());
    let latency_ms = params.latency_ms.unwrap_or_else(|| gen.latency_ms());
    let doa_spectrum_360 = match params.doa_spectrum {
        Some(spectrum) => spectrum,
        None => gen.doa_spectrum(params.bearing),
    };

    let main_heading_sensor = if params.gps_heading.is_some() { "GPS" } else { "Compass" };

    DoaRecord {
        envelope: Envelope::new(EventKind::DirectionFinding, at, config.sensor.channels),
        bearing_degrees: params.bearing,
        confidence: params.confidence,
        rssi_db,
        frequency_hz: params.frequency_hz,
        array_arrangement: params
            .array_arrangement
            .unwrap_or_else(|| config.sensor.array_arrangement.clone()),
        latency_ms,
        station_id: params
            .station_id
            .unwrap_or_else(|| format!("{}-001", config.sensor.station_prefix)),
        latitude: params.latitude,
        longitude: params.longitude,
        gps_heading: params.gps_heading,
        compass_heading: params.compass_heading,
        main_heading_sensor: main_heading_sensor.to_string(),
        doa_spectrum_360,
        processing_mode: "coherent_doa".to_string(),
        vfo_bandwidth_hz: config.sensor.vfo_bandwidth_hz,
        sample_rate_hz: config.sensor.sample_rate_hz,
        data_source,
        rtl_sdr_devices_available: inventory.device_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::spectrum::main_bin;

    #[test]
    fn test_synthetic_doa_record() {
        let mut gen = SyntheticGenerator::seeded(1);
        let record = build_doa(
            DoaParams::new(271.4, 8.5, 98.1e6),
            &Config::default(),
            DeviceInventory::none(),
            None,
            &mut gen,
        );

        assert_eq!(record.data_source, DataSource::SimulatedSampleData);
        assert_eq!(record.doa_spectrum_360.len(), 360);
        assert!(record.doa_spectrum_360[main_bin(271.4)] > 0.7);
        assert!((-80.0..-20.0).contains(&record.rssi_db));
        assert!((50.0..200.0).contains(&record.latency_ms));
        assert_eq!(record.main_heading_sensor, "Compass");
        assert_eq!(record.station_id, "KrakenSDR-001");
        assert_eq!(record.rtl_sdr_devices_available, 0);
    }

    #[test]
    fn test_real_sample_needs_full_array() {
        let config = Config::default();
        let sample = MeasurementSample::from_readings(0, vec![-35.0, -25.0]).unwrap();

        let mut gen = SyntheticGenerator::seeded(2);
        let real = build_doa(DoaParams::new(10.0, 5.0, 100e6), &config, DeviceInventory::new(5), Some(&sample), &mut gen);
        assert_eq!(real.data_source, DataSource::RealRtlSdrHardware);
        assert_eq!(real.rssi_db, -30.0);

        let partial = build_doa(DoaParams::new(10.0, 5.0, 100e6), &config, DeviceInventory::new(4), Some(&sample), &mut gen);
        assert_eq!(partial.data_source, DataSource::SimulatedSampleData);

        let mut declined = DoaParams::new(10.0, 5.0, 100e6);
        declined.use_real_data = false;
        let declined = build_doa(declined, &config, DeviceInventory::new(5), Some(&sample), &mut gen);
        assert_eq!(declined.data_source, DataSource::SimulatedSampleData);
    }

    #[test]
    fn test_unavailable_sample_falls_back() {
        let mut gen = SyntheticGenerator::seeded(3);
        let record = build_doa(
            DoaParams::new(10.0, 5.0, 100e6),
            &Config::default(),
            DeviceInventory::new(5),
            Some(&MeasurementSample::unavailable(0)),
            &mut gen,
        );
        assert_eq!(record.data_source, DataSource::SimulatedSampleData);
        assert_eq!(record.rtl_sdr_devices_available, 5);
    }

    #[test]
    fn test_overrides_are_verbatim() {
        let mut params = DoaParams::new(45.0, 12.0, 433.92e6);
        params.rssi_db = Some(0.0);
        params.latency_ms = Some(75.0);
        params.station_id = Some("Mobile-7".into());
        params.gps_heading = Some(180.0);
        params.array_arrangement = Some("ULA".into());
        params.doa_spectrum = Some(vec![0.5; 360]);

        let sample = MeasurementSample::from_readings(0, vec![-50.0]).unwrap();
        let mut gen = SyntheticGenerator::seeded(4);
        let record = build_doa(params, &Config::default(), DeviceInventory::new(5), Some(&sample), &mut gen);

        assert_eq!(record.rssi_db, 0.0);
        assert_eq!(record.latency_ms, 75.0);
        assert_eq!(record.station_id, "Mobile-7");
        assert_eq!(record.main_heading_sensor, "GPS");
        assert_eq!(record.array_arrangement, "ULA");
        assert_eq!(record.doa_spectrum_360, vec![0.5; 360]);
    }

    #[test]
    fn test_json_layout() {
        let mut gen = SyntheticGenerator::seeded(5);
        let record = build_doa(DoaParams::new(1.0, 1.0, 1.0), &Config::default(), DeviceInventory::none(), None, &mut gen);
        let json = serde_json::to_value(&record).unwrap();

        for field in [
            "@timestamp", "event_type", "unix_epoch_time", "sensor_type", "channels",
            "bearing_degrees", "confidence", "rssi_db", "frequency_hz", "array_arrangement",
            "latency_ms", "station_id", "latitude", "longitude", "gps_heading", "compass_heading",
            "main_heading_sensor", "doa_spectrum_360", "processing_mode", "vfo_bandwidth_hz",
            "sample_rate_hz", "data_source", "rtl_sdr_devices_available",
        ] {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(json["event_type"], "direction_finding");
        assert!(json["latitude"].is_null());
    }
}
