// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Spectrum sweep records with VFO channel summaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{spectrum_uses_hardware, DataSource, Envelope, EventKind};
use crate::config::Config;
use crate::error::{KrakenError, Result};
use crate::hardware::{DeviceInventory, MeasurementSample};
use crate::synthetic::{linspace, SyntheticGenerator};

/// VFO channels carved out of each sweep
const VFO_COUNT: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct SpectrumParams {
    /// Frequency axis in Hz, one entry per power level
    pub frequencies: Vec<f64>,
    /// Power levels in dBm
    pub power_levels: Vec<f64>,
    pub vfo_channels: Option<Vec<VfoChannel>>,
    pub timestamp: Option<DateTime<Utc>>,
    pub use_real_data: bool,
}

impl SpectrumParams {
    pub fn new(frequencies: Vec<f64>, power_levels: Vec<f64>) -> Self {
        Self {
            frequencies,
            power_levels,
            use_real_data: true,
            ..Default::default()
        }
    }

    /// Center of the requested axis, where a real capture is tuned
    pub fn center_frequency(&self) -> f64 {
        mean(&self.frequencies)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRange {
    pub start: f64,
    pub end: f64,
    pub center: f64,
    pub span_hz: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerStats {
    pub max_dbm: f64,
    pub min_dbm: f64,
    pub mean_dbm: f64,
    pub std_dbm: f64,
}

impl PowerStats {
    fn from_levels(levels: &[f64]) -> Self {
        let max_dbm = levels.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min_dbm = levels.iter().cloned().fold(f64::INFINITY, f64::min);
        // Summation rounding can land a flat sweep's mean just outside [min, max]
        let mean_dbm = mean(levels).max(min_dbm).min(max_dbm);
        let variance = levels.iter().map(|p| (p - mean_dbm).powi(2)).sum::<f64>() / levels.len() as f64;

        Self {
            max_dbm,
            min_dbm,
            mean_dbm,
            std_dbm: variance.sqrt(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VfoChannel {
    pub vfo_id: u32,
    pub center_frequency_hz: f64,
    pub bandwidth_hz: u64,
    pub squelch_db: f64,
    pub active: bool,
    pub signal_detected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumRecord {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub frequency_range_hz: FrequencyRange,
    pub power_stats: PowerStats,
    pub vfo_channels: Vec<VfoChannel>,
    pub fft_size: usize,
    pub window_function: String,
    pub averaging_factor: f64,
    pub sample_rate_hz: u64,
    pub calibration_applied: bool,
    pub data_source: DataSource,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Assemble a spectrum record
///
/// A real capture replaces both the power levels and the frequency axis
/// (the capture spans `center ± sweep_half_span_hz`). Fails on an empty
/// axis, an axis that does not line up with the power levels, or a
/// non-finite level.
pub fn build_spectrum(
    params: SpectrumParams,
    config: &Config,
    inventory: DeviceInventory,
    sample: Option<&MeasurementSample>,
    gen: &mut SyntheticGenerator,
) -> Result<SpectrumRecord> {
    if params.frequencies.is_empty() {
        return Err(KrakenError::InvalidInput("empty frequency axis".into()));
    }
    if params.frequencies.len() != params.power_levels.len() {
        return Err(KrakenError::InvalidInput(format!(
            "{} frequencies for {} power levels",
            params.frequencies.len(),
            params.power_levels.len()
        )));
    }
    if params.power_levels.iter().any(|p| !p.is_finite()) {
        return Err(KrakenError::InvalidInput("non-finite power level".into()));
    }

    let at = params.timestamp.unwrap_or_else(Utc::now);
    let measured = sample
        .filter(|s| s.is_real())
        .filter(|_| spectrum_uses_hardware(params.use_real_data, inventory));

    let (data_source, frequencies, power_levels) = match measured {
        Some(s) => {
            let center = params.center_frequency();
            let half_span = config.hardware.sweep_half_span_hz;
            let axis = linspace(center - half_span, center + half_span, s.spectrum.len());
            (DataSource::RealRtlSdrHardware, axis, s.spectrum.clone())
        }
        None => (DataSource::SimulatedSampleData, params.frequencies, params.power_levels),
    };

    let vfo_channels = match params.vfo_channels {
        Some(channels) => channels,
        None => (0..VFO_COUNT)
            .map(|i| VfoChannel {
                vfo_id: i as u32,
                center_frequency_hz: frequencies[frequencies.len() / 4 * (i + 1)],
                bandwidth_hz: config.sensor.vfo_bandwidth_hz,
                squelch_db: -60.0,
                active: true,
                signal_detected: gen.signal_detected(),
            })
            .collect(),
    };

    let start = frequencies[0];
    let end = frequencies[frequencies.len() - 1];

    Ok(SpectrumRecord {
        envelope: Envelope::new(EventKind::SpectrumAnalysis, at, config.sensor.channels),
        frequency_range_hz: FrequencyRange {
            start,
            end,
            center: mean(&frequencies),
            span_hz: end - start,
        },
        power_stats: PowerStats::from_levels(&power_levels),
        vfo_channels,
        fft_size: frequencies.len(),
        window_function: "hann".to_string(),
        averaging_factor: 0.8,
        sample_rate_hz: config.sensor.sample_rate_hz,
        calibration_applied: true,
        data_source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fm_sweep(gen: &mut SyntheticGenerator) -> SpectrumParams {
        let frequencies = linspace(88e6, 108e6, 1000);
        let power_levels = gen.power_levels(1000, -80.0, 20.0);
        SpectrumParams::new(frequencies, power_levels)
    }

    #[test]
    fn test_synthetic_sweep() {
        let mut gen = SyntheticGenerator::seeded(10);
        let params = fm_sweep(&mut gen);
        let record = build_spectrum(params, &Config::default(), DeviceInventory::none(), None, &mut gen).unwrap();

        assert_eq!(record.data_source, DataSource::SimulatedSampleData);
        assert_eq!(record.fft_size, 1000);
        assert_eq!(record.frequency_range_hz.start, 88e6);
        assert!((record.frequency_range_hz.span_hz - 20e6).abs() < 1.0);
        assert!((record.frequency_range_hz.center - 98e6).abs() < 1.0);

        let stats = &record.power_stats;
        assert!(stats.max_dbm >= stats.mean_dbm && stats.mean_dbm >= stats.min_dbm);
        assert!(stats.min_dbm >= -80.0 && stats.max_dbm < -60.0);
        assert!(stats.std_dbm > 0.0);

        assert_eq!(record.vfo_channels.len(), 3);
        let axis = linspace(88e6, 108e6, 1000);
        for (i, vfo) in record.vfo_channels.iter().enumerate() {
            assert_eq!(vfo.vfo_id, i as u32);
            assert_eq!(vfo.center_frequency_hz, axis[250 * (i + 1)]);
            assert!(vfo.active);
        }
    }

    #[test]
    fn test_real_capture_replaces_levels() {
        let mut gen = SyntheticGenerator::seeded(11);
        let params = fm_sweep(&mut gen);
        let sample = MeasurementSample::from_readings(0, vec![-70.0, -30.0, -50.0, -60.0, -40.0]).unwrap();

        let record = build_spectrum(params, &Config::default(), DeviceInventory::new(1), Some(&sample), &mut gen).unwrap();

        assert_eq!(record.data_source, DataSource::RealRtlSdrHardware);
        assert_eq!(record.fft_size, 5);
        assert_eq!(record.power_stats.max_dbm, -30.0);
        assert_eq!(record.power_stats.min_dbm, -70.0);
        assert!((record.power_stats.mean_dbm + 50.0).abs() < 1e-9);
        assert!((record.frequency_range_hz.span_hz - 2e6).abs() < 1.0);
    }

    #[test]
    fn test_no_devices_means_simulated() {
        let mut gen = SyntheticGenerator::seeded(12);
        let params = fm_sweep(&mut gen);
        let sample = MeasurementSample::from_readings(0, vec![-30.0]).unwrap();

        let record = build_spectrum(params, &Config::default(), DeviceInventory::none(), Some(&sample), &mut gen).unwrap();
        assert_eq!(record.data_source, DataSource::SimulatedSampleData);
        assert_eq!(record.fft_size, 1000);
    }

    #[test]
    fn test_supplied_vfo_channels_kept() {
        let mut gen = SyntheticGenerator::seeded(13);
        let mut params = SpectrumParams::new(vec![1.0, 2.0], vec![-10.0, -20.0]);
        params.vfo_channels = Some(vec![]);

        let record = build_spectrum(params, &Config::default(), DeviceInventory::none(), None, &mut gen).unwrap();
        assert!(record.vfo_channels.is_empty());
    }

    #[test]
    fn test_flat_sweep_mean_within_bounds() {
        let mut gen = SyntheticGenerator::seeded(15);
        for level in [-71.3, -60.1, -80.7, -55.55, -42.42, -33.3] {
            for points in [3, 7, 10, 100, 1000] {
                let params = SpectrumParams::new(linspace(88e6, 108e6, points), vec![level; points]);
                let record = build_spectrum(params, &Config::default(), DeviceInventory::none(), None, &mut gen).unwrap();

                let stats = &record.power_stats;
                assert!(
                    stats.max_dbm >= stats.mean_dbm && stats.mean_dbm >= stats.min_dbm,
                    "level {} x {}: {:?}",
                    level,
                    points,
                    stats
                );
                assert_eq!(stats.mean_dbm, level);
                assert_eq!(stats.std_dbm, 0.0);
            }
        }
    }

    #[test]
    fn test_rejects_mismatched_axis() {
        let mut gen = SyntheticGenerator::seeded(14);
        let config = Config::default();

        let empty = build_spectrum(SpectrumParams::new(vec![], vec![]), &config, DeviceInventory::none(), None, &mut gen);
        assert!(matches!(empty, Err(KrakenError::InvalidInput(_))));

        let short = build_spectrum(SpectrumParams::new(vec![1.0, 2.0], vec![-1.0]), &config, DeviceInventory::none(), None, &mut gen);
        assert!(matches!(short, Err(KrakenError::InvalidInput(_))));

        let nan = build_spectrum(SpectrumParams::new(vec![1.0, 2.0], vec![f64::NAN, -1.0]), &config, DeviceInventory::none(), None, &mut gen);
        assert!(matches!(nan, Err(KrakenError::InvalidInput(_))));
    }
}
