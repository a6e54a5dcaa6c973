// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! One full sample batch across every event kind

use serde::{Deserialize, Serialize};
use tracing::info;

use super::Engine;
use crate::error::Result;
use crate::events::{
    antenna_pairs, BeamformingParams, DoaParams, RadarParams, SpectrumParams, TdoaParams,
};
use crate::synthetic::{linspace, FM_BAND_HZ};

pub const DOA_EVENTS: usize = 5;
pub const RADAR_EVENTS: usize = 3;
pub const BEAMFORMING_EVENTS: usize = 2;
pub const TDOA_EVENTS: usize = 2;

/// Points in the batch's FM-band sweep
const SWEEP_POINTS: usize = 1000;

/// Simulated emitter location for TDOA fixes (lower Manhattan)
const TDOA_ORIGIN: (f64, f64) = (40.7128, -74.0060);

/// Lines written by one batch, per event kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub direction_finding: usize,
    pub spectrum_analysis: usize,
    pub passive_radar: usize,
    pub beamforming: usize,
    pub tdoa_triangulation: usize,
    pub system_status: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.direction_finding
            + self.spectrum_analysis
            + self.passive_radar
            + self.beamforming
            + self.tdoa_triangulation
            + self.system_status
    }
}

impl Engine {
    /// Emit 5 DOA, 1 spectrum, 3 radar, 2 beamforming, 2 TDOA and 1 status record
    pub async fn generate_sample_data(&mut self) -> Result<BatchSummary> {
        info!("Generating comprehensive KrakenSDR data for all capabilities...");
        let mut summary = BatchSummary::default();

        for i in 0..DOA_EVENTS {
            let mut params = DoaParams::new(
                self.gen.uniform(0.0, 360.0),
                self.gen.uniform(0.7, 15.0),
                self.gen.uniform(FM_BAND_HZ.0, FM_BAND_HZ.1),
            );
            params.station_id = Some(format!("{}-{:03}", self.config.sensor.station_prefix, i + 1));
            params.array_arrangement = Some(self.gen.array_arrangement().to_string());

            self.log_doa(params).await?;
            summary.direction_finding += 1;
        }

        let frequencies = linspace(FM_BAND_HZ.0, FM_BAND_HZ.1, SWEEP_POINTS);
        let power_levels = self.gen.power_levels(SWEEP_POINTS, -80.0, 20.0);
        self.log_spectrum(SpectrumParams::new(frequencies, power_levels)).await?;
        summary.spectrum_analysis += 1;

        for _ in 0..RADAR_EVENTS {
            let params = RadarParams::new(
                self.gen.uniform(1000.0, 50000.0),
                self.gen.uniform(0.0, 360.0),
                self.gen.uniform(-100.0, 100.0),
            );
            self.log_radar(params)?;
            summary.passive_radar += 1;
        }

        for _ in 0..BEAMFORMING_EVENTS {
            let params = BeamformingParams::new(self.gen.uniform(0.0, 360.0), self.gen.uniform(8.0, 15.0));
            self.log_beamforming(params)?;
            summary.beamforming += 1;
        }

        let pairs = antenna_pairs(self.config.sensor.channels);
        for _ in 0..TDOA_EVENTS {
            let position = [
                TDOA_ORIGIN.0 + self.gen.uniform(-0.1, 0.1),
                TDOA_ORIGIN.1 + self.gen.uniform(-0.1, 0.1),
            ];
            let measurements = (0..pairs).map(|_| self.gen.uniform(-1e-6, 1e-6)).collect();
            self.log_tdoa(TdoaParams::from_position(&position, measurements))?;
            summary.tdoa_triangulation += 1;
        }

        self.log_status().await?;
        summary.system_status += 1;

        info!(
            "Comprehensive sample data generated in {} ({} records)",
            self.writer.dir().display(),
            summary.total()
        );
        info!("Data includes: DoA, Spectrum, Passive Radar, Beamforming, TDOA, System Status");
        Ok(summary)
    }
}
