// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Synthetic data for sessions without usable hardware
//!
//! Two kinds of randomness live here: the signal models in [`spectrum`]
//! (shape of a DOA response, sweep power distribution) and plain filler for
//! fields nobody measured (RSSI, latency, bistatic geometry, ...). Both draw
//! from one seedable [`StdRng`] so a seeded generator replays exactly.

mod catalog;
pub mod spectrum;

pub use catalog::{illuminator_catalog, Illuminator};
pub use spectrum::{doa_spectrum, linspace, power_levels, DOA_BINS};

use rand::prelude::*;

/// Probability that a synthetic VFO channel reports a signal
pub const VFO_DETECTION_PROBABILITY: f64 = 0.3;

/// Array arrangements a KrakenSDR can be set up in
pub const ARRAY_ARRANGEMENTS: [&str; 3] = ["UCA", "ULA", "Custom"];

/// FM broadcast band, Hz
pub const FM_BAND_HZ: (f64, f64) = (88e6, 108e6);

/// Seedable source of stand-in values
pub struct SyntheticGenerator {
    rng: StdRng,
}

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator for tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    // Signal models

    pub fn doa_spectrum(&mut self, bearing: f64) -> Vec<f64> {
        spectrum::doa_spectrum(&mut self.rng, bearing)
    }

    pub fn power_levels(&mut self, points: usize, floor_dbm: f64, span_db: f64) -> Vec<f64> {
        spectrum::power_levels(&mut self.rng, points, floor_dbm, span_db)
    }

    pub fn signal_detected(&mut self) -> bool {
        self.rng.gen_bool(VFO_DETECTION_PROBABILITY)
    }

    // Filler

    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..high)
    }

    pub fn rssi_db(&mut self) -> f64 {
        self.uniform(-80.0, -20.0)
    }

    pub fn latency_ms(&mut self) -> f64 {
        self.uniform(50.0, 200.0)
    }

    pub fn snr_db(&mut self) -> f64 {
        self.uniform(10.0, 30.0)
    }

    pub fn bistatic_baseline_m(&mut self) -> f64 {
        self.uniform(1000.0, 10000.0)
    }

    pub fn bistatic_angle_deg(&mut self) -> f64 {
        self.uniform(30.0, 150.0)
    }

    pub fn location_accuracy_m(&mut self) -> f64 {
        self.uniform(10.0, 100.0)
    }

    pub fn geometric_dilution(&mut self) -> f64 {
        self.uniform(1.0, 3.0)
    }

    pub fn illuminator(&mut self) -> Illuminator {
        let catalog = illuminator_catalog();
        let pick = self.rng.gen_range(0..catalog.len());
        catalog[pick].clone()
    }

    pub fn array_arrangement(&mut self) -> &'static str {
        ARRAY_ARRANGEMENTS[self.rng.gen_range(0..ARRAY_ARRANGEMENTS.len())]
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}
