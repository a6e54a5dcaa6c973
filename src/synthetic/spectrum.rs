// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Stochastic signal models

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Bins in a full-circle DOA spectrum
pub const DOA_BINS: usize = 360;

/// Angular half-width of the modeled main lobe, degrees
const LOBE_HALF_WIDTH: i64 = 10;

/// 360° DOA spectrum with a main lobe at `bearing`
///
/// The bearing bin is seeded at 1.0, every bin gets N(0, 0.1) noise, and
/// bins closer than 10° (wrapping) get `0.3 * exp(-d^2 / 20)` on top.
pub fn doa_spectrum<R: Rng + ?Sized>(rng: &mut R, bearing: f64) -> Vec<f64> {
    let noise = Normal::new(0.0, 0.1).expect("constant std dev is valid");
    let main_idx = main_bin(bearing);

    let mut spectrum = vec![0.0; DOA_BINS];
    spectrum[main_idx] = 1.0;

    for (i, bin) in spectrum.iter_mut().enumerate() {
        *bin += noise.sample(rng);

        let d = angular_distance(i, main_idx);
        if d < LOBE_HALF_WIDTH {
            *bin += 0.3 * (-((d * d) as f64) / 20.0).exp();
        }
    }

    spectrum
}

/// Bin index for a bearing in degrees, wrapped into 0..360
pub fn main_bin(bearing: f64) -> usize {
    (bearing.floor() as i64).rem_euclid(DOA_BINS as i64) as usize
}

fn angular_distance(a: usize, b: usize) -> i64 {
    let d = (a as i64 - b as i64).abs();
    d.min(DOA_BINS as i64 - d)
}

/// Uniform power levels in `floor_dbm .. floor_dbm + span_db`
pub fn power_levels<R: Rng + ?Sized>(rng: &mut R, points: usize, floor_dbm: f64, span_db: f64) -> Vec<f64> {
    (0..points).map(|_| floor_dbm + span_db * rng.gen::<f64>()).collect()
}

/// `points` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => vec![],
        1 => vec![start],
        n => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_doa_spectrum_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for bearing in [0.0, 45.5, 359.9, 720.0 + 12.0, -30.0] {
            let spectrum = doa_spectrum(&mut rng, bearing);
            assert_eq!(spectrum.len(), DOA_BINS);

            // Main lobe sits well above the 0.1 noise floor
            let peak = spectrum[main_bin(bearing)];
            assert!(peak > 0.7, "peak {} at {}", peak, bearing);
        }
    }

    #[test]
    fn test_main_lobe_dominates_on_average() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut at_bearing = 0.0;
        let mut opposite = 0.0;
        for _ in 0..200 {
            let spectrum = doa_spectrum(&mut rng, 90.0);
            at_bearing += spectrum[90];
            opposite += spectrum[270];
        }
        assert!((at_bearing / 200.0 - 1.3_f64).abs() < 0.05);
        assert!((opposite / 200.0_f64).abs() < 0.05);
    }

    #[test]
    fn test_main_bin_wraps() {
        assert_eq!(main_bin(0.0), 0);
        assert_eq!(main_bin(359.7), 359);
        assert_eq!(main_bin(360.0), 0);
        assert_eq!(main_bin(-1.0), 359);
        assert_eq!(angular_distance(359, 1), 2);
    }

    #[test]
    fn test_linspace_endpoints() {
        let axis = linspace(88e6, 108e6, 1000);
        assert_eq!(axis.len(), 1000);
        assert_eq!(axis[0], 88e6);
        assert!((axis[999] - 108e6).abs() < 1e-3);
        assert!(linspace(1.0, 2.0, 0).is_empty());
    }

    #[test]
    fn test_power_levels_in_band() {
        let mut rng = StdRng::seed_from_u64(3);
        let levels = power_levels(&mut rng, 500, -80.0, 20.0);
        assert!(levels.iter().all(|&p| (-80.0..-60.0).contains(&p)));
    }
}
