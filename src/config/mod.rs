// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Configuration module

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::error::{KrakenError, Result};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory receiving the daily NDJSON files
    pub log_dir: PathBuf,

    /// Log level when neither `--debug`/`--trace` nor `RUST_LOG` is given
    pub log_level: String,

    /// Fixed sensor metadata stamped on every record
    pub sensor: SensorConfig,

    /// External tool configuration
    pub hardware: HardwareConfig,

    /// Passive radar binning
    pub radar: RadarConfig,

    /// Batch driver configuration
    pub batch: BatchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./kraken-logs"),
            log_level: "info".to_string(),
            sensor: SensorConfig::default(),
            hardware: HardwareConfig::default(),
            radar: RadarConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| KrakenError::Config(format!("{}: {}", path.display(), e)))?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| KrakenError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Level directive for the log subscriber; `--trace` beats `--debug`
    /// beats the configured level
    pub fn log_directive(&self, debug: bool, trace: bool) -> &str {
        if trace {
            "trace"
        } else if debug {
            "debug"
        } else {
            &self.log_level
        }
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("kraken-logger"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

/// Sensor metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Station id prefix, numbered per DOA event in a batch
    pub station_prefix: String,

    /// Coherent receiver channels
    pub channels: u32,

    /// IQ sample rate in Hz
    pub sample_rate_hz: u64,

    /// VFO bandwidth in Hz
    pub vfo_bandwidth_hz: u64,

    /// Default antenna array arrangement (UCA/ULA/Custom)
    pub array_arrangement: String,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            station_prefix: "KrakenSDR".to_string(),
            channels: 5,
            sample_rate_hz: 2_400_000,
            vfo_bandwidth_hz: 25_000,
            array_arrangement: "UCA".to_string(),
        }
    }
}

/// External tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// Attempt real captures when devices are present
    pub use_real_data: bool,

    /// Device enumeration tool
    pub probe_command: String,
    pub probe_args: Vec<String>,
    pub probe_timeout_secs: u64,

    /// Power sweep tool
    pub sweep_command: String,
    pub sweep_half_span_hz: f64,
    pub sweep_resolution_hz: f64,

    /// Capture length for one acquisition
    pub capture_duration_secs: u64,

    /// Devices required before direction finding uses real captures
    pub doa_min_devices: u32,

    /// Command-line fragments identifying the KrakenSDR processes
    pub process_patterns: ProcessPatterns,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            use_real_data: true,
            probe_command: "rtl_test".to_string(),
            probe_args: vec!["-t".to_string()],
            probe_timeout_secs: 5,
            sweep_command: "rtl_power".to_string(),
            sweep_half_span_hz: 1_000_000.0,
            sweep_resolution_hz: 10_000.0,
            capture_duration_secs: 1,
            doa_min_devices: 5,
            process_patterns: ProcessPatterns::default(),
        }
    }
}

impl HardwareConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn capture_duration(&self) -> Duration {
        Duration::from_secs(self.capture_duration_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessPatterns {
    pub synthetic_generator: String,
    pub delay_sync: String,
    pub rebuffer: String,
}

impl Default for ProcessPatterns {
    fn default() -> Self {
        Self {
            synthetic_generator: "test_data_synthesizer".to_string(),
            delay_sync: "delay_sync.py".to_string(),
            rebuffer: "rebuffer.out".to_string(),
        }
    }
}

/// Passive radar binning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub range_resolution_m: f64,
    pub velocity_resolution_ms: f64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            range_resolution_m: 150.0,
            velocity_resolution_ms: 2.0,
        }
    }
}

/// Batch driver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Pause between batches in continuous mode
    pub interval_secs: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}
