// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Kraken Logger - KrakenSDR telemetry as newline-delimited JSON
//!
//! Converts KrakenSDR output into one JSON line per event, appended to
//! per-day files for a log shipper such as Filebeat:
//! - Direction finding (360° DOA spectra)
//! - Spectrum sweeps with VFO channel summaries
//! - Passive radar detections
//! - Beamforming patterns
//! - TDOA triangulation fixes
//! - DSP process health
//!
//! Real RTL-SDR captures are used when the receivers are present; every
//! other field, and every record on a machine without hardware, is filled
//! from a statistically plausible synthetic model.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Kraken Logger                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌───────────┐   ┌──────────┐  ┌────────┐ │
//! │  │ Hardware │ → │  Engine   │ → │  Events  │→ │ Export │ │
//! │  │ probe +  │   │ real/sim  │   │ 6 record │  │ NDJSON │ │
//! │  │ capture  │   │ decision  │   │ builders │  │ daily  │ │
//! │  └──────────┘   └───────────┘   └──────────┘  └────────┘ │
//! │                       ↑              ↑                   │
//! │                 ┌───────────┐  ┌───────────┐             │
//! │                 │ Scheduler │  │ Synthetic │             │
//! │                 │  batches  │  │ generator │             │
//! │                 └───────────┘  └───────────┘             │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod export;
pub mod hardware;
pub mod synthetic;

// Re-exports for convenience
pub use config::Config;
pub use core::{BatchSummary, Engine, Scheduler};
pub use error::{KrakenError, Result};
pub use events::{DataSource, EventKind};
pub use export::LogWriter;
pub use hardware::{DeviceInventory, MeasurementSample, ProcessMonitor, ReceiverHardware};
pub use synthetic::SyntheticGenerator;

/// Kraken Logger version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Kraken Logger name
pub const NAME: &str = "Kraken Logger";
