// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Append-only NDJSON log files, one per event kind and local day

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Result;
use crate::events::EventKind;

/// Writes records as single JSON lines into `kraken-<kind>-<YYYYMMDD>.json`
///
/// Each append opens the file, writes the whole line with one call and
/// closes it again, so a new day's file starts on its own. No flush to disk
/// is forced and nothing coordinates multiple writer processes.
pub struct LogWriter {
    dir: PathBuf,
}

impl LogWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        info!("KrakenSDR logs will be written to: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File receiving `kind` records on `date`
    pub fn path_for(&self, kind: EventKind, date: NaiveDate) -> PathBuf {
        self.dir.join(format!(
            "kraken-{}-{}.json",
            kind.file_tag(),
            date.format("%Y%m%d")
        ))
    }

    /// Append to today's file (local calendar date)
    pub fn append<T: Serialize>(&self, kind: EventKind, record: &T) -> Result<PathBuf> {
        self.append_dated(kind, record, Local::now().date_naive())
    }

    /// Append to the file for an explicit date
    pub fn append_dated<T: Serialize>(&self, kind: EventKind, record: &T, date: NaiveDate) -> Result<PathBuf> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let path = self.path_for(kind, date);
        // The directory may have been removed since start-up
        std::fs::create_dir_all(&self.dir)?;

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(line.as_bytes())?;

        debug!("Appended {} bytes to {:?}", line.len(), path);
        Ok(path)
    }
}
