// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Emitting engine - real-or-synthetic decision, record assembly, append

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::events::{
    build_beamforming, build_doa, build_radar, build_spectrum, build_status, build_tdoa,
    doa_uses_hardware, spectrum_uses_hardware, BeamformingParams, BeamformingRecord, DataSource,
    DoaParams, DoaRecord, EventKind, RadarParams, RadarRecord, SpectrumParams, SpectrumRecord,
    StatusRecord, TdoaParams, TdoaRecord,
};
use crate::export::LogWriter;
use crate::hardware::{DeviceInventory, ProcessMonitor, ReceiverHardware, RtlSdr, SysinfoMonitor};
use crate::synthetic::SyntheticGenerator;

/// Receiver index used for single-channel captures
const CAPTURE_DEVICE: u32 = 0;

/// Turns inputs into appended log lines
///
/// The device inventory is probed once in the constructor and never
/// changes for the life of the engine. Calls run one at a time: each may
/// block on a bounded hardware capture before its record is written.
pub struct Engine {
    pub(super) config: Config,
    pub(super) inventory: DeviceInventory,
    pub(super) hardware: Box<dyn ReceiverHardware>,
    pub(super) processes: Box<dyn ProcessMonitor>,
    pub(super) writer: LogWriter,
    pub(super) gen: SyntheticGenerator,
}

impl Engine {
    /// Engine backed by the rtl-sdr tools and live process table
    pub async fn new(config: Config) -> Result<Self> {
        let hardware = Box::new(RtlSdr::new(config.hardware.clone()));
        let processes = Box::new(SysinfoMonitor::new(config.hardware.process_patterns.clone()));
        Self::with_backends(config, hardware, processes, SyntheticGenerator::new()).await
    }

    /// Engine over arbitrary backends; probes the hardware once
    pub async fn with_backends(
        config: Config,
        hardware: Box<dyn ReceiverHardware>,
        processes: Box<dyn ProcessMonitor>,
        gen: SyntheticGenerator,
    ) -> Result<Self> {
        let writer = LogWriter::new(config.log_dir.clone())?;
        let inventory = hardware.probe().await;

        Ok(Self {
            config,
            inventory,
            hardware,
            processes,
            writer,
            gen,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn inventory(&self) -> DeviceInventory {
        self.inventory
    }

    pub fn writer(&self) -> &LogWriter {
        &self.writer
    }

    /// Log one bearing estimate
    pub async fn log_doa(&mut self, mut params: DoaParams) -> Result<DoaRecord> {
        params.use_real_data &= self.config.hardware.use_real_data;

        let sample = if doa_uses_hardware(params.use_real_data, self.inventory, self.config.hardware.doa_min_devices) {
            Some(
                self.hardware
                    .acquire(CAPTURE_DEVICE, params.frequency_hz, self.config.hardware.capture_duration())
                    .await,
            )
        } else {
            None
        };

        let record = build_doa(params, &self.config, self.inventory, sample.as_ref(), &mut self.gen);
        announce_source(EventKind::DirectionFinding, record.data_source);

        self.writer.append(EventKind::DirectionFinding, &record)?;
        Ok(record)
    }

    /// Log one spectrum sweep
    pub async fn log_spectrum(&mut self, mut params: SpectrumParams) -> Result<SpectrumRecord> {
        params.use_real_data &= self.config.hardware.use_real_data;

        let sample = if spectrum_uses_hardware(params.use_real_data, self.inventory) && !params.frequencies.is_empty() {
            Some(
                self.hardware
                    .acquire(CAPTURE_DEVICE, params.center_frequency(), self.config.hardware.capture_duration())
                    .await,
            )
        } else {
            None
        };

        let record = build_spectrum(params, &self.config, self.inventory, sample.as_ref(), &mut self.gen)?;
        announce_source(EventKind::SpectrumAnalysis, record.data_source);

        self.writer.append(EventKind::SpectrumAnalysis, &record)?;
        Ok(record)
    }

    /// Log one passive radar detection
    pub fn log_radar(&mut self, params: RadarParams) -> Result<RadarRecord> {
        let record = build_radar(params, &self.config, &mut self.gen);
        self.writer.append(EventKind::PassiveRadarDetection, &record)?;
        Ok(record)
    }

    /// Log one beam pattern
    pub fn log_beamforming(&mut self, params: BeamformingParams) -> Result<BeamformingRecord> {
        let record = build_beamforming(params, &self.config);
        self.writer.append(EventKind::Beamforming, &record)?;
        Ok(record)
    }

    /// Log one TDOA fix
    pub fn log_tdoa(&mut self, params: TdoaParams) -> Result<TdoaRecord> {
        let record = build_tdoa(params, &self.config, &mut self.gen);
        self.writer.append(EventKind::TdoaTriangulation, &record)?;
        Ok(record)
    }

    /// Log the health of the KrakenSDR DSP processes
    pub async fn log_status(&mut self) -> Result<StatusRecord> {
        let snapshot = self.processes.snapshot().await;
        let record = build_status(snapshot.as_ref(), &self.config, None);
        if !record.is_healthy() {
            info!("KrakenSDR processes not running");
        }

        self.writer.append(EventKind::SystemStatus, &record)?;
        Ok(record)
    }
}

fn announce_source(kind: EventKind, source: DataSource) {
    match source {
        DataSource::RealRtlSdrHardware => info!("{}: using real RTL-SDR data", kind),
        DataSource::SimulatedSampleData => info!("{}: using simulated data", kind),
    }
}
