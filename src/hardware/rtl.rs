// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! RTL-SDR receivers driven through the rtl-sdr command-line tools

use std::process::Stdio;
use std::time::Duration;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use super::{parse_device_count, parse_power_sweep, DeviceInventory, MeasurementSample, ReceiverHardware};
use crate::config::HardwareConfig;
use crate::error::{KrakenError, Result};

/// Extra time granted to the sweep tool beyond the capture itself
const SWEEP_GRACE: Duration = Duration::from_secs(2);

/// RTL-SDR receiver array (KrakenSDR exposes its five tuners this way)
pub struct RtlSdr {
    config: HardwareConfig,
}

impl RtlSdr {
    pub fn new(config: HardwareConfig) -> Self {
        Self { config }
    }

    async fn try_probe(&self) -> Result<u32> {
        let command = &self.config.probe_command;
        let mut child = Command::new(command)
            .args(&self.config.probe_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| KrakenError::CommandFailed {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        // rtl_test reports on stderr and may keep sampling afterwards, so
        // watch both streams and stop at the first device line.
        let stderr = child.stderr.take();
        let stdout = child.stdout.take();
        let scan = async {
            let mut from_stderr = Box::pin(scan_for_count(stderr));
            let mut from_stdout = Box::pin(scan_for_count(stdout));
            let (mut stderr_done, mut stdout_done) = (false, false);
            loop {
                tokio::select! {
                    found = &mut from_stderr, if !stderr_done => match found {
                        Some(count) => return Some(count),
                        None => stderr_done = true,
                    },
                    found = &mut from_stdout, if !stdout_done => match found {
                        Some(count) => return Some(count),
                        None => stdout_done = true,
                    },
                    else => return None,
                }
            }
        };

        let limit = self.config.probe_timeout();
        let found = timeout(limit, scan).await.map_err(|_| KrakenError::CommandTimeout {
            command: command.clone(),
            timeout_secs: limit.as_secs(),
        });

        let _ = child.start_kill();

        found?.ok_or_else(|| KrakenError::HardwareUnavailable("no device line in probe output".into()))
    }

    async fn try_acquire(
        &self,
        device_index: u32,
        center_frequency_hz: f64,
        duration: Duration,
    ) -> Result<MeasurementSample> {
        let command = &self.config.sweep_command;
        let start = center_frequency_hz - self.config.sweep_half_span_hz;
        let end = center_frequency_hz + self.config.sweep_half_span_hz;
        let range = format!(
            "{:.0}:{:.0}:{:.0}",
            start, end, self.config.sweep_resolution_hz
        );

        let output = Command::new(command)
            .arg("-f")
            .arg(&range)
            .arg("-d")
            .arg(device_index.to_string())
            .arg("-i")
            .arg(duration.as_secs().max(1).to_string())
            .arg("-1")
            .arg("-")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let limit = duration + SWEEP_GRACE;
        let output = timeout(limit, output)
            .await
            .map_err(|_| KrakenError::CommandTimeout {
                command: command.clone(),
                timeout_secs: limit.as_secs(),
            })?
            .map_err(|e| KrakenError::CommandFailed {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(KrakenError::CommandFailed {
                command: command.clone(),
                reason: format!("exit status {}", output.status),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let readings = parse_power_sweep(&text)
            .ok_or_else(|| KrakenError::Parse(format!("no power readings from {}", command)))?;

        MeasurementSample::from_readings(device_index, readings)
            .ok_or_else(|| KrakenError::Parse("empty sweep".into()))
    }
}

async fn scan_for_count<R: AsyncRead + Unpin>(stream: Option<R>) -> Option<u32> {
    let mut lines = BufReader::new(stream?).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if let Some(count) = parse_device_count(&line) {
            return Some(count);
        }
    }
    None
}

#[async_trait]
impl ReceiverHardware for RtlSdr {
    async fn probe(&self) -> DeviceInventory {
        match self.try_probe().await {
            Ok(count) => {
                info!("Found {} RTL-SDR device(s)", count);
                DeviceInventory::new(count)
            }
            Err(e) => {
                info!("No RTL-SDR devices found, using simulated data");
                debug!("Probe failed: {}", e);
                DeviceInventory::none()
            }
        }
    }

    async fn acquire(
        &self,
        device_index: u32,
        center_frequency_hz: f64,
        duration: Duration,
    ) -> MeasurementSample {
        match self.try_acquire(device_index, center_frequency_hz, duration).await {
            Ok(sample) => {
                debug!(
                    "Captured {} bins on device {} at {:.3} MHz",
                    sample.spectrum.len(),
                    device_index,
                    center_frequency_hz / 1e6
                );
                sample
            }
            Err(e) => {
                warn!("Capture on device {} unavailable: {}", device_index, e);
                MeasurementSample::unavailable(device_index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(probe: &str, sweep: &str) -> HardwareConfig {
        HardwareConfig {
            probe_command: probe.to_string(),
            probe_args: vec![],
            sweep_command: sweep.to_string(),
            ..HardwareConfig::default()
        }
    }

    #[tokio::test]
    async fn test_missing_probe_tool_means_no_devices() {
        let rtl = RtlSdr::new(config_with("kraken-test-no-such-tool", "kraken-test-no-such-tool"));
        assert_eq!(rtl.probe().await, DeviceInventory::none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_device_line_on_stdout_while_stderr_stays_open() {
        let config = HardwareConfig {
            probe_command: "sh".to_string(),
            probe_args: vec!["-c".to_string(), "echo 'Found 5 device(s):'; sleep 30".to_string()],
            probe_timeout_secs: 5,
            ..HardwareConfig::default()
        };
        let started = std::time::Instant::now();
        let inventory = RtlSdr::new(config).probe().await;

        assert_eq!(inventory, DeviceInventory::new(5));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_device_line_on_stderr() {
        let config = HardwareConfig {
            probe_command: "sh".to_string(),
            probe_args: vec!["-c".to_string(), "echo 'Found 2 device(s):' >&2; sleep 30".to_string()],
            probe_timeout_secs: 5,
            ..HardwareConfig::default()
        };
        assert_eq!(RtlSdr::new(config).probe().await, DeviceInventory::new(2));
    }

    #[tokio::test]
    async fn test_missing_sweep_tool_is_unavailable() {
        let rtl = RtlSdr::new(config_with("kraken-test-no-such-tool", "kraken-test-no-such-tool"));
        let sample = rtl.acquire(3, 98.5e6, Duration::from_secs(1)).await;
        assert!(!sample.is_real());
        assert_eq!(sample.device_index, 3);
    }
}
