// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/kraken-logger

//! Error types

use thiserror::Error;

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, KrakenError>;

/// Errors raised by the logger
///
/// The hardware-facing variants never leave the probe/acquirer boundary;
/// they are logged and replaced by synthetic fallback there.
#[derive(Debug, Error)]
pub enum KrakenError {
    /// No receiver could be reached
    #[error("receiver hardware unavailable: {0}")]
    HardwareUnavailable(String),

    /// External tool exited with an error or could not be spawned
    #[error("command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// External tool did not finish in time
    #[error("command '{command}' timed out after {timeout_secs}s")]
    CommandTimeout { command: String, timeout_secs: u64 },

    /// External tool output could not be understood
    #[error("unparseable tool output: {0}")]
    Parse(String),

    /// Caller handed a builder inconsistent inputs
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl KrakenError {
    /// True for failures that trigger synthetic fallback rather than abort
    pub fn is_hardware(&self) -> bool {
        matches!(
            self,
            KrakenError::HardwareUnavailable(_)
                | KrakenError::CommandFailed { .. }
                | KrakenError::CommandTimeout { .. }
                | KrakenError::Parse(_)
        )
    }
}
