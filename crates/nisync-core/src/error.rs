//! Centralized error types for nisync.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::pipeline::SyncStage;

/// Errors raised while loading configuration.
///
/// These are detected before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be defined")]
    Missing(&'static str),

    #[error("Invalid page size {requested}: must be between 1 and {max}")]
    InvalidPageSize { requested: usize, max: usize },

    #[error("Invalid {0}: not usable in an HTTP header")]
    InvalidCredential(&'static str),
}

/// Main error type for sync operations.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unexpected status for {operation}: expected {}, got {actual}", format_expected(.expected))]
    UnexpectedStatus {
        operation: &'static str,
        expected: &'static [u16],
        actual: u16,
    },

    #[error("Missing '{header}' header in {operation} response")]
    MissingHeader {
        operation: &'static str,
        header: &'static str,
    },

    #[error("Ticket {key} has no {field}")]
    MissingField { key: String, field: &'static str },

    #[error("Malformed {operation} response: {detail}")]
    MalformedResponse {
        operation: &'static str,
        detail: String,
    },

    #[error("Transport error during {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    /// Wrap a transport-level failure with the operation that issued it.
    pub fn transport(operation: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { operation, source }
    }
}

/// Check an HTTP status against the set a given operation accepts.
pub fn expect_status(operation: &'static str, actual: u16, expected: &'static [u16]) -> SyncResult<()> {
    if expected.contains(&actual) {
        Ok(())
    } else {
        Err(SyncError::UnexpectedStatus { operation, expected, actual })
    }
}

/// Decode a JSON response body, reporting bad bodies as malformed responses.
pub fn decode_json<T: DeserializeOwned>(operation: &'static str, body: &[u8]) -> SyncResult<T> {
    serde_json::from_slice(body).map_err(|e| SyncError::MalformedResponse {
        operation,
        detail: e.to_string(),
    })
}

fn format_expected(expected: &[u16]) -> String {
    expected
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// A fatal error annotated with the pipeline stage it happened in.
#[derive(Error, Debug)]
#[error("Sync aborted while {stage}: {source}")]
pub struct PipelineError {
    pub stage: SyncStage,
    #[source]
    pub source: SyncError,
}
