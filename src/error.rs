//! Error types for hasprobe operations.
//!
//! This module defines [`HasprobeError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Probes report failures with `anyhow::Error`; the store turns them into
//!   [`HasprobeError::ProbeFailed`] for targeted lookups
//! - Querying an unknown capability is not an error (it yields `None`)
//! - Use `anyhow::Error` (via `HasprobeError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for hasprobe operations.
#[derive(Debug, Error)]
pub enum HasprobeError {
    /// A probe failed while computing its value.
    #[error("Probe '{name}' failed: {message}")]
    ProbeFailed { name: String, message: String },

    /// A probe (directly or indirectly) queried itself while executing.
    #[error("Circular probe evaluation detected for '{name}'")]
    CircularProbe { name: String },

    /// The host has no presentational document, so there is no scratch element.
    #[error("Scratch element is unavailable in this host environment")]
    ScratchUnavailable,

    /// The scratch element is already borrowed by an outer probe.
    #[error("Scratch element is in use by another probe")]
    ScratchBusy,

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for hasprobe operations.
pub type Result<T> = std::result::Result<T, HasprobeError>;
