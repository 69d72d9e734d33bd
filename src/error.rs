//! Error types for jswitch operations.
//!
//! This module defines [`JswitchError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Per-candidate discovery failures are recoverable and never reach this
//!   type: the scanner drops the candidate and keeps walking.
//! - Store and switch failures always reach the user. Nothing is retried
//!   automatically; recovery is re-running the operation.
//! - Use `anyhow::Error` (via `JswitchError::Other`) for unexpected errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for jswitch operations.
#[derive(Debug, Error)]
pub enum JswitchError {
    /// Persisted inventory exists but could not be parsed.
    #[error("Failed to parse inventory at {path}: {message}")]
    ConfigLoad { path: PathBuf, message: String },

    /// Writing the inventory back to disk failed.
    #[error("Failed to write inventory to {path}: {message}")]
    ConfigSave { path: PathBuf, message: String },

    /// The OS-level switch (symlink or registry mutation) failed.
    ///
    /// The intended version has already been persisted at this point;
    /// re-running `use` retries only the switch.
    #[error("Failed to switch environment: {message}")]
    Switch { message: String },

    /// Release lookup or archive download failed.
    #[error("Download failed: {message}")]
    Fetch { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for jswitch operations.
pub type Result<T> = std::result::Result<T, JswitchError>;
