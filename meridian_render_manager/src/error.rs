//! Error types for the Meridian render manager
//!
//! This module defines the error types used throughout the subsystem,
//! including backend submission, scene input, and initialization.

use std::fmt;

/// Result type for render manager operations
pub type Result<T> = std::result::Result<T, Error>;

/// Render manager errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (draw submission, buffer upload)
    BackendError(String),

    /// Malformed scene input (the renderer degrades rather than crashes,
    /// so this is reserved for contract violations that cannot degrade)
    InvalidScene(String),

    /// Initialization failed (manager construction, logger setup)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidScene(msg) => write!(f, "Invalid scene input: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
