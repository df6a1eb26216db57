//! Error handling for Chanmix
//!
//! Every fallible operation returns `ChanmixError`. Errors are pure values:
//! nothing in the engine retries, and no failed call leaves a session or an
//! output buffer half-written.

use thiserror::Error;

use crate::channel::ChannelRole;
use crate::engine::SampleFormat;

/// Result type alias for Chanmix operations
pub type Result<T> = std::result::Result<T, ChanmixError>;

/// Main error type for Chanmix operations
#[derive(Error, Debug)]
pub enum ChanmixError {
    // Layout Errors
    #[error("Invalid layout: {reason}")]
    InvalidLayout { reason: String },

    #[error("No mapping for output channel {position} ({role})")]
    UnsupportedMapping { role: ChannelRole, position: usize },

    // Buffer Errors
    #[error("Buffer size mismatch: {reason}")]
    BufferSizeMismatch { reason: String },

    #[error("Sample format mismatch: session mixes {expected}, buffers are {actual}")]
    FormatMismatch {
        expected: SampleFormat,
        actual: SampleFormat,
    },

    #[error("Unsupported audio format: {details}")]
    UnsupportedFormat { details: String },

    // Configuration Errors
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ChanmixError {
    /// Shorthand for an `InvalidLayout` error
    pub(crate) fn invalid_layout(reason: impl Into<String>) -> Self {
        ChanmixError::InvalidLayout {
            reason: reason.into(),
        }
    }

    /// Shorthand for a `BufferSizeMismatch` error
    pub(crate) fn buffer_size(reason: impl Into<String>) -> Self {
        ChanmixError::BufferSizeMismatch {
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ChanmixError::InvalidLayout { .. } => "INVALID_LAYOUT",
            ChanmixError::UnsupportedMapping { .. } => "UNSUPPORTED_MAPPING",
            ChanmixError::BufferSizeMismatch { .. } => "BUFFER_SIZE_MISMATCH",
            ChanmixError::FormatMismatch { .. } => "FORMAT_MISMATCH",
            ChanmixError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            ChanmixError::Config { .. } => "CONFIG_ERROR",
            ChanmixError::Io(_) => "IO_ERROR",
            ChanmixError::Wav(_) => "WAV_ERROR",
            ChanmixError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if this error was caused by the caller breaking an API contract
    ///
    /// Contract errors are deterministic: repeating the same call with the
    /// same arguments fails the same way.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ChanmixError::InvalidLayout { .. }
                | ChanmixError::UnsupportedMapping { .. }
                | ChanmixError::BufferSizeMismatch { .. }
                | ChanmixError::FormatMismatch { .. }
        )
    }
}
