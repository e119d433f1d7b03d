//! Error types for the drowsewatch system.
//!
//! Errors are handled at the component boundary where they occur and never
//! unwind past a worker loop: malformed samples are discarded, sink failures
//! are logged, and only explicit shutdown or device loss ends a worker. The
//! types here give those boundaries a shared vocabulary.

use thiserror::Error;

use crate::types::Channel;

/// A specialized `Result` type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error type for the drowsewatch system.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// Validation error for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Description of what validation failed
        message: String,
    },

    /// A sensor channel's sample source closed or was never available
    #[error("Channel unavailable: {channel}: {message}")]
    ChannelUnavailable {
        /// The affected channel
        channel: Channel,
        /// Description of the loss
        message: String,
    },

    /// Operation timed out
    #[error("Operation timed out after {duration_ms}ms: {operation}")]
    Timeout {
        /// The operation that timed out
        operation: String,
        /// Duration in milliseconds before timeout
        duration_ms: u64,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl CoreError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new channel-unavailable error.
    #[must_use]
    pub fn channel_unavailable(channel: Channel, message: impl Into<String>) -> Self {
        Self::ChannelUnavailable {
            channel,
            message: message.into(),
        }
    }

    /// Creates a new timeout error.
    #[must_use]
    pub fn timeout(operation: impl Into<String>, duration_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration_ms,
        }
    }

    /// Creates a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if the operation may be retried.
    ///
    /// Timeouts and channel loss are transient (a device may come back on
    /// the next read); configuration and validation errors are not.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::ChannelUnavailable { .. } => true,
            Self::Configuration { .. } | Self::Validation { .. } | Self::Internal { .. } => false,
        }
    }
}
