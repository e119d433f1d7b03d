//! Error types for cabin telemetry parsing.

use thiserror::Error;

/// Errors that can occur when parsing telemetry packets from the cabin
/// sensor link.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Not enough bytes in the buffer to parse a complete packet.
    #[error("Insufficient data: need {needed} bytes, got {got}")]
    InsufficientData {
        needed: usize,
        got: usize,
    },

    /// The buffer carries more bytes than one packet.
    #[error("Trailing bytes: expected exactly {expected} bytes, got {got}")]
    TrailingBytes {
        expected: usize,
        got: usize,
    },

    /// Generic byte-level parse error.
    #[error("Parse error at offset {offset}: {message}")]
    ByteError {
        offset: usize,
        message: String,
    },
}
