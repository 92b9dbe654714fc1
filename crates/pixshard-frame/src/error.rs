//! Error types for framing operations.

/// Errors that can occur while reading a framed buffer.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The buffer is too short to hold the length prefix.
    #[error("truncated frame: need {needed} bytes for the length prefix, got {got}")]
    Truncated {
        /// Bytes required for the prefix.
        needed: usize,
        /// Bytes actually available.
        got: usize,
    },

    /// The length prefix claims more bytes than the buffer holds.
    #[error("declared length {declared} exceeds the {available} bytes available")]
    DeclaredLengthExceeded {
        /// Payload length written in the prefix.
        declared: u32,
        /// Bytes following the prefix.
        available: usize,
    },
}
