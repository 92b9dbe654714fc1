//! Error types for the engine.

/// Errors that can occur while encoding or decoding an image.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Framing error (truncated buffer or bad length prefix).
    #[error("frame error: {0}")]
    Frame(#[from] pixshard_frame::FrameError),

    /// Erasure coding error.
    #[error("erasure error: {0}")]
    Erasure(#[from] pixshard_erasure::ErasureError),

    /// Pixel mapping or image I/O error.
    #[error("raster error: {0}")]
    Raster(#[from] pixshard_raster::RasterError),

    /// The payload did not survive the JSON codec.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The payload length does not fit the 32-bit length prefix.
    #[error("payload of {len} bytes exceeds the {max} byte limit")]
    PayloadTooLarge {
        /// Payload length in bytes.
        len: usize,
        /// Largest encodable payload.
        max: usize,
    },

    /// The declared payload length implies a different grid size.
    #[error("declared length {declared} does not fit a {side}x{side} grid")]
    LayoutMismatch {
        /// Length read from the prefix.
        declared: u32,
        /// Side of the image being decoded.
        side: usize,
    },

    /// No shard layout compatible with the grid reproduced its own prefix.
    #[error("no shard layout matches a {side}x{side} grid")]
    NoLayout {
        /// Side of the image being decoded.
        side: usize,
    },
}
