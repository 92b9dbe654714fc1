//! Error types for the pixel mapper and image I/O.

/// Errors that can occur while mapping bytes to pixels or touching image files.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The byte stream needs a grid wider than an image dimension allows.
    #[error("{len} bytes do not fit in a square image")]
    TooLarge {
        /// Length of the byte stream.
        len: usize,
    },

    /// The image is not square, so it was not produced by this mapper.
    #[error("image is {width}x{height}, expected a square grid")]
    NotSquare {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// Decoding or encoding the image container failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Reading or writing the image file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
