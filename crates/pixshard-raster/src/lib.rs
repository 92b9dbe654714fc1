//! Pixel mapping between byte streams and square grayscale images.
//!
//! This crate provides:
//! - [`to_image`] / [`from_image`] — the deterministic row-major mapping.
//! - [`side_for`] — grid sizing, `ceil(sqrt(len))`.
//! - [`load`] / [`save_png`] — lossless image file I/O.
//!
//! One byte is stored per pixel as its luma value. The mapping assumes a
//! pixel-exact readback: lossy formats, resizing or color management will
//! corrupt the stream.

mod error;
mod grid;
mod io;

pub use error::RasterError;
pub use grid::{Grid, PAD_LUMA, from_image, side_for, to_image};
pub use io::{load, save_png};
