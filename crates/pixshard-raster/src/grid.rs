//! Row-major mapping between a flat byte stream and a square luma grid.

use image::{DynamicImage, GrayImage, Rgba};
use tracing::debug;

use crate::error::RasterError;

/// A square grid of 8-bit grayscale cells, one byte per pixel.
pub type Grid = GrayImage;

/// Luma written to grid cells past the end of the byte stream.
pub const PAD_LUMA: u8 = 0;

/// Side of the smallest square grid holding `len` cells: `ceil(sqrt(len))`.
pub fn side_for(len: usize) -> usize {
    let root = len.isqrt();
    if root * root == len { root } else { root + 1 }
}

/// Lay `flat` out on a square grid, `x` fastest and `y` slowest.
///
/// Byte `i` lands on pixel `(i % side, i / side)`. Cells after the last
/// byte are set to [`PAD_LUMA`].
pub fn to_image(flat: &[u8]) -> Result<Grid, RasterError> {
    let side = side_for(flat.len());
    let dim = u32::try_from(side).map_err(|_| RasterError::TooLarge { len: flat.len() })?;

    let mut cells = vec![PAD_LUMA; side * side];
    cells[..flat.len()].copy_from_slice(flat);

    debug!(
        len = flat.len(),
        side,
        padding = side * side - flat.len(),
        "mapped bytes to grid"
    );

    GrayImage::from_raw(dim, dim, cells).ok_or(RasterError::TooLarge { len: flat.len() })
}

/// Read every pixel of a square image back in row-major order.
///
/// 8-bit grayscale images are read as-is. Any other color type is reduced
/// to luma with the Rec. 601 weights over alpha-premultiplied channels, the
/// same conversion the reference encoder applies. The result is always
/// `side * side` bytes, trailing padding included.
pub fn from_image(image: &DynamicImage) -> Result<Vec<u8>, RasterError> {
    let (width, height) = (image.width(), image.height());
    if width != height {
        return Err(RasterError::NotSquare { width, height });
    }
    match image {
        DynamicImage::ImageLuma8(gray) => Ok(gray.as_raw().clone()),
        other => Ok(other.to_rgba8().pixels().map(|&pixel| rec601_luma(pixel)).collect()),
    }
}

/// Rec. 601 luma of one pixel, computed on 16-bit premultiplied channels.
fn rec601_luma(Rgba([r, g, b, a]): Rgba<u8>) -> u8 {
    let alpha = u32::from(a) * 0x101;
    let channel = |c: u8| u32::from(c) * 0x101 * alpha / 0xFFFF;
    // The weights sum to 65536, so the result fits in 8 bits.
    let y = (19595 * channel(r) + 38470 * channel(g) + 7471 * channel(b) + (1 << 15)) >> 24;
    y as u8
}
