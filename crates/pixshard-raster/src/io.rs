//! Reading and writing grids as image files.

use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::RasterError;
use crate::grid::Grid;

/// Decode an image file of any supported format.
pub fn load(path: &Path) -> Result<DynamicImage, RasterError> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "loaded image"
    );
    Ok(image)
}

/// Write `grid` to `path` as an 8-bit grayscale PNG.
///
/// The PNG is written to a temporary file next to `path` and renamed into
/// place, so a failure leaves no partial file behind.
pub fn save_png(path: &Path, grid: &Grid) -> Result<(), RasterError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        PngEncoder::new(&mut writer).write_image(
            grid.as_raw(),
            grid.width(),
            grid.height(),
            ExtendedColorType::L8,
        )?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| RasterError::Io(e.error))?;

    debug!(path = %path.display(), side = grid.width(), "saved png");
    Ok(())
}
