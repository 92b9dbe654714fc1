//! Shared helpers for engine tests.

use image::{DynamicImage, Luma};
use pixshard_raster::Grid;
use pixshard_types::CodecConfig;

use crate::layout::ShardLayout;
use crate::pipeline::Pipeline;

/// Pipeline with `k` data and `m` parity shards.
pub(super) fn pipeline(k: usize, m: usize) -> Pipeline {
    Pipeline::new(CodecConfig::new(k, m)).unwrap()
}

/// Deterministic, non-repeating test data.
pub(super) fn test_data(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state: u32 = 0xDEAD_BEEF;
    for _ in 0..size {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        data.push((state >> 16) as u8);
    }
    data
}

/// Wrap a grid the way an image loader would hand it back.
pub(super) fn dynamic(grid: Grid) -> DynamicImage {
    DynamicImage::ImageLuma8(grid)
}

/// Overwrite every pixel of shard `index` with `value`.
pub(super) fn fill_shard(grid: &mut Grid, layout: &ShardLayout, index: usize, value: u8) {
    let side = grid.width() as usize;
    let start = index * layout.shard_size;
    for i in start..start + layout.shard_size {
        grid.put_pixel((i % side) as u32, (i / side) as u32, Luma([value]));
    }
}
