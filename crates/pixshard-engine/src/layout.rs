//! Shard layout of the flattened pixel stream.
//!
//! ```text
//! [shard 0 .. shard D-1 ][shard D .. shard D+P-1][unused cells]
//!  ^ starts with the 4-byte length prefix          PAD_LUMA
//! ```
//!
//! Every shard is `ceil((L + 4) / D)` bytes for a payload of `L` bytes, and
//! the grid side is `ceil(sqrt((D + P) * shard_size))`.

use bytes::Bytes;
use pixshard_erasure::{ErasureError, ShardSet, shard_size};
use pixshard_frame::LENGTH_PREFIX_LEN;
use pixshard_raster::side_for;
use pixshard_types::CodecConfig;

/// Position of every shard inside the flattened pixel stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardLayout {
    /// Codec parameters the layout was derived from.
    pub config: CodecConfig,
    /// Size of each shard in bytes.
    pub shard_size: usize,
}

impl ShardLayout {
    /// Layout for a framed buffer of `framed_len` bytes.
    pub fn for_framed_len(config: CodecConfig, framed_len: usize) -> Self {
        Self {
            config,
            shard_size: shard_size(framed_len, config.data_shards),
        }
    }

    /// Layout for a payload whose length prefix reads `declared`.
    pub fn for_declared_len(config: CodecConfig, declared: u32) -> Self {
        Self::for_framed_len(config, (declared as usize).saturating_add(LENGTH_PREFIX_LEN))
    }

    /// Every layout whose shards fill a grid of exactly `side` cells per row.
    ///
    /// These are the shard sizes `s` with `(side - 1)^2 < (D + P) * s <= side^2`,
    /// yielded smallest first.
    pub fn candidates(config: CodecConfig, side: usize) -> impl Iterator<Item = Self> {
        let total = config.total_shards().max(1);
        let (lo, hi) = match side {
            0 => (1, 0),
            _ => ((side - 1) * (side - 1) / total + 1, side * side / total),
        };
        (lo..=hi).map(move |shard_size| Self { config, shard_size })
    }

    /// Bytes covered by all shards.
    pub fn total_len(&self) -> usize {
        self.config.total_shards() * self.shard_size
    }

    /// Bytes covered by the data shards.
    pub fn data_len(&self) -> usize {
        self.config.data_shards * self.shard_size
    }

    /// Side of the grid holding this layout.
    pub fn side(&self) -> usize {
        side_for(self.total_len())
    }

    /// Cut a flattened pixel stream into shards along this layout.
    pub fn split(&self, flat: Bytes) -> Result<ShardSet, ErasureError> {
        ShardSet::from_flat(self.config, self.shard_size, flat)
    }

    /// Whether a reconstructed data buffer is one this layout could have
    /// produced: its prefix must imply this shard size and the padding after
    /// the payload must be zero.
    pub(crate) fn accepts(&self, buffer: &[u8]) -> bool {
        let Some((prefix, _)) = buffer.split_first_chunk::<LENGTH_PREFIX_LEN>() else {
            return false;
        };
        let declared = u32::from_be_bytes(*prefix);
        if Self::for_declared_len(self.config, declared) != *self {
            return false;
        }
        let end = declared as usize + LENGTH_PREFIX_LEN;
        buffer.get(end..).is_some_and(|pad| pad.iter().all(|&b| b == 0))
    }
}
