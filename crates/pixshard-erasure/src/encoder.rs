//! Reed-Solomon erasure encoder.
//!
//! Splits a framed buffer into `data_shards` equal pieces and appends
//! `parity_shards` parity pieces computed over GF(2^8).

use pixshard_types::CodecConfig;
use reed_solomon_erasure::galois_8::ReedSolomon;
use tracing::debug;

use crate::config::{shard_size, validate};
use crate::error::ErasureError;
use crate::shard::ShardSet;

/// Reed-Solomon erasure encoder.
///
/// All shards are the same size. If the buffer isn't evenly divisible by
/// `data_shards`, it is padded with zeros up to the next multiple.
pub struct ErasureEncoder {
    config: CodecConfig,
    /// `None` when the config has no parity shards.
    codec: Option<ReedSolomon>,
}

impl ErasureEncoder {
    /// Create an encoder, rejecting configs the codec cannot handle.
    pub fn new(config: CodecConfig) -> Result<Self, ErasureError> {
        validate(&config)?;
        let codec = match config.parity_shards {
            0 => None,
            m => Some(ReedSolomon::new(config.data_shards, m)?),
        };
        Ok(Self { config, codec })
    }

    /// Codec parameters this encoder was built with.
    pub fn config(&self) -> CodecConfig {
        self.config
    }

    /// Encode a buffer into `data_shards + parity_shards` shards.
    ///
    /// Data shards come first (indices `0..data_shards`), then parity.
    pub fn encode(&self, buffer: &[u8]) -> Result<ShardSet, ErasureError> {
        let k = self.config.data_shards;
        if buffer.is_empty() {
            return Err(ErasureError::InvalidSize {
                len: 0,
                data_shards: k,
            });
        }

        let shard_size = shard_size(buffer.len(), k);

        // Zero-pad the tail; short buffers may leave whole data shards empty.
        let mut shards: Vec<Vec<u8>> = buffer
            .chunks(shard_size)
            .map(|piece| {
                let mut shard = piece.to_vec();
                shard.resize(shard_size, 0);
                shard
            })
            .collect();
        shards.resize(self.config.total_shards(), vec![0u8; shard_size]);

        if let Some(codec) = &self.codec {
            codec.encode(&mut shards)?;
        }

        debug!(
            k,
            m = self.config.parity_shards,
            len = buffer.len(),
            shard_size,
            "encoded buffer into shards"
        );

        Ok(ShardSet::from_encoded(self.config, shard_size, shards))
    }
}
