//! Codec parameter checks and shard sizing.

use pixshard_types::CodecConfig;

use crate::error::ErasureError;

/// Upper bound on `data_shards + parity_shards` for a GF(2^8) code.
pub const MAX_TOTAL_SHARDS: usize = 256;

/// Check that `config` describes a usable code.
///
/// `parity_shards == 0` is accepted: the shards are then a plain split with
/// no redundancy.
pub fn validate(config: &CodecConfig) -> Result<(), ErasureError> {
    let reason = if config.data_shards == 0 {
        "at least one data shard is required"
    } else if config.total_shards() > MAX_TOTAL_SHARDS {
        "more than 256 shards in total"
    } else {
        return Ok(());
    };
    Err(ErasureError::InvalidConfig {
        data_shards: config.data_shards,
        parity_shards: config.parity_shards,
        reason,
    })
}

/// Per-shard size for a buffer of `len` bytes: `ceil(len / data_shards)`.
///
/// The buffer is zero-padded to `data_shards * shard_size` before splitting.
pub fn shard_size(len: usize, data_shards: usize) -> usize {
    len.div_ceil(data_shards)
}
