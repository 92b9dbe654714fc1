//! Error types for erasure coding operations.

/// Errors that can occur during erasure encoding or reconstruction.
#[derive(Debug, thiserror::Error)]
pub enum ErasureError {
    /// The shard counts cannot be used by the codec.
    #[error("invalid codec config {data_shards}+{parity_shards}: {reason}")]
    InvalidConfig {
        /// Requested data shards.
        data_shards: usize,
        /// Requested parity shards.
        parity_shards: usize,
        /// Why the combination was rejected.
        reason: &'static str,
    },

    /// The buffer cannot be partitioned into data shards.
    #[error("cannot partition {len} bytes into {data_shards} data shards")]
    InvalidSize {
        /// Buffer length in bytes.
        len: usize,
        /// Number of data shards requested.
        data_shards: usize,
    },

    /// A flat byte run is too short to hold every shard.
    #[error("flat buffer too short: need {needed} bytes, got {got}")]
    ShortBuffer {
        /// Bytes required for all shards.
        needed: usize,
        /// Bytes actually provided.
        got: usize,
    },

    /// A shard index outside the shard set was referenced.
    #[error("shard index {index} out of range for {total} shards")]
    ShardIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of shards in the set.
        total: usize,
    },

    /// More shards are missing than parity can cover.
    #[error("unrecoverable: {missing} shards missing, parity tolerates {tolerated}")]
    Unrecoverable {
        /// Shards marked missing.
        missing: usize,
        /// Parity shard count.
        tolerated: usize,
    },

    /// The present shards are not a valid codeword.
    #[error("corrupt shard set: {present} present shards disagree with their parity")]
    Corrupt {
        /// Shards that were present when the check failed.
        present: usize,
    },

    /// The Reed-Solomon library returned an error.
    #[error("reed-solomon error: {0}")]
    ReedSolomon(#[from] reed_solomon_erasure::Error),
}
