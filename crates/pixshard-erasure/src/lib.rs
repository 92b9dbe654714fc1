//! Reed-Solomon erasure coding wrapper.
//!
//! This crate provides:
//! - [`ErasureEncoder`] — splits a buffer into `D` data shards and `P` parity shards.
//! - [`ShardSet`] — the resulting shards, each present or marked missing.
//! - [`reconstruct`] — recovers the data shards when at most `P` are missing.
//!
//! Shards are sized `ceil(len / D)` and the buffer is zero-padded to fill
//! them. Parity is computed over GF(2^8), so `D + P` is capped at 256.

mod config;
mod decoder;
mod encoder;
mod error;
mod shard;

pub use config::{MAX_TOTAL_SHARDS, shard_size, validate};
pub use decoder::reconstruct;
pub use encoder::ErasureEncoder;
pub use error::ErasureError;
pub use shard::ShardSet;
