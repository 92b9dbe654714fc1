//! Shared types for pixshard.
//!
//! This crate defines the pieces every other crate in the workspace has to
//! agree on: the erasure coding parameters ([`CodecConfig`]) and the payload
//! schema carried inside an image ([`Message`]).
//!
//! The codec parameters are not stored in the image. Encoder and decoder must
//! be handed the same [`CodecConfig`] or reconstruction reads garbage.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Codec configuration
// ---------------------------------------------------------------------------

/// Default number of data shards.
pub const DEFAULT_DATA_SHARDS: usize = 4;

/// Default number of parity shards.
pub const DEFAULT_PARITY_SHARDS: usize = 2;

/// Erasure coding parameters shared by encoder and decoder.
///
/// `data_shards` pieces carry the framed payload, `parity_shards` pieces
/// carry redundancy. Any `data_shards` surviving pieces recover the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Number of data shards (`D`).
    pub data_shards: usize,
    /// Number of parity shards (`P`).
    pub parity_shards: usize,
}

impl CodecConfig {
    /// Create a config with explicit shard counts.
    ///
    /// No validation happens here; the erasure encoder rejects unusable
    /// combinations when it is built.
    pub const fn new(data_shards: usize, parity_shards: usize) -> Self {
        Self {
            data_shards,
            parity_shards,
        }
    }

    /// Total number of shards (`D + P`).
    pub const fn total_shards(&self) -> usize {
        self.data_shards + self.parity_shards
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_SHARDS, DEFAULT_PARITY_SHARDS)
    }
}

// ---------------------------------------------------------------------------
// Payload schema
// ---------------------------------------------------------------------------

/// Text message carried by an image.
///
/// Serializes as `{"Data":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The message text.
    #[serde(rename = "Data")]
    pub data: String,
}

impl Message {
    /// Wrap a piece of text.
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}
