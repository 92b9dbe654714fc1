//! Encode/decode pipeline tying pixshard components together.
//!
//! The [`Pipeline`] owns a codec configuration and exposes the two
//! directions of the image format:
//!
//! ```text
//! encode: payload → frame → shards → flat bytes → grid
//! decode: grid → flat bytes → shards → frame → payload
//! ```
//!
//! Typed payloads go through JSON ([`Pipeline::encode`], [`Pipeline::decode`]);
//! raw bytes go straight in ([`Pipeline::encode_bytes`], [`Pipeline::decode_bytes`]).

pub mod error;
pub mod layout;
pub mod payload;
pub mod pipeline;

pub use error::EngineError;
pub use layout::ShardLayout;
pub use payload::{deserialize_payload, serialize_payload};
pub use pipeline::{Inspection, MAX_PAYLOAD_LEN, Pipeline};

#[cfg(test)]
mod tests;
