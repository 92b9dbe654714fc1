//! Payload serialization.
//!
//! Payloads travel through the image as JSON. The byte pipeline never looks
//! inside them.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::EngineError;

/// Serialize a payload value to JSON bytes.
pub fn serialize_payload<T: Serialize>(value: &T) -> Result<Vec<u8>, EngineError> {
    Ok(serde_json::to_vec(value)?)
}

/// Deserialize a payload value from JSON bytes.
pub fn deserialize_payload<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, EngineError> {
    Ok(serde_json::from_slice(bytes)?)
}
