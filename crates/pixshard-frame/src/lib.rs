//! Length-prefixed framing.
//!
//! A framed buffer is the payload preceded by its own length:
//!
//! ```text
//! [4 bytes ] payload length (big-endian u32)
//! [N bytes ] payload
//! ```
//!
//! The prefix always records the payload length before any erasure coding
//! or padding, so the payload can be cut back out of a buffer that has grown
//! trailing zeros along the way.

mod error;

pub use error::FrameError;

/// Size of the length prefix in bytes.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Prepend the big-endian length of `payload` to `payload`.
///
/// Lengths above `u32::MAX` wrap; callers reject such payloads first.
pub fn frame(payload: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(LENGTH_PREFIX_LEN + payload.len());
    framed.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    framed.extend_from_slice(payload);
    framed
}

/// Split a framed buffer into its declared length and everything after the
/// prefix.
///
/// The returned slice is not trimmed: it may still carry padding or other
/// bytes beyond the declared length.
pub fn unframe(buffer: &[u8]) -> Result<(u32, &[u8]), FrameError> {
    let Some((prefix, rest)) = buffer.split_first_chunk::<LENGTH_PREFIX_LEN>() else {
        return Err(FrameError::Truncated {
            needed: LENGTH_PREFIX_LEN,
            got: buffer.len(),
        });
    };
    Ok((u32::from_be_bytes(*prefix), rest))
}

/// Unframe `buffer` and cut the payload to its declared length.
pub fn extract(buffer: &[u8]) -> Result<&[u8], FrameError> {
    let (declared, rest) = unframe(buffer)?;
    let len = declared as usize;
    if len > rest.len() {
        return Err(FrameError::DeclaredLengthExceeded {
            declared,
            available: rest.len(),
        });
    }
    Ok(&rest[..len])
}
