//! Reed-Solomon erasure decoder.
//!
//! Rebuilds the data shards of a [`ShardSet`] in which up to
//! `parity_shards` slots are marked missing. Whenever more than
//! `data_shards` shards are present, the spare ones are used to check
//! that the set is consistent with its parity.

use reed_solomon_erasure::galois_8::ReedSolomon;
use tracing::debug;

use crate::config::validate;
use crate::error::ErasureError;
use crate::shard::ShardSet;

/// Recover the data shards of `shards` and return their concatenation.
///
/// The result is `data_shards * shard_size` bytes long and still carries
/// the encoder's zero padding; trimming is up to the caller.
///
/// # Errors
///
/// Returns [`ErasureError::Unrecoverable`] if more than `parity_shards`
/// shards are missing, [`ErasureError::Corrupt`] if the present shards
/// disagree with their parity, or [`ErasureError::ReedSolomon`] if the RS
/// library fails.
pub fn reconstruct(shards: &ShardSet) -> Result<Vec<u8>, ErasureError> {
    let config = shards.config();
    validate(&config)?;

    let k = config.data_shards;
    let m = config.parity_shards;
    let missing = shards.missing();

    if missing > m {
        return Err(ErasureError::Unrecoverable {
            missing,
            tolerated: m,
        });
    }

    debug!(
        k,
        m,
        missing,
        shard_size = shards.shard_size(),
        "reconstructing buffer from shards"
    );

    if missing < m {
        return reconstruct_verified(shards, missing);
    }

    let mut result = Vec::with_capacity(k * shards.shard_size());

    // No spare shard to check against. All data shards present: plain
    // concatenation, no RS decode needed.
    if (0..k).all(|i| shards.is_present(i)) {
        for data in shards.slots().take(k).flatten() {
            result.extend_from_slice(data);
        }
        return Ok(result);
    }

    // A data shard is missing, so `missing >= 1` and therefore `m >= 1`.
    let codec = ReedSolomon::new(k, m)?;
    let mut slots: Vec<Option<Vec<u8>>> = shards
        .slots()
        .map(|slot| slot.map(|data| data.to_vec()))
        .collect();
    codec.reconstruct_data(&mut slots)?;

    for slot in slots.iter().take(k) {
        let data = slot.as_deref().ok_or(ErasureError::Unrecoverable {
            missing,
            tolerated: m,
        })?;
        result.extend_from_slice(data);
    }

    Ok(result)
}

/// Rebuild every missing shard, then check the whole set against its parity.
fn reconstruct_verified(shards: &ShardSet, missing: usize) -> Result<Vec<u8>, ErasureError> {
    let config = shards.config();
    let k = config.data_shards;
    let m = config.parity_shards;

    let codec = ReedSolomon::new(k, m)?;
    let mut slots: Vec<Option<Vec<u8>>> = shards
        .slots()
        .map(|slot| slot.map(|data| data.to_vec()))
        .collect();
    if missing > 0 {
        codec.reconstruct(&mut slots)?;
    }

    let full = slots
        .into_iter()
        .collect::<Option<Vec<Vec<u8>>>>()
        .ok_or(ErasureError::Unrecoverable {
            missing,
            tolerated: m,
        })?;
    if !codec.verify(&full)? {
        debug!(k, m, missing, "shards do not match their parity");
        return Err(ErasureError::Corrupt {
            present: k + m - missing,
        });
    }

    Ok(full.into_iter().take(k).flatten().collect())
}
