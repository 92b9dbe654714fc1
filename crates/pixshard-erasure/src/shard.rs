//! Shard sets: fixed-size slots that are either present or missing.

use bytes::Bytes;
use pixshard_types::CodecConfig;

use crate::error::ErasureError;

/// The full set of `data_shards + parity_shards` shards for one buffer.
///
/// Slots `0..data_shards` hold data, the rest hold parity. All shards have
/// the same size. A slot marked missing is ignored by
/// [`reconstruct`](crate::reconstruct) and rebuilt from the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardSet {
    config: CodecConfig,
    shard_size: usize,
    slots: Vec<Option<Bytes>>,
}

impl ShardSet {
    /// Build a set from freshly encoded shards, all present.
    pub(crate) fn from_encoded(
        config: CodecConfig,
        shard_size: usize,
        shards: Vec<Vec<u8>>,
    ) -> Self {
        debug_assert_eq!(shards.len(), config.total_shards());
        debug_assert!(shards.iter().all(|s| s.len() == shard_size));
        Self {
            config,
            shard_size,
            slots: shards.into_iter().map(|s| Some(Bytes::from(s))).collect(),
        }
    }

    /// Split a flat byte run into shards of `shard_size` bytes, in shard order.
    ///
    /// Only the first `total_shards * shard_size` bytes are used; anything
    /// after that is ignored. Every shard starts out present.
    pub fn from_flat(
        config: CodecConfig,
        shard_size: usize,
        flat: Bytes,
    ) -> Result<Self, ErasureError> {
        if shard_size == 0 {
            return Err(ErasureError::InvalidSize {
                len: 0,
                data_shards: config.data_shards,
            });
        }
        let needed = config.total_shards() * shard_size;
        if flat.len() < needed {
            return Err(ErasureError::ShortBuffer {
                needed,
                got: flat.len(),
            });
        }

        let slots = (0..config.total_shards())
            .map(|i| Some(flat.slice(i * shard_size..(i + 1) * shard_size)))
            .collect();

        Ok(Self {
            config,
            shard_size,
            slots,
        })
    }

    /// Codec parameters the set was built for.
    pub fn config(&self) -> CodecConfig {
        self.config
    }

    /// Size of every shard in bytes.
    pub fn shard_size(&self) -> usize {
        self.shard_size
    }

    /// Number of slots (`data_shards + parity_shards`).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the set has no slots. Never true for a validated config.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The shard at `index`, or `None` if it is missing or out of range.
    pub fn get(&self, index: usize) -> Option<&Bytes> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Whether the shard at `index` is present.
    pub fn is_present(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Mark the shard at `index` as missing or corrupt.
    pub fn mark_missing(&mut self, index: usize) -> Result<(), ErasureError> {
        let total = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(ErasureError::ShardIndexOutOfRange { index, total })?;
        *slot = None;
        Ok(())
    }

    /// Mark every present shard whose bytes are all zero as missing.
    ///
    /// Wiped regions of an image read back as zeros. Returns how many
    /// shards were newly marked.
    pub fn mark_blank_missing(&mut self) -> usize {
        let mut marked = 0;
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|data| data.iter().all(|&b| b == 0)) {
                *slot = None;
                marked += 1;
            }
        }
        marked
    }

    /// Number of shards marked missing.
    pub fn missing(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    /// Iterate over the slots in shard order.
    pub fn slots(&self) -> impl Iterator<Item = Option<&Bytes>> {
        self.slots.iter().map(Option::as_ref)
    }

    /// Concatenate every shard in shard order.
    ///
    /// Missing shards are written as zeros so offsets stay fixed.
    pub fn flatten(&self) -> Vec<u8> {
        let mut flat = Vec::with_capacity(self.slots.len() * self.shard_size);
        for slot in &self.slots {
            match slot {
                Some(data) => flat.extend_from_slice(data),
                None => flat.resize(flat.len() + self.shard_size, 0),
            }
        }
        flat
    }
}
