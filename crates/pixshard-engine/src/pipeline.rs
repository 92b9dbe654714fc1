//! End-to-end encode and decode.
//!
//! Encode: payload → frame → erasure encode → flatten → grid.
//! Decode: grid → flat bytes → shard layout → reconstruct → unframe → payload.

use bytes::Bytes;
use image::DynamicImage;
use pixshard_erasure::{ErasureEncoder, ErasureError, ShardSet, reconstruct};
use pixshard_frame::{extract, frame, unframe};
use pixshard_raster::{Grid, from_image, to_image};
use pixshard_types::CodecConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::EngineError;
use crate::layout::ShardLayout;
use crate::payload::{deserialize_payload, serialize_payload};

/// Largest payload the 32-bit length prefix can describe.
pub const MAX_PAYLOAD_LEN: usize = u32::MAX as usize;

/// Layout details recovered from an encoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inspection {
    /// Side of the square image in pixels.
    pub side: usize,
    /// Shard layout the image was decoded with.
    pub layout: ShardLayout,
    /// Payload length from the recovered length prefix.
    pub declared_len: u32,
}

/// Encoder and decoder for one codec configuration.
///
/// The same [`CodecConfig`] must be used on both sides; it is not stored in
/// the image.
pub struct Pipeline {
    config: CodecConfig,
    encoder: ErasureEncoder,
}

impl Pipeline {
    /// Create a pipeline, rejecting unusable codec parameters.
    pub fn new(config: CodecConfig) -> Result<Self, EngineError> {
        let encoder = ErasureEncoder::new(config)?;
        Ok(Self { config, encoder })
    }

    /// Codec parameters of this pipeline.
    pub fn config(&self) -> CodecConfig {
        self.config
    }

    // ------------------------------------------------------------------
    // Encode
    // ------------------------------------------------------------------

    /// Serialize `value` and encode it into an image.
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<Grid, EngineError> {
        let bytes = serialize_payload(value)?;
        self.encode_bytes(&bytes)
    }

    /// Encode an opaque payload into an image.
    pub fn encode_bytes(&self, payload: &[u8]) -> Result<Grid, EngineError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(EngineError::PayloadTooLarge {
                len: payload.len(),
                max: MAX_PAYLOAD_LEN,
            });
        }

        let framed = frame(payload);
        let shards = self.encoder.encode(&framed)?;
        let grid = to_image(&shards.flatten())?;

        debug!(
            payload_len = payload.len(),
            shard_size = shards.shard_size(),
            side = grid.width(),
            "encoded payload into image"
        );

        Ok(grid)
    }

    // ------------------------------------------------------------------
    // Decode
    // ------------------------------------------------------------------

    /// Decode an image and deserialize its payload.
    pub fn decode<T: DeserializeOwned>(&self, image: &DynamicImage) -> Result<T, EngineError> {
        self.decode_with_erasures(image, &[])
    }

    /// Like [`decode`](Self::decode), treating the shards at `erasures` as
    /// missing.
    pub fn decode_with_erasures<T: DeserializeOwned>(
        &self,
        image: &DynamicImage,
        erasures: &[usize],
    ) -> Result<T, EngineError> {
        let bytes = self.decode_bytes_with_erasures(image, erasures)?;
        deserialize_payload(&bytes)
    }

    /// Decode an image back into the opaque payload.
    pub fn decode_bytes(&self, image: &DynamicImage) -> Result<Vec<u8>, EngineError> {
        self.decode_bytes_with_erasures(image, &[])
    }

    /// Decode an image, treating the shards at `erasures` as missing.
    ///
    /// Up to `parity_shards` shards may be listed. Their pixels are never
    /// read, so they may hold anything. Shards wiped to zero are found on
    /// their own once the remaining shards fail the parity check; other
    /// damage is reported as an error rather than decoded.
    pub fn decode_bytes_with_erasures(
        &self,
        image: &DynamicImage,
        erasures: &[usize],
    ) -> Result<Vec<u8>, EngineError> {
        let (layout, buffer) = self.recover(image, erasures)?;
        let payload = extract(&buffer)?.to_vec();

        debug!(
            payload_len = payload.len(),
            shard_size = layout.shard_size,
            erasures = erasures.len(),
            "decoded payload from image"
        );

        Ok(payload)
    }

    /// Recover the shard layout and length prefix of an encoded image.
    pub fn inspect(&self, image: &DynamicImage) -> Result<Inspection, EngineError> {
        let (layout, buffer) = self.recover(image, &[])?;
        let (declared_len, _) = unframe(&buffer)?;
        Ok(Inspection {
            side: layout.side(),
            layout,
            declared_len,
        })
    }

    /// Read the grid, find its shard layout and reconstruct the data shards.
    ///
    /// The length prefix at the head of shard 0 fixes the layout. When
    /// shard 0 is itself erased, every layout that fits the grid is tried
    /// and the first whose reconstruction reproduces its own prefix wins.
    ///
    /// If that fails because the image is damaged, the search is repeated
    /// with every all-zero shard also treated as missing.
    fn recover(
        &self,
        image: &DynamicImage,
        erasures: &[usize],
    ) -> Result<(ShardLayout, Vec<u8>), EngineError> {
        let flat = Bytes::from(from_image(image)?);
        let side = image.width() as usize;

        match self.recover_marked(&flat, side, erasures) {
            Err(err) if is_damage(&err) => {
                debug!(error = %err, "retrying with blank shards treated as missing");
                self.recover_blank(&flat, side, erasures)?.ok_or(err)
            }
            result => result,
        }
    }

    /// Recover using only the caller's erasure marks.
    fn recover_marked(
        &self,
        flat: &Bytes,
        side: usize,
        erasures: &[usize],
    ) -> Result<(ShardLayout, Vec<u8>), EngineError> {
        if !erasures.contains(&0) {
            let (declared, _) = unframe(flat)?;
            let layout = ShardLayout::for_declared_len(self.config, declared);
            if layout.side() != side {
                return Err(EngineError::LayoutMismatch { declared, side });
            }
            let shards = self.marked_shards(&layout, flat.clone(), erasures)?;
            return Ok((layout, reconstruct(&shards)?));
        }

        for layout in ShardLayout::candidates(self.config, side) {
            let shards = self.marked_shards(&layout, flat.clone(), erasures)?;
            match reconstruct(&shards) {
                Ok(buffer) if layout.accepts(&buffer) => return Ok((layout, buffer)),
                Ok(_) | Err(ErasureError::Corrupt { .. }) => {}
                Err(err) => return Err(err.into()),
            }
            debug!(shard_size = layout.shard_size, "rejected candidate layout");
        }

        Err(EngineError::NoLayout { side })
    }

    /// Recover with all-zero shards added to the caller's erasure marks.
    ///
    /// The layout named by the length prefix is tried first, then every
    /// other layout that fits the grid. Returns `Ok(None)` when no layout
    /// produced a consistent buffer, and `Unrecoverable` when some layout
    /// had more blank shards than parity covers.
    fn recover_blank(
        &self,
        flat: &Bytes,
        side: usize,
        erasures: &[usize],
    ) -> Result<Option<(ShardLayout, Vec<u8>)>, EngineError> {
        let config = self.config;
        let declared = unframe(flat)
            .ok()
            .map(|(declared, _)| ShardLayout::for_declared_len(config, declared))
            .filter(|layout| layout.side() == side);
        let others =
            ShardLayout::candidates(config, side).filter(move |layout| Some(*layout) != declared);

        let mut unrecoverable = None;
        for layout in declared.into_iter().chain(others) {
            let mut shards = self.marked_shards(&layout, flat.clone(), erasures)?;
            let blank = shards.mark_blank_missing();
            if blank == 0 {
                continue;
            }
            match reconstruct(&shards) {
                Ok(buffer) if layout.accepts(&buffer) => {
                    debug!(
                        shard_size = layout.shard_size,
                        blank, "recovered with blank shards treated as missing"
                    );
                    return Ok(Some((layout, buffer)));
                }
                Ok(_) | Err(ErasureError::Corrupt { .. }) => {}
                Err(err @ ErasureError::Unrecoverable { .. }) => {
                    unrecoverable.get_or_insert(err);
                }
                Err(err) => return Err(err.into()),
            }
        }

        match unrecoverable {
            Some(err) => Err(err.into()),
            None => Ok(None),
        }
    }

    /// Cut `flat` along `layout` and mark the caller's erasures.
    fn marked_shards(
        &self,
        layout: &ShardLayout,
        flat: Bytes,
        erasures: &[usize],
    ) -> Result<ShardSet, EngineError> {
        let mut shards = layout.split(flat)?;
        for &index in erasures {
            shards.mark_missing(index)?;
        }
        Ok(shards)
    }
}

/// Failures that blank shards in the image could explain.
fn is_damage(err: &EngineError) -> bool {
    matches!(
        err,
        EngineError::Frame(_)
            | EngineError::LayoutMismatch { .. }
            | EngineError::NoLayout { .. }
            | EngineError::Erasure(ErasureError::Corrupt { .. })
    )
}
