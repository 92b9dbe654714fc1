//! The pixel stream must match the documented layout byte for byte:
//! `[4-byte BE length][payload][zero pad]` split over D data shards,
//! followed by P Reed-Solomon parity shards, then unused cells.

use image::{DynamicImage, GrayImage};
use pixshard_engine::Pipeline;
use pixshard_raster::from_image;
use pixshard_types::{CodecConfig, Message};
use reed_solomon_erasure::galois_8::ReedSolomon;

/// Build the expected pixel stream independently of the pipeline.
fn reference_stream(payload: &[u8], k: usize, m: usize) -> Vec<u8> {
    let mut framed = (payload.len() as u32).to_be_bytes().to_vec();
    framed.extend_from_slice(payload);

    let shard_size = framed.len().div_ceil(k);
    framed.resize(k * shard_size, 0);

    let mut shards: Vec<Vec<u8>> = framed.chunks(shard_size).map(<[u8]>::to_vec).collect();
    shards.resize(k + m, vec![0u8; shard_size]);
    ReedSolomon::new(k, m).unwrap().encode(&mut shards).unwrap();
    shards.concat()
}

#[test]
fn test_hello_stream_matches_reference() {
    let pipeline = Pipeline::new(CodecConfig::default()).unwrap();
    let grid = pipeline.encode(&Message::new("hello")).unwrap();
    let flat = from_image(&DynamicImage::ImageLuma8(grid)).unwrap();

    let expected = reference_stream(br#"{"Data":"hello"}"#, 4, 2);
    assert_eq!(expected.len(), 30);
    assert_eq!(flat.len(), 36);
    assert_eq!(&flat[..30], expected.as_slice());
    assert_eq!(&flat[30..], &[0u8; 6]);
}

#[test]
fn test_streams_match_reference_for_many_lengths() {
    let pipeline = Pipeline::new(CodecConfig::new(3, 2)).unwrap();
    for len in [0usize, 1, 2, 5, 64, 301, 4096] {
        let payload: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
        let grid = pipeline.encode_bytes(&payload).unwrap();
        let flat = from_image(&DynamicImage::ImageLuma8(grid)).unwrap();
        let expected = reference_stream(&payload, 3, 2);
        assert_eq!(&flat[..expected.len()], expected.as_slice(), "len {len}");
    }
}

#[test]
fn test_decodes_hand_built_image() {
    // An image laid out by another encoder, with its unused cells left at an
    // arbitrary value instead of zero.
    let payload = br#"{"Data":"from elsewhere"}"#;
    let stream = reference_stream(payload, 4, 2);
    let side = (1..).find(|s| s * s >= stream.len()).unwrap();

    let mut cells = stream.clone();
    cells.resize(side * side, 0xAB);
    let image = GrayImage::from_raw(side as u32, side as u32, cells).unwrap();

    let pipeline = Pipeline::new(CodecConfig::default()).unwrap();
    let decoded: Message = pipeline.decode(&DynamicImage::ImageLuma8(image)).unwrap();
    assert_eq!(decoded.data, "from elsewhere");
}
