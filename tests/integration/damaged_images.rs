//! Decoding PNG files whose shards were wiped after encoding.

use pixshard_engine::EngineError;
use pixshard_erasure::ErasureError;
use pixshard_integration_tests::{Workspace, damage_shard, load_image, test_data};
use pixshard_raster::save_png;
use pixshard_types::{CodecConfig, Message};

fn hello_file(ws: &Workspace) -> std::path::PathBuf {
    let path = ws.path("hello.png");
    let grid = ws.pipeline.encode(&Message::new("hello")).unwrap();
    save_png(&path, &grid).unwrap();
    path
}

#[test]
fn test_two_of_six_shards_zeroed() {
    let ws = Workspace::new(CodecConfig::default());
    let path = hello_file(&ws);
    let layout = ws.layout_for(16);
    damage_shard(&path, &layout, 2, 0);
    damage_shard(&path, &layout, 3, 0);

    let decoded: Message = ws
        .pipeline
        .decode_with_erasures(&load_image(&path), &[2, 3])
        .unwrap();
    assert_eq!(decoded.data, "hello");
}

#[test]
fn test_length_prefix_shard_zeroed() {
    let ws = Workspace::new(CodecConfig::default());
    let path = hello_file(&ws);
    let layout = ws.layout_for(16);
    damage_shard(&path, &layout, 0, 0);
    damage_shard(&path, &layout, 1, 0xFF);

    let decoded: Message = ws
        .pipeline
        .decode_with_erasures(&load_image(&path), &[0, 1])
        .unwrap();
    assert_eq!(decoded.data, "hello");
}

#[test]
fn test_three_of_six_shards_zeroed() {
    let ws = Workspace::new(CodecConfig::default());
    let path = hello_file(&ws);
    let layout = ws.layout_for(16);
    for index in [1, 3, 4] {
        damage_shard(&path, &layout, index, 0);
    }

    let result: Result<Message, _> = ws
        .pipeline
        .decode_with_erasures(&load_image(&path), &[1, 3, 4]);
    assert!(matches!(
        result,
        Err(EngineError::Erasure(ErasureError::Unrecoverable {
            missing: 3,
            tolerated: 2
        }))
    ));
}

#[test]
fn test_two_of_six_shards_zeroed_unmarked() {
    let ws = Workspace::new(CodecConfig::default());
    let path = hello_file(&ws);
    let layout = ws.layout_for(16);
    damage_shard(&path, &layout, 2, 0);
    damage_shard(&path, &layout, 3, 0);

    let decoded: Message = ws.pipeline.decode(&load_image(&path)).unwrap();
    assert_eq!(decoded.data, "hello");
}

#[test]
fn test_prefix_and_parity_shards_zeroed_unmarked() {
    let ws = Workspace::new(CodecConfig::default());
    let path = hello_file(&ws);
    let layout = ws.layout_for(16);
    damage_shard(&path, &layout, 0, 0);
    damage_shard(&path, &layout, 4, 0);

    let decoded: Message = ws.pipeline.decode(&load_image(&path)).unwrap();
    assert_eq!(decoded.data, "hello");
}

#[test]
fn test_three_of_six_shards_zeroed_unmarked() {
    let ws = Workspace::new(CodecConfig::default());
    let path = hello_file(&ws);
    let layout = ws.layout_for(16);
    for index in [1, 3, 4] {
        damage_shard(&path, &layout, index, 0);
    }

    let result: Result<Message, _> = ws.pipeline.decode(&load_image(&path));
    assert!(matches!(
        result,
        Err(EngineError::Erasure(ErasureError::Unrecoverable {
            missing: 3,
            tolerated: 2
        }))
    ));
}

#[test]
fn test_parity_damage_without_marking_is_reported() {
    // Overwritten parity cannot be told apart from overwritten data, so the
    // decoder must refuse rather than trust the data shards.
    let ws = Workspace::new(CodecConfig::default());
    let data = test_data(1000);
    let path = ws.write_bytes("parity.png", &data);
    let layout = ws.layout_for(data.len());
    damage_shard(&path, &layout, 4, 0x11);
    damage_shard(&path, &layout, 5, 0x22);

    assert!(matches!(
        ws.pipeline.decode_bytes(&load_image(&path)),
        Err(EngineError::Erasure(ErasureError::Corrupt { present: 6 }))
    ));
}

#[test]
fn test_data_damage_without_marking_is_reported() {
    let ws = Workspace::new(CodecConfig::default());
    let data = test_data(100);
    let path = ws.write_bytes("data.png", &data);
    let layout = ws.layout_for(data.len());
    damage_shard(&path, &layout, 2, 0x80);

    assert!(matches!(
        ws.pipeline.decode_bytes(&load_image(&path)),
        Err(EngineError::Erasure(ErasureError::Corrupt { .. }))
    ));
}

#[test]
fn test_large_payload_with_erasures() {
    let ws = Workspace::new(CodecConfig::new(8, 4));
    let data = test_data(50_000);
    let path = ws.write_bytes("big.png", &data);
    let layout = ws.layout_for(data.len());
    for index in [0, 3, 7, 11] {
        damage_shard(&path, &layout, index, 0);
    }

    let got = ws
        .pipeline
        .decode_bytes_with_erasures(&load_image(&path), &[0, 3, 7, 11])
        .unwrap();
    assert_eq!(got, data);
}
