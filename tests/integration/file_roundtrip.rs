//! Full encode → PNG file → decode round trips.

use image::ImageFormat;
use pixshard_integration_tests::{Workspace, load_grid, load_image, test_data};
use pixshard_raster::save_png;
use pixshard_types::{CodecConfig, Message};

#[test]
fn test_hello_through_png() {
    let ws = Workspace::new(CodecConfig::default());
    let path = ws.path("output.png");
    let grid = ws.pipeline.encode(&Message::new("hello")).unwrap();
    save_png(&path, &grid).unwrap();

    // Written as 8-bit grayscale, side ceil(sqrt(30)) = 6.
    let format = image::ImageReader::open(&path)
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .format();
    assert_eq!(format, Some(ImageFormat::Png));
    let image = load_image(&path);
    assert_eq!(image.color(), image::ColorType::L8);
    assert_eq!((image.width(), image.height()), (6, 6));

    let decoded: Message = ws.pipeline.decode(&image).unwrap();
    assert_eq!(decoded, Message::new("hello"));
}

#[test]
fn test_large_payload_through_png() {
    let ws = Workspace::new(CodecConfig::default());
    let data = test_data(200_000);
    let path = ws.write_bytes("large.png", &data);

    let layout = ws.layout_for(data.len());
    assert_eq!(load_grid(&path).width() as usize, layout.side());
    assert_eq!(ws.pipeline.decode_bytes(&load_image(&path)).unwrap(), data);
}

#[test]
fn test_rgb_copy_still_decodes() {
    // Re-saving the grid as RGB keeps every luma value exact.
    let ws = Workspace::new(CodecConfig::default());
    let message = Message::new("colour conversion is harmless");
    let gray = ws.pipeline.encode(&message).unwrap();

    let rgb_path = ws.path("rgb.png");
    image::DynamicImage::ImageLuma8(gray)
        .to_rgb8()
        .save(&rgb_path)
        .unwrap();

    let image = load_image(&rgb_path);
    assert_eq!(image.color(), image::ColorType::Rgb8);
    let decoded: Message = ws.pipeline.decode(&image).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn test_overwrite_existing_file() {
    let ws = Workspace::new(CodecConfig::default());
    let first = ws.write_bytes("same.png", b"first payload");
    let second = ws.write_bytes("same.png", b"second, longer payload than before");
    assert_eq!(first, second);
    assert_eq!(
        ws.pipeline.decode_bytes(&load_image(&second)).unwrap(),
        b"second, longer payload than before"
    );
}

#[test]
fn test_custom_config_roundtrip() {
    let ws = Workspace::new(CodecConfig::new(10, 4));
    let data = test_data(5000);
    let path = ws.write_bytes("custom.png", &data);
    assert_eq!(ws.pipeline.decode_bytes(&load_image(&path)).unwrap(), data);
}
