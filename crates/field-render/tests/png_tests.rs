//! End-to-end test: rasterize a field, encode it, write it to disk.

use std::fs;

use field_model::{PixelSample, Viewport};
use field_render::{fill_scalar_field, png::encode_rgba, temperature_scale, HeatmapConfig};

#[test]
fn test_rendered_field_round_trips_through_a_file() {
    let viewport = Viewport::new(32, 32);
    let mut pixels = vec![0u8; viewport.rgba_len()];
    let samples = vec![
        PixelSample::new(8.0, 8.0, -15.0),
        PixelSample::new(24.0, 24.0, 5.0),
    ];
    fill_scalar_field(
        &mut pixels,
        viewport,
        &samples,
        &temperature_scale(),
        &HeatmapConfig::default(),
    );

    let png = encode_rgba(&pixels, viewport.width, viewport.height).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("field.png");
    fs::write(&path, &png).unwrap();

    let read_back = fs::read(&path).unwrap();
    assert_eq!(read_back, png);
    assert_eq!(&read_back[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    assert_eq!(&read_back[12..16], b"IHDR");
}
