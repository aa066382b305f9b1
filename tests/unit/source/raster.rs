use std::io::Cursor;

use super::*;

fn png_bytes(img: image::DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_to_luma_dimensions() {
    let img = image::RgbImage::from_pixel(3, 2, image::Rgb([255, 255, 255]));
    let grid = decode_luma_bytes(&png_bytes(image::DynamicImage::ImageRgb8(img))).unwrap();
    assert_eq!((grid.width(), grid.height()), (3, 2));
    assert!(grid.as_slice().iter().all(|&v| v == 255));
}

#[test]
fn decode_garbage_is_input_error() {
    let err = decode_luma_bytes(b"definitely not an image").unwrap_err();
    assert!(matches!(err, ArtError::Input(_)));
}

#[test]
fn missing_path_is_input_error() {
    let err = load_luma(Path::new("no/such/image.png")).unwrap_err();
    assert!(matches!(err, ArtError::Input(_)));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn load_from_disk_keeps_gray_levels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("g.png");
    let img = image::GrayImage::from_raw(2, 1, vec![0, 200]).unwrap();
    img.save(&path).unwrap();

    let grid = load_luma(&path).unwrap();
    assert_eq!(grid.as_slice(), &[0, 200]);
}

#[test]
fn undecodable_file_is_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"\x89PNG broken").unwrap();
    assert!(matches!(load_luma(&path), Err(ArtError::Input(_))));
}
