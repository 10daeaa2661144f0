use super::*;

fn png_bytes(img: DynamicImage) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_rgba_png_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50, 200, 128]).unwrap();
    let decoded = ImageRsCodec
        .decode(&png_bytes(DynamicImage::ImageRgba8(img)))
        .unwrap();
    assert_eq!(decoded.width(), 1);
    assert_eq!(decoded.height(), 1);
    assert!(decoded.has_alpha());
    assert_eq!(decoded.pixel(0, 0), &[100, 50, 200, 128]);
}

#[test]
fn decode_rgb_png_has_three_channels() {
    let img = image::RgbImage::from_raw(2, 1, vec![1u8, 2, 3, 4, 5, 6]).unwrap();
    let decoded = ImageRsCodec
        .decode(&png_bytes(DynamicImage::ImageRgb8(img)))
        .unwrap();
    assert_eq!(decoded.channels(), 3);
    assert_eq!(decoded.as_bytes(), &[1, 2, 3, 4, 5, 6]);
}

#[test]
fn decode_grayscale_replicates_intensity() {
    let img = image::GrayImage::from_raw(2, 1, vec![17u8, 240]).unwrap();
    let decoded = ImageRsCodec
        .decode(&png_bytes(DynamicImage::ImageLuma8(img)))
        .unwrap();
    assert_eq!(decoded.channels(), 3);
    assert_eq!(decoded.pixel(0, 0), &[17, 17, 17]);
    assert_eq!(decoded.pixel(1, 0), &[240, 240, 240]);
}

#[test]
fn decode_garbage_fails() {
    assert!(ImageRsCodec.decode(b"not an image").is_err());
}

#[test]
fn scale_changes_dimensions_and_keeps_layout() {
    let src = PixelBuffer::new_filled(4, 4, &[10, 20, 30, 255]).unwrap();
    let out = ImageRsCodec.scale(&src, 2, 2).unwrap();
    assert_eq!((out.width(), out.height()), (2, 2));
    assert_eq!(out.channels(), 4);
    assert_eq!(out.pixel(1, 1), &[10, 20, 30, 255]);

    let rgb = PixelBuffer::new_filled(3, 3, &[9, 9, 9]).unwrap();
    assert_eq!(ImageRsCodec.scale(&rgb, 1, 1).unwrap().channels(), 3);

    assert!(ImageRsCodec.scale(&src, 0, 2).is_err());
}

#[test]
fn encode_png_roundtrips_through_decode() {
    let src = PixelBuffer::new_filled(3, 2, &[1, 2, 3, 4]).unwrap();
    let png = encode_png(&src).unwrap();
    assert_eq!(ImageRsCodec.decode(&png).unwrap(), src);
}
