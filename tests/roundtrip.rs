#![cfg(feature = "tga")]

use zentarga::*;

const LAYOUTS: [PixelLayout; 4] = [
    PixelLayout::Rgb8,
    PixelLayout::Bgr8,
    PixelLayout::Rgba8,
    PixelLayout::Bgra8,
];

const ENCODINGS: [TgaEncoding; 3] = [
    TgaEncoding::Uncompressed,
    TgaEncoding::ColorMapped,
    TgaEncoding::Rle,
];

fn sample(w: u32, h: u32, layout: PixelLayout) -> Image {
    let mut image = Image::new(w, h, layout).unwrap();
    for y in 0..h {
        for x in 0..w {
            // a few repeats per row so RLE sees both packet kinds
            let v = ((x / 2) * 37 + y * 11) as u8;
            image.set_pixel(x, y, [v, v.wrapping_mul(3), 255 - v, 128 + (x as u8 & 1)]);
        }
    }
    image
}

#[test]
fn tga_roundtrip_all_layouts_and_encodings() {
    for layout in LAYOUTS {
        let image = sample(7, 5, layout);
        for encoding in ENCODINGS {
            let bytes = encode_tga(&image, encoding).unwrap();
            let decoded = decode_tga(&bytes, layout).unwrap();
            assert_eq!(decoded, image, "{layout:?} {encoding:?}");
        }
    }
}

#[test]
fn tga_decode_into_other_layout() {
    let image = sample(4, 3, PixelLayout::Rgba8);
    let bytes = encode_tga(&image, TgaEncoding::Uncompressed).unwrap();
    for layout in LAYOUTS {
        let decoded = decode_tga(&bytes, layout).unwrap();
        assert_eq!(decoded, image.convert(layout), "{layout:?}");
    }
}

#[test]
fn rle_two_equal_pixels_make_one_packet() {
    let pixels = vec![10, 20, 30, 255, 10, 20, 30, 255];
    let image = Image::from_pixels(2, 1, PixelLayout::Rgba8, pixels.clone()).unwrap();
    let bytes = encode_tga(&image, TgaEncoding::Rle).unwrap();
    assert_eq!(&bytes[18..], &[0x81, 30, 20, 10, 255]);

    let decoded = decode_tga(&bytes, PixelLayout::Rgba8).unwrap();
    assert_eq!(decoded.pixels(), &pixels[..]);
}

#[test]
fn truncation_by_one_byte_is_detected() {
    for layout in LAYOUTS {
        let image = sample(6, 4, layout);
        for encoding in ENCODINGS {
            let bytes = encode_tga(&image, encoding).unwrap();
            let err = decode_tga(&bytes[..bytes.len() - 1], layout).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Truncated, "{layout:?} {encoding:?}: {err}");
        }
    }
}

#[test]
fn one_by_one_is_accepted_zero_width_rejected() {
    let image = Image::from_pixels(1, 1, PixelLayout::Rgb8, vec![1, 2, 3]).unwrap();
    for encoding in ENCODINGS {
        let mut bytes = encode_tga(&image, encoding).unwrap();
        assert_eq!(decode_tga(&bytes, PixelLayout::Rgb8).unwrap(), image);

        bytes[12] = 0;
        let err = decode_tga(&bytes, PixelLayout::Rgb8).unwrap_err();
        assert!(matches!(err, BitmapError::InvalidDimensions { width: 0, .. }));
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }
}

#[test]
fn orientation_survives() {
    let mut image = sample(3, 2, PixelLayout::Bgr8);
    image.orientation = Orientation::BottomLeft;
    let bytes = encode_tga(&image, TgaEncoding::Uncompressed).unwrap();
    assert_eq!(bytes[17] & 0x20, 0);
    let decoded = decode_tga(&bytes, PixelLayout::Bgr8).unwrap();
    assert_eq!(decoded.orientation, Orientation::BottomLeft);
    assert_eq!(decoded.pixel(0, 0), image.pixel(0, 0));
}

#[test]
fn error_handler_turns_failures_into_empty_results() {
    let seen = std::cell::RefCell::new(Vec::new());
    let hook = |e: &BitmapError| seen.borrow_mut().push(e.kind());

    let image = DecodeRequest::new(&[0u8; 5])
        .with_layout(PixelLayout::Rgb8)
        .with_error_handler(&hook)
        .decode_tga()
        .unwrap();
    assert!(image.is_empty());

    let mut sink = Vec::new();
    let ok = EncodeRequest::tga(TgaEncoding::Rle)
        .with_error_handler(&hook)
        .encode_to(&Image::empty(PixelLayout::Rgb8), &mut sink)
        .unwrap();
    assert!(!ok);
    assert!(sink.is_empty());

    assert_eq!(*seen.borrow(), [ErrorKind::Truncated, ErrorKind::Malformed]);
}

#[test]
fn probe_matches_decode() {
    let image = sample(9, 4, PixelLayout::Rgba8);
    for encoding in ENCODINGS {
        let bytes = encode_tga(&image, encoding).unwrap();
        let info = ImageInfo::from_bytes(&bytes).unwrap();
        assert_eq!((info.width, info.height), (9, 4));
        assert_eq!(info.format, ImageFormat::Tga);
        assert_eq!(info.bits_per_pixel, 32);
        assert_eq!(info.orientation, Orientation::TopLeft);
    }
}

#[test]
fn mapped_table_is_compact() {
    let image = sample(16, 16, PixelLayout::Rgb8);
    let table = ColorTable::build(image.pixels(), image.layout()).unwrap();
    let bytes = encode_tga(&image, TgaEncoding::ColorMapped).unwrap();
    let colormap_len = u16::from_le_bytes([bytes[5], bytes[6]]) as usize;
    assert_eq!(colormap_len, table.len());
    assert_eq!(bytes.len(), 18 + table.len() * 3 + 16 * 16 * 2);
}

#[cfg(feature = "bmp")]
mod bmp {
    use super::*;

    fn bmp(width: i32, height: i32, bits: u16, rows: &[&[u8]]) -> Vec<u8> {
        let mut data = Vec::new();
        for row in rows {
            data.extend_from_slice(row);
            while data.len() % 4 != 0 {
                data.push(0);
            }
        }
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(54 + data.len() as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&54u32.to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&bits.to_le_bytes());
        out.extend_from_slice(&[0; 24]);
        out.extend_from_slice(&data);
        out
    }

    #[test]
    fn bmp_to_tga() {
        // bottom-up: stored rows are bottom, then top
        let data = bmp(2, 2, 24, &[&[1, 2, 3, 4, 5, 6], &[7, 8, 9, 10, 11, 12]]);
        let image = decode_bmp(&data, PixelLayout::Rgb8).unwrap();
        assert_eq!(image.orientation, Orientation::BottomLeft);
        assert_eq!(image.pixel(0, 0), Some([9, 8, 7, 255]));
        assert_eq!(image.pixel(1, 1), Some([6, 5, 4, 255]));

        let tga = encode_tga(&image, TgaEncoding::Rle).unwrap();
        assert_eq!(decode(&tga, PixelLayout::Rgb8).unwrap(), image);
    }

    #[test]
    fn reserved_field_boundary() {
        let mut data = bmp(1, 1, 32, &[&[1, 2, 3, 4]]);
        assert!(decode(&data, PixelLayout::Bgra8).is_ok());
        data[6] = 1;
        let err = decode(&data, PixelLayout::Bgra8).unwrap_err();
        assert!(matches!(err, BitmapError::ReservedFieldNonzero { found: 1 }));
    }

    #[test]
    fn zero_width_rejected_one_by_one_accepted() {
        assert!(decode_bmp(&bmp(1, 1, 24, &[&[0, 0, 0]]), PixelLayout::Rgb8).is_ok());
        let err = decode_bmp(&bmp(0, 1, 24, &[]), PixelLayout::Rgb8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn truncated_bmp() {
        let data = bmp(3, 3, 24, &[&[1; 9], &[2; 9], &[3; 9]]);
        let err = decode_bmp(&data[..data.len() - 1], PixelLayout::Rgb8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Truncated);
    }
}
