#![no_main]
use libfuzzer_sys::fuzz_target;
use zentarga::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, every TGA encoding must reproduce the pixels
    let Ok(decoded) = decode(data, PixelLayout::Rgba8) else {
        return;
    };
    if decoded.width() > u32::from(u16::MAX) || decoded.height() > u32::from(u16::MAX) {
        return; // BMP can be wider than TGA allows
    }

    for encoding in [TgaEncoding::Uncompressed, TgaEncoding::ColorMapped, TgaEncoding::Rle] {
        let reencoded = match encode_tga(&decoded, encoding) {
            Ok(bytes) => bytes,
            Err(BitmapError::PaletteOverflow { .. }) => continue,
            Err(err) => panic!("re-encode failed: {err}"),
        };
        let Ok(decoded2) = decode_tga(&reencoded, PixelLayout::Rgba8) else {
            panic!("re-encoded data failed to decode");
        };
        assert_eq!(decoded, decoded2, "roundtrip mismatch with {encoding:?}");
    }
});
