#![no_main]
use libfuzzer_sys::fuzz_target;
use zentarga::*;

fuzz_target!(|data: &[u8]| {
    // Auto-detect and each format explicitly; must never panic
    let _ = decode(data, PixelLayout::Rgba8);
    let _ = decode_bmp(data, PixelLayout::Rgb8);
    let _ = decode_tga(data, PixelLayout::Bgr8);
    let _ = ImageInfo::from_bytes(data);

    // The packet decoder on its own, for both pixel sizes
    let _ = tga::rle::decompress(data, 3, data.len());
    let _ = tga::rle::decompress(data, 4, data.len() / 2);
});
