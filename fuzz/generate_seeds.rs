#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn tga_header(image_type: u8, colormap: Option<(u16, u8)>, w: u16, h: u16, bits: u8, desc: u8) -> Vec<u8> {
    let mut out = vec![0u8, colormap.is_some() as u8, image_type];
    let (len, entry) = colormap.unwrap_or((0, 0));
    out.extend_from_slice(&0u16.to_le_bytes()); // colormap origin
    out.extend_from_slice(&len.to_le_bytes());
    out.push(entry);
    out.extend_from_slice(&[0, 0, 0, 0]); // x/y origin
    out.extend_from_slice(&w.to_le_bytes());
    out.extend_from_slice(&h.to_le_bytes());
    out.extend_from_slice(&[bits, desc]);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Minimal BMP 1x1 24-bit
    let mut bmp = vec![0u8; 58]; // 54 header + 4 pixel (3 + 1 padding)
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&58u32.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&1i32.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&1i32.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[54] = 0xff; bmp[55] = 0x00; bmp[56] = 0x00; // BGR
    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp).unwrap();

    // TGA 2x1 uncompressed, 24-bit, top-left
    let mut tga = tga_header(2, None, 2, 1, 24, 0x20);
    tga.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
    fs::write(format!("{dir}/tga_rgb_2x1.tga"), tga).unwrap();

    // TGA 2x1 RLE, 32-bit: one run packet
    let mut tga = tga_header(10, None, 2, 1, 32, 0x28);
    tga.extend_from_slice(&[0x81, 10, 20, 30, 255]);
    fs::write(format!("{dir}/tga_rle_2x1.tga"), tga).unwrap();

    // TGA 3x1 color-mapped, two 24-bit entries, 16-bit indices
    let mut tga = tga_header(1, Some((2, 24)), 3, 1, 16, 0);
    tga.extend_from_slice(&[9, 9, 9, 1, 1, 1]);
    tga.extend_from_slice(&[0, 0, 1, 0, 0, 0]);
    fs::write(format!("{dir}/tga_mapped_3x1.tga"), tga).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/tga_header_only.bin"), tga_header(10, None, 4, 4, 24, 0)).unwrap();

    println!("Generated seed corpus in {dir}/");
}
