//! TGA header validation and the three pixel-extraction paths.

use alloc::vec::Vec;

use super::header::{ImageType, TgaHeader};
use super::rle;
use crate::cursor::{ByteCursor, FixedLayout};
use crate::error::BitmapError;
use crate::pixel::{PixelLayout, convert_bytes};

/// A header that passed validation, with the color map split off.
pub(crate) struct Parsed<'a> {
    pub header: TgaHeader,
    /// Bytes per stored pixel (or per color-map entry): 3 or 4.
    pub pixel_size: usize,
    /// Raw color-map entries; empty when the file has no map.
    pub colormap: &'a [u8],
    /// Positioned at the first byte of pixel, index or packet data.
    pub body: ByteCursor<'a>,
}

/// Read the header, skip the image id and split off the color map.
pub(crate) fn parse(data: &[u8]) -> Result<Parsed<'_>, BitmapError> {
    let mut cursor = ByteCursor::new(data);
    let header: TgaHeader = cursor.read_fixed()?;
    if header.width == 0 || header.height == 0 {
        return Err(BitmapError::InvalidDimensions {
            width: i64::from(header.width),
            height: i64::from(header.height),
        });
    }
    cursor.skip(usize::from(header.id_len))?;

    let has_map = header.has_colormap();
    let entry_size = usize::from(header.colormap_entry_size / 8);
    let map_bytes = if has_map {
        usize::from(header.colormap_len) * entry_size
    } else {
        0
    };
    if cursor.remaining() < map_bytes {
        return Err(BitmapError::TruncatedColorMap {
            needed: map_bytes,
            remaining: cursor.remaining(),
        });
    }

    let pixel_size = if has_map {
        entry_size
    } else {
        usize::from(header.bits_per_pixel / 8)
    };
    if pixel_size != 3 && pixel_size != 4 {
        return Err(BitmapError::UnsupportedPixelSize { bytes: pixel_size });
    }
    if header.image_type == ImageType::Mapped as u8 && !has_map {
        return Err(BitmapError::MissingColorMap);
    }

    if has_map {
        let bits = header.bits_per_pixel;
        if bits != 8 && bits != 16 {
            return Err(BitmapError::UnsupportedPaletteIndexWidth { bits });
        }
        let pixels = header.pixel_count();
        let data = cursor.remaining() - map_bytes;
        if usize::from(bits).saturating_mul(pixels) < data {
            return Err(BitmapError::PaletteIndexSpaceTooSmall { bits, pixels, data });
        }
    }
    let colormap = cursor.read_bytes(map_bytes)?;

    log::debug!(
        "tga: {}x{} type={} bits={} map={}x{} origin={} desc={:#04x}",
        header.width,
        header.height,
        header.image_type,
        header.bits_per_pixel,
        header.colormap_len,
        header.colormap_entry_size,
        header.colormap_origin,
        header.descriptor
    );

    Ok(Parsed {
        header,
        pixel_size,
        colormap,
        body: cursor,
    })
}

/// Decode the pixel data of a parsed file into `layout`, in stored row order.
pub(crate) fn decode_pixels(
    parsed: Parsed<'_>,
    layout: PixelLayout,
) -> Result<Vec<u8>, BitmapError> {
    let image_type = ImageType::from_u8(parsed.header.image_type).ok_or(
        BitmapError::UnsupportedImageType {
            found: parsed.header.image_type,
        },
    )?;
    match image_type {
        ImageType::Mapped => decode_mapped(parsed, layout),
        ImageType::TrueColor => decode_true_color(parsed, layout),
        ImageType::RleTrueColor => decode_rle(parsed, layout),
    }
}

/// On-disk layout of true-color pixels. A file with a color map cannot
/// also carry true-color pixels: its bit count is an index width.
fn true_color_layout(parsed: &Parsed<'_>) -> Result<PixelLayout, BitmapError> {
    let bytes = usize::from(parsed.header.bits_per_pixel / 8);
    match PixelLayout::native_for_size(bytes) {
        Some(native) if bytes == parsed.pixel_size => Ok(native),
        _ => Err(BitmapError::UnsupportedPixelSize { bytes }),
    }
}

fn data_len(header: &TgaHeader, unit: usize) -> Result<usize, BitmapError> {
    header
        .pixel_count()
        .checked_mul(unit)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: u32::from(header.width),
            height: u32::from(header.height),
        })
}

fn decode_true_color(mut parsed: Parsed<'_>, layout: PixelLayout) -> Result<Vec<u8>, BitmapError> {
    let native = true_color_layout(&parsed)?;
    let needed = data_len(&parsed.header, parsed.pixel_size)?;
    let remaining = parsed.body.remaining();
    if remaining < needed {
        return Err(BitmapError::TruncatedPixelData { needed, remaining });
    }
    let raw = parsed.body.read_bytes(needed)?;
    Ok(convert_bytes(raw, native, layout))
}

fn decode_rle(mut parsed: Parsed<'_>, layout: PixelLayout) -> Result<Vec<u8>, BitmapError> {
    let native = true_color_layout(&parsed)?;
    data_len(&parsed.header, parsed.pixel_size)?;
    let raw = rle::decompress_from(
        &mut parsed.body,
        parsed.pixel_size,
        parsed.header.pixel_count(),
    )?;
    Ok(convert_bytes(&raw, native, layout))
}

fn decode_mapped(mut parsed: Parsed<'_>, layout: PixelLayout) -> Result<Vec<u8>, BitmapError> {
    let entry = PixelLayout::native_for_size(parsed.pixel_size).ok_or(
        BitmapError::UnsupportedPixelSize {
            bytes: parsed.pixel_size,
        },
    )?;
    // Convert the table once; each pixel is then a copy.
    let table = convert_bytes(parsed.colormap, entry, layout);
    let bpp = layout.bytes_per_pixel();
    let len = table.len() / bpp;
    let origin = usize::from(parsed.header.colormap_origin);

    let index_size = usize::from(parsed.header.bits_per_pixel / 8);
    let needed = data_len(&parsed.header, index_size)?;
    let remaining = parsed.body.remaining();
    if remaining < needed {
        return Err(BitmapError::TruncatedPixelData { needed, remaining });
    }
    let indices = parsed.body.read_bytes(needed)?;

    let mut out = Vec::with_capacity(parsed.header.pixel_count() * bpp);
    for raw in indices.chunks_exact(index_size) {
        let index = match index_size {
            1 => usize::from(raw[0]),
            _ => usize::from(u16::parse(raw)),
        };
        let slot = index
            .checked_sub(origin)
            .filter(|&slot| slot < len)
            .ok_or(BitmapError::PaletteIndexOutOfRange { index, len })?;
        out.extend_from_slice(&table[slot * bpp..(slot + 1) * bpp]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use alloc::vec;

    fn header(image_type: u8, bits: u8) -> TgaHeader {
        TgaHeader {
            image_type,
            width: 2,
            height: 1,
            bits_per_pixel: bits,
            ..Default::default()
        }
    }

    fn file(header: TgaHeader, tail: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        header.serialize(&mut out);
        out.extend_from_slice(tail);
        out
    }

    fn decode(data: &[u8], layout: PixelLayout) -> Result<Vec<u8>, BitmapError> {
        decode_pixels(parse(data)?, layout)
    }

    fn mapped_header(bits: u8, len: u16, origin: u16) -> TgaHeader {
        TgaHeader {
            colormap_type: 1,
            colormap_origin: origin,
            colormap_len: len,
            colormap_entry_size: 24,
            ..header(1, bits)
        }
    }

    #[test]
    fn true_color_converts_from_bgr() {
        let data = file(header(2, 24), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(decode(&data, PixelLayout::Rgb8).unwrap(), [3, 2, 1, 6, 5, 4]);
        assert_eq!(
            decode(&data, PixelLayout::Rgba8).unwrap(),
            [3, 2, 1, 255, 6, 5, 4, 255]
        );
    }

    #[test]
    fn skips_image_id() {
        let h = TgaHeader {
            id_len: 3,
            ..header(2, 32)
        };
        let data = file(h, &[0xaa, 0xbb, 0xcc, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(
            decode(&data, PixelLayout::Bgra8).unwrap(),
            [1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn rejects_zero_dimensions() {
        let h = TgaHeader {
            width: 0,
            ..header(2, 24)
        };
        assert!(matches!(
            parse(&file(h, &[])),
            Err(BitmapError::InvalidDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn short_pixel_data_is_truncation() {
        let data = file(header(2, 24), &[1, 2, 3, 4, 5]);
        let err = decode(&data, PixelLayout::Rgb8).unwrap_err();
        assert!(matches!(
            err,
            BitmapError::TruncatedPixelData {
                needed: 6,
                remaining: 5
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Truncated);
    }

    #[test]
    fn pixel_size_must_be_3_or_4() {
        let data = file(header(2, 16), &[0; 4]);
        assert!(matches!(
            parse(&data),
            Err(BitmapError::UnsupportedPixelSize { bytes: 2 })
        ));
    }

    #[test]
    fn unknown_image_type() {
        let data = file(header(3, 24), &[0; 6]);
        assert!(matches!(
            decode(&data, PixelLayout::Rgb8),
            Err(BitmapError::UnsupportedImageType { found: 3 })
        ));
    }

    #[test]
    fn rle_decodes() {
        let data = file(header(10, 32), &[0x81, 10, 20, 30, 255]);
        assert_eq!(
            decode(&data, PixelLayout::Rgba8).unwrap(),
            [30, 20, 10, 255, 30, 20, 10, 255]
        );
    }

    #[test]
    fn mapped_8_and_16_bit_indices() {
        let map = [1, 2, 3, 4, 5, 6];
        let mut tail = map.to_vec();
        tail.extend_from_slice(&[1, 0]);
        let data = file(mapped_header(8, 2, 0), &tail);
        assert_eq!(decode(&data, PixelLayout::Bgr8).unwrap(), [4, 5, 6, 1, 2, 3]);

        let mut tail = map.to_vec();
        tail.extend_from_slice(&[0, 0, 1, 0]);
        let data = file(mapped_header(16, 2, 0), &tail);
        assert_eq!(decode(&data, PixelLayout::Rgb8).unwrap(), [3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn mapped_honors_origin() {
        let mut tail = vec![1, 2, 3, 4, 5, 6];
        tail.extend_from_slice(&[5, 6]);
        let data = file(mapped_header(8, 2, 5), &tail);
        assert_eq!(decode(&data, PixelLayout::Bgr8).unwrap(), [1, 2, 3, 4, 5, 6]);

        let mut tail = vec![1, 2, 3, 4, 5, 6];
        tail.extend_from_slice(&[4, 5]);
        let data = file(mapped_header(8, 2, 5), &tail);
        assert!(matches!(
            decode(&data, PixelLayout::Bgr8),
            Err(BitmapError::PaletteIndexOutOfRange { index: 4, len: 2 })
        ));
    }

    #[test]
    fn mapped_index_out_of_range() {
        let mut tail = vec![1, 2, 3];
        tail.extend_from_slice(&[0, 1]);
        let data = file(mapped_header(8, 1, 0), &tail);
        let err = decode(&data, PixelLayout::Rgb8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn truncated_color_map() {
        let data = file(mapped_header(8, 4, 0), &[0; 5]);
        assert!(matches!(
            parse(&data),
            Err(BitmapError::TruncatedColorMap {
                needed: 12,
                remaining: 5
            })
        ));
    }

    #[test]
    fn palette_index_width() {
        let data = file(mapped_header(24, 1, 0), &[0; 9]);
        assert!(matches!(
            parse(&data),
            Err(BitmapError::UnsupportedPaletteIndexWidth { bits: 24 })
        ));
    }

    #[test]
    fn palette_index_space() {
        // 8 bits x 2 pixels = 16 < 20 data bytes after the map
        let data = file(mapped_header(8, 1, 0), &[0; 3 + 20]);
        assert!(matches!(
            parse(&data),
            Err(BitmapError::PaletteIndexSpaceTooSmall {
                bits: 8,
                pixels: 2,
                data: 20
            })
        ));
    }

    #[test]
    fn mapped_type_without_map() {
        let data = file(header(1, 24), &[0; 6]);
        assert!(matches!(parse(&data), Err(BitmapError::MissingColorMap)));
        assert!(matches!(
            super::super::probe(&data),
            Err(BitmapError::MissingColorMap)
        ));
    }

    #[test]
    fn empty_declared_map_is_no_map() {
        let h = TgaHeader {
            colormap_type: 1,
            colormap_entry_size: 24,
            ..header(2, 24)
        };
        let data = file(h, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(decode(&data, PixelLayout::Bgr8).unwrap(), [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn true_color_with_map_is_rejected() {
        let h = TgaHeader {
            image_type: 2,
            ..mapped_header(8, 1, 0)
        };
        let data = file(h, &[1, 2, 3, 0, 0]);
        assert!(matches!(
            decode(&data, PixelLayout::Rgb8),
            Err(BitmapError::UnsupportedPixelSize { bytes: 1 })
        ));
    }
}
