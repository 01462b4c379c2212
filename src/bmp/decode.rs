//! Pixel extraction for uncompressed 24- and 32-bit bitmaps.

use alloc::vec::Vec;

use super::header::{BI_RGB, BmpHeader};
use crate::cursor::ByteCursor;
use crate::error::BitmapError;
use crate::pixel::{PixelLayout, convert_bytes};

/// Extract rows in stored order, dropping row padding, converted to `layout`.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &BmpHeader,
    layout: PixelLayout,
) -> Result<Vec<u8>, BitmapError> {
    let native = match (header.bits_per_pixel, header.compression) {
        (24, BI_RGB) => PixelLayout::Bgr8,
        (32, BI_RGB) => PixelLayout::Bgra8,
        (bits, compression) => {
            return Err(BitmapError::UnsupportedBmpVariant { bits, compression });
        }
    };

    let w = header.width as usize;
    let h = header.height as usize;
    if h == 0 {
        return Err(BitmapError::InvalidDimensions {
            width: i64::from(header.width),
            height: 0,
        });
    }
    let row_bytes = w
        .checked_mul(native.bytes_per_pixel())
        .ok_or(BitmapError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;
    let stride = (row_bytes + 3) & !3;
    let total = stride
        .checked_mul(h)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: header.width,
            height: header.height,
        })?;

    let mut cursor = ByteCursor::new(data);
    cursor.skip(header.pixel_offset)?;
    // The last row's padding is often missing.
    let needed = total - (stride - row_bytes);
    if cursor.remaining() < needed {
        return Err(BitmapError::UnexpectedEof {
            needed,
            remaining: cursor.remaining(),
        });
    }

    if stride == row_bytes {
        let raw = cursor.read_bytes(needed)?;
        return Ok(convert_bytes(raw, native, layout));
    }

    let mut raw = Vec::with_capacity(row_bytes * h);
    for row in 0..h {
        raw.extend_from_slice(cursor.read_bytes(row_bytes)?);
        if row + 1 < h {
            cursor.skip(stride - row_bytes)?;
        }
    }
    Ok(convert_bytes(&raw, native, layout))
}
