//! BMP file header + BITMAPINFOHEADER records and their validation.

use alloc::vec::Vec;

use crate::cursor::{ByteCursor, FixedLayout};
use crate::error::BitmapError;
use crate::image::Orientation;

/// "BM" read as a little-endian u16.
pub(crate) const BMP_MAGIC: u16 = 0x4d42;

pub(crate) const BI_RGB: u32 = 0;
pub(crate) const BI_RLE8: u32 = 1;
pub(crate) const BI_RLE4: u32 = 2;
/// Uncompressed with channel bit masks, legal at 16 and 32 bpp. Shares its
/// code with RLE8, which only applies to paletted depths.
pub(crate) const BI_BITFIELDS: u32 = 1;

/// 14-byte file header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FileHeader {
    pub magic: u16,
    pub file_size: u32,
    pub reserved: u32,
    pub pixel_offset: u32,
}

impl FixedLayout for FileHeader {
    const SIZE: usize = 14;

    fn parse(b: &[u8]) -> Self {
        Self {
            magic: u16::parse(&b[0..]),
            file_size: u32::parse(&b[2..]),
            reserved: u32::parse(&b[6..]),
            pixel_offset: u32::parse(&b[10..]),
        }
    }

    fn serialize(&self, out: &mut Vec<u8>) {
        self.magic.serialize(out);
        self.file_size.serialize(out);
        self.reserved.serialize(out);
        self.pixel_offset.serialize(out);
    }
}

/// 40-byte BITMAPINFOHEADER.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub compressed_size: u32,
    pub x_ppm: i32,
    pub y_ppm: i32,
    pub palette_colors: u32,
    pub important_colors: u32,
}

impl FixedLayout for InfoHeader {
    const SIZE: usize = 40;

    fn parse(b: &[u8]) -> Self {
        Self {
            header_size: u32::parse(&b[0..]),
            width: i32::parse(&b[4..]),
            height: i32::parse(&b[8..]),
            planes: u16::parse(&b[12..]),
            bits_per_pixel: u16::parse(&b[14..]),
            compression: u32::parse(&b[16..]),
            compressed_size: u32::parse(&b[20..]),
            x_ppm: i32::parse(&b[24..]),
            y_ppm: i32::parse(&b[28..]),
            palette_colors: u32::parse(&b[32..]),
            important_colors: u32::parse(&b[36..]),
        }
    }

    fn serialize(&self, out: &mut Vec<u8>) {
        self.header_size.serialize(out);
        self.width.serialize(out);
        self.height.serialize(out);
        self.planes.serialize(out);
        self.bits_per_pixel.serialize(out);
        self.compression.serialize(out);
        self.compressed_size.serialize(out);
        self.x_ppm.serialize(out);
        self.y_ppm.serialize(out);
        self.palette_colors.serialize(out);
        self.important_colors.serialize(out);
    }
}

/// Validated BMP header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BmpHeader {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub pixel_offset: usize,
    pub orientation: Orientation,
}

fn compression_allowed(bits: u16, compression: u32) -> bool {
    match bits {
        1 | 4 | 8 => matches!(compression, BI_RGB | BI_RLE8 | BI_RLE4),
        16 | 32 => matches!(compression, BI_RGB | BI_BITFIELDS),
        // 24 bpp has no compression constraint.
        24 => true,
        _ => false,
    }
}

/// Read both headers and apply every structural check, in file order.
pub(crate) fn parse_header(data: &[u8]) -> Result<BmpHeader, BitmapError> {
    let mut cursor = ByteCursor::new(data);
    let file: FileHeader = cursor.read_fixed()?;
    let info: InfoHeader = cursor.read_fixed()?;

    if file.magic != BMP_MAGIC {
        return Err(BitmapError::InvalidMagic { found: file.magic });
    }
    if file.reserved != 0 {
        return Err(BitmapError::ReservedFieldNonzero {
            found: file.reserved,
        });
    }
    let gap = (file.pixel_offset as usize).checked_sub(FileHeader::SIZE + InfoHeader::SIZE);
    if gap.is_none_or(|gap| gap > cursor.remaining()) {
        return Err(BitmapError::OffsetOutOfRange {
            offset: file.pixel_offset,
            remaining: cursor.remaining(),
        });
    }
    if file.file_size as usize != cursor.position() + cursor.remaining() {
        return Err(BitmapError::SizeMismatch {
            declared: file.file_size,
            actual: data.len(),
        });
    }

    if info.width <= 0 {
        return Err(BitmapError::InvalidDimensions {
            width: i64::from(info.width),
            height: i64::from(info.height),
        });
    }
    if info.height < 0 && info.compression != BI_RGB {
        return Err(BitmapError::NegativeHeightCompressed {
            height: info.height,
            compression: info.compression,
        });
    }
    if info.planes != 1 {
        return Err(BitmapError::InvalidPlanes { found: info.planes });
    }
    if !matches!(info.bits_per_pixel, 1 | 4 | 8 | 16 | 24 | 32) {
        return Err(BitmapError::InvalidBitcount {
            found: info.bits_per_pixel,
        });
    }
    if !compression_allowed(info.bits_per_pixel, info.compression) {
        return Err(BitmapError::InvalidCompression {
            bits: info.bits_per_pixel,
            compression: info.compression,
        });
    }

    let orientation = if info.height > 0 {
        Orientation::BottomLeft
    } else {
        Orientation::TopLeft
    };
    let header = BmpHeader {
        width: info.width.unsigned_abs(),
        height: info.height.unsigned_abs(),
        bits_per_pixel: info.bits_per_pixel,
        compression: info.compression,
        pixel_offset: file.pixel_offset as usize,
        orientation,
    };
    log::debug!(
        "bmp: {}x{} bpp={} compression={} offset={}",
        header.width,
        header.height,
        header.bits_per_pixel,
        header.compression,
        header.pixel_offset
    );
    Ok(header)
}
