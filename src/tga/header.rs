use alloc::vec::Vec;

use crate::cursor::FixedLayout;
use crate::image::Orientation;

/// Image descriptor bit 5: rows are stored top-first.
pub(crate) const DESC_TOP_ORIGIN: u8 = 0x20;
/// Image descriptor low nibble for 8 alpha bits per pixel.
pub(crate) const DESC_ALPHA_8: u8 = 0x08;

/// TGA image-type codes handled here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ImageType {
    Mapped = 1,
    TrueColor = 2,
    RleTrueColor = 10,
}

impl ImageType {
    pub(crate) fn from_u8(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Mapped),
            2 => Some(Self::TrueColor),
            10 => Some(Self::RleTrueColor),
            _ => None,
        }
    }
}

/// The 18-byte TGA header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TgaHeader {
    pub id_len: u8,
    pub colormap_type: u8,
    pub image_type: u8,
    pub colormap_origin: u16,
    pub colormap_len: u16,
    pub colormap_entry_size: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub descriptor: u8,
}

impl TgaHeader {
    pub(crate) fn orientation(&self) -> Orientation {
        if self.descriptor & DESC_TOP_ORIGIN != 0 {
            Orientation::TopLeft
        } else {
            Orientation::BottomLeft
        }
    }

    /// A zero-length declared map counts as no map.
    pub(crate) fn has_colormap(&self) -> bool {
        self.colormap_type == 1 && self.colormap_len > 0
    }

    pub(crate) fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl FixedLayout for TgaHeader {
    const SIZE: usize = 18;

    fn parse(b: &[u8]) -> Self {
        Self {
            id_len: b[0],
            colormap_type: b[1],
            image_type: b[2],
            colormap_origin: u16::parse(&b[3..]),
            colormap_len: u16::parse(&b[5..]),
            colormap_entry_size: b[7],
            x_origin: u16::parse(&b[8..]),
            y_origin: u16::parse(&b[10..]),
            width: u16::parse(&b[12..]),
            height: u16::parse(&b[14..]),
            bits_per_pixel: b[16],
            descriptor: b[17],
        }
    }

    fn serialize(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.id_len, self.colormap_type, self.image_type]);
        self.colormap_origin.serialize(out);
        self.colormap_len.serialize(out);
        out.push(self.colormap_entry_size);
        self.x_origin.serialize(out);
        self.y_origin.serialize(out);
        self.width.serialize(out);
        self.height.serialize(out);
        out.extend_from_slice(&[self.bits_per_pixel, self.descriptor]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_offsets() {
        let header = TgaHeader {
            id_len: 1,
            colormap_type: 1,
            image_type: 1,
            colormap_origin: 0x0302,
            colormap_len: 0x0504,
            colormap_entry_size: 24,
            x_origin: 7,
            y_origin: 8,
            width: 0x0a09,
            height: 0x0c0b,
            bits_per_pixel: 16,
            descriptor: 0x28,
        };
        let mut out = Vec::new();
        header.serialize(&mut out);
        assert_eq!(out.len(), TgaHeader::SIZE);
        assert_eq!(&out[3..7], &[2, 3, 4, 5]);
        assert_eq!(&out[12..16], &[9, 0x0a, 0x0b, 0x0c]);
        assert_eq!(TgaHeader::parse(&out), header);
        assert_eq!(header.orientation(), Orientation::TopLeft);
    }

    #[test]
    fn empty_map_is_no_map() {
        let header = TgaHeader {
            colormap_type: 1,
            colormap_len: 0,
            ..Default::default()
        };
        assert!(!header.has_colormap());
    }
}
