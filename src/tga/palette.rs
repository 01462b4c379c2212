use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::error::BitmapError;
use crate::pixel::{PixelLayout, convert_bytes, rgba_at};

/// Largest table a TGA header can describe (`colormap_len` is a u16).
pub(crate) const MAX_COLORS: usize = u16::MAX as usize;

/// A deduplicated color table plus one index per source pixel.
///
/// Entries appear in first-seen order and are stored in the BGR/BGRA layout
/// TGA writes to disk. Every index is below [`ColorTable::len`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<u8>,
    entry_layout: PixelLayout,
    indices: Vec<u16>,
}

impl ColorTable {
    /// Build the table for packed `pixels` in `layout`.
    ///
    /// Pixels are equal when their RGBA32 forms are identical; for 24-bit
    /// layouts that is the RGB triple.
    pub fn build(pixels: &[u8], layout: PixelLayout) -> Result<Self, BitmapError> {
        let bpp = layout.bytes_per_pixel();
        let entry_layout = layout.tga_native();
        let mut seen: BTreeMap<u32, u16> = BTreeMap::new();
        let mut first: Vec<u8> = Vec::new();
        let mut indices = Vec::with_capacity(pixels.len() / bpp);

        for px in pixels.chunks_exact(bpp) {
            let key = u32::from_le_bytes(rgba_at(px, layout));
            let next = seen.len();
            let index = match seen.get(&key) {
                Some(&index) => index,
                None => {
                    if next >= MAX_COLORS {
                        return Err(BitmapError::PaletteOverflow { colors: next + 1 });
                    }
                    seen.insert(key, next as u16);
                    first.extend_from_slice(px);
                    next as u16
                }
            };
            indices.push(index);
        }

        Ok(Self {
            entries: convert_bytes(&first, layout, entry_layout),
            entry_layout,
            indices,
        })
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.entries.len() / self.entry_layout.bytes_per_pixel()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Packed table entries in [`ColorTable::entry_layout`].
    pub fn entries(&self) -> &[u8] {
        &self.entries
    }

    pub fn entry_layout(&self) -> PixelLayout {
        self.entry_layout
    }

    /// One table index per source pixel, in source order.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }
}
