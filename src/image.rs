use alloc::vec;
use alloc::vec::Vec;

use crate::error::BitmapError;
use crate::pixel::{PixelLayout, convert_bytes, rgba_at, store_rgba};

/// Row order of an image's pixel buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The first stored row is the bottom row (TGA and BMP default).
    BottomLeft,
    /// The first stored row is the top row.
    #[default]
    TopLeft,
}

/// A dense, row-major pixel buffer with its dimensions and layout.
///
/// `pixels().len() == width * height * layout.bytes_per_pixel()` always holds.
/// The empty image is 0x0 with no pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pixels: Vec<u8>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) layout: PixelLayout,
    pub orientation: Orientation,
}

impl Image {
    /// A zero-filled image.
    pub fn new(width: u32, height: u32, layout: PixelLayout) -> Result<Self, BitmapError> {
        let len = buffer_len(width, height, layout)?;
        Ok(Self {
            pixels: vec![0u8; len],
            width,
            height,
            layout,
            orientation: Orientation::default(),
        })
    }

    /// Wrap an existing pixel buffer. Its length must match the dimensions exactly.
    pub fn from_pixels(
        width: u32,
        height: u32,
        layout: PixelLayout,
        pixels: Vec<u8>,
    ) -> Result<Self, BitmapError> {
        let needed = buffer_len(width, height, layout)?;
        if pixels.len() != needed {
            return Err(BitmapError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
            layout,
            orientation: Orientation::default(),
        })
    }

    pub(crate) fn from_decoded(
        width: u32,
        height: u32,
        layout: PixelLayout,
        orientation: Orientation,
        pixels: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * layout.bytes_per_pixel()
        );
        Self {
            pixels,
            width,
            height,
            layout,
            orientation,
        }
    }

    /// The 0x0 image returned by a failed decode.
    pub fn empty(layout: PixelLayout) -> Self {
        Self {
            pixels: Vec::new(),
            width: 0,
            height: 0,
            layout,
            orientation: Orientation::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to the pixel data. The length cannot change.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row = match self.orientation {
            Orientation::TopLeft => y,
            Orientation::BottomLeft => self.height - 1 - y,
        };
        let idx = row as usize * self.width as usize + x as usize;
        Some(idx * self.layout.bytes_per_pixel())
    }

    /// Pixel at `(x, y)` (y counted from the top) as `[r, g, b, a]`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.offset(x, y)
            .map(|off| rgba_at(&self.pixels[off..], self.layout))
    }

    /// Set the pixel at `(x, y)` (y counted from the top). Out-of-bounds is a no-op.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(off) = self.offset(x, y) {
            store_rgba(&mut self.pixels[off..], self.layout, rgba);
        }
    }

    /// Fill a rectangle, clipped to the image.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, rgba: [u8; 4]) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                self.set_pixel(px, py, rgba);
            }
        }
    }

    /// Fill a rectangle with transparent black.
    pub fn blank_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.fill_rect(x, y, width, height, [0; 4]);
    }

    /// Copy `src` onto this image with its top-left corner at `(x, y)`, clipped.
    pub fn overwrite(&mut self, x: u32, y: u32, src: &Image) {
        let x_end = x.saturating_add(src.width).min(self.width);
        let y_end = y.saturating_add(src.height).min(self.height);
        for (sy, py) in (y..y_end).enumerate() {
            for (sx, px) in (x..x_end).enumerate() {
                if let Some(rgba) = src.pixel(sx as u32, sy as u32) {
                    self.set_pixel(px, py, rgba);
                }
            }
        }
    }

    /// Reverse the order of rows.
    pub fn vertical_mirror(&mut self) {
        let stride = self.width as usize * self.layout.bytes_per_pixel();
        if stride == 0 {
            return;
        }
        let h = self.height as usize;
        for row in 0..h / 2 {
            let (top, bottom) = self.pixels.split_at_mut((h - 1 - row) * stride);
            top[row * stride..(row + 1) * stride].swap_with_slice(&mut bottom[..stride]);
        }
    }

    /// Reverse the pixels of every row.
    pub fn horizontal_mirror(&mut self) {
        let bpp = self.layout.bytes_per_pixel();
        let stride = self.width as usize * bpp;
        if stride == 0 {
            return;
        }
        for row in self.pixels.chunks_exact_mut(stride) {
            let w = row.len() / bpp;
            for i in 0..w / 2 {
                let (left, right) = row.split_at_mut((w - 1 - i) * bpp);
                left[i * bpp..(i + 1) * bpp].swap_with_slice(&mut right[..bpp]);
            }
        }
    }

    /// Copy into another layout. Widening sets alpha to 255; narrowing drops it.
    pub fn convert(&self, layout: PixelLayout) -> Image {
        Image {
            pixels: convert_bytes(&self.pixels, self.layout, layout),
            width: self.width,
            height: self.height,
            layout,
            orientation: self.orientation,
        }
    }

    /// Reinterpret pixel data as a typed pixel slice.
    ///
    /// Returns [`BitmapError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    pub fn as_pixels<P: crate::Pixel>(&self) -> Result<&[P], BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        use rgb::AsPixels as _;
        if self.layout != P::LAYOUT {
            return Err(BitmapError::LayoutMismatch {
                expected: P::LAYOUT,
                actual: self.layout,
            });
        }
        Ok(self.pixels.as_pixels())
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels, rows top-first.
    ///
    /// Returns [`BitmapError::LayoutMismatch`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::Pixel>(&self) -> Result<imgref::ImgVec<P>, BitmapError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let mut pixels: Vec<P> = self.as_pixels()?.to_vec();
        if self.orientation == Orientation::BottomLeft {
            let w = self.width as usize;
            pixels = pixels.chunks_exact(w.max(1)).rev().flatten().copied().collect();
        }
        Ok(imgref::ImgVec::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }
}

fn buffer_len(width: u32, height: u32, layout: PixelLayout) -> Result<usize, BitmapError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(layout.bytes_per_pixel()))
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}
