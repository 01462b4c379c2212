//! The four fixed pixel layouts and the conversion matrix between them.
//!
//! Typed pixels are the `rgb` crate structs; [`Pixel`] gives them a common
//! RGBA view so every `(from, to)` pair is a monomorphized loop. The runtime
//! [`convert_bytes`] picks one of those loops once per call.

use alloc::vec::Vec;
use core::cmp::Ordering;

use rgb::alt::{BGR8, BGRA8};
use rgb::{RGB8, RGBA8};

/// Pixel memory layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 3 channels, 8-bit BGR (TGA/BMP on-disk order).
    Bgr8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// 4 channels, 8-bit BGRA (TGA/BMP on-disk order).
    Bgra8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 => 4,
        }
    }

    /// Whether the layout carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Rgba8 | Self::Bgra8)
    }

    /// The BGR/BGRA layout of the same depth, as stored in TGA and BMP files.
    pub fn tga_native(&self) -> PixelLayout {
        if self.has_alpha() { Self::Bgra8 } else { Self::Bgr8 }
    }

    /// The on-disk layout for a pixel of `bytes` bytes, if there is one.
    pub(crate) fn native_for_size(bytes: usize) -> Option<PixelLayout> {
        match bytes {
            3 => Some(Self::Bgr8),
            4 => Some(Self::Bgra8),
            _ => None,
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for rgb::RGB8 {}
    impl Sealed for rgb::alt::BGR8 {}
    impl Sealed for rgb::RGBA8 {}
    impl Sealed for rgb::alt::BGRA8 {}
}

/// A pixel in one of the four fixed layouts.
///
/// `to_rgba` widens 24-bit pixels with an opaque alpha; `from_rgba` drops
/// alpha for 24-bit pixels. Converting through these two is the whole matrix.
pub trait Pixel: sealed::Sealed + Copy + PartialEq + core::fmt::Debug + 'static {
    /// Runtime tag of this type.
    const LAYOUT: PixelLayout;
    /// Size in bytes, no padding.
    const BYTES: usize;

    /// Channels as `[r, g, b, a]`.
    fn to_rgba(self) -> [u8; 4];
    /// Build from `[r, g, b, a]`.
    fn from_rgba(rgba: [u8; 4]) -> Self;
    /// Read from the first `BYTES` bytes of `bytes`, in field order.
    fn read(bytes: &[u8]) -> Self;
    /// Append `BYTES` bytes in field order.
    fn write(self, out: &mut Vec<u8>);
}

impl Pixel for RGB8 {
    const LAYOUT: PixelLayout = PixelLayout::Rgb8;
    const BYTES: usize = 3;

    #[inline]
    fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, u8::MAX]
    }
    #[inline]
    fn from_rgba([r, g, b, _]: [u8; 4]) -> Self {
        RGB8 { r, g, b }
    }
    #[inline]
    fn read(bytes: &[u8]) -> Self {
        RGB8 {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
        }
    }
    #[inline]
    fn write(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.r, self.g, self.b]);
    }
}

impl Pixel for BGR8 {
    const LAYOUT: PixelLayout = PixelLayout::Bgr8;
    const BYTES: usize = 3;

    #[inline]
    fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, u8::MAX]
    }
    #[inline]
    fn from_rgba([r, g, b, _]: [u8; 4]) -> Self {
        BGR8 { b, g, r }
    }
    #[inline]
    fn read(bytes: &[u8]) -> Self {
        BGR8 {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
        }
    }
    #[inline]
    fn write(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.b, self.g, self.r]);
    }
}

impl Pixel for RGBA8 {
    const LAYOUT: PixelLayout = PixelLayout::Rgba8;
    const BYTES: usize = 4;

    #[inline]
    fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
    #[inline]
    fn from_rgba([r, g, b, a]: [u8; 4]) -> Self {
        RGBA8 { r, g, b, a }
    }
    #[inline]
    fn read(bytes: &[u8]) -> Self {
        RGBA8 {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: bytes[3],
        }
    }
    #[inline]
    fn write(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.r, self.g, self.b, self.a]);
    }
}

impl Pixel for BGRA8 {
    const LAYOUT: PixelLayout = PixelLayout::Bgra8;
    const BYTES: usize = 4;

    #[inline]
    fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
    #[inline]
    fn from_rgba([r, g, b, a]: [u8; 4]) -> Self {
        BGRA8 { b, g, r, a }
    }
    #[inline]
    fn read(bytes: &[u8]) -> Self {
        BGRA8 {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
            a: bytes[3],
        }
    }
    #[inline]
    fn write(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&[self.b, self.g, self.r, self.a]);
    }
}

/// Pixels with an alpha channel, usable as the foreground of [`blend_over`].
pub trait AlphaPixel: Pixel {}
impl AlphaPixel for RGBA8 {}
impl AlphaPixel for BGRA8 {}

/// Pixels without alpha, usable as the background of [`blend_over`].
pub trait OpaquePixel: Pixel {}
impl OpaquePixel for RGB8 {}
impl OpaquePixel for BGR8 {}

/// Convert one pixel between layouts.
#[inline]
pub fn convert<F: Pixel, T: Pixel>(from: F) -> T {
    T::from_rgba(from.to_rgba())
}

/// Convert a pixel slice, allocating the output once. Order is preserved.
pub fn convert_slice<F: Pixel, T: Pixel>(from: &[F]) -> Vec<T> {
    from.iter().map(|&p| convert(p)).collect()
}

/// Order pixels by R, then G, then B, then A.
pub fn compare<P: Pixel>(a: &P, b: &P) -> Ordering {
    a.to_rgba().cmp(&b.to_rgba())
}

/// Deduplication key: two pixels share a key iff their RGBA32 forms are identical.
#[inline]
pub fn color_key<P: Pixel>(p: P) -> u32 {
    u32::from_le_bytes(p.to_rgba())
}

/// Composite a 32-bit pixel over an opaque background.
///
/// Per channel: `bg * (1 - a/255) + fg * (a/255)`, rounded to nearest.
pub fn blend_over<F: AlphaPixel, B: OpaquePixel>(fg: F, bg: B) -> B {
    let [fr, fg_, fb, a] = fg.to_rgba();
    let [br, bg_, bb, _] = bg.to_rgba();
    let a = u32::from(a);
    let lerp = |f: u8, b: u8| -> u8 {
        ((u32::from(b) * (255 - a) + u32::from(f) * a + 127) / 255) as u8
    };
    B::from_rgba([lerp(fr, br), lerp(fg_, bg_), lerp(fb, bb), u8::MAX])
}

/// [`blend_over`] for every pixel of `fg` against one background color.
pub fn blend_slice<F: AlphaPixel, B: OpaquePixel>(fg: &[F], bg: B) -> Vec<B> {
    fg.iter().map(|&p| blend_over(p, bg)).collect()
}

fn convert_raw<F: Pixel, T: Pixel>(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() / F::BYTES * T::BYTES);
    for chunk in src.chunks_exact(F::BYTES) {
        convert::<F, T>(F::read(chunk)).write(&mut out);
    }
    out
}

fn convert_raw_from<F: Pixel>(src: &[u8], to: PixelLayout) -> Vec<u8> {
    match to {
        PixelLayout::Rgb8 => convert_raw::<F, RGB8>(src),
        PixelLayout::Bgr8 => convert_raw::<F, BGR8>(src),
        PixelLayout::Rgba8 => convert_raw::<F, RGBA8>(src),
        PixelLayout::Bgra8 => convert_raw::<F, BGRA8>(src),
    }
}

/// Convert packed pixel bytes between any two layouts.
///
/// Trailing bytes that do not form a whole `from` pixel are ignored.
/// Identical layouts copy.
pub fn convert_bytes(src: &[u8], from: PixelLayout, to: PixelLayout) -> Vec<u8> {
    if from == to {
        let whole = src.len() - src.len() % from.bytes_per_pixel();
        return src[..whole].to_vec();
    }
    match from {
        PixelLayout::Rgb8 => convert_raw_from::<RGB8>(src, to),
        PixelLayout::Bgr8 => convert_raw_from::<BGR8>(src, to),
        PixelLayout::Rgba8 => convert_raw_from::<RGBA8>(src, to),
        PixelLayout::Bgra8 => convert_raw_from::<BGRA8>(src, to),
    }
}

/// Read the pixel at `bytes` (laid out as `layout`) as `[r, g, b, a]`.
pub(crate) fn rgba_at(bytes: &[u8], layout: PixelLayout) -> [u8; 4] {
    match layout {
        PixelLayout::Rgb8 => RGB8::read(bytes).to_rgba(),
        PixelLayout::Bgr8 => BGR8::read(bytes).to_rgba(),
        PixelLayout::Rgba8 => RGBA8::read(bytes).to_rgba(),
        PixelLayout::Bgra8 => BGRA8::read(bytes).to_rgba(),
    }
}

/// Write `[r, g, b, a]` into `bytes` laid out as `layout`.
pub(crate) fn store_rgba(bytes: &mut [u8], layout: PixelLayout, [r, g, b, a]: [u8; 4]) {
    match layout {
        PixelLayout::Rgb8 => bytes[..3].copy_from_slice(&[r, g, b]),
        PixelLayout::Bgr8 => bytes[..3].copy_from_slice(&[b, g, r]),
        PixelLayout::Rgba8 => bytes[..4].copy_from_slice(&[r, g, b, a]),
        PixelLayout::Bgra8 => bytes[..4].copy_from_slice(&[b, g, r, a]),
    }
}
