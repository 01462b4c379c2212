//! Truevision TGA decoder and encoder (internal plumbing).
//!
//! Decoding handles uncompressed true-color (type 2), uncompressed
//! color-mapped (type 1, 8- or 16-bit indices) and RLE true-color (type 10),
//! with 24- or 32-bit pixels. Rows stay in stored order; descriptor bit 5
//! becomes the image orientation.
//!
//! Use top-level [`crate::decode_tga`], [`crate::encode_tga`] or the request
//! builders. The packet codec is public as [`rle`].

mod decode;
mod encode;
mod header;
mod palette;
pub mod rle;

pub use palette::ColorTable;

use crate::error::BitmapError;
use crate::image::Image;
use crate::info::{ImageFormat, ImageInfo};
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::sink::ByteSink;

/// TGA encoding strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TgaEncoding {
    /// Type 2: raw BGR/BGRA pixels.
    Uncompressed,
    /// Type 1: a first-seen-order color table plus 16-bit indices.
    ColorMapped,
    /// Type 10: run-length packets of BGR/BGRA pixels.
    #[default]
    Rle,
}

/// Validate the header and decode pixels into `layout`.
pub(crate) fn decode(
    data: &[u8],
    layout: PixelLayout,
    limits: Option<&Limits>,
) -> Result<Image, BitmapError> {
    let parsed = decode::parse(data)?;
    let header = parsed.header;
    let (width, height) = (u32::from(header.width), u32::from(header.height));
    if let Some(limits) = limits {
        limits.admit(width, height, layout)?;
    }
    let pixels = decode::decode_pixels(parsed, layout)?;
    Ok(Image::from_decoded(
        width,
        height,
        layout,
        header.orientation(),
        pixels,
    ))
}

/// Validate the header only.
pub(crate) fn probe(data: &[u8]) -> Result<ImageInfo, BitmapError> {
    let parsed = decode::parse(data)?;
    let header = parsed.header;
    if header::ImageType::from_u8(header.image_type).is_none() {
        return Err(BitmapError::UnsupportedImageType {
            found: header.image_type,
        });
    }
    Ok(ImageInfo {
        width: u32::from(header.width),
        height: u32::from(header.height),
        format: ImageFormat::Tga,
        bits_per_pixel: (parsed.pixel_size * 8) as u16,
        orientation: header.orientation(),
    })
}

/// Encode `image` into `sink`.
pub(crate) fn encode<S: ByteSink>(
    image: &Image,
    encoding: TgaEncoding,
    sink: &mut S,
) -> Result<(), BitmapError> {
    encode::encode(image, encoding, sink)
}
