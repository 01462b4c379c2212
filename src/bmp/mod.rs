//! BMP decoder (internal).
//!
//! Every bitmap gets full header validation. Pixel extraction covers
//! uncompressed 24- and 32-bit bitmaps; rows are kept in stored order and the
//! sign of the height becomes the image orientation.
//!
//! Use top-level [`crate::decode_bmp`] or [`crate::DecodeRequest`].

mod decode;
mod header;

use crate::error::BitmapError;
use crate::image::Image;
use crate::info::{ImageFormat, ImageInfo};
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Validate headers and decode pixels into `layout`.
pub(crate) fn decode(
    data: &[u8],
    layout: PixelLayout,
    limits: Option<&Limits>,
) -> Result<Image, BitmapError> {
    let header = header::parse_header(data)?;
    if let Some(limits) = limits {
        limits.admit(header.width, header.height, layout)?;
    }
    let pixels = decode::decode_pixels(data, &header, layout)?;
    Ok(Image::from_decoded(
        header.width,
        header.height,
        layout,
        header.orientation,
        pixels,
    ))
}

/// Validate headers only.
pub(crate) fn probe(data: &[u8]) -> Result<ImageInfo, BitmapError> {
    let header = header::parse_header(data)?;
    Ok(ImageInfo {
        width: header.width,
        height: header.height,
        format: ImageFormat::Bmp,
        bits_per_pixel: header.bits_per_pixel,
        orientation: header.orientation,
    })
}
