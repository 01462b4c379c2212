//! # zentarga
//!
//! BMP and TGA (Truevision Targa) image decoding, TGA encoding, and the
//! conversion matrix between four 8-bit pixel layouts.
//!
//! ## Supported Formats
//!
//! ### BMP (`bmp` feature)
//! - Full validation of the 14-byte file header and 40-byte info header
//! - Pixel decoding of uncompressed 24-bit and 32-bit bitmaps
//!
//! ### TGA (`tga` feature)
//! - Decode: uncompressed true-color (type 2), color-mapped with 8- or
//!   16-bit indices (type 1), RLE true-color (type 10); 24/32-bit pixels
//! - Encode: the same three types, chosen with [`TgaEncoding`]
//!
//! ## Pixel layouts
//!
//! [`PixelLayout`] names RGB, BGR, RGBA and BGRA, 8 bits per channel. Every
//! pair converts: widening sets alpha to 255, narrowing drops it. Typed
//! pixels are the `rgb` crate structs, see [`Pixel`].
//!
//! ## Errors
//!
//! Every failure is a [`BitmapError`]. Entry points take an
//! [`ErrorHandler`]: the default [`Propagate`] returns the error, while
//! [`Silence`] or any `Fn(&BitmapError)` closure swallows it, turning a
//! failed decode into [`Image::empty`] and a failed encode into `false`.
//!
//! ## Non-Goals
//!
//! - Compressed, paletted or bitfield BMP pixel decoding (headers are validated)
//! - BMP encoding
//! - Color management beyond [`blend_over`]
//!
//! ## Usage
//!
//! ```no_run
//! use zentarga::{DecodeRequest, EncodeRequest, ImageInfo, PixelLayout, TgaEncoding};
//!
//! let data: &[u8] = &[]; // your BMP/TGA bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.format);
//!
//! // Decode
//! let image = DecodeRequest::new(data)
//!     .with_layout(PixelLayout::Rgba8)
//!     .decode()?;
//!
//! // Re-encode as RLE TGA
//! let tga = EncodeRequest::tga(TgaEncoding::Rle).encode(&image)?;
//! # Ok::<(), zentarga::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod cursor;
mod error;
mod hook;
mod image;
mod info;
mod limits;
mod pixel;
mod sink;

#[cfg(feature = "bmp")]
mod bmp;

#[cfg(feature = "tga")]
pub mod tga;

mod decode;
#[cfg(feature = "tga")]
mod encode;

#[cfg(feature = "std")]
mod fs;

// Re-exports
pub use cursor::{ByteCursor, FixedLayout};
pub use decode::DecodeRequest;
#[cfg(feature = "tga")]
pub use encode::EncodeRequest;
pub use error::{BitmapError, ErrorKind};
pub use hook::{ErrorHandler, Propagate, Silence};
pub use image::{Image, Orientation};
pub use info::{ImageFormat, ImageInfo};
pub use limits::Limits;
pub use pixel::{
    AlphaPixel, OpaquePixel, Pixel, PixelLayout, blend_over, blend_slice, color_key, compare,
    convert, convert_bytes, convert_slice,
};
pub use sink::ByteSink;
#[cfg(feature = "std")]
pub use sink::FileSink;
#[cfg(feature = "tga")]
pub use tga::{ColorTable, TgaEncoding};

#[cfg(all(feature = "std", feature = "bmp"))]
pub use fs::load_bmp;
#[cfg(all(feature = "std", feature = "tga"))]
pub use fs::{load_tga, save_tga};

/// Decode BMP or TGA bytes into `layout`, detecting the format.
pub fn decode(data: &[u8], layout: PixelLayout) -> Result<Image, BitmapError> {
    DecodeRequest::new(data).with_layout(layout).decode()
}

/// Decode BMP bytes into `layout`.
#[cfg(feature = "bmp")]
pub fn decode_bmp(data: &[u8], layout: PixelLayout) -> Result<Image, BitmapError> {
    DecodeRequest::new(data).with_layout(layout).decode_bmp()
}

/// Decode TGA bytes into `layout`.
#[cfg(feature = "tga")]
pub fn decode_tga(data: &[u8], layout: PixelLayout) -> Result<Image, BitmapError> {
    DecodeRequest::new(data).with_layout(layout).decode_tga()
}

/// Encode `image` as TGA.
#[cfg(feature = "tga")]
pub fn encode_tga(image: &Image, encoding: TgaEncoding) -> Result<alloc::vec::Vec<u8>, BitmapError> {
    EncodeRequest::tga(encoding).encode(image)
}
