//! Path-based entry points.

use std::path::Path;

use crate::decode::DecodeRequest;
use crate::error::BitmapError;
use crate::hook::{ErrorHandler, guard};
use crate::image::Image;
use crate::pixel::PixelLayout;

#[cfg(any(feature = "bmp", feature = "tga"))]
fn read(path: &Path, handler: &dyn ErrorHandler) -> Result<Option<Vec<u8>>, BitmapError> {
    guard(
        handler,
        || {
            let data = std::fs::read(path)?;
            log::debug!("read {} bytes from {}", data.len(), path.display());
            Ok(Some(data))
        },
        || None,
    )
}

/// Read and decode a BMP file.
///
/// An unreadable file goes through `handler` like any decode failure.
#[cfg(feature = "bmp")]
pub fn load_bmp(
    path: impl AsRef<Path>,
    layout: PixelLayout,
    handler: &dyn ErrorHandler,
) -> Result<Image, BitmapError> {
    let Some(data) = read(path.as_ref(), handler)? else {
        return Ok(Image::empty(layout));
    };
    DecodeRequest::new(&data)
        .with_layout(layout)
        .with_error_handler(handler)
        .decode_bmp()
}

/// Read and decode a TGA file.
#[cfg(feature = "tga")]
pub fn load_tga(
    path: impl AsRef<Path>,
    layout: PixelLayout,
    handler: &dyn ErrorHandler,
) -> Result<Image, BitmapError> {
    let Some(data) = read(path.as_ref(), handler)? else {
        return Ok(Image::empty(layout));
    };
    DecodeRequest::new(&data)
        .with_layout(layout)
        .with_error_handler(handler)
        .decode_tga()
}

/// Encode `image` as TGA into the file at `path`, creating or truncating it.
///
/// Returns `Ok(false)` when `handler` swallowed a failure. A failed encode
/// leaves an empty file behind.
#[cfg(feature = "tga")]
pub fn save_tga(
    image: &Image,
    path: impl AsRef<Path>,
    encoding: crate::TgaEncoding,
    handler: &dyn ErrorHandler,
) -> Result<bool, BitmapError> {
    let path = path.as_ref();
    let Some(mut sink) = guard(handler, || crate::sink::FileSink::create(path).map(Some), || None)?
    else {
        return Ok(false);
    };
    let written = crate::EncodeRequest::tga(encoding)
        .with_error_handler(handler)
        .encode_to(image, &mut sink)?;
    if !written {
        return Ok(false);
    }
    guard(handler, || sink.flush().map(|()| true), || false)
}
