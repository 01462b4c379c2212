use alloc::vec::Vec;

use crate::error::BitmapError;
use crate::hook::{ErrorHandler, Propagate, guard};
use crate::image::Image;
use crate::sink::ByteSink;
use crate::tga::{self, TgaEncoding};

/// Builder for a TGA encode.
///
/// ```
/// use zentarga::{EncodeRequest, Image, PixelLayout, TgaEncoding};
///
/// let image = Image::new(4, 4, PixelLayout::Rgba8)?;
/// let bytes = EncodeRequest::tga(TgaEncoding::Rle).encode(&image)?;
/// assert_eq!(&bytes[12..16], &[4, 0, 4, 0]);
/// # Ok::<(), zentarga::BitmapError>(())
/// ```
pub struct EncodeRequest<'a> {
    encoding: TgaEncoding,
    handler: &'a dyn ErrorHandler,
}

impl<'a> EncodeRequest<'a> {
    pub fn tga(encoding: TgaEncoding) -> Self {
        Self {
            encoding,
            handler: &Propagate,
        }
    }

    /// Route failures through `handler`. A handler that swallows the error
    /// makes [`encode_to`](Self::encode_to) return `Ok(false)` and
    /// [`encode`](Self::encode) return an empty vector.
    pub fn with_error_handler(mut self, handler: &'a dyn ErrorHandler) -> Self {
        self.handler = handler;
        self
    }

    /// Encode into a fresh vector.
    pub fn encode(&self, image: &Image) -> Result<Vec<u8>, BitmapError> {
        let mut out = Vec::new();
        if self.encode_to(image, &mut out)? {
            Ok(out)
        } else {
            Ok(Vec::new())
        }
    }

    /// Encode into `sink`, replacing whatever it held.
    ///
    /// Returns `Ok(true)` on success. On failure the sink is reset to empty
    /// before the handler sees the error.
    pub fn encode_to<S: ByteSink>(&self, image: &Image, sink: &mut S) -> Result<bool, BitmapError> {
        guard(
            self.handler,
            || match tga::encode(image, self.encoding, sink) {
                Ok(()) => Ok(true),
                Err(err) => {
                    // Leave nothing torn behind; the first error wins.
                    let _ = sink.reset();
                    Err(err)
                }
            },
            || false,
        )
    }
}
