use crate::error::BitmapError;
use crate::hook::{ErrorHandler, Propagate, guard};
use crate::image::Image;
use crate::info::ImageFormat;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Builder for a decode of in-memory BMP or TGA bytes.
///
/// ```no_run
/// use zentarga::{DecodeRequest, PixelLayout};
///
/// let data: &[u8] = &[]; // your .bmp or .tga bytes
/// let image = DecodeRequest::new(data)
///     .with_layout(PixelLayout::Rgb8)
///     .decode()?;
/// println!("{}x{}", image.width(), image.height());
/// # Ok::<(), zentarga::BitmapError>(())
/// ```
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    layout: PixelLayout,
    limits: Option<&'a Limits>,
    handler: &'a dyn ErrorHandler,
}

impl<'a> DecodeRequest<'a> {
    /// Decode `data` to RGBA by default, propagating errors.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            layout: PixelLayout::Rgba8,
            limits: None,
            handler: &Propagate,
        }
    }

    /// Layout of the decoded pixels.
    pub fn with_layout(mut self, layout: PixelLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Route failures through `handler`. A handler that swallows the error
    /// makes the decode return [`Image::empty`].
    pub fn with_error_handler(mut self, handler: &'a dyn ErrorHandler) -> Self {
        self.handler = handler;
        self
    }

    /// Decode, detecting the format from the leading bytes.
    pub fn decode(self) -> Result<Image, BitmapError> {
        let format = ImageFormat::detect(self.data);
        self.run(format)
    }

    /// Decode as BMP.
    pub fn decode_bmp(self) -> Result<Image, BitmapError> {
        self.run(ImageFormat::Bmp)
    }

    /// Decode as TGA.
    pub fn decode_tga(self) -> Result<Image, BitmapError> {
        self.run(ImageFormat::Tga)
    }

    fn run(self, format: ImageFormat) -> Result<Image, BitmapError> {
        let layout = self.layout;
        guard(
            self.handler,
            || dispatch(format, self.data, layout, self.limits),
            || Image::empty(layout),
        )
    }
}

fn dispatch(
    format: ImageFormat,
    data: &[u8],
    layout: PixelLayout,
    limits: Option<&Limits>,
) -> Result<Image, BitmapError> {
    match format {
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => crate::bmp::decode(data, layout, limits),
        #[cfg(feature = "tga")]
        ImageFormat::Tga => crate::tga::decode(data, layout, limits),
        #[allow(unreachable_patterns)]
        format => {
            let _ = (data, layout, limits);
            Err(BitmapError::UnsupportedFormat { format })
        }
    }
}
