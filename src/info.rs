use crate::error::BitmapError;
use crate::image::Orientation;

/// Container format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Bmp,
    Tga,
}

impl ImageFormat {
    /// Guess the format from leading bytes.
    ///
    /// TGA has no magic number, so anything that does not start with "BM"
    /// is taken to be TGA.
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(b"BM") {
            Self::Bmp
        } else {
            Self::Tga
        }
    }
}

/// Header facts gathered without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    /// Stored bits per pixel. For color-mapped TGA this is the entry depth,
    /// not the index width.
    pub bits_per_pixel: u16,
    /// Row order of the stored pixels.
    pub orientation: Orientation,
}

impl ImageInfo {
    /// Detect the format and validate its header.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        match ImageFormat::detect(data) {
            #[cfg(feature = "bmp")]
            ImageFormat::Bmp => crate::bmp::probe(data),
            #[cfg(feature = "tga")]
            ImageFormat::Tga => crate::tga::probe(data),
            #[allow(unreachable_patterns)]
            format => Err(BitmapError::UnsupportedFormat { format }),
        }
    }
}
