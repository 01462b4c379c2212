use alloc::string::String;

/// Broad classification of a [`BitmapError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A header field holds a value the format forbids.
    Malformed,
    /// The input ends before a declared structure does.
    Truncated,
    /// Valid input that this crate does not handle.
    Unsupported,
    /// The sink, the file system or a configured limit refused the operation.
    Resource,
}

/// Errors from BMP/TGA decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("unexpected end of input: need {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    // ── BMP ──────────────────────────────────────────────────────────
    #[error("invalid BMP file header magic {found:#06x}: expected 0x4d42 (\"BM\")")]
    InvalidMagic { found: u16 },

    #[error("BMP file header reserved field is {found:#x}: must be 0")]
    ReservedFieldNonzero { found: u32 },

    #[error("BMP pixel data offset {offset} exceeds image space ({remaining} bytes after headers)")]
    OffsetOutOfRange { offset: u32, remaining: usize },

    #[error("BMP file size field is {declared}, actual size is {actual}")]
    SizeMismatch { declared: u32, actual: usize },

    #[error("invalid dimensions {width}x{height}: both must be > 0")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("BMP height {height} is negative with compression {compression}: compressed bitmaps must be bottom-up")]
    NegativeHeightCompressed { height: i32, compression: u32 },

    #[error("BMP planes field is {found}, expected 1")]
    InvalidPlanes { found: u16 },

    #[error("BMP bit count {found} is not one of 1, 4, 8, 16, 24, 32")]
    InvalidBitcount { found: u16 },

    #[error("BMP compression {compression} is not valid for {bits} bits per pixel")]
    InvalidCompression { bits: u16, compression: u32 },

    #[error("BMP variant not decoded: {bits} bits per pixel, compression {compression}")]
    UnsupportedBmpVariant { bits: u16, compression: u32 },

    // ── TGA ──────────────────────────────────────────────────────────
    #[error("TGA color map needs {needed} bytes, {remaining} remaining")]
    TruncatedColorMap { needed: usize, remaining: usize },

    #[error("TGA pixel size of {bytes} bytes is unsupported: expected 3 or 4")]
    UnsupportedPixelSize { bytes: usize },

    #[error("TGA palette index width {bits} is unsupported: expected 8 or 16")]
    UnsupportedPaletteIndexWidth { bits: u8 },

    #[error("TGA palette index space ({bits} bits x {pixels} pixels) is smaller than {data} data bytes")]
    PaletteIndexSpaceTooSmall { bits: u8, pixels: usize, data: usize },

    #[error("TGA color-mapped image type declared without a color map")]
    MissingColorMap,

    #[error("TGA palette index {index} is outside the {len}-entry color map")]
    PaletteIndexOutOfRange { index: usize, len: usize },

    #[error("TGA pixel data needs {needed} bytes, {remaining} remaining")]
    TruncatedPixelData { needed: usize, remaining: usize },

    #[error("TGA RLE stream ended after {decoded} of {expected} pixels")]
    TruncatedRleStream { decoded: usize, expected: usize },

    #[error("TGA RLE packet of {count} pixels overruns the {remaining} pixels left")]
    RlePacketOverrun { count: usize, remaining: usize },

    #[error("TGA image type {found} is unsupported: expected 1, 2 or 10")]
    UnsupportedImageType { found: u8 },

    #[error("color table of {colors} entries exceeds the 65535-entry TGA limit")]
    PaletteOverflow { colors: usize },

    // ── Shared ───────────────────────────────────────────────────────
    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelLayout,
        actual: crate::PixelLayout,
    },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("{format:?} support is not compiled in")]
    UnsupportedFormat { format: crate::ImageFormat },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("cannot cancel {requested} bytes: only {written} written")]
    CancelTooLarge { requested: usize, written: usize },

    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BitmapError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        use BitmapError::*;
        match self {
            InvalidMagic { .. }
            | ReservedFieldNonzero { .. }
            | InvalidDimensions { .. }
            | NegativeHeightCompressed { .. }
            | InvalidPlanes { .. }
            | InvalidBitcount { .. }
            | InvalidCompression { .. }
            | MissingColorMap
            | PaletteIndexOutOfRange { .. }
            | PaletteIndexSpaceTooSmall { .. }
            | RlePacketOverrun { .. } => ErrorKind::Malformed,

            UnexpectedEof { .. }
            | OffsetOutOfRange { .. }
            | SizeMismatch { .. }
            | TruncatedColorMap { .. }
            | TruncatedPixelData { .. }
            | TruncatedRleStream { .. } => ErrorKind::Truncated,

            UnsupportedBmpVariant { .. }
            | UnsupportedPixelSize { .. }
            | UnsupportedPaletteIndexWidth { .. }
            | UnsupportedImageType { .. }
            | PaletteOverflow { .. }
            | LayoutMismatch { .. }
            | UnsupportedFormat { .. }
            | DimensionsTooLarge { .. } => ErrorKind::Unsupported,

            BufferTooSmall { .. } | LimitExceeded(_) | CancelTooLarge { .. } => {
                ErrorKind::Resource
            }

            #[cfg(feature = "std")]
            Io(_) => ErrorKind::Resource,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(
            BitmapError::InvalidMagic { found: 0 }.kind(),
            ErrorKind::Malformed
        );
        assert_eq!(
            BitmapError::TruncatedRleStream {
                decoded: 1,
                expected: 2
            }
            .kind(),
            ErrorKind::Truncated
        );
        assert_eq!(
            BitmapError::UnsupportedImageType { found: 3 }.kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            BitmapError::CancelTooLarge {
                requested: 5,
                written: 1
            }
            .kind(),
            ErrorKind::Resource
        );
    }

    #[test]
    fn messages_name_the_field() {
        let msg = alloc::format!("{}", BitmapError::InvalidPlanes { found: 3 });
        assert!(msg.contains("planes"));
        assert!(msg.contains('3'));
    }
}
