//! Caps on what a single decode may allocate.

use alloc::format;

use crate::error::BitmapError;
use crate::pixel::PixelLayout;

/// Caps checked once the header is validated and before any pixel buffer
/// exists. `None` leaves that quantity unbounded.
///
/// ```no_run
/// use zentarga::{DecodeRequest, Limits};
///
/// let limits = Limits {
///     max_pixels: Some(4096 * 4096),
///     ..Limits::default()
/// };
/// let data: &[u8] = &[]; // untrusted upload
/// let _image = DecodeRequest::new(data).with_limits(&limits).decode()?;
/// # Ok::<(), zentarga::BitmapError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Width times height.
    pub max_pixels: Option<u64>,
    /// Size of the decoded buffer in the requested layout.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Admit a `width`x`height` decode into `layout`, or name the first cap
    /// it breaks.
    pub(crate) fn admit(
        &self,
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Result<(), BitmapError> {
        let pixels = u64::from(width) * u64::from(height);
        let bytes = pixels
            .checked_mul(layout.bytes_per_pixel() as u64)
            .filter(|&bytes| usize::try_from(bytes).is_ok())
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;

        within("width", u64::from(width), self.max_width.map(u64::from))?;
        within("height", u64::from(height), self.max_height.map(u64::from))?;
        within("pixel count", pixels, self.max_pixels)?;
        within("output size", bytes, self.max_memory_bytes)
    }
}

fn within(what: &str, value: u64, cap: Option<u64>) -> Result<(), BitmapError> {
    match cap {
        Some(cap) if value > cap => Err(BitmapError::LimitExceeded(format!(
            "{what} {value} exceeds limit {cap}"
        ))),
        _ => Ok(()),
    }
}
