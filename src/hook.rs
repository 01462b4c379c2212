//! Error-reporting hook for decode/encode entry points.
//!
//! A handler decides what a failed decode or encode turns into. [`Propagate`]
//! (the default) hands the error back to the caller. A handler that swallows
//! the error makes decoders return an empty [`Image`](crate::Image) and
//! encoders report `false` instead.
//!
//! Handlers are passed by reference into each request, so there is no
//! process-wide state. A handler shared across threads must be `Sync`.

use crate::error::BitmapError;

/// Decides the fate of a decode/encode failure.
pub trait ErrorHandler {
    /// Return `Err` to propagate the failure, `Ok(())` to swallow it.
    fn handle(&self, err: BitmapError) -> Result<(), BitmapError>;
}

/// Propagate every failure to the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct Propagate;

impl ErrorHandler for Propagate {
    fn handle(&self, err: BitmapError) -> Result<(), BitmapError> {
        Err(err)
    }
}

/// Swallow every failure without looking at it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silence;

impl ErrorHandler for Silence {
    fn handle(&self, _err: BitmapError) -> Result<(), BitmapError> {
        Ok(())
    }
}

/// Closures observe the failure, then swallow it.
impl<F> ErrorHandler for F
where
    F: Fn(&BitmapError),
{
    fn handle(&self, err: BitmapError) -> Result<(), BitmapError> {
        self(&err);
        Ok(())
    }
}

/// Run `op`; on failure let `handler` decide between propagating and
/// substituting `fallback()`.
pub(crate) fn guard<T>(
    handler: &dyn ErrorHandler,
    op: impl FnOnce() -> Result<T, BitmapError>,
    fallback: impl FnOnce() -> T,
) -> Result<T, BitmapError> {
    match op() {
        Ok(v) => Ok(v),
        Err(err) => {
            let kind = err.kind();
            handler.handle(err)?;
            log::warn!("swallowed {kind:?} codec error");
            Ok(fallback())
        }
    }
}
