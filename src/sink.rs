//! Append-only byte destinations used by the encoders.

use alloc::vec::Vec;

use crate::cursor::FixedLayout;
use crate::error::BitmapError;

/// Destination for encoded bytes. Tracks the written length and can cancel
/// a suffix of what was written.
pub trait ByteSink {
    /// Append `bytes`.
    fn write(&mut self, bytes: &[u8]) -> Result<(), BitmapError>;

    /// Total bytes currently written.
    fn written(&self) -> usize;

    /// Drop the last `n` written bytes. Fails if `n > written()`.
    fn cancel(&mut self, n: usize) -> Result<(), BitmapError>;

    /// Drop everything written so far.
    fn reset(&mut self) -> Result<(), BitmapError> {
        self.cancel(self.written())
    }

    /// Append a fixed record byte-for-byte.
    fn write_typed<T: FixedLayout>(&mut self, value: &T) -> Result<(), BitmapError>
    where
        Self: Sized,
    {
        let mut buf = Vec::with_capacity(T::SIZE);
        value.serialize(&mut buf);
        self.write(&buf)
    }
}

fn check_cancel(n: usize, written: usize) -> Result<(), BitmapError> {
    if n > written {
        return Err(BitmapError::CancelTooLarge {
            requested: n,
            written,
        });
    }
    Ok(())
}

impl ByteSink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), BitmapError> {
        self.extend_from_slice(bytes);
        Ok(())
    }

    fn written(&self) -> usize {
        self.len()
    }

    fn cancel(&mut self, n: usize) -> Result<(), BitmapError> {
        check_cancel(n, self.len())?;
        self.truncate(self.len() - n);
        Ok(())
    }
}

#[cfg(feature = "std")]
pub use file::FileSink;

#[cfg(feature = "std")]
mod file {
    use std::fs::File;
    use std::io::{BufWriter, Seek, SeekFrom, Write};
    use std::path::Path;

    use super::{ByteSink, check_cancel};
    use crate::error::BitmapError;

    /// File-backed sink. Cancelling truncates the file.
    pub struct FileSink {
        out: BufWriter<File>,
        written: usize,
    }

    impl FileSink {
        /// Create (or truncate) the file at `path`.
        pub fn create(path: impl AsRef<Path>) -> Result<Self, BitmapError> {
            let file = File::create(path)?;
            Ok(Self {
                out: BufWriter::new(file),
                written: 0,
            })
        }

        /// Flush buffered bytes to the file.
        pub fn flush(&mut self) -> Result<(), BitmapError> {
            self.out.flush()?;
            Ok(())
        }
    }

    impl ByteSink for FileSink {
        fn write(&mut self, bytes: &[u8]) -> Result<(), BitmapError> {
            self.out.write_all(bytes)?;
            self.written += bytes.len();
            Ok(())
        }

        fn written(&self) -> usize {
            self.written
        }

        fn cancel(&mut self, n: usize) -> Result<(), BitmapError> {
            check_cancel(n, self.written)?;
            self.written -= n;
            self.out.flush()?;
            let file = self.out.get_mut();
            file.set_len(self.written as u64)?;
            file.seek(SeekFrom::Start(self.written as u64))?;
            Ok(())
        }
    }

    impl Drop for FileSink {
        fn drop(&mut self) {
            let _ = self.out.flush();
        }
    }
}
