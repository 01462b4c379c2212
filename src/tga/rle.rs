//! TGA run-length packets.
//!
//! Each packet starts with a control byte. The low 7 bits plus one give a
//! pixel count `n` in `1..=128`. With the high bit set, one pixel follows and
//! is repeated `n` times; with it clear, `n` literal pixels follow.
//!
//! Pixels are opaque `pixel_size`-byte groups; the codec never looks inside.

use alloc::vec::Vec;

use crate::cursor::ByteCursor;
use crate::error::BitmapError;
use crate::sink::ByteSink;

const RUN_FLAG: u8 = 0x80;
const MAX_PACKET: usize = 128;

/// Compress packed pixels into packets.
///
/// Greedy and single-pass: a run of two or more equal pixels becomes a run
/// packet; otherwise literal pixels are gathered until the next pixel would
/// start a run. Trailing bytes that do not form a whole pixel are ignored.
pub fn compress(pixels: &[u8], pixel_size: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() + pixels.len() / 64 + 1);
    // Vec sinks cannot fail.
    let _ = compress_into(pixels, pixel_size, &mut out);
    out
}

/// [`compress`] into any [`ByteSink`].
pub fn compress_into<S: ByteSink>(
    pixels: &[u8],
    pixel_size: usize,
    sink: &mut S,
) -> Result<(), BitmapError> {
    if pixel_size == 0 {
        return Ok(());
    }
    let n = pixels.len() / pixel_size;
    let at = |i: usize| pixel_at(pixels, pixel_size, i);

    let mut i = 0;
    while i < n {
        let mut run = 1;
        while i + run < n && run < MAX_PACKET && at(i + run) == at(i) {
            run += 1;
        }
        if run >= 2 {
            sink.write(&[(run - 1) as u8 | RUN_FLAG])?;
            sink.write(at(i))?;
            i += run;
            continue;
        }

        let mut count = 1;
        while i + count < n && count < MAX_PACKET {
            let j = i + count;
            if j + 1 < n && at(j) == at(j + 1) {
                break;
            }
            count += 1;
        }
        sink.write(&[(count - 1) as u8])?;
        sink.write(&pixels[i * pixel_size..(i + count) * pixel_size])?;
        i += count;
    }
    Ok(())
}

#[inline]
fn pixel_at(pixels: &[u8], pixel_size: usize, i: usize) -> &[u8] {
    &pixels[i * pixel_size..(i + 1) * pixel_size]
}

/// Expand packets from `src` into exactly `pixel_count` pixels.
pub fn decompress(
    src: &[u8],
    pixel_size: usize,
    pixel_count: usize,
) -> Result<Vec<u8>, BitmapError> {
    decompress_from(&mut ByteCursor::new(src), pixel_size, pixel_count)
}

/// Expand packets read from `cursor`. Whole packets only: a packet that
/// would produce more pixels than are still needed is an error, as is a
/// stream that ends early.
pub(crate) fn decompress_from(
    cursor: &mut ByteCursor<'_>,
    pixel_size: usize,
    pixel_count: usize,
) -> Result<Vec<u8>, BitmapError> {
    // A packet expands to at most MAX_PACKET pixels per input byte.
    let bound = cursor.remaining().saturating_mul(MAX_PACKET);
    let mut out = Vec::with_capacity(pixel_count.saturating_mul(pixel_size).min(bound));
    let mut decoded = 0;
    let truncated = |decoded: usize| BitmapError::TruncatedRleStream {
        decoded,
        expected: pixel_count,
    };

    while decoded < pixel_count {
        let control: u8 = cursor.read_fixed().map_err(|_| truncated(decoded))?;
        let count = usize::from(control & !RUN_FLAG) + 1;
        let remaining = pixel_count - decoded;
        if count > remaining {
            return Err(BitmapError::RlePacketOverrun { count, remaining });
        }

        if control & RUN_FLAG != 0 {
            let pixel = cursor
                .read_bytes(pixel_size)
                .map_err(|_| truncated(decoded))?;
            for _ in 0..count {
                out.extend_from_slice(pixel);
            }
        } else {
            let pixels = cursor
                .read_bytes(count * pixel_size)
                .map_err(|_| truncated(decoded))?;
            out.extend_from_slice(pixels);
        }
        decoded += count;
    }
    Ok(out)
}
