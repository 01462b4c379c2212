//! Bounds-checked little-endian reader over a byte slice.

use alloc::vec::Vec;

use crate::error::BitmapError;

/// A fixed-size, padding-free, little-endian record.
pub trait FixedLayout: Sized {
    /// Encoded size in bytes.
    const SIZE: usize;

    /// Parse from exactly `SIZE` bytes.
    fn parse(bytes: &[u8]) -> Self;

    /// Append exactly `SIZE` bytes.
    fn serialize(&self, out: &mut Vec<u8>);
}

impl FixedLayout for u8 {
    const SIZE: usize = 1;
    fn parse(bytes: &[u8]) -> Self {
        bytes[0]
    }
    fn serialize(&self, out: &mut Vec<u8>) {
        out.push(*self);
    }
}

impl FixedLayout for u16 {
    const SIZE: usize = 2;
    fn parse(bytes: &[u8]) -> Self {
        u16::from_le_bytes([bytes[0], bytes[1]])
    }
    fn serialize(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl FixedLayout for u32 {
    const SIZE: usize = 4;
    fn parse(bytes: &[u8]) -> Self {
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
    fn serialize(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl FixedLayout for i32 {
    const SIZE: usize = 4;
    fn parse(bytes: &[u8]) -> Self {
        i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
    fn serialize(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

/// Sequential reader. The offset never passes the end of the buffer; a read
/// that needs more bytes than remain fails and leaves the offset unchanged.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Rewind to the start.
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    fn check(&self, n: usize) -> Result<(), BitmapError> {
        if n > self.remaining() {
            return Err(BitmapError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// View the next `n` bytes without advancing.
    pub fn peek_bytes(&self, n: usize) -> Result<&'a [u8], BitmapError> {
        self.check(n)?;
        Ok(&self.data[self.pos..self.pos + n])
    }

    /// Take the next `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], BitmapError> {
        let bytes = self.peek_bytes(n)?;
        self.pos += n;
        Ok(bytes)
    }

    /// Advance by `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), BitmapError> {
        self.check(n)?;
        self.pos += n;
        Ok(())
    }

    /// Parse the next record without advancing.
    pub fn peek_fixed<T: FixedLayout>(&self) -> Result<T, BitmapError> {
        self.peek_bytes(T::SIZE).map(T::parse)
    }

    /// Parse the next record.
    pub fn read_fixed<T: FixedLayout>(&mut self) -> Result<T, BitmapError> {
        self.read_bytes(T::SIZE).map(T::parse)
    }

    /// Everything from the current offset to the end, without advancing.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let mut c = ByteCursor::new(&[0x42, 0x4d, 1, 0, 0, 0]);
        assert_eq!(c.read_fixed::<u16>().unwrap(), 0x4d42);
        assert_eq!(c.read_fixed::<u32>().unwrap(), 1);
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn underflow_does_not_advance() {
        let mut c = ByteCursor::new(&[1, 2, 3]);
        c.skip(1).unwrap();
        let err = c.read_fixed::<u32>().unwrap_err();
        assert!(matches!(
            err,
            BitmapError::UnexpectedEof {
                needed: 4,
                remaining: 2
            }
        ));
        assert_eq!(c.position(), 1);
        assert!(c.skip(3).is_err());
        assert_eq!(c.read_fixed::<u16>().unwrap(), 0x0302);
    }

    #[test]
    fn peek_keeps_offset() {
        let mut c = ByteCursor::new(&[9, 8, 7]);
        assert_eq!(c.peek_fixed::<u8>().unwrap(), 9);
        assert_eq!(c.peek_bytes(3).unwrap(), &[9, 8, 7]);
        assert_eq!(c.position(), 0);
        c.read_bytes(2).unwrap();
        assert_eq!(c.rest(), &[7]);
        c.reset();
        assert_eq!(c.remaining(), 3);
    }
}
