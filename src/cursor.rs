//! Seekable read cursor over a byte buffer
//!
//! The decoder walks the input through a [`ByteCursor`] instead of threading
//! the remaining slice around, so that it can save the read position, try to
//! parse an encapsulated object, and rewind if the attempt fails.
//!
//! Reads return slices borrowed from the underlying buffer: several cursors
//! (and all decoded objects) share the same input without copying.

use crate::error::{BerError, BerResult};
use nom::bytes::streaming::take;
use nom::number::streaming::{be_u16, be_u8};

/// Forward reader over a borrowed byte buffer, with absolute seeking
#[derive(Clone, Copy, Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, pos: 0 }
    }

    /// Current absolute read position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move to an absolute position. Positions past the end are clamped.
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }

    /// Number of bytes left to read
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Total size of the underlying buffer
    #[inline]
    pub fn total_length(&self) -> usize {
        self.data.len()
    }

    /// True when no bytes are left
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// The whole underlying buffer
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Unread part of the buffer, without consuming it
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Look at the next `n` bytes without consuming them
    pub fn peek(&self, n: usize) -> Result<&'a [u8], BerError> {
        self.rest().get(..n).ok_or(BerError::UnexpectedEof)
    }

    /// Run a nom parser on the unread bytes, and advance past what it consumed
    pub fn parse<O, F>(&mut self, f: F) -> Result<O, BerError>
    where
        F: FnOnce(&'a [u8]) -> BerResult<'a, O>,
    {
        let input = self.rest();
        let (rem, o) = f(input)?;
        self.pos += input.len() - rem.len();
        Ok(o)
    }

    /// Read a single byte
    pub fn read_byte(&mut self) -> Result<u8, BerError> {
        self.parse(be_u8)
    }

    /// Read a big-endian 16-bit value
    pub fn read_u16_be(&mut self) -> Result<u16, BerError> {
        self.parse(be_u16)
    }

    /// Read `n` raw bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], BerError> {
        self.parse(take(n))
    }

    /// Skip `n` bytes
    pub fn skip(&mut self, n: usize) -> Result<(), BerError> {
        self.read_bytes(n).map(|_| ())
    }
}
