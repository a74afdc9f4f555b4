//! Big-endian binary parsing utilities.
//!
//! All readers are bounds-checked. A read that doesn't fit into the data
//! produces [`Error::UnexpectedEof`] instead of a panic or a wrapped index.

use alloc::string::String;
use core::convert::TryInto;

use crate::{Error, Result, Tag};

/// A trait for parsing raw binary data of a fixed size.
///
/// This is a low-level trait that should not be used directly.
pub trait FromData: Sized {
    /// Object's raw data size.
    ///
    /// Not always the same as `mem::size_of`.
    const SIZE: usize;

    /// Parses an object from raw data.
    ///
    /// `data` is guaranteed to be exactly `SIZE` bytes long.
    fn parse(data: &[u8]) -> Option<Self>;
}

impl FromData for u8 {
    const SIZE: usize = 1;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        data.first().copied()
    }
}

impl FromData for i8 {
    const SIZE: usize = 1;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        data.first().map(|v| *v as i8)
    }
}

impl FromData for u16 {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        data.try_into().ok().map(u16::from_be_bytes)
    }
}

impl FromData for i16 {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        data.try_into().ok().map(i16::from_be_bytes)
    }
}

impl FromData for u32 {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        data.try_into().ok().map(u32::from_be_bytes)
    }
}

impl FromData for i32 {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        data.try_into().ok().map(i32::from_be_bytes)
    }
}

impl FromData for u64 {
    const SIZE: usize = 8;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        data.try_into().ok().map(u64::from_be_bytes)
    }
}

impl FromData for Tag {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        u32::parse(data).map(Tag)
    }
}


/// A 32-bit signed fixed-point number (16.16).
///
/// <https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types>
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Fixed(pub f32);

impl FromData for Fixed {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        i32::parse(data).map(|n| Fixed(n as f32 / 65536.0))
    }
}


/// A 16-bit offset. Zero means "not set".
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Offset16(pub u16);

impl Offset16 {
    /// Converts the offset into `usize`.
    #[inline]
    pub fn to_usize(self) -> usize {
        usize::from(self.0)
    }

    /// Checks that offset is zero.
    #[inline]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl FromData for Offset16 {
    const SIZE: usize = 2;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        u16::parse(data).map(Offset16)
    }
}


/// A 32-bit offset.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Offset32(pub u32);

impl Offset32 {
    /// Converts the offset into `usize`.
    #[inline]
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl FromData for Offset32 {
    const SIZE: usize = 4;

    #[inline]
    fn parse(data: &[u8]) -> Option<Self> {
        u32::parse(data).map(Offset32)
    }
}


/// Returns `len` bytes starting at `offset`.
#[inline]
pub fn slice_at(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let eof = Error::UnexpectedEof { offset, size: len };
    let end = offset.checked_add(len).ok_or(eof)?;
    data.get(offset..end).ok_or(eof)
}

/// Reads an object at an absolute `offset`.
#[inline]
pub fn read_at<T: FromData>(data: &[u8], offset: usize) -> Result<T> {
    T::parse(slice_at(data, offset, T::SIZE)?)
        .ok_or(Error::UnexpectedEof { offset, size: T::SIZE })
}

/// Reads `len` single-byte characters at `offset`.
///
/// Each byte becomes a code point of the same value,
/// so bytes above 0x7F are mapped to U+0080..U+00FF.
pub fn read_ascii(data: &[u8], offset: usize, len: usize) -> Result<String> {
    let bytes = slice_at(data, offset, len)?;
    Ok(bytes.iter().map(|b| char::from(*b)).collect())
}

/// Reads `chars` UTF-16BE code units at `offset`.
///
/// Unpaired surrogates are replaced with U+FFFD.
pub fn read_utf16_be(data: &[u8], offset: usize, chars: usize) -> Result<String> {
    let size = chars.checked_mul(2).ok_or(Error::UnexpectedEof { offset, size: usize::MAX })?;
    let bytes = slice_at(data, offset, size)?;
    let units = bytes.chunks_exact(2).map(|c| u16::from_be_bytes([c[0], c[1]]));
    Ok(core::char::decode_utf16(units)
        .map(|c| c.unwrap_or(core::char::REPLACEMENT_CHARACTER))
        .collect())
}


/// A sequential reader over a byte slice.
///
/// Every read is bounds-checked, while skipping is not:
/// a skip past the end is detected by the next read.
#[derive(Clone, Copy, Debug)]
pub struct Stream<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Stream<'a> {
    /// Creates a new stream at the start of `data`.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Stream {
            data,
            offset: 0,
        }
    }

    /// Creates a new stream at an absolute `offset`.
    #[inline]
    pub fn new_at(data: &'a [u8], offset: usize) -> Self {
        Stream {
            data,
            offset,
        }
    }

    /// Checks that the stream has reached the end of the data.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Returns the current absolute offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the number of bytes left.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Skips an object of type `T`.
    #[inline]
    pub fn skip<T: FromData>(&mut self) {
        self.advance(T::SIZE);
    }

    /// Skips `len` bytes.
    #[inline]
    pub fn advance(&mut self, len: usize) {
        self.offset = self.offset.saturating_add(len);
    }

    /// Reads an object of type `T` and advances the stream.
    #[inline]
    pub fn read<T: FromData>(&mut self) -> Result<T> {
        let v = read_at(self.data, self.offset)?;
        self.offset += T::SIZE;
        Ok(v)
    }

    /// Reads `len` bytes and advances the stream.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let v = slice_at(self.data, self.offset, len)?;
        self.offset += len;
        Ok(v)
    }
}
