//! Big-endian byte cursor
//!
//! All Photoshop preset containers are big-endian. [`ByteCursor`] reads
//! fixed-width values and the three string encodings used by those files
//! over a borrowed buffer. Seeking is plain position arithmetic and may move
//! past the end of the buffer; only reads are bounds-checked, and they fail
//! with [`DecodeError::UnexpectedEof`] instead of panicking.

use byteorder::{BigEndian, ByteOrder};

use crate::error::DecodeError;

/// Stateful reader over a fixed byte buffer
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current absolute offset
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Total buffer length
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the position and the end of the buffer
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    #[inline]
    pub const fn eof(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Move to an absolute offset. Offsets past the end are allowed.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Move forward by `count` bytes without reading them
    #[inline]
    pub fn skip(&mut self, count: usize) {
        self.position = self.position.saturating_add(count);
    }

    /// Borrow the next `count` bytes and advance past them
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .position
            .checked_add(count)
            .filter(|&end| end <= self.data.len())
            .ok_or(DecodeError::UnexpectedEof {
                offset: self.position,
                needed: count,
                available: self.remaining(),
            })?;
        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.read_bytes(1).map(|b| b[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        self.read_bytes(2).map(BigEndian::read_u16)
    }

    pub fn read_i16(&mut self) -> Result<i16, DecodeError> {
        self.read_bytes(2).map(BigEndian::read_i16)
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        self.read_bytes(4).map(BigEndian::read_u32)
    }

    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        self.read_bytes(4).map(BigEndian::read_i32)
    }

    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        self.read_bytes(4).map(BigEndian::read_f32)
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        self.read_bytes(8).map(BigEndian::read_f64)
    }

    /// Read `count` bytes as Latin-1 code points.
    ///
    /// Used for OSType tags and block keys, which are not UTF-8.
    pub fn read_fixed_string(&mut self, count: usize) -> Result<String, DecodeError> {
        let bytes = self.read_bytes(count)?;
        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }

    /// Read a Pascal string padded so that length byte plus payload is even
    pub fn read_pascal_string(&mut self) -> Result<String, DecodeError> {
        let length = self.read_u8()? as usize;
        let value = self.read_fixed_string(length)?;
        if (length + 1) % 2 != 0 {
            self.skip(1);
        }
        Ok(value)
    }

    /// Read a u32 code-unit count followed by UTF-16BE code units.
    ///
    /// NUL units are dropped wherever they appear; they do not terminate
    /// the string.
    pub fn read_unicode_string(&mut self) -> Result<String, DecodeError> {
        let units = self.read_u32()? as usize;
        let byte_len = units.checked_mul(2).ok_or_else(|| {
            DecodeError::InvalidFormat(format!("Unicode string length overflow: {}", units))
        })?;
        let bytes = self.read_bytes(byte_len)?;

        let utf16: Vec<u16> = bytes
            .chunks_exact(2)
            .map(BigEndian::read_u16)
            .filter(|&unit| unit != 0)
            .collect();
        Ok(String::from_utf16_lossy(&utf16))
    }
}
