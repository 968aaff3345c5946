// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The append-only output buffer behind every BCS encoder.

use crate::error::{Error, Result};
use crate::u256::U256;
use crate::uleb128;
use crate::MAX_SEQUENCE_LENGTH;

/// A monotonic byte buffer that speaks the BCS primitive vocabulary.
///
/// Fixed-width integers go out little-endian, lengths and variant indexes
/// as ULEB128, and composites are built by concatenating field writes in
/// schema order. Operations return `&mut Self` so struct encoders chain:
///
/// ```
/// use bcs::Writer;
///
/// let mut writer = Writer::new();
/// writer
///     .write_u64(412_412_400_000)?
///     .write_string("Big Wallet Guy")?
///     .write_bool(false)?;
/// assert_eq!(writer.size(), 24);
/// # bcs::Result::Ok(())
/// ```
///
/// A `Writer` is a single-owner value: it is not meant to be shared
/// across threads, and the buffer it accumulates is yielded exactly once
/// by [`finish`](Writer::finish).
#[derive(Clone, Debug, Default)]
pub struct Writer {
    output: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Writer { output: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Writer {
            output: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn size(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// The bytes accumulated so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.output
    }

    /// Discards the contents, keeping the allocation.
    pub fn reset(&mut self) {
        self.output.clear();
    }

    /// Consumes the writer and yields the encoded bytes.
    pub fn finish(self) -> Vec<u8> {
        self.output
    }

    pub fn write_u8(&mut self, v: u8) -> Result<&mut Self> {
        self.output.push(v);
        Ok(self)
    }

    pub fn write_u16(&mut self, v: u16) -> Result<&mut Self> {
        self.output.extend_from_slice(&v.to_le_bytes());
        Ok(self)
    }

    pub fn write_u32(&mut self, v: u32) -> Result<&mut Self> {
        self.output.extend_from_slice(&v.to_le_bytes());
        Ok(self)
    }

    pub fn write_u64(&mut self, v: u64) -> Result<&mut Self> {
        self.output.extend_from_slice(&v.to_le_bytes());
        Ok(self)
    }

    pub fn write_u128(&mut self, v: u128) -> Result<&mut Self> {
        self.output.extend_from_slice(&v.to_le_bytes());
        Ok(self)
    }

    pub fn write_u256(&mut self, v: U256) -> Result<&mut Self> {
        self.output.extend_from_slice(&v.to_le_bytes());
        Ok(self)
    }

    pub fn write_bool(&mut self, v: bool) -> Result<&mut Self> {
        self.write_u8(v.into())
    }

    pub fn write_uleb128(&mut self, v: u64) -> Result<&mut Self> {
        uleb128::encode_into(&mut self.output, v);
        Ok(self)
    }

    /// Appends an enum discriminant.
    pub fn write_variant_index(&mut self, index: u32) -> Result<&mut Self> {
        self.write_uleb128(u64::from(index))
    }

    /// Appends a sequence length prefix, enforcing the global bound.
    pub fn write_len(&mut self, len: usize) -> Result<&mut Self> {
        if len > MAX_SEQUENCE_LENGTH {
            return Err(Error::ExceededMaxLen(len));
        }
        self.write_uleb128(len as u64)
    }

    /// Appends the slice verbatim, no length prefix. This is the building
    /// block for fixed-length byte schemas.
    pub fn write_bytes(&mut self, v: &[u8]) -> Result<&mut Self> {
        self.output.extend_from_slice(v);
        Ok(self)
    }

    /// Appends a length-prefixed byte blob.
    pub fn write_byte_vector(&mut self, v: &[u8]) -> Result<&mut Self> {
        self.write_len(v.len())?;
        self.write_bytes(v)
    }

    /// Appends a length-prefixed UTF-8 string. The prefix counts bytes,
    /// not code points.
    pub fn write_string(&mut self, v: &str) -> Result<&mut Self> {
        self.write_byte_vector(v.as_bytes())
    }

    /// Appends a length-prefixed sequence, encoding each element with
    /// `element`.
    pub fn write_vec<T>(
        &mut self,
        items: &[T],
        mut element: impl FnMut(&mut Self, &T) -> Result<()>,
    ) -> Result<&mut Self> {
        self.write_len(items.len())?;
        for item in items {
            element(self, item)?;
        }
        Ok(self)
    }

    /// Appends a fixed-length sequence: elements only, no prefix. The
    /// length is part of the schema.
    pub fn write_array<T>(
        &mut self,
        items: &[T],
        mut element: impl FnMut(&mut Self, &T) -> Result<()>,
    ) -> Result<&mut Self> {
        for item in items {
            element(self, item)?;
        }
        Ok(self)
    }

    /// Appends `0x00` for `None`, or `0x01` followed by the payload.
    pub fn write_option<T>(
        &mut self,
        value: &Option<T>,
        element: impl FnOnce(&mut Self, &T) -> Result<()>,
    ) -> Result<&mut Self> {
        match value {
            None => self.write_u8(0),
            Some(v) => {
                self.write_u8(1)?;
                element(self, v)?;
                Ok(self)
            }
        }
    }
}
