// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! The cursor-based input side of the codec.

use crate::error::{Error, Result};
use crate::u256::U256;
use crate::uleb128;
use crate::MAX_SEQUENCE_LENGTH;
use byteorder::ReadBytesExt;
use std::io::{Cursor, Read};

type Endianness = byteorder::LittleEndian;

/// A position-tracking reader over an immutable byte sequence.
///
/// Every operation consumes exactly the bytes its schema element occupies
/// and fails with [`Error::Eof`] if the input runs out first. The number
/// of bytes consumed so far is [`position`](Reader::position), which is
/// how decoders compose inside larger schemas.
///
/// A failed read leaves the cursor position unspecified; callers must not
/// keep decoding from a reader that returned an error. Like the
/// [`Writer`](crate::Writer), a `Reader` is a single-owner value and is
/// not meant for shared mutation across threads.
///
/// The default reader tolerates redundant zero continuation bytes in
/// ULEB128 values, which is what the reference decoder does. A reader
/// built with [`strict`](Reader::strict) rejects them with
/// [`Error::NonCanonicalUleb128`].
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    cursor: Cursor<&'a [u8]>,
    strict: bool,
}

impl<'a> Reader<'a> {
    /// A reader that accepts non-minimal ULEB128 input.
    pub fn new(input: &'a [u8]) -> Self {
        Reader {
            cursor: Cursor::new(input),
            strict: false,
        }
    }

    /// A reader that insists every ULEB128 value is minimally encoded.
    pub fn strict(input: &'a [u8]) -> Self {
        Reader {
            cursor: Cursor::new(input),
            strict: true,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.input().len() - self.position()
    }

    pub fn has_more(&self) -> bool {
        self.remaining() > 0
    }

    /// Discards the next `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_slice(n).map(|_| ())
    }

    /// Fails with [`Error::RemainingInput`] unless the input is fully
    /// consumed. Call this at the end of a top-level schema.
    pub fn expect_end(&self) -> Result<()> {
        let remaining = self.remaining();
        if remaining != 0 {
            return Err(Error::RemainingInput { remaining });
        }
        Ok(())
    }

    fn input(&self) -> &'a [u8] {
        *self.cursor.get_ref()
    }

    /// Borrows the next `len` bytes out of the underlying input and
    /// advances past them. Internal: the public blob operations return
    /// owned storage.
    pub(crate) fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let offset = self.position();
        let input = self.input();
        if input.len() - offset < len {
            return Err(Error::Eof {
                offset,
                wanted: len,
            });
        }
        self.cursor.set_position((offset + len) as u64);
        Ok(&input[offset..offset + len])
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let offset = self.position();
        self.cursor
            .read_u8()
            .map_err(|_| Error::Eof { offset, wanted: 1 })
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let offset = self.position();
        self.cursor
            .read_u16::<Endianness>()
            .map_err(|_| Error::Eof { offset, wanted: 2 })
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let offset = self.position();
        self.cursor
            .read_u32::<Endianness>()
            .map_err(|_| Error::Eof { offset, wanted: 4 })
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let offset = self.position();
        self.cursor
            .read_u64::<Endianness>()
            .map_err(|_| Error::Eof { offset, wanted: 8 })
    }

    pub fn read_u128(&mut self) -> Result<u128> {
        let offset = self.position();
        self.cursor
            .read_u128::<Endianness>()
            .map_err(|_| Error::Eof { offset, wanted: 16 })
    }

    pub fn read_u256(&mut self) -> Result<U256> {
        let offset = self.position();
        let mut bytes = [0u8; U256::LENGTH];
        self.cursor.read_exact(&mut bytes).map_err(|_| Error::Eof {
            offset,
            wanted: U256::LENGTH,
        })?;
        Ok(U256::from_le_bytes(bytes))
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        let offset = self.position();
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            byte => Err(Error::ExpectedBoolean { offset, byte }),
        }
    }

    pub fn read_uleb128(&mut self) -> Result<u64> {
        let offset = self.position();
        let rest = &self.input()[offset..];
        let (value, consumed) = uleb128::decode(rest).map_err(|e| e.offset_by(offset))?;
        if self.strict && consumed > 1 && rest[consumed - 1] == 0 {
            return Err(Error::NonCanonicalUleb128 { offset });
        }
        self.cursor.set_position((offset + consumed) as u64);
        Ok(value)
    }

    pub(crate) fn read_uleb128_as_u32(&mut self) -> Result<u32> {
        let offset = self.position();
        let value = self.read_uleb128()?;
        if value > u64::from(u32::max_value()) {
            return Err(Error::IntegerOverflow { offset });
        }
        Ok(value as u32)
    }

    /// Reads a sequence length prefix, bounded by
    /// [`MAX_SEQUENCE_LENGTH`](crate::MAX_SEQUENCE_LENGTH).
    pub fn read_len(&mut self) -> Result<usize> {
        let value = self.read_uleb128()?;
        if value > MAX_SEQUENCE_LENGTH as u64 {
            return Err(Error::ExceededMaxLen(value as usize));
        }
        Ok(value as usize)
    }

    /// Reads an enum discriminant and checks it against the schema's
    /// variant count.
    pub fn read_variant_index(&mut self, variant_count: u32) -> Result<u32> {
        let offset = self.position();
        let index = self.read_uleb128_as_u32()?;
        if index >= variant_count {
            return Err(Error::UnknownVariant {
                offset,
                index,
                variant_count,
            });
        }
        Ok(index)
    }

    /// Reads exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        self.read_slice(len).map(<[u8]>::to_vec)
    }

    /// Reads a length-prefixed byte blob.
    pub fn read_byte_vector(&mut self) -> Result<Vec<u8>> {
        let len = self.read_len()?;
        self.read_bytes(len)
    }

    pub fn read_string(&mut self) -> Result<String> {
        self.read_str_slice().map(str::to_string)
    }

    pub(crate) fn read_str_slice(&mut self) -> Result<&'a str> {
        let len = self.read_len()?;
        let offset = self.position();
        let bytes = self.read_slice(len)?;
        std::str::from_utf8(bytes).map_err(|_| Error::Utf8 { offset })
    }

    /// Consumes and returns everything left.
    pub fn read_remaining(&mut self) -> Result<Vec<u8>> {
        self.read_bytes(self.remaining())
    }

    /// Reads a length-prefixed sequence, decoding each element with
    /// `element`.
    pub fn read_vec<T>(
        &mut self,
        mut element: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let len = self.read_len()?;
        // The prefix is untrusted; cap the preallocation by what the
        // input could possibly hold.
        let mut items = Vec::with_capacity(len.min(self.remaining()));
        for _ in 0..len {
            items.push(element(self)?);
        }
        Ok(items)
    }

    /// Reads a fixed-length sequence of `len` elements, no prefix.
    pub fn read_array<T>(
        &mut self,
        len: usize,
        mut element: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(element(self)?);
        }
        Ok(items)
    }

    /// Reads an option discriminant and, when present, the payload.
    pub fn read_option<T>(
        &mut self,
        element: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<Option<T>> {
        let offset = self.position();
        match self.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(element(self)?)),
            byte => Err(Error::ExpectedOption { offset, byte }),
        }
    }
}
