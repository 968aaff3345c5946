// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! ULEB128 variable-length unsigned integers.
//!
//! BCS uses this encoding for sequence length prefixes and enum variant
//! indexes. Each byte carries seven payload bits, least significant group
//! first, and sets its high bit when more bytes follow. The encoder always
//! emits the minimal form; `0` is the single byte `0x00`.
//!
//! Most callers go through [`Writer`](crate::Writer) and
//! [`Reader`](crate::Reader); the functions here are for code that works
//! on raw ULEB128 bytes directly.

use crate::error::{Error, Result};

/// Largest number of bytes the encoding of a 64-bit value can occupy.
pub const MAX_LEN: usize = 10;

/// Appends the minimal ULEB128 encoding of `value` to `buf`.
pub fn encode_into(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value & 0x7f) as u8 | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Returns the minimal ULEB128 encoding of `value` as a fresh vector.
pub fn encode(value: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MAX_LEN);
    encode_into(&mut buf, value);
    buf
}

/// Decodes a ULEB128 value from the front of `bytes`.
///
/// Returns the value together with the number of bytes consumed so that
/// the call composes inside larger decoders. Fails with [`Error::Eof`]
/// when the input ends before a terminator byte and with
/// [`Error::IntegerOverflow`] when the value does not fit in 64 bits.
///
/// Redundant zero continuation bytes are accepted here; strict readers
/// reject them separately.
pub fn decode(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;
    for (i, &byte) in bytes.iter().enumerate() {
        let shift = i * 7;
        if shift >= 64 {
            return Err(Error::IntegerOverflow { offset: i });
        }
        let digit = u64::from(byte & 0x7f);
        let bits = digit << shift;
        if bits >> shift != digit {
            return Err(Error::IntegerOverflow { offset: i });
        }
        value |= bits;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(Error::Eof {
        offset: bytes.len(),
        wanted: 1,
    })
}
