// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::{de, ser};
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures produced while encoding or decoding BCS.
///
/// Decode-side variants carry the byte offset at which the input stopped
/// conforming to the schema, so callers can locate the failure inside a
/// larger frame. The offset counts from the start of the input handed to
/// the [`Reader`](crate::Reader).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The decoder wanted more bytes than the input had left.
    #[error("unexpected end of input: {wanted} byte(s) wanted at offset {offset}")]
    Eof { offset: usize, wanted: usize },

    /// A boolean byte was neither `0x00` nor `0x01`.
    #[error("expected boolean 0x00 or 0x01, found {byte:#04x} at offset {offset}")]
    ExpectedBoolean { offset: usize, byte: u8 },

    /// An option discriminant byte was neither `0x00` nor `0x01`.
    #[error("expected option discriminant 0x00 or 0x01, found {byte:#04x} at offset {offset}")]
    ExpectedOption { offset: usize, byte: u8 },

    /// An enum discriminant named a variant the schema does not have.
    #[error(
        "variant index {index} out of range for enum with {variant_count} variant(s) at offset {offset}"
    )]
    UnknownVariant {
        offset: usize,
        index: u32,
        variant_count: u32,
    },

    /// String bytes were not valid UTF-8.
    #[error("malformed utf8 string at offset {offset}")]
    Utf8 { offset: usize },

    /// A ULEB128 value did not fit the width the caller asked for.
    #[error("ULEB128 integer does not fit the target width at offset {offset}")]
    IntegerOverflow { offset: usize },

    /// A ULEB128 encoding carried redundant zero continuation bytes.
    /// Only reported by strict readers.
    #[error("ULEB128 encoding is not canonical at offset {offset}")]
    NonCanonicalUleb128 { offset: usize },

    /// A sequence length exceeded [`MAX_SEQUENCE_LENGTH`](crate::MAX_SEQUENCE_LENGTH).
    #[error("exceeded max sequence length: {0}")]
    ExceededMaxLen(usize),

    /// An encode-side value did not fit its declared width.
    #[error("value out of range for {0}")]
    ValueOutOfRange(&'static str),

    /// Input remained after a fully-consume decode finished its schema.
    #[error("remaining input: {remaining} byte(s) left after decoding")]
    RemainingInput { remaining: usize },

    /// serde handed the encoder a sequence of unknown length.
    #[error("sequence missing length")]
    MissingLen,

    /// The type is not part of the BCS schema universe.
    #[error("not supported: {0}")]
    NotSupported(&'static str),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Shifts the offset of a decode error produced against a sub-slice so
    /// that it points into the enclosing input.
    pub(crate) fn offset_by(self, base: usize) -> Self {
        match self {
            Error::Eof { offset, wanted } => Error::Eof {
                offset: offset + base,
                wanted,
            },
            Error::IntegerOverflow { offset } => Error::IntegerOverflow {
                offset: offset + base,
            },
            Error::NonCanonicalUleb128 { offset } => Error::NonCanonicalUleb128 {
                offset: offset + base,
            },
            other => other,
        }
    }
}

impl ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}
