// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! # Binary Canonical Serialization (BCS)
//!
//! BCS turns a value of a known schema into one, and exactly one, byte
//! sequence, and turns every accepted byte sequence back into exactly one
//! value. The format exists for protocols that sign and verify bytes: if
//! two implementations could serialize the same logical value differently,
//! a verifier might never reproduce the bytes a prover signed. Canonicality
//! removes that failure mode, at the cost of a schema-driven format, the
//! bytes do not describe themselves, so reader and writer must agree on the
//! type layout ahead of time.
//!
//! ## Schema universe
//!
//! * Unsigned integers, 8 to 256 bits wide
//! * Booleans
//! * UTF-8 strings and raw byte blobs
//! * Options
//! * Fixed and variable length sequences
//! * Tuples and structures
//! * Externally tagged enumerations
//!
//! Floats, chars, signed integers and maps are deliberately absent: each
//! either has no canonical byte form or no place in the Move value model,
//! and the encoder rejects them with [`Error::NotSupported`].
//!
//! ## Fixed-width integers
//!
//! All integers are stored little-endian with no padding or alignment.
//! `u128` maps to the native Rust type; the 256-bit width is carried by
//! the crate's own [`U256`].
//!
//! |Type |Original data |Serialized bytes |
//! |---  |---           |---              |
//! |u8   |`255`         |`[FF]`           |
//! |u16  |`256`         |`[00 01]`        |
//! |u32  |`16909060`    |`[04 03 02 01]`  |
//! |u64  |`2^56 + 3`    |`[03 00 00 00 00 00 00 01]` |
//!
//! ```
//! use bcs::to_bytes;
//!
//! # fn main() -> bcs::Result<()> {
//! assert_eq!(to_bytes(&16909060u32)?, vec![0x04, 0x03, 0x02, 0x01]);
//! # Ok(())}
//! ```
//!
//! ## ULEB128 prefixes
//!
//! Sequence lengths and enum variant indexes are stored as ULEB128:
//! little-endian groups of seven payload bits, the high bit of every byte
//! except the last set to one. The encoder always emits the minimal form;
//! whether a decoder tolerates redundant zero continuation bytes is its
//! strictness setting (see [`from_bytes_strict`] and [`Reader::strict`]).
//!
//! |Value  |Serialized bytes |
//! |---    |---              |
//! |0      |`[00]`           |
//! |127    |`[7F]`           |
//! |128    |`[80 01]`        |
//! |300    |`[AC 02]`        |
//! |16384  |`[80 80 01]`     |
//!
//! ## Options
//!
//! Absent data is the single byte `00`; present data is `01` followed by
//! the payload.
//!
//! ```
//! use bcs::to_bytes;
//!
//! # fn main() -> bcs::Result<()> {
//! assert_eq!(to_bytes(&Option::<u8>::None)?, vec![0]);
//! assert_eq!(to_bytes(&Some(42u8))?, vec![1, 42]);
//! # Ok(())}
//! ```
//!
//! ## Strings and sequences
//!
//! Variable-length data is prefixed with a ULEB128 count: bytes for
//! strings and byte blobs, elements for typed sequences. Fixed-length
//! sequences carry no prefix, their length is part of the schema.
//!
//! ```
//! use bcs::to_bytes;
//!
//! # fn main() -> bcs::Result<()> {
//! // The prefix counts bytes, not characters.
//! assert_eq!(to_bytes("a")?, vec![1, 0x61]);
//! assert_eq!(to_bytes(&vec![1u8, 2, 3])?, vec![3, 1, 2, 3]);
//! assert_eq!(to_bytes(&[1u8, 2, 3])?, vec![1, 2, 3]);
//! # Ok(())}
//! ```
//!
//! ## Structures and enumerations
//!
//! A struct is the concatenation of its field encodings in declaration
//! order, with no separators; nesting simply recurses. An enum value is
//! the ULEB128 index of its variant followed by the variant's payload.
//!
//! ```
//! use bcs::to_bytes;
//! use serde::Serialize;
//!
//! # fn main() -> bcs::Result<()> {
//! #[derive(Serialize)]
//! enum Instruction {
//!     Halt,
//!     Push(u16),
//!     Label(String),
//! }
//!
//! assert_eq!(to_bytes(&Instruction::Halt)?, vec![0]);
//! assert_eq!(to_bytes(&Instruction::Push(300))?, vec![1, 0x2c, 0x01]);
//! assert_eq!(to_bytes(&Instruction::Label("e".to_owned()))?, vec![2, 1, b'e']);
//! # Ok(())}
//! ```
//!
//! ## Two surfaces
//!
//! Types that derive `Serialize`/`Deserialize` go through [`to_bytes`]
//! and [`from_bytes`]. Code that assembles frames by hand, or embeds BCS
//! values inside a larger layout, uses [`Writer`] and [`Reader`]
//! directly; the two surfaces produce identical bytes.
//!
//! ```
//! use bcs::{Reader, Writer};
//!
//! # fn main() -> bcs::Result<()> {
//! let mut writer = Writer::new();
//! writer.write_vec(&[256u16, 257], |w, v| w.write_u16(*v).map(|_| ()))?;
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![2, 0x00, 0x01, 0x01, 0x01]);
//!
//! let mut reader = Reader::new(&bytes);
//! assert_eq!(reader.read_vec(|r| r.read_u16())?, vec![256, 257]);
//! reader.expect_end()?;
//! # Ok(())}
//! ```
//!
//! `Writer` and `Reader` are single-owner values; nothing about them is
//! safe for shared mutation, and nothing needs to be, since encoding a
//! value is a single synchronous call. The produced `Vec<u8>` is plain
//! immutable data and can be shared freely.

mod de;
mod error;
mod reader;
mod ser;
mod u256;
mod writer;

pub mod test_helpers;
pub mod uleb128;

pub use de::{from_bytes, from_bytes_seed, from_bytes_strict, from_reader};
pub use error::{Error, Result};
pub use reader::Reader;
pub use ser::{serialized_size, to_bytes};
pub use u256::U256;
pub use writer::Writer;

/// Variable length sequences are limited to 2^31 elements (or bytes, for
/// strings and blobs); longer sequences are rejected on both encode and
/// decode.
pub const MAX_SEQUENCE_LENGTH: usize = 1 << 31;

/// Formats bytes as a hex dump for debugging: sixteen bytes per line with
/// an offset column and an ASCII gutter.
///
/// ```
/// let dump = bcs::hex_dump(b"Big Wallet Guy");
/// assert_eq!(
///     dump,
///     "0000: 42 69 67 20 57 61 6c 6c 65 74 20 47 75 79       |Big Wallet Guy|\n"
/// );
/// ```
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (line, chunk) in bytes.chunks(16).enumerate() {
        out.push_str(&format!("{:04x}: ", line * 16));
        for i in 0..16 {
            match chunk.get(i) {
                Some(byte) => {
                    out.push_str(&hex::encode([*byte]));
                    out.push(' ');
                }
                None => out.push_str("   "),
            }
        }
        out.push('|');
        for &byte in chunk {
            out.push(if (0x20..0x7f).contains(&byte) {
                byte as char
            } else {
                '.'
            });
        }
        out.push_str("|\n");
    }
    out
}
