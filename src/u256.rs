// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! A 256-bit unsigned integer for the widest Move value width.
//!
//! The language this codec serves has no native 256-bit integer, so the
//! crate carries its own: four 64-bit limbs, least significant first. The
//! type provides exactly what the wire format needs, conversions to and
//! from 32 little-endian bytes plus enough arithmetic to parse literals
//! with an explicit range check.

use crate::error::{Error, Result};
use serde::{de, ser, Deserialize, Serialize};
use std::{cmp::Ordering, fmt, str::FromStr};

const LIMBS: usize = 4;

/// Unsigned 256-bit integer. On the wire it occupies exactly 32
/// little-endian bytes, with no length prefix.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct U256([u64; LIMBS]);

impl U256 {
    /// The length of the wire representation in bytes.
    pub const LENGTH: usize = 32;

    pub const ZERO: U256 = U256([0; LIMBS]);

    pub const MAX: U256 = U256([u64::max_value(); LIMBS]);

    /// Builds a value from its 32-byte little-endian representation.
    pub fn from_le_bytes(bytes: [u8; Self::LENGTH]) -> Self {
        let mut limbs = [0u64; LIMBS];
        for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut le = [0u8; 8];
            le.copy_from_slice(chunk);
            *limb = u64::from_le_bytes(le);
        }
        U256(limbs)
    }

    /// Returns the 32-byte little-endian representation.
    pub fn to_le_bytes(self) -> [u8; Self::LENGTH] {
        let mut bytes = [0u8; Self::LENGTH];
        for (chunk, limb) in bytes.chunks_exact_mut(8).zip(&self.0) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }
        bytes
    }

    /// Builds a value from a little-endian slice that must be exactly
    /// [`Self::LENGTH`] bytes long.
    pub fn from_le_slice(src: &[u8]) -> Result<Self> {
        if src.len() != Self::LENGTH {
            return Err(Error::ValueOutOfRange("u256 little-endian slice"));
        }
        let mut bytes = [0u8; Self::LENGTH];
        bytes.copy_from_slice(src);
        Ok(Self::from_le_bytes(bytes))
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    pub fn checked_add(self, rhs: U256) -> Option<U256> {
        let mut limbs = [0u64; LIMBS];
        let mut carry = 0u64;
        for i in 0..LIMBS {
            let (sum, c1) = self.0[i].overflowing_add(rhs.0[i]);
            let (sum, c2) = sum.overflowing_add(carry);
            limbs[i] = sum;
            carry = u64::from(c1) + u64::from(c2);
        }
        if carry != 0 {
            None
        } else {
            Some(U256(limbs))
        }
    }

    /// Computes `self * mul + add`, returning `None` on overflow. This is
    /// the single primitive literal parsing needs.
    fn checked_mul_add(self, mul: u64, add: u64) -> Option<U256> {
        let mut limbs = [0u64; LIMBS];
        let mut carry = u128::from(add);
        for i in 0..LIMBS {
            let t = u128::from(self.0[i]) * u128::from(mul) + carry;
            limbs[i] = t as u64;
            carry = t >> 64;
        }
        if carry != 0 {
            None
        } else {
            Some(U256(limbs))
        }
    }

    /// Parses an unprefixed literal in the given radix (2 to 36).
    ///
    /// Fails with [`Error::ValueOutOfRange`] when the value exceeds
    /// 2^256 - 1, which is where the encode-side range check of this
    /// codec lives: fixed-width writers cannot receive an out-of-range
    /// value, parsers can.
    pub fn from_str_radix(literal: &str, radix: u32) -> Result<Self> {
        assert!(
            (2..=36).contains(&radix),
            "radix must be in 2..=36, got {}",
            radix
        );
        if literal.is_empty() {
            return Err(Error::Custom(
                "cannot parse u256 from an empty string".to_string(),
            ));
        }
        let mut value = U256::ZERO;
        for c in literal.chars() {
            let digit = c.to_digit(radix).ok_or_else(|| {
                Error::Custom(format!("invalid digit {:?} for radix {}", c, radix))
            })?;
            value = value
                .checked_mul_add(u64::from(radix), u64::from(digit))
                .ok_or(Error::ValueOutOfRange("u256 literal"))?;
        }
        Ok(value)
    }

    /// Full-width lowercase hex, most significant digit first.
    pub fn to_hex(self) -> String {
        let mut be = self.to_le_bytes();
        be.reverse();
        hex::encode(be)
    }

    /// Parses up to 64 hex digits, most significant first. Shorter input
    /// is zero-extended on the left.
    pub fn from_hex(literal: &str) -> Result<Self> {
        if literal.len() > 2 * Self::LENGTH {
            return Err(Error::ValueOutOfRange("u256 hex literal"));
        }
        Self::from_str_radix(literal, 16)
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        // Most significant limb decides first.
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u8> for U256 {
    fn from(v: u8) -> Self {
        U256::from(u64::from(v))
    }
}

impl From<u16> for U256 {
    fn from(v: u16) -> Self {
        U256::from(u64::from(v))
    }
}

impl From<u32> for U256 {
    fn from(v: u32) -> Self {
        U256::from(u64::from(v))
    }
}

impl From<u64> for U256 {
    fn from(v: u64) -> Self {
        U256([v, 0, 0, 0])
    }
}

impl From<u128> for U256 {
    fn from(v: u128) -> Self {
        U256([v as u64, (v >> 64) as u64, 0, 0])
    }
}

impl fmt::LowerHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::LowerHex>::fmt(self, f)
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256(0x{})", self.to_hex())
    }
}

impl FromStr for U256 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for U256 {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            // The wire form is the bare 32-byte array, no prefix.
            self.to_le_bytes().serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let literal = String::deserialize(deserializer)?;
            U256::from_hex(&literal).map_err(de::Error::custom)
        } else {
            let bytes = <[u8; U256::LENGTH]>::deserialize(deserializer)?;
            Ok(U256::from_le_bytes(bytes))
        }
    }
}
