// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Helpers for tests that need to prove a type round-trips through BCS.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;

/// Asserts that `object` survives an encode/decode round trip and that
/// re-encoding the decoded value reproduces the original bytes. Use this
/// from the tests of any crate that derives `Serialize`/`Deserialize`
/// for a wire type.
pub fn assert_canonical_encode_decode<T>(object: T)
where
    T: Serialize + DeserializeOwned + Debug + PartialEq,
{
    let bytes = crate::to_bytes(&object).expect("serialization should succeed");
    let decoded: T = crate::from_bytes(&bytes).expect("deserialization should succeed");
    assert_eq!(object, decoded);

    let reencoded = crate::to_bytes(&decoded).expect("serialization should succeed");
    assert_eq!(bytes, reencoded, "encoding must be canonical");
}
