// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

use bcs::test_helpers::assert_canonical_encode_decode;
use bcs::{from_bytes, from_bytes_strict, serialized_size, to_bytes, Error, U256};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, PartialEq)]
enum E {
    Unit,
    Newtype(u16),
    Tuple(u16, u16),
    Struct { a: u32 },
}

#[test]
fn test_enum() {
    let u = E::Unit;
    assert_eq!(to_bytes(&u).unwrap(), vec![0]);
    assert_canonical_encode_decode(u);

    let n = E::Newtype(1);
    assert_eq!(to_bytes(&n).unwrap(), vec![1, 1, 0]);
    assert_canonical_encode_decode(n);

    let t = E::Tuple(1, 2);
    assert_eq!(to_bytes(&t).unwrap(), vec![2, 1, 0, 2, 0]);
    assert_canonical_encode_decode(t);

    let s = E::Struct { a: 1 };
    assert_eq!(to_bytes(&s).unwrap(), vec![3, 1, 0, 0, 0]);
    assert_canonical_encode_decode(s);
}

#[test]
fn known_vectors_integers() {
    assert_eq!(to_bytes(&0u8).unwrap(), vec![0x00]);
    assert_eq!(to_bytes(&255u8).unwrap(), vec![0xff]);
    assert_eq!(to_bytes(&256u16).unwrap(), vec![0x00, 0x01]);
    assert_eq!(to_bytes(&65535u16).unwrap(), vec![0xff, 0xff]);
    assert_eq!(to_bytes(&16909060u32).unwrap(), vec![0x04, 0x03, 0x02, 0x01]);
    assert_eq!(
        to_bytes(&72623859790382856u64).unwrap(),
        vec![0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
    );

    assert_eq!(to_bytes(&u32::max_value()).unwrap(), vec![0xff; 4]);
    assert_eq!(to_bytes(&u64::max_value()).unwrap(), vec![0xff; 8]);
    assert_eq!(to_bytes(&u128::max_value()).unwrap(), vec![0xff; 16]);
}

#[test]
fn known_vectors_bool_and_string() {
    assert_eq!(to_bytes(&false).unwrap(), vec![0x00]);
    assert_eq!(to_bytes(&true).unwrap(), vec![0x01]);

    assert_eq!(to_bytes("").unwrap(), vec![0x00]);
    assert_eq!(to_bytes("a").unwrap(), vec![0x01, 0x61]);
    assert_eq!(
        to_bytes("Big Wallet Guy").unwrap(),
        vec![
            0x0e, 0x42, 0x69, 0x67, 0x20, 0x57, 0x61, 0x6c, 0x6c, 0x65, 0x74, 0x20, 0x47, 0x75,
            0x79,
        ]
    );
}

#[test]
fn known_vectors_collections() {
    assert_eq!(to_bytes::<Vec<u8>>(&vec![]).unwrap(), vec![0x00]);
    assert_eq!(
        to_bytes(&vec![1u8, 2, 3]).unwrap(),
        vec![0x03, 0x01, 0x02, 0x03]
    );

    assert_eq!(to_bytes(&Option::<u8>::None).unwrap(), vec![0x00]);
    assert_eq!(to_bytes(&Some(42u8)).unwrap(), vec![0x01, 0x2a]);
}

#[derive(Arbitrary, Debug, Deserialize, Serialize, PartialEq)]
struct Coin {
    value: u64,
    owner: String,
    is_locked: bool,
}

#[test]
fn known_vector_coin() {
    let coin = Coin {
        value: 412_412_400_000,
        owner: "Big Wallet Guy".to_owned(),
        is_locked: false,
    };

    let expected = vec![
        0x80, 0xd1, 0xb1, 0x05, 0x60, 0x00, 0x00, 0x00, 0x0e, 0x42, 0x69, 0x67, 0x20, 0x57, 0x61,
        0x6c, 0x6c, 0x65, 0x74, 0x20, 0x47, 0x75, 0x79, 0x00,
    ];
    assert_eq!(to_bytes(&coin).unwrap(), expected);
    assert_eq!(serialized_size(&coin).unwrap(), expected.len());

    let decoded: Coin = from_bytes(&expected).unwrap();
    assert_eq!(decoded, coin);
}

#[test]
fn u256_wire_form() {
    let mut one = vec![1u8];
    one.resize(32, 0);
    assert_eq!(to_bytes(&U256::from(1u8)).unwrap(), one);
    assert_eq!(to_bytes(&U256::MAX).unwrap(), vec![0xff; 32]);

    let decoded: U256 = from_bytes(&one).unwrap();
    assert_eq!(decoded, U256::from(1u8));
}

#[test]
fn sequence_length_prefix_counts_elements() {
    // Unit elements occupy zero bytes, leaving only the ULEB128 prefix.
    assert_eq!(to_bytes(&vec![(); 127]).unwrap(), vec![0x7f]);
    assert_eq!(to_bytes(&vec![(); 128]).unwrap(), vec![0x80, 0x01]);
    assert_eq!(to_bytes(&vec![(); 16384]).unwrap(), vec![0x80, 0x80, 0x01]);

    let round_tripped: Vec<()> = from_bytes(&[0x80, 0x80, 0x01]).unwrap();
    assert_eq!(round_tripped.len(), 16384);
}

#[test]
fn nested_and_empty_composites() {
    let nested: Vec<Vec<u8>> = vec![vec![], vec![1], vec![2, 3]];
    assert_eq!(to_bytes(&nested).unwrap(), vec![3, 0, 1, 1, 2, 2, 3]);
    assert_canonical_encode_decode(nested);

    let option_of_vec: Option<Vec<u16>> = Some(vec![256]);
    assert_eq!(to_bytes(&option_of_vec).unwrap(), vec![1, 1, 0, 1]);
    assert_canonical_encode_decode(option_of_vec);

    let option_of_enum: Option<E> = Some(E::Unit);
    assert_eq!(to_bytes(&option_of_enum).unwrap(), vec![1, 0]);
    assert_canonical_encode_decode(option_of_enum);
}

#[test]
fn fixed_array_has_no_prefix() {
    let fixed: [u8; 3] = [1, 2, 3];
    assert_eq!(to_bytes(&fixed).unwrap(), vec![1, 2, 3]);

    let decoded: [u8; 3] = from_bytes(&[1, 2, 3]).unwrap();
    assert_eq!(decoded, fixed);
}

#[test]
fn invalid_utf8() {
    let invalid_utf8 = vec![1, 0xff];
    assert_eq!(
        from_bytes::<String>(&invalid_utf8),
        Err(Error::Utf8 { offset: 1 })
    );
}

#[test]
fn invalid_variant() {
    #[derive(Serialize, Deserialize, Debug)]
    enum Test {
        One,
        Two,
    }

    let invalid_variant = vec![5];
    match from_bytes::<Test>(&invalid_variant).unwrap_err() {
        // The message comes from serde's generated visitor.
        Error::Custom(_) => {}
        err => panic!("unexpected error: {:?}", err),
    }
}

#[test]
fn invalid_option() {
    let invalid_option = vec![5, 0];
    assert_eq!(
        from_bytes::<Option<u8>>(&invalid_option),
        Err(Error::ExpectedOption { offset: 0, byte: 5 })
    );
}

#[test]
fn invalid_bool() {
    let invalid_bool = vec![9];
    assert_eq!(
        from_bytes::<bool>(&invalid_bool),
        Err(Error::ExpectedBoolean { offset: 0, byte: 9 })
    );
}

#[test]
fn sequence_not_long_enough() {
    let seq = vec![5, 1, 2, 3, 4]; // says five elements, carries four
    assert_eq!(
        from_bytes::<Vec<u8>>(&seq),
        Err(Error::Eof { offset: 5, wanted: 1 })
    );
}

#[test]
fn leftover_bytes() {
    let seq = vec![1, 2, 3, 4]; // one length-prefixed element, two extra bytes
    assert_eq!(
        from_bytes::<Vec<u8>>(&seq),
        Err(Error::RemainingInput { remaining: 2 })
    );
}

#[test]
fn non_canonical_uleb_is_a_strictness_setting() {
    // Length 3 encoded with a redundant zero continuation byte.
    let padded = vec![0x83, 0x00, 1, 2, 3];

    let lenient: Vec<u8> = from_bytes(&padded).unwrap();
    assert_eq!(lenient, vec![1, 2, 3]);

    assert_eq!(
        from_bytes_strict::<Vec<u8>>(&padded),
        Err(Error::NonCanonicalUleb128 { offset: 0 })
    );

    // Minimal input passes the strict decoder unchanged.
    let minimal = to_bytes(&vec![1u8, 2, 3]).unwrap();
    let strict: Vec<u8> = from_bytes_strict(&minimal).unwrap();
    assert_eq!(strict, vec![1, 2, 3]);
}

#[test]
fn types_outside_the_schema_universe() {
    assert!(to_bytes(&1.0f32).is_err());
    assert!(to_bytes(&42.0f64).is_err());
    assert!(to_bytes(&'a').is_err());

    assert_eq!(
        to_bytes(&-1i32),
        Err(Error::NotSupported("serialize_i32"))
    );

    let mut map = std::collections::BTreeMap::new();
    map.insert(1u8, 2u8);
    assert_eq!(to_bytes(&map), Err(Error::NotSupported("serialize_map")));
}

#[test]
fn zero_copy_parse() {
    #[derive(Serialize, Deserialize, Eq, PartialEq, Debug)]
    struct Borrowed<'a> {
        label: &'a str,
        payload: &'a [u8],
    }

    let b = Borrowed {
        label: "hi",
        payload: &[0, 1, 2, 3],
    };
    let expected = vec![2, b'h', b'i', 4, 0, 1, 2, 3];
    let encoded = to_bytes(&b).unwrap();
    assert_eq!(expected, encoded);
    let out: Borrowed<'_> = from_bytes(&encoded).unwrap();
    assert_eq!(out, b);
}

#[derive(Arbitrary, Debug, Deserialize, Serialize, PartialEq)]
struct S {
    int: u16,
    option: Option<u8>,
    seq: Vec<String>,
    boolean: bool,
}

#[derive(Arbitrary, Debug, Deserialize, Serialize, PartialEq)]
struct Addr([u8; 32]);

#[derive(Arbitrary, Debug, Deserialize, Serialize, PartialEq)]
struct Bar {
    a: u64,
    b: Vec<u8>,
    c: Addr,
    d: u32,
}

#[derive(Arbitrary, Debug, Deserialize, Serialize, PartialEq)]
struct Foo {
    a: u64,
    b: Vec<u8>,
    c: Bar,
    d: bool,
    e: Option<String>,
}

#[test]
fn serde_known_vector() {
    let b = Bar {
        a: 100,
        b: vec![0, 1, 2, 3, 4, 5, 6, 7, 8],
        c: Addr([5u8; 32]),
        d: 99,
    };

    let f = Foo {
        a: u64::max_value(),
        b: vec![100, 99, 88, 77, 66, 55],
        c: b,
        d: true,
        e: Some("bcs".to_owned()),
    };

    let bytes = to_bytes(&f).unwrap();

    let test_vector = vec![
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, // a
        0x06, 0x64, 0x63, 0x58, 0x4d, 0x42, 0x37, // b
        0x64, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // c.a
        0x09, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, // c.b
        0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05,
        0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05, 0x05,
        0x05, 0x05, // c.c
        0x63, 0x00, 0x00, 0x00, // c.d
        0x01, // d
        0x01, 0x03, 0x62, 0x63, 0x73, // e
    ];

    // The encoder must keep producing these exact bytes; decoding the
    // pinned bytes must keep producing the value. A round trip alone
    // would miss a matched encoder/decoder bug and any silent format
    // change.
    assert_eq!(test_vector, bytes);

    let decoded: Foo = from_bytes(&test_vector).unwrap();
    assert_eq!(f, decoded);
}

#[test]
fn struct_concatenation() {
    // A struct's encoding is its fields' encodings, nothing else.
    let bar = Bar {
        a: 7,
        b: vec![1, 2],
        c: Addr([9u8; 32]),
        d: 3,
    };
    let mut expected = Vec::new();
    expected.extend(to_bytes(&bar.a).unwrap());
    expected.extend(to_bytes(&bar.b).unwrap());
    expected.extend(to_bytes(&bar.c).unwrap());
    expected.extend(to_bytes(&bar.d).unwrap());
    assert_eq!(to_bytes(&bar).unwrap(), expected);
}

proptest! {
    #[test]
    fn proptest_bool(v in any::<bool>()) {
        prop_assert_eq!(to_bytes(&v)?, vec![v.into()]);
        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_u8(v in any::<u8>()) {
        prop_assert_eq!(to_bytes(&v)?, v.to_le_bytes());
        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_u16(v in any::<u16>()) {
        prop_assert_eq!(to_bytes(&v)?, v.to_le_bytes());
        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_u32(v in any::<u32>()) {
        prop_assert_eq!(to_bytes(&v)?, v.to_le_bytes());
        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_u64(v in any::<u64>()) {
        prop_assert_eq!(to_bytes(&v)?, v.to_le_bytes());
        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_u128(v in any::<u128>()) {
        prop_assert_eq!(to_bytes(&v)?, v.to_le_bytes());
        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_u256(bytes in any::<[u8; 32]>()) {
        let v = U256::from_le_bytes(bytes);
        prop_assert_eq!(to_bytes(&v)?, bytes.to_vec());
        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_string(v in any::<String>()) {
        let mut expected = bcs::uleb128::encode(v.len() as u64);
        expected.extend_from_slice(v.as_bytes());
        prop_assert_eq!(to_bytes(&v)?, expected);

        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_vec(v in any::<Vec<u8>>()) {
        let mut expected = bcs::uleb128::encode(v.len() as u64);
        expected.extend_from_slice(&v);
        prop_assert_eq!(to_bytes(&v)?, expected);

        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_option(v in any::<Option<u8>>()) {
        let expected = v.map(|v| vec![1, v]).unwrap_or_else(|| vec![0]);
        prop_assert_eq!(to_bytes(&v)?, expected);

        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_tuple2(v in any::<(u16, String)>()) {
        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_tuple3(v in any::<(bool, u32, String)>()) {
        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_box(v in any::<Box<u32>>()) {
        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_struct(v in any::<S>()) {
        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_addr(v in any::<Addr>()) {
        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_bar(v in any::<Bar>()) {
        assert_canonical_encode_decode(v);
    }

    #[test]
    fn proptest_foo(v in any::<Foo>()) {
        assert_canonical_encode_decode(v);
    }
}
