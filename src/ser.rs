// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::error::{Error, Result};
use crate::writer::Writer;
use serde::{ser, Serialize};

/// Serializes the given value as a `Vec<u8>` of BCS.
///
/// Serialization fails if `T`'s `Serialize` implementation decides to
/// fail, if `T` holds a sequence longer than
/// [`MAX_SEQUENCE_LENGTH`](crate::MAX_SEQUENCE_LENGTH), or if `T`
/// contains a type outside the BCS schema universe (floats, chars,
/// signed integers, maps).
///
/// # Examples
///
/// ```
/// use bcs::to_bytes;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Coin {
///     value: u64,
///     owner: String,
///     is_locked: bool,
/// }
///
/// let coin = Coin {
///     value: 412_412_400_000,
///     owner: "Big Wallet Guy".to_owned(),
///     is_locked: false,
/// };
///
/// let bytes = to_bytes(&coin).unwrap();
/// let expected = vec![
///     0x80, 0xd1, 0xb1, 0x05, 0x60, 0x00, 0x00, 0x00, 0x0e, 0x42, 0x69,
///     0x67, 0x20, 0x57, 0x61, 0x6c, 0x6c, 0x65, 0x74, 0x20, 0x47, 0x75,
///     0x79, 0x00,
/// ];
/// assert_eq!(bytes, expected);
/// ```
pub fn to_bytes<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut writer = Writer::new();
    value.serialize(Serializer::new(&mut writer))?;
    Ok(writer.finish())
}

/// Number of bytes `value` occupies once serialized.
pub fn serialized_size<T>(value: &T) -> Result<usize>
where
    T: ?Sized + Serialize,
{
    to_bytes(value).map(|bytes| bytes.len())
}

/// serde serializer emitting BCS through a [`Writer`].
struct Serializer<'a> {
    writer: &'a mut Writer,
}

impl<'a> Serializer<'a> {
    fn new(writer: &'a mut Writer) -> Self {
        Serializer { writer }
    }
}

impl<'a> ser::Serializer for Serializer<'a> {
    type Ok = ();
    type Error = Error;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = ser::Impossible<(), Error>;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.writer.write_bool(v).map(|_| ())
    }

    // BCS has no signed integers; Move values are unsigned all the way up.
    fn serialize_i8(self, _v: i8) -> Result<()> {
        Err(Error::NotSupported("serialize_i8"))
    }

    fn serialize_i16(self, _v: i16) -> Result<()> {
        Err(Error::NotSupported("serialize_i16"))
    }

    fn serialize_i32(self, _v: i32) -> Result<()> {
        Err(Error::NotSupported("serialize_i32"))
    }

    fn serialize_i64(self, _v: i64) -> Result<()> {
        Err(Error::NotSupported("serialize_i64"))
    }

    fn serialize_i128(self, _v: i128) -> Result<()> {
        Err(Error::NotSupported("serialize_i128"))
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.writer.write_u8(v).map(|_| ())
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.writer.write_u16(v).map(|_| ())
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.writer.write_u32(v).map(|_| ())
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.writer.write_u64(v).map(|_| ())
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.writer.write_u128(v).map(|_| ())
    }

    fn serialize_f32(self, _v: f32) -> Result<()> {
        Err(Error::NotSupported("serialize_f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        Err(Error::NotSupported("serialize_f64"))
    }

    fn serialize_char(self, _v: char) -> Result<()> {
        Err(Error::NotSupported("serialize_char"))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.writer.write_string(v).map(|_| ())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.writer.write_byte_vector(v).map(|_| ())
    }

    // An absent optional is a single `0x00`.
    fn serialize_none(self) -> Result<()> {
        self.writer.write_u8(0).map(|_| ())
    }

    // A present optional is `0x01` followed by the payload.
    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.writer.write_u8(1)?;
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        self.writer.write_variant_index(variant_index).map(|_| ())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.writer.write_variant_index(variant_index)?;
        value.serialize(self)
    }

    // Variable-length sequences start with their element count; the count
    // must be known up front because the format has no terminator.
    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        match len {
            Some(len) => {
                self.writer.write_len(len)?;
                Ok(self)
            }
            None => Err(Error::MissingLen),
        }
    }

    // Tuples have a fixed shape, so no length prefix.
    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.writer.write_variant_index(variant_index)?;
        Ok(self)
    }

    // Maps are excluded from the schema universe: a canonical map order
    // cannot be enforced on arbitrary serde maps.
    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::NotSupported("serialize_map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.writer.write_variant_index(variant_index)?;
        Ok(self)
    }

    // BCS is not a human readable format.
    fn is_human_readable(&self) -> bool {
        false
    }
}

impl<'a> ser::SerializeSeq for Serializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(Serializer::new(self.writer))
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a> ser::SerializeTuple for Serializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(Serializer::new(self.writer))
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a> ser::SerializeTupleStruct for Serializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(Serializer::new(self.writer))
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a> ser::SerializeTupleVariant for Serializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(Serializer::new(self.writer))
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a> ser::SerializeStruct for Serializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(Serializer::new(self.writer))
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a> ser::SerializeStructVariant for Serializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(Serializer::new(self.writer))
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}
