//! BCS encoder: a [`serde::Serializer`] writing canonical bytes to any [`Write`].

use crate::{
    config::Config,
    depth::DepthGuard,
    error::{Error, Result},
    ordering, varint,
};
use serde::Serialize;
use std::io::Write;

/// Streams the canonical encoding of serde values into a writer.
pub struct Encoder<W: Write> {
    writer: W,
    depth: DepthGuard,
    max_sequence_length: usize,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, &Config::default())
    }

    pub fn with_config(writer: W, config: &Config) -> Self {
        Encoder {
            writer,
            depth: DepthGuard::new(config.max_container_depth()),
            max_sequence_length: config.max_sequence_length(),
        }
    }

    /// Encodes `value`.
    ///
    /// A failed encode releases every container level it opened, so the
    /// encoder can be reused.
    pub fn encode<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let result = value.serialize(&mut *self);
        if result.is_err() {
            self.depth.reset();
        }
        result
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// An encoder for a single map key or value, sharing this encoder's
    /// limits and current depth.
    fn entry_encoder(&self) -> Encoder<Vec<u8>> {
        Encoder {
            writer: Vec::new(),
            depth: self.depth,
            max_sequence_length: self.max_sequence_length,
        }
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        if len > self.max_sequence_length {
            return Err(Error::ExceededMaxLength(self.max_sequence_length));
        }
        varint::write(len as u64, &mut self.writer)?;
        Ok(())
    }

    fn write_variant_index(&mut self, index: u32) -> Result<()> {
        varint::write(u64::from(index), &mut self.writer)?;
        Ok(())
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        self.depth.enter()
    }

    fn leave(&mut self) {
        self.depth.leave()
    }

    /// Encodes `value` one container level deeper.
    fn nested<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.enter()?;
        let result = value.serialize(&mut *self);
        self.leave();
        result
    }
}

impl<'a, W: Write> serde::Serializer for &'a mut Encoder<W> {
    type Ok = ();
    type Error = Error;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = MapEncoder<'a, W>;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.write_raw(&[v as u8])
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.write_raw(&v.to_le_bytes())
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.write_raw(&v.to_le_bytes())
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.write_raw(&v.to_le_bytes())
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.write_raw(&v.to_le_bytes())
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.write_raw(&v.to_le_bytes())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.write_raw(&[v])
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.write_raw(&v.to_le_bytes())
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.write_raw(&v.to_le_bytes())
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.write_raw(&v.to_le_bytes())
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.write_raw(&v.to_le_bytes())
    }

    fn serialize_f32(self, _v: f32) -> Result<()> {
        Err(Error::NotSupported("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        Err(Error::NotSupported("f64"))
    }

    fn serialize_char(self, _v: char) -> Result<()> {
        Err(Error::NotSupported("char"))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.serialize_bytes(v.as_bytes())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.write_len(v.len())?;
        self.write_raw(v)
    }

    fn serialize_none(self) -> Result<()> {
        self.write_raw(&[0])
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<()> {
        self.write_raw(&[1])?;
        self.nested(value)
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
        self.write_variant_index(variant_index)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<()> {
        self.nested(value)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<()> {
        self.write_variant_index(variant_index)?;
        self.nested(value)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        let len = len.ok_or(Error::MissingLength)?;
        self.write_len(len)?;
        self.enter()?;
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        self.enter()?;
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.enter()?;
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.write_variant_index(variant_index)?;
        self.enter()?;
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        // Entries are buffered and sorted, so a missing length hint is fine.
        self.enter()?;
        Ok(MapEncoder {
            encoder: self,
            entries: Vec::new(),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.enter()?;
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.write_variant_index(variant_index)?;
        self.enter()?;
        Ok(self)
    }

    fn is_human_readable(&self) -> bool {
        false
    }
}

impl<'a, W: Write> serde::ser::SerializeSeq for &'a mut Encoder<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        self.leave();
        Ok(())
    }
}

impl<'a, W: Write> serde::ser::SerializeTuple for &'a mut Encoder<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        self.leave();
        Ok(())
    }
}

impl<'a, W: Write> serde::ser::SerializeTupleStruct for &'a mut Encoder<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        self.leave();
        Ok(())
    }
}

impl<'a, W: Write> serde::ser::SerializeTupleVariant for &'a mut Encoder<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        self.leave();
        Ok(())
    }
}

impl<'a, W: Write> serde::ser::SerializeStruct for &'a mut Encoder<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        self.leave();
        Ok(())
    }
}

impl<'a, W: Write> serde::ser::SerializeStructVariant for &'a mut Encoder<W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        self.leave();
        Ok(())
    }
}

/// Buffers map entries so they can be written in canonical key order.
pub struct MapEncoder<'a, W: Write> {
    encoder: &'a mut Encoder<W>,
    entries: Vec<(Vec<u8>, Vec<u8>)>,
    next_key: Option<Vec<u8>>,
}

impl<'a, W: Write> serde::ser::SerializeMap for MapEncoder<'a, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        let mut key_encoder = self.encoder.entry_encoder();
        key.serialize(&mut key_encoder)?;
        self.next_key = Some(key_encoder.into_inner());
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error::Custom("map value serialized before its key".to_string()))?;
        let mut value_encoder = self.encoder.entry_encoder();
        value.serialize(&mut value_encoder)?;
        self.entries.push((key, value_encoder.into_inner()));
        Ok(())
    }

    fn end(mut self) -> Result<()> {
        if self.next_key.is_some() {
            return Err(Error::Custom("map key serialized without a value".to_string()));
        }
        ordering::sort_entries(&mut self.entries)?;
        self.encoder.write_len(self.entries.len())?;
        for (key, value) in &self.entries {
            self.encoder.write_raw(key)?;
            self.encoder.write_raw(value)?;
        }
        self.encoder.leave();
        Ok(())
    }
}

/// A writer that only counts the bytes passed to it.
#[derive(Default)]
pub(crate) struct SizeCounter(usize);

impl SizeCounter {
    pub(crate) fn count(&self) -> usize {
        self.0
    }
}

impl Write for SizeCounter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0 += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
