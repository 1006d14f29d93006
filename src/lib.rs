//! # Channel BCS
//!
//! A Binary Canonical Serialization (BCS) encoder/decoder built on serde, plus the
//! state channel types that are hashed and signed in this encoding.
//!
//! ## Format
//! - Integers (`u8`..`u128`, `i8`..`i128`): fixed width, little-endian
//! - `bool`: one byte, `0` or `1`
//! - Strings and byte strings: ULEB128 byte length followed by the bytes
//! - Sequences: ULEB128 element count followed by the elements
//! - Fixed arrays, tuples and structs: members in order, no prefix
//! - `Option`: tag byte `0`/`1` followed by the value when present
//! - Enums: ULEB128 variant index followed by the variant's fields
//! - Maps: ULEB128 entry count followed by key/value pairs, ordered by the
//!   bytes of the encoded keys
//!
//! Floats and `char` are not supported.
//!
//! ## Canonical decoding
//! Every value has exactly one accepted encoding. Decoding rejects non-minimal
//! varints, out-of-order or duplicate map keys, boolean and option bytes other
//! than `0`/`1`, invalid UTF-8 and unread trailing bytes. Nesting is bounded by
//! [`Config::max_container_depth`] so hostile input cannot exhaust the stack.
//!
//! ## Example
//! ```rust
//! use channel_bcs::{from_bytes, to_bytes};
//! use std::collections::BTreeMap;
//!
//! let mut map = BTreeMap::new();
//! map.insert("b".to_string(), 1u8);
//! map.insert("a".to_string(), 2u8);
//!
//! let bytes = to_bytes(&map).unwrap();
//! assert_eq!(bytes, vec![0x02, 0x01, b'a', 0x02, 0x01, b'b', 0x01]);
//!
//! let decoded: BTreeMap<String, u8> = from_bytes(&bytes).unwrap();
//! assert_eq!(decoded, map);
//! ```

use serde::{Deserialize, Serialize, de::DeserializeSeed};
use std::io::Write;
use std::marker::PhantomData;

pub mod config;
pub mod de;
mod depth;
pub mod error;
pub mod ordering;
pub mod ser;
pub mod types;
pub mod varint;

pub use config::{Config, MAX_CONTAINER_DEPTH, MAX_SEQUENCE_LENGTH};
pub use de::Decoder;
pub use error::{Error, Result};
pub use ser::Encoder;
pub use types::Canonical;

// Convenience functions
pub fn to_bytes<T: ?Sized + Serialize>(value: &T) -> Result<Vec<u8>> {
    to_bytes_with_config(value, &Config::default())
}

pub fn to_bytes_with_config<T: ?Sized + Serialize>(value: &T, config: &Config) -> Result<Vec<u8>> {
    let mut encoder = Encoder::with_config(Vec::new(), config);
    encoder.encode(value)?;
    Ok(encoder.into_inner())
}

/// Streams the encoding of `value` into `writer`.
pub fn to_writer<W: Write, T: ?Sized + Serialize>(writer: W, value: &T) -> Result<()> {
    to_writer_with_config(writer, value, &Config::default())
}

pub fn to_writer_with_config<W: Write, T: ?Sized + Serialize>(
    writer: W,
    value: &T,
    config: &Config,
) -> Result<()> {
    Encoder::with_config(writer, config).encode(value)
}

/// Number of bytes `value` encodes to, without allocating the output.
pub fn serialized_size<T: ?Sized + Serialize>(value: &T) -> Result<usize> {
    let mut encoder = Encoder::new(ser::SizeCounter::default());
    encoder.encode(value)?;
    Ok(encoder.into_inner().count())
}

/// Decodes a `T` that must occupy all of `bytes`.
pub fn from_bytes<'de, T: Deserialize<'de>>(bytes: &'de [u8]) -> Result<T> {
    from_bytes_with_config(bytes, &Config::default())
}

pub fn from_bytes_with_config<'de, T: Deserialize<'de>>(
    bytes: &'de [u8],
    config: &Config,
) -> Result<T> {
    from_bytes_seed_with_config(PhantomData, bytes, config)
}

/// Like [`from_bytes`], driven by a [`DeserializeSeed`].
pub fn from_bytes_seed<'de, S: DeserializeSeed<'de>>(seed: S, bytes: &'de [u8]) -> Result<S::Value> {
    from_bytes_seed_with_config(seed, bytes, &Config::default())
}

pub fn from_bytes_seed_with_config<'de, S: DeserializeSeed<'de>>(
    seed: S,
    bytes: &'de [u8],
    config: &Config,
) -> Result<S::Value> {
    if bytes.is_empty() {
        return Err(Error::NullInput);
    }
    let mut decoder = Decoder::with_config(bytes, config);
    let value = seed.deserialize(&mut decoder)?;
    decoder.end()?;
    Ok(value)
}
