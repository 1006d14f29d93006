//! Unsigned LEB128 encoding for lengths and enum variant indices.
//!
//! Each byte carries 7 bits of the value, least-significant group first. The
//! high bit is set on every byte except the last. Only the minimal encoding of
//! a value is accepted when decoding.

use crate::error::{Error, Result};
use std::io::Write;

const DATA_BITS_PER_BYTE: usize = 7;
const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;

/// Longest possible encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Writes `value` as a varint.
pub fn write<W: Write + ?Sized>(value: u64, writer: &mut W) -> std::io::Result<()> {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let len = encode(value, &mut buf);
    writer.write_all(&buf[..len])
}

/// Encodes `value` into `buf`, returning the number of bytes used.
pub fn encode(mut value: u64, buf: &mut [u8; MAX_VARINT_LEN]) -> usize {
    let mut i = 0;
    while value >= u64::from(CONTINUATION_BIT_MASK) {
        buf[i] = (value as u8 & DATA_BITS_MASK) | CONTINUATION_BIT_MASK;
        value >>= DATA_BITS_PER_BYTE;
        i += 1;
    }
    buf[i] = value as u8;
    i + 1
}

/// Decodes a varint from the front of `input`.
///
/// Returns the value and the number of bytes consumed.
pub fn read(input: &[u8]) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    for (i, &byte) in input.iter().enumerate() {
        let shift = i * DATA_BITS_PER_BYTE;

        // The tenth byte holds bit 63 only; anything else (including a
        // continuation bit) would need more than 64 bits.
        if shift == 63 && byte > 1 {
            return Err(Error::IntegerOverflow);
        }
        value |= u64::from(byte & DATA_BITS_MASK) << shift;

        if byte & CONTINUATION_BIT_MASK == 0 {
            // A zero final group means a shorter encoding existed.
            if i > 0 && byte == 0 {
                return Err(Error::NonCanonicalVarint);
            }
            return Ok((value, i + 1));
        }
    }
    Err(Error::TruncatedInput)
}

/// Number of bytes needed to encode `value`.
pub fn size(value: u64) -> usize {
    let data_bits = 64 - value.leading_zeros() as usize;
    usize::max(1, data_bits.div_ceil(DATA_BITS_PER_BYTE))
}
