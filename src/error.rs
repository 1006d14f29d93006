//! Error types for BCS encoding and decoding

use std::fmt::Display;
use thiserror::Error;

/// Error type for every encode and decode call.
///
/// All variants are terminal: the call that produced one has no partial result.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot decode from empty input")]
    NullInput,
    #[error("unexpected end of input")]
    TruncatedInput,
    #[error("{0} input bytes were not read")]
    TrailingBytes(usize),
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    #[error("invalid boolean byte: {0:#04x}")]
    InvalidBooleanByte(u8),
    #[error("invalid option tag: {0:#04x}")]
    InvalidOptionTag(u8),
    #[error("non-canonical varint encoding")]
    NonCanonicalVarint,
    #[error("integer overflow")]
    IntegerOverflow,
    #[error("{0} announced elements were not read")]
    UnreadElements(usize),
    #[error("map keys are not in strictly increasing order")]
    UnorderedMapKeys,
    #[error("exceeded max container depth of {0}")]
    MaxContainerDepthExceeded(usize),
    #[error("sequence length exceeds maximum of {0}")]
    ExceededMaxLength(usize),
    #[error("not supported: {0}")]
    NotSupported(&'static str),
    #[error("sequences and maps must have a known length")]
    MissingLength,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
