//! Error types for preset decoding and importing

use std::io;
use thiserror::Error;

/// Errors raised while reading the binary structure of a preset file.
///
/// These never escape the container parsers: `AbrParser` and `AslParser`
/// turn them into warnings on the parse result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Unexpected end of data at offset {offset}: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("String decoding error: {0}")]
    StringDecode(String),
}

impl From<DecodeError> for String {
    fn from(err: DecodeError) -> Self {
        err.to_string()
    }
}

/// Errors raised by the file-level import API
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown preset format for path: {0}")]
    UnknownFormat(String),

    #[error("Texture encoding error: {0}")]
    Encode(String),
}

impl From<ImportError> for String {
    fn from(err: ImportError) -> Self {
        err.to_string()
    }
}
