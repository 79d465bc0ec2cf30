//! FILENAME: codec/src/error.rs

use thiserror::Error;

use crate::definition::ScalarType;

/// Errors detected while parsing an axis specification, before any row
/// is read.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("axis column `{0}` is not a number")]
    NotANumber(String),

    #[error("axis column index must be 1 or greater in `{0}`")]
    NonPositive(String),

    #[error("unexpected `{found}` after column index in `{entry}`")]
    TrailingGarbage { entry: String, found: String },
}

/// A row token that does not parse as its column's declared scalar
/// type. This is a data-versus-schema mismatch, not a byte-level decode
/// failure; the pipeline reports it alongside width violations.
#[derive(Error, Debug)]
#[error("cannot parse `{token}` as {scalar_type:?}")]
pub struct TokenError {
    pub token: String,
    pub scalar_type: ScalarType,
}

/// Errors detected while decoding key bytes. A decode failure on bytes
/// the engine itself encoded signals storage corruption.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("truncated key: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("text value is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("unknown tag byte 0x{0:02x}")]
    UnknownTag(u8),
}
