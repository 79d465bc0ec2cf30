//! FILENAME: pivot-engine/src/error.rs

use thiserror::Error;

use codec::{CodecError, ConfigError, TokenError};
use store::StoreError;

/// Every fatal condition a pivot run can end in. There are no retries
/// and no partial results: the first error aborts the run, and the
/// store's backing storage is torn down on the way out.
#[derive(Error, Debug)]
pub enum PivotError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A row is narrower than the highest configured column index: the
    /// data does not match the declared schema.
    #[error("row {row} has {found} field(s) but the axes reference column {required}")]
    Schema {
        row: u64,
        found: usize,
        required: usize,
    },

    /// A token does not parse as its column's declared scalar type.
    /// Like a width violation, the data does not match the declared
    /// schema.
    #[error("row {row}, column {column}: {source}")]
    Token {
        row: u64,
        /// 1-based source column.
        column: usize,
        #[source]
        source: TokenError,
    },

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("cannot read input: {0}")]
    Input(#[source] std::io::Error),
}
