//! FILENAME: store/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Inserting a key that compares equal to an already-stored key
    /// violates the storage uniqueness invariant.
    #[error("duplicate key: an entry comparing equal is already stored")]
    DuplicateKey,
}
