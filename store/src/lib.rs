//! FILENAME: store/src/lib.rs
//! Ordered key-value storage for the pivot axis engine.
//!
//! The pipeline treats sorted storage as a capability, not an
//! implementation: [`OrderedStore`] is the abstract surface (insert plus
//! forward ordered iteration), and the ordering itself is injected
//! through [`KeyOrder`] when a store is opened. The one shipped
//! implementation, [`SpillStore`], keeps its comparator-sorted key index
//! resident and spills entry payloads to a scoped temporary directory.
//!
//! A store is owned exclusively by one pipeline run. Its backing storage
//! is acquired at open and removed recursively on every exit path,
//! success or failure.

pub mod error;
pub mod spill;

pub use error::StoreError;
pub use spill::SpillStore;

use std::cmp::Ordering;

/// The externally supplied total order a store is opened with.
///
/// Implementations must be a strict total order: antisymmetric,
/// transitive, and consistent with equality. The store relies on this
/// for both index placement and duplicate detection.
pub trait KeyOrder {
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering;
}

/// One entry yielded by an ordered scan.
pub type ScanItem = Result<(Vec<u8>, Vec<u8>), StoreError>;

/// A sorted key-value store supporting insert and forward ordered
/// iteration in the injected comparator's order.
pub trait OrderedStore {
    /// Inserts one entry. Fails with [`StoreError::DuplicateKey`] if a
    /// stored key already compares equal to `key`.
    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Iterates every entry in comparator order, front to back.
    fn scan(&mut self) -> Result<Box<dyn Iterator<Item = ScanItem> + '_>, StoreError>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
