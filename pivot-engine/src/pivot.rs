//! FILENAME: pivot-engine/src/pivot.rs
//! Pivot - the run orchestration object.
//!
//! Owns the configuration, the comparator, and the ordered store for
//! exactly one run: open, ingest, enumerate, close. The store's backing
//! storage is scoped to this object and is removed on every exit path,
//! including when the run ends in an error and `Pivot` is simply
//! dropped.

use std::io::BufRead;
use std::path::Path;

use codec::AxisComparator;
use store::{KeyOrder, OrderedStore, SpillStore};

use crate::config::{Axis, PivotConfig};
use crate::enumerate::{AxisEnumerator, RowMarkers};
use crate::error::PivotError;
use crate::ingest::IngestionPipeline;

/// Adapter installing [`AxisComparator::storage_order`] as the store's
/// comparator. Only the storage-order form is ever installed; grouping
/// order stays with the enumerator.
struct StorageOrder(AxisComparator);

impl KeyOrder for StorageOrder {
    fn compare(&self, a: &[u8], b: &[u8]) -> std::cmp::Ordering {
        self.0.storage_order(a, b)
    }
}

/// One pivot run over one input stream.
pub struct Pivot {
    config: PivotConfig,
    comparator: AxisComparator,
    store: SpillStore<StorageOrder>,
    labels: Vec<String>,
    rows: u64,
}

impl Pivot {
    /// Builds the comparator from the configured axes and opens the
    /// backing store with it installed.
    pub fn open(config: PivotConfig) -> Result<Self, PivotError> {
        let comparator = AxisComparator::new(config.left().clone(), config.top().clone());
        let store = SpillStore::open(StorageOrder(comparator.clone()))?;
        Ok(Pivot {
            config,
            comparator,
            store,
            labels: Vec::new(),
            rows: 0,
        })
    }

    /// Ingests the whole input stream. Returns the number of data rows.
    pub fn ingest<R: BufRead>(&mut self, input: R) -> Result<u64, PivotError> {
        let mut pipeline = IngestionPipeline::new(&self.config, &mut self.store);
        let rows = pipeline.run(input)?;
        self.labels = pipeline.into_labels();
        self.rows = rows;
        Ok(rows)
    }

    /// Enumerates one axis's archetype groups in its configured order.
    pub fn groups(&mut self, axis: Axis) -> Result<AxisEnumerator<'_>, PivotError> {
        let spec = self.config.axis(axis);
        let comparator = &self.comparator;
        let entries = self.store.scan()?;
        Ok(AxisEnumerator::new(axis.tag(), comparator, spec, entries))
    }

    /// Iterates every ingested row's marker: row index plus raw line.
    pub fn row_markers(&mut self) -> Result<RowMarkers<'_>, PivotError> {
        let entries = self.store.scan()?;
        Ok(RowMarkers::new(entries))
    }

    /// Column display labels (header row or synthetic `$N`).
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Data rows ingested.
    pub fn row_count(&self) -> u64 {
        self.rows
    }

    pub fn config(&self) -> &PivotConfig {
        &self.config
    }

    /// Backing storage location, for diagnostics.
    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    /// Tears the store down, surfacing removal errors.
    pub fn close(self) -> Result<(), PivotError> {
        self.store.close()?;
        Ok(())
    }
}
