//! FILENAME: pivot-engine/src/ingest.rs
//! Ingestion pipeline - rows in, storage keys out.
//!
//! Per row: read the line, split on tab into borrowed slices of the
//! immutable line buffer, validate the schema width for each configured
//! axis, build each axis's archetype, then insert one storage key per
//! axis plus one row marker. The marker's payload is the raw line text,
//! which a later rendering stage needs to reproduce non-grouped columns.
//!
//! The row counter is 1-based and counts data rows only; a header row is
//! consumed for labels before counting starts.

use std::io::BufRead;

use codec::{encode_axis_key, encode_row_marker, Archetype, ArchetypeValues, Scalar, Tag};
use store::OrderedStore;

use crate::config::PivotConfig;
use crate::error::PivotError;

/// Streams tokenized rows into the ordered store.
pub struct IngestionPipeline<'a, S: OrderedStore> {
    config: &'a PivotConfig,
    store: &'a mut S,

    /// Column display labels: from the header row when configured,
    /// otherwise synthetic `$1, $2, …` from the first data row's width.
    labels: Vec<String>,

    /// Rows ingested so far, 1-based.
    rows: u64,
}

impl<'a, S: OrderedStore> IngestionPipeline<'a, S> {
    pub fn new(config: &'a PivotConfig, store: &'a mut S) -> Self {
        IngestionPipeline {
            config,
            store,
            labels: Vec::new(),
            rows: 0,
        }
    }

    /// Consumes the whole input stream. Returns the number of data rows
    /// ingested. The first error aborts the run.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<u64, PivotError> {
        let mut lines = input.lines();

        if self.config.has_header() {
            if let Some(header) = lines.next() {
                let header = header.map_err(PivotError::Input)?;
                self.labels = header.split('\t').map(str::to_string).collect();
            }
        }

        for line in lines {
            let line = line.map_err(PivotError::Input)?;
            self.rows += 1;
            let row_index = self.rows;
            self.ingest_row(row_index, &line)?;
        }

        log::info!("ingested {} rows", self.rows);
        Ok(self.rows)
    }

    pub fn into_labels(self) -> Vec<String> {
        self.labels
    }

    fn ingest_row(&mut self, row_index: u64, line: &str) -> Result<(), PivotError> {
        let config = self.config;
        let tokens: Vec<&str> = line.split('\t').collect();

        if self.labels.is_empty() {
            self.labels = (1..=tokens.len()).map(|i| format!("${}", i)).collect();
        }

        // Validate and build both axes before committing anything, so a
        // failed row leaves no entries behind.
        let mut pending: Vec<(Tag, Archetype)> = Vec::with_capacity(2);
        for (tag, spec) in [(Tag::Left, config.left()), (Tag::Top, config.top())] {
            if spec.is_empty() {
                continue;
            }
            if let Some(max_index) = spec.max_column_index() {
                if max_index >= tokens.len() {
                    return Err(PivotError::Schema {
                        row: row_index,
                        found: tokens.len(),
                        required: max_index + 1,
                    });
                }
            }

            let mut values = ArchetypeValues::with_capacity(spec.len());
            for key in spec.keys() {
                let value = Scalar::parse(tokens[key.column_index], key.scalar_type)
                    .map_err(|source| PivotError::Token {
                        row: row_index,
                        column: key.column_index + 1,
                        source,
                    })?;
                values.push(value);
            }
            pending.push((tag, Archetype::new(values)));
        }

        self.store
            .insert(&encode_row_marker(row_index), line.as_bytes())?;
        for (tag, archetype) in &pending {
            let key = encode_axis_key(*tag, archetype, row_index);
            self.store.insert(&key, &row_index.to_le_bytes())?;
        }
        Ok(())
    }
}
