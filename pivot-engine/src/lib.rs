//! FILENAME: pivot-engine/src/lib.rs
//! Pivot axis engine.
//!
//! Builds pivot-table axes from tab-delimited input: each row is
//! projected onto two independently configured composite keys (left and
//! top), the encoded keys are inserted into an ordered store sorted by
//! the configured comparator, and each axis is then enumerated as a
//! sorted, de-duplicated sequence of archetype groups. An out-of-scope
//! assembler cross-references the two sequences into a matrix.
//!
//! Layers:
//! - `config`: Run configuration (which axes, header handling)
//! - `ingest`: Rows in, storage keys out
//! - `enumerate`: Sorted store out, grouped archetypes out
//! - `pivot`: One-run orchestration and resource scoping
//!
//! The binary key format and comparator live in the `codec` crate; the
//! ordered-store capability lives in `store`.

pub mod config;
pub mod enumerate;
pub mod error;
pub mod ingest;
pub mod pivot;

pub use config::{Axis, PivotConfig};
pub use enumerate::{ArchetypeGroup, AxisEnumerator, RowMarkers};
pub use error::PivotError;
pub use ingest::IngestionPipeline;
pub use pivot::Pivot;
