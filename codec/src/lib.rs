//! FILENAME: codec/src/lib.rs
//! Key codec subsystem for the pivot axis engine.
//!
//! This crate owns everything that touches the binary key format: the
//! per-column scalar codec, the composite-key layout, and the comparator
//! the ordered store is opened with. It depends on nothing else in the
//! workspace so the wire format can be reasoned about (and tested) in
//! isolation.
//!
//! Layers:
//! - `definition`: Serializable axis configuration (what the user asked for)
//! - `scalar`: One typed value — parse, encode, decode, compare
//! - `key`: Composite storage keys — tag byte, archetype, row index
//! - `compare`: The total order installed into the store, and the
//!   row-index-blind grouping equivalence

pub mod compare;
pub mod definition;
pub mod error;
pub mod key;
pub mod scalar;

pub use compare::AxisComparator;
pub use definition::{AxisSpec, ColumnIndex, ColumnKey, ScalarType, SortDirection};
pub use error::{CodecError, ConfigError, TokenError};
pub use key::{
    decode_axis_key, decode_row_marker, encode_archetype, encode_axis_key,
    encode_row_marker, Archetype, ArchetypeValues, DecodedAxisKey, Tag,
};
pub use scalar::Scalar;
