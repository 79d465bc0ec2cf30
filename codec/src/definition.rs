//! FILENAME: codec/src/definition.rs
//! Axis Definition - The serializable configuration.
//!
//! This module contains the types that DESCRIBE one grouping axis: which
//! source columns participate, in what precedence, with which sort
//! direction and scalar type. These structures are:
//! - Serializable (for saving/loading run configurations)
//! - Immutable snapshots of user intent, built once at startup
//! - The schema the codec and comparator are directed by

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Index into the source data columns (0-based).
pub type ColumnIndex = usize;

// ============================================================================
// COLUMN KEYS
// ============================================================================

/// Scalar type of a keyed column. Closed set; the codec and comparator
/// dispatch on this tag rather than on open-ended dynamic types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScalarType {
    /// Raw token text, compared byte-wise lexicographically.
    #[default]
    Text,
    /// 64-bit signed integer.
    Integer,
    /// IEEE-754 double.
    Float,
}

/// Sort direction for one keyed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Applies this direction to an ascending comparison result.
    pub fn apply(self, ord: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// One column participating in an axis key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnKey {
    /// Index of the source column (0-based).
    pub column_index: ColumnIndex,

    /// Sort direction for this column's values.
    pub direction: SortDirection,

    /// How this column's tokens are parsed, encoded and compared.
    pub scalar_type: ScalarType,
}

impl ColumnKey {
    pub fn new(column_index: ColumnIndex, direction: SortDirection, scalar_type: ScalarType) -> Self {
        ColumnKey {
            column_index,
            direction,
            scalar_type,
        }
    }

    /// Parses a single signed 1-based column reference: `+2`, `-1` or `3`.
    ///
    /// A bare index sorts ascending. The textual syntax carries no type
    /// annotation, so parsed columns default to [`ScalarType::Text`].
    pub fn parse(entry: &str) -> Result<Self, ConfigError> {
        let (direction, rest) = match entry.as_bytes().first() {
            Some(b'+') => (SortDirection::Ascending, &entry[1..]),
            Some(b'-') => (SortDirection::Descending, &entry[1..]),
            _ => (SortDirection::Ascending, entry),
        };

        let digits_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
        if digits_len == 0 {
            return Err(ConfigError::NotANumber(entry.to_string()));
        }
        if digits_len < rest.len() {
            return Err(ConfigError::TrailingGarbage {
                entry: entry.to_string(),
                found: rest[digits_len..].to_string(),
            });
        }

        let one_based: usize = rest
            .parse()
            .map_err(|_| ConfigError::NotANumber(entry.to_string()))?;
        if one_based == 0 {
            return Err(ConfigError::NonPositive(entry.to_string()));
        }

        Ok(ColumnKey::new(
            one_based - 1,
            direction,
            ScalarType::Text,
        ))
    }
}

// ============================================================================
// AXIS SPECIFICATION
// ============================================================================

/// The ordered list of column keys for one axis. Order is comparison
/// precedence: the first key is the outermost sort level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSpec {
    keys: Vec<ColumnKey>,
}

impl AxisSpec {
    pub fn new(keys: Vec<ColumnKey>) -> Self {
        AxisSpec { keys }
    }

    /// Parses a comma-separated axis specification, e.g. `+2,-1,3`.
    /// An empty (or all-whitespace) specification yields an empty axis,
    /// which the pipeline skips entirely.
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Ok(AxisSpec::default());
        }
        let keys = spec
            .split(',')
            .map(ColumnKey::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AxisSpec { keys })
    }

    pub fn keys(&self) -> &[ColumnKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Highest 0-based column index referenced by this axis, used to
    /// validate row width during ingestion.
    pub fn max_column_index(&self) -> Option<ColumnIndex> {
        self.keys.iter().map(|k| k.column_index).max()
    }
}

// ============================================================================
// TESTS
// ============================================================================
