//! FILENAME: codec/src/compare.rs
//! Axis comparator - storage order and grouping order.
//!
//! The two orders are deliberately separate named operations:
//! - [`AxisComparator::storage_order`] is the total order installed into
//!   the ordered store. It disambiguates equal archetypes by row index,
//!   so no two stored keys ever compare equal.
//! - [`AxisComparator::archetype_equals`] is the coarser, row-index-blind
//!   equivalence the enumerator uses to merge rows into one group.
//!
//! Keeping them apart removes any ambiguity about whether the row index
//! participates in a given comparison.

use std::cmp::Ordering;

use crate::definition::{AxisSpec, ScalarType};
use crate::error::CodecError;
use crate::key::{Archetype, Tag};
use crate::scalar::Scalar;

/// Total order over encoded storage keys, directed by the per-axis
/// column schemas.
#[derive(Debug, Clone)]
pub struct AxisComparator {
    left: AxisSpec,
    top: AxisSpec,
}

impl AxisComparator {
    pub fn new(left: AxisSpec, top: AxisSpec) -> Self {
        AxisComparator { left, top }
    }

    fn spec_for(&self, tag: Tag) -> &AxisSpec {
        match tag {
            Tag::Left => &self.left,
            Tag::Top => &self.top,
            // Row markers carry no archetype; callers never reach here.
            Tag::RowIndex => unreachable!("row markers have no axis spec"),
        }
    }

    /// Three-way comparison of two encoded storage keys.
    ///
    /// Keys with different tags order by raw tag byte, which keeps the
    /// store partitioned into contiguous marker/left/top regions. Keys
    /// with equal tags compare column by column (each column's result
    /// flipped by its configured direction) and fall through to the row
    /// index when every column is equal.
    ///
    /// # Panics
    ///
    /// Panics if either key fails to decode. The store only ever holds
    /// keys this crate encoded, so a decode failure here means the
    /// backing storage is corrupt and the run cannot continue.
    pub fn storage_order(&self, a: &[u8], b: &[u8]) -> Ordering {
        let tag_a = tag_byte(a);
        let tag_b = tag_byte(b);
        if tag_a != tag_b {
            return tag_a.cmp(&tag_b);
        }

        let tag = match Tag::from_byte(tag_a) {
            Ok(tag) => tag,
            Err(err) => panic!("corrupt storage key: {err}"),
        };

        if tag == Tag::RowIndex {
            return row_index_at(a, 1).cmp(&row_index_at(b, 1));
        }

        let mut offset_a = 1;
        let mut offset_b = 1;
        for key in self.spec_for(tag).keys() {
            let (value_a, consumed_a) = scalar_at(a, offset_a, key.scalar_type);
            let (value_b, consumed_b) = scalar_at(b, offset_b, key.scalar_type);
            offset_a += consumed_a;
            offset_b += consumed_b;

            let ord = key.direction.apply(value_a.compare(&value_b));
            if ord != Ordering::Equal {
                return ord;
            }
        }

        // Equal archetypes: the row index keeps storage keys unique.
        row_index_at(a, offset_a).cmp(&row_index_at(b, offset_b))
    }

    /// Grouping-order comparison of two decoded archetypes on one axis,
    /// ignoring row indices.
    pub fn grouping_order(&self, tag: Tag, a: &Archetype, b: &Archetype) -> Ordering {
        let spec = self.spec_for(tag);
        for (key, (value_a, value_b)) in spec
            .keys()
            .iter()
            .zip(a.values().iter().zip(b.values().iter()))
        {
            let ord = key.direction.apply(value_a.compare(value_b));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    /// True when two archetypes belong to the same group on this axis.
    pub fn archetype_equals(&self, tag: Tag, a: &Archetype, b: &Archetype) -> bool {
        self.grouping_order(tag, a, b) == Ordering::Equal
    }
}

fn tag_byte(key: &[u8]) -> u8 {
    match key.first() {
        Some(&byte) => byte,
        None => panic!("corrupt storage key: empty key"),
    }
}

fn scalar_at(key: &[u8], offset: usize, scalar_type: ScalarType) -> (Scalar, usize) {
    match Scalar::decode(&key[offset..], scalar_type) {
        Ok(decoded) => decoded,
        Err(err) => panic!("corrupt storage key: {err}"),
    }
}

fn row_index_at(key: &[u8], offset: usize) -> u64 {
    let raw: Result<[u8; 8], CodecError> = key
        .get(offset..offset + 8)
        .and_then(|s| s.try_into().ok())
        .ok_or(CodecError::Truncated {
            needed: 8,
            remaining: key.len().saturating_sub(offset),
        });
    match raw {
        Ok(bytes) => u64::from_le_bytes(bytes),
        Err(err) => panic!("corrupt storage key: {err}"),
    }
}

// ============================================================================
// TESTS
// ============================================================================
