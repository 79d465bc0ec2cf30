//! FILENAME: codec/src/key.rs
//! Composite key codec - the storage key layout.
//!
//! A storage key is one tag byte, then each column's scalar encoding in
//! axis precedence order, then (for axis keys) the 8-byte LE row index
//! that disambiguates otherwise-equal archetypes. The codec is
//! schema-directed: keys do not self-describe their column types, so
//! decoding requires the same [`AxisSpec`] the key was encoded with.
//!
//! Tag bytes are chosen so that their raw byte order partitions the
//! store into three contiguous regions: row markers (`'I'`), left-axis
//! keys (`'L'`), top-axis keys (`'T'`).

use serde::Serialize;
use smallvec::SmallVec;

use crate::definition::AxisSpec;
use crate::error::CodecError;
use crate::scalar::Scalar;

// ============================================================================
// TAGS
// ============================================================================

/// Discriminant byte marking which logical partition an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum Tag {
    /// Per-row marker entry; the payload carries the raw line text.
    RowIndex = b'I',
    /// Left-axis composite key.
    Left = b'L',
    /// Top-axis composite key.
    Top = b'T',
}

impl Tag {
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Result<Tag, CodecError> {
        match byte {
            b'I' => Ok(Tag::RowIndex),
            b'L' => Ok(Tag::Left),
            b'T' => Ok(Tag::Top),
            other => Err(CodecError::UnknownTag(other)),
        }
    }
}

// ============================================================================
// ARCHETYPES
// ============================================================================

/// Inline storage for archetype values; axes rarely key more than a
/// handful of columns.
pub type ArchetypeValues = SmallVec<[Scalar; 4]>;

/// One concrete composite key instance: an ordered tuple of scalar
/// values, one per [`ColumnKey`](crate::ColumnKey) in the axis spec.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Archetype {
    values: ArchetypeValues,
}

impl Archetype {
    pub fn new(values: ArchetypeValues) -> Self {
        Archetype { values }
    }

    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<Scalar> for Archetype {
    fn from_iter<I: IntoIterator<Item = Scalar>>(iter: I) -> Self {
        Archetype {
            values: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// ENCODE / DECODE
// ============================================================================

/// A fully decoded storage key.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAxisKey {
    pub tag: Tag,
    pub archetype: Archetype,
    /// Present on storage keys; absent on bare archetype encodings.
    pub row_index: Option<u64>,
}

/// Encodes a storage key: tag, archetype, disambiguating row index.
pub fn encode_axis_key(tag: Tag, archetype: &Archetype, row_index: u64) -> Vec<u8> {
    let mut out = encode_archetype(tag, archetype);
    out.extend_from_slice(&row_index.to_le_bytes());
    out
}

/// Encodes a tag plus archetype without the row-index suffix. This is
/// the grouping-order form of the key; two rows with an equal archetype
/// produce identical bytes.
pub fn encode_archetype(tag: Tag, archetype: &Archetype) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + 8 * (archetype.len() + 1));
    out.push(tag.as_byte());
    for value in archetype.values() {
        value.encode_into(&mut out);
    }
    out
}

/// Decodes an axis key against the spec it was encoded with. The row
/// index is returned when the trailing 8 bytes are present.
pub fn decode_axis_key(bytes: &[u8], spec: &AxisSpec) -> Result<DecodedAxisKey, CodecError> {
    let tag_byte = *bytes.first().ok_or(CodecError::Truncated {
        needed: 1,
        remaining: 0,
    })?;
    let tag = Tag::from_byte(tag_byte)?;

    let mut offset = 1;
    let mut values = ArchetypeValues::with_capacity(spec.len());
    for key in spec.keys() {
        let (value, consumed) = Scalar::decode(&bytes[offset..], key.scalar_type)?;
        values.push(value);
        offset += consumed;
    }

    let row_index = match bytes.len() - offset {
        0 => None,
        8 => {
            let raw: [u8; 8] = bytes[offset..].try_into().map_err(|_| CodecError::Truncated {
                needed: 8,
                remaining: bytes.len() - offset,
            })?;
            Some(u64::from_le_bytes(raw))
        }
        remaining => {
            return Err(CodecError::Truncated {
                needed: 8,
                remaining,
            })
        }
    };

    Ok(DecodedAxisKey {
        tag,
        archetype: Archetype::new(values),
        row_index,
    })
}

/// Encodes the per-row marker key: tag `'I'` plus the 8-byte LE row index.
pub fn encode_row_marker(row_index: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(9);
    out.push(Tag::RowIndex.as_byte());
    out.extend_from_slice(&row_index.to_le_bytes());
    out
}

/// Decodes a row-marker key back to its row index.
pub fn decode_row_marker(bytes: &[u8]) -> Result<u64, CodecError> {
    match bytes.split_first() {
        Some((&tag_byte, rest)) if tag_byte == Tag::RowIndex.as_byte() => {
            let raw: [u8; 8] = rest.try_into().map_err(|_| CodecError::Truncated {
                needed: 8,
                remaining: rest.len(),
            })?;
            Ok(u64::from_le_bytes(raw))
        }
        Some((&tag_byte, _)) => Err(CodecError::UnknownTag(tag_byte)),
        None => Err(CodecError::Truncated {
            needed: 1,
            remaining: 0,
        }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
