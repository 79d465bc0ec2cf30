//! FILENAME: pivot-engine/src/enumerate.rs
//! Axis enumeration - grouped archetypes out of the sorted store.
//!
//! The store's comparator already placed equal-archetype entries next to
//! each other (differing only in row index), so grouping is a single
//! forward pass: keep a current group, extend it while the next entry's
//! archetype compares equal under the row-index-blind grouping order,
//! emit it when it does not.

use codec::{decode_axis_key, decode_row_marker, Archetype, AxisComparator, AxisSpec, Tag};
use serde::Serialize;
use store::ScanItem;

use crate::error::PivotError;

/// One distinct archetype on an axis, with the rows that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeGroup {
    pub archetype: Archetype,
    /// 1-based row indices, ascending and duplicate-free: within a
    /// group, storage order falls through to the row index.
    pub rows: Vec<u64>,
}

/// Lazy, forward-only sequence of [`ArchetypeGroup`] for one tag's
/// contiguous store region. Not restartable; re-issue a fresh store scan
/// to enumerate again.
pub struct AxisEnumerator<'s> {
    tag: Tag,
    comparator: &'s AxisComparator,
    spec: &'s AxisSpec,
    entries: Box<dyn Iterator<Item = ScanItem> + 's>,
    current: Option<ArchetypeGroup>,
    done: bool,
}

impl<'s> AxisEnumerator<'s> {
    pub fn new(
        tag: Tag,
        comparator: &'s AxisComparator,
        spec: &'s AxisSpec,
        entries: Box<dyn Iterator<Item = ScanItem> + 's>,
    ) -> Self {
        AxisEnumerator {
            tag,
            comparator,
            spec,
            entries,
            current: None,
            done: false,
        }
    }

    fn finish(&mut self) -> Option<Result<ArchetypeGroup, PivotError>> {
        self.done = true;
        self.current.take().map(Ok)
    }
}

impl Iterator for AxisEnumerator<'_> {
    type Item = Result<ArchetypeGroup, PivotError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let (key, value) = match self.entries.next() {
                None => return self.finish(),
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
                Some(Ok(entry)) => entry,
            };

            // The store is partitioned by raw tag byte: skip earlier
            // regions, stop at the first entry past ours.
            match key.first().copied() {
                Some(byte) if byte < self.tag.as_byte() => continue,
                Some(byte) if byte > self.tag.as_byte() => return self.finish(),
                Some(_) => {}
                None => return self.finish(),
            }

            let decoded = match decode_axis_key(&key, self.spec) {
                Ok(decoded) => decoded,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
            };
            let row = match value_row_index(&value) {
                Ok(row) => row,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };

            match &mut self.current {
                Some(group)
                    if self
                        .comparator
                        .archetype_equals(self.tag, &group.archetype, &decoded.archetype) =>
                {
                    group.rows.push(row);
                }
                Some(_) => {
                    let finished = self.current.replace(ArchetypeGroup {
                        archetype: decoded.archetype,
                        rows: vec![row],
                    });
                    return finished.map(Ok);
                }
                None => {
                    self.current = Some(ArchetypeGroup {
                        archetype: decoded.archetype,
                        rows: vec![row],
                    });
                }
            }
        }
    }
}

/// Axis entry payloads are the owning row's 8-byte LE index.
fn value_row_index(value: &[u8]) -> Result<u64, PivotError> {
    let raw: [u8; 8] = value
        .try_into()
        .map_err(|_| PivotError::Codec(codec::CodecError::Truncated {
            needed: 8,
            remaining: value.len(),
        }))?;
    Ok(u64::from_le_bytes(raw))
}

// ============================================================================
// ROW MARKERS
// ============================================================================

/// Iterates the row-marker region: each row's index paired with its raw
/// line text, in row order.
pub struct RowMarkers<'s> {
    entries: Box<dyn Iterator<Item = ScanItem> + 's>,
    done: bool,
}

impl<'s> RowMarkers<'s> {
    pub fn new(entries: Box<dyn Iterator<Item = ScanItem> + 's>) -> Self {
        RowMarkers {
            entries,
            done: false,
        }
    }
}

impl Iterator for RowMarkers<'_> {
    type Item = Result<(u64, Vec<u8>), PivotError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.entries.next() {
            None => {
                self.done = true;
                None
            }
            Some(Err(err)) => {
                self.done = true;
                Some(Err(err.into()))
            }
            Some(Ok((key, value))) => {
                // Markers form the first region; the first non-marker
                // tag ends the walk.
                if key.first() != Some(&Tag::RowIndex.as_byte()) {
                    self.done = true;
                    return None;
                }
                match decode_row_marker(&key) {
                    Ok(row) => Some(Ok((row, value))),
                    Err(err) => {
                        self.done = true;
                        Some(Err(err.into()))
                    }
                }
            }
        }
    }
}
