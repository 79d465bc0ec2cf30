//! FILENAME: pivot-engine/src/config.rs
//! Run configuration - the two axes and the header flag.
//!
//! An explicit configuration object passed into the pipeline; built once
//! at startup and immutable afterwards.

use serde::{Deserialize, Serialize};

use codec::{AxisSpec, Tag};

/// One of the two independent grouping dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Left,
    Top,
}

impl Axis {
    pub fn tag(self) -> Tag {
        match self {
            Axis::Left => Tag::Left,
            Axis::Top => Tag::Top,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Axis::Left => "left",
            Axis::Top => "top",
        }
    }
}

/// Configuration for one pivot run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PivotConfig {
    left: AxisSpec,
    top: AxisSpec,
    /// When set, row 1 supplies column display labels and is excluded
    /// from the data stream.
    has_header: bool,
}

impl PivotConfig {
    pub fn new(left: AxisSpec, top: AxisSpec) -> Self {
        PivotConfig {
            left,
            top,
            has_header: false,
        }
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn left(&self) -> &AxisSpec {
        &self.left
    }

    pub fn top(&self) -> &AxisSpec {
        &self.top
    }

    pub fn axis(&self, axis: Axis) -> &AxisSpec {
        match axis {
            Axis::Left => &self.left,
            Axis::Top => &self.top,
        }
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }
}
