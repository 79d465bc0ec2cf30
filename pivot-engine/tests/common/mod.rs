//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for pivot-engine integration tests.

use codec::{AxisSpec, Scalar};
use pivot_engine::{ArchetypeGroup, Axis, Pivot, PivotConfig, PivotError};

/// Builds and runs a pivot over inline tab-delimited input.
pub struct PivotHarness;

impl PivotHarness {
    /// Opens a pivot with the given axis specs and ingests `input`.
    pub fn run(left: &str, top: &str, input: &str) -> Pivot {
        Self::try_run(left, top, false, input).expect("pivot run failed")
    }

    /// Same as `run`, treating the first row as a header.
    pub fn run_with_header(left: &str, top: &str, input: &str) -> Pivot {
        Self::try_run(left, top, true, input).expect("pivot run failed")
    }

    /// Non-panicking variant for error-path tests. The pivot is returned
    /// alongside the error so teardown behaviour stays observable.
    pub fn try_run(
        left: &str,
        top: &str,
        has_header: bool,
        input: &str,
    ) -> Result<Pivot, PivotError> {
        let config = PivotConfig::new(AxisSpec::parse(left)?, AxisSpec::parse(top)?)
            .with_header(has_header);
        let mut pivot = Pivot::open(config)?;
        pivot.ingest(input.as_bytes())?;
        Ok(pivot)
    }
}

/// Collects one axis's groups, panicking on any enumeration error.
pub fn groups(pivot: &mut Pivot, axis: Axis) -> Vec<ArchetypeGroup> {
    pivot
        .groups(axis)
        .expect("scan failed")
        .collect::<Result<Vec<_>, _>>()
        .expect("enumeration failed")
}

/// Renders a group's archetype as display strings, for terse assertions.
pub fn archetype_text(group: &ArchetypeGroup) -> Vec<String> {
    group
        .archetype
        .values()
        .iter()
        .map(Scalar::to_string)
        .collect()
}

/// Sample sales rows: region, product, quarter, units.
pub struct SalesFixture;

impl SalesFixture {
    pub fn tsv() -> &'static str {
        "west\tapple\tQ1\t10\n\
         east\tpear\tQ1\t4\n\
         west\tapple\tQ2\t7\n\
         east\tapple\tQ1\t9\n\
         west\tpear\tQ2\t2\n"
    }
}
