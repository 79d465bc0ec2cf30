//! FILENAME: tests/test_pipeline.rs
//! Integration tests for the ingest → group → enumerate pipeline.

mod common;

use common::{archetype_text, groups, PivotHarness, SalesFixture};
use pivot_engine::{Axis, PivotError};

// ============================================================================
// GROUPING
// ============================================================================

#[test]
fn groups_rows_sharing_an_archetype() {
    let input = "a\tx\nb\ty\na\tz\n";
    let mut pivot = PivotHarness::run("+1", "", input);

    let left = groups(&mut pivot, Axis::Left);
    assert_eq!(left.len(), 2);
    assert_eq!(archetype_text(&left[0]), ["a"]);
    assert_eq!(left[0].rows, [1, 3]);
    assert_eq!(archetype_text(&left[1]), ["b"]);
    assert_eq!(left[1].rows, [2]);
}

#[test]
fn descending_direction_reverses_group_order() {
    let input = "a\tx\nb\ty\na\tz\n";
    let mut pivot = PivotHarness::run("-1", "", input);

    let left = groups(&mut pivot, Axis::Left);
    assert_eq!(archetype_text(&left[0]), ["b"]);
    assert_eq!(left[0].rows, [2]);
    assert_eq!(archetype_text(&left[1]), ["a"]);
    assert_eq!(left[1].rows, [1, 3]);
}

#[test]
fn secondary_column_breaks_ties_within_the_first() {
    let mut pivot = PivotHarness::run("+1,+2", "", SalesFixture::tsv());

    let left = groups(&mut pivot, Axis::Left);
    let labels: Vec<Vec<String>> = left.iter().map(archetype_text).collect();
    assert_eq!(
        labels,
        [
            ["east", "apple"],
            ["east", "pear"],
            ["west", "apple"],
            ["west", "pear"],
        ]
    );
    // Both "west apple" rows collapse into one group.
    assert_eq!(left[2].rows, [1, 3]);
}

#[test]
fn axes_group_independently() {
    let mut pivot = PivotHarness::run("+1", "+3", SalesFixture::tsv());

    let left = groups(&mut pivot, Axis::Left);
    assert_eq!(left.len(), 2);
    assert_eq!(left[0].rows, [2, 4]); // east
    assert_eq!(left[1].rows, [1, 3, 5]); // west

    let top = groups(&mut pivot, Axis::Top);
    assert_eq!(top.len(), 2);
    assert_eq!(archetype_text(&top[0]), ["Q1"]);
    assert_eq!(top[0].rows, [1, 2, 4]);
    assert_eq!(archetype_text(&top[1]), ["Q2"]);
    assert_eq!(top[1].rows, [3, 5]);
}

#[test]
fn empty_axis_specification_is_skipped() {
    let mut pivot = PivotHarness::run("", "+1", "a\nb\n");
    assert!(groups(&mut pivot, Axis::Left).is_empty());
    assert_eq!(groups(&mut pivot, Axis::Top).len(), 2);
}

#[test]
fn empty_input_yields_no_groups() {
    let mut pivot = PivotHarness::run("+1", "+1", "");
    assert_eq!(pivot.row_count(), 0);
    assert!(groups(&mut pivot, Axis::Left).is_empty());
}

// ============================================================================
// HEADER HANDLING
// ============================================================================

#[test]
fn header_row_supplies_labels_and_is_excluded_from_data() {
    let mut pivot = PivotHarness::run_with_header("+1", "", "name\tage\nal\t9\n");

    assert_eq!(pivot.labels(), ["name", "age"]);
    assert_eq!(pivot.row_count(), 1);

    let left = groups(&mut pivot, Axis::Left);
    assert_eq!(archetype_text(&left[0]), ["al"]);
    assert_eq!(left[0].rows, [1]);
}

#[test]
fn synthetic_labels_are_assigned_without_a_header() {
    let pivot = PivotHarness::run("+1", "", "a\tb\tc\n");
    assert_eq!(pivot.labels(), ["$1", "$2", "$3"]);
}

// ============================================================================
// ROW MARKERS
// ============================================================================

#[test]
fn row_markers_carry_the_raw_line_in_row_order() {
    let mut pivot = PivotHarness::run("+1", "", "b\t1\na\t2\n");

    let markers: Vec<(u64, Vec<u8>)> = pivot
        .row_markers()
        .expect("scan failed")
        .collect::<Result<Vec<_>, _>>()
        .expect("marker walk failed");
    assert_eq!(
        markers,
        [(1, b"b\t1".to_vec()), (2, b"a\t2".to_vec())]
    );
}

// ============================================================================
// ERROR PATHS
// ============================================================================

#[test]
fn narrow_row_is_a_schema_error() {
    let result = PivotHarness::try_run("+2", "", false, "a\tb\nonly-one-field\n");
    match result {
        Err(PivotError::Schema {
            row,
            found,
            required,
        }) => {
            assert_eq!(row, 2);
            assert_eq!(found, 1);
            assert_eq!(required, 2);
        }
        other => panic!("expected schema error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn schema_error_commits_nothing_for_the_failed_row() {
    // Row 2 fails width validation; row 1 remains grouped, row 2 leaves
    // neither a marker nor axis entries.
    let config = pivot_engine::PivotConfig::new(
        codec::AxisSpec::parse("+2").unwrap(),
        codec::AxisSpec::default(),
    );
    let mut pivot = pivot_engine::Pivot::open(config).unwrap();
    let err = pivot.ingest("a\tb\nshort\n".as_bytes()).unwrap_err();
    assert!(matches!(err, PivotError::Schema { row: 2, .. }));

    let markers: Vec<_> = pivot
        .row_markers()
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(markers.len(), 1);
    assert_eq!(groups(&mut pivot, Axis::Left).len(), 1);
}

// ============================================================================
// RESOURCE CLEANUP
// ============================================================================

#[test]
fn backing_storage_is_removed_after_a_successful_run() {
    let pivot = PivotHarness::run("+1", "", "a\nb\n");
    let path = pivot.store_path().to_path_buf();
    assert!(path.exists());
    pivot.close().expect("close failed");
    assert!(!path.exists());
}

#[test]
fn backing_storage_is_removed_when_a_run_fails() {
    let config = pivot_engine::PivotConfig::new(
        codec::AxisSpec::parse("+3").unwrap(),
        codec::AxisSpec::default(),
    );
    let mut pivot = pivot_engine::Pivot::open(config).unwrap();
    let path = pivot.store_path().to_path_buf();
    assert!(pivot.ingest("too\tnarrow\n".as_bytes()).is_err());
    drop(pivot);
    assert!(!path.exists());
}

// ============================================================================
// TYPED COLUMNS
// ============================================================================

#[test]
fn integer_columns_sort_numerically_not_lexically() {
    use codec::{AxisSpec, ColumnKey, ScalarType, SortDirection};

    let left = AxisSpec::new(vec![ColumnKey::new(
        0,
        SortDirection::Ascending,
        ScalarType::Integer,
    )]);
    let config = pivot_engine::PivotConfig::new(left, AxisSpec::default());
    let mut pivot = pivot_engine::Pivot::open(config).unwrap();
    pivot.ingest("10\n9\n100\n".as_bytes()).unwrap();

    let left = groups(&mut pivot, Axis::Left);
    let labels: Vec<Vec<String>> = left.iter().map(archetype_text).collect();
    assert_eq!(labels, [["9"], ["10"], ["100"]]);
}

#[test]
fn unparsable_numeric_token_is_a_schema_mismatch() {
    use codec::{AxisSpec, ColumnKey, ScalarType, SortDirection};

    let left = AxisSpec::new(vec![ColumnKey::new(
        0,
        SortDirection::Ascending,
        ScalarType::Float,
    )]);
    let config = pivot_engine::PivotConfig::new(left, AxisSpec::default());
    let mut pivot = pivot_engine::Pivot::open(config).unwrap();
    let err = pivot.ingest("1.5\nnot-a-number\n".as_bytes()).unwrap_err();
    match err {
        PivotError::Token { row, column, source } => {
            assert_eq!(row, 2);
            assert_eq!(column, 1);
            assert_eq!(source.token, "not-a-number");
        }
        other => panic!("expected token error, got {:?}", other),
    }
}
