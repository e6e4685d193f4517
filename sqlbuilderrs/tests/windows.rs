//! Integration tests for WINDOW clauses and frames.

mod common;

use common::assert_sql;
use serde_json::json;
use sqlbuilder::expr::{col, func};
use sqlbuilder::query::{select, Select};
use sqlbuilder::source::table;
use sqlbuilder::window::{FrameExtent, Window};
use sqlbuilder::SqlBuilderError;

fn windowed(window: Window) -> Select {
    Select::new().window("name", window).unwrap()
}

#[test]
fn empty_window_definition() {
    assert_sql(&windowed(Window::new()), "SELECT * WINDOW name AS ()", vec![]);
}

#[test]
fn window_reference_only() {
    assert_sql(
        &windowed(Window::based_on("window_ref")),
        "SELECT * WINDOW name AS (window_ref)",
        vec![],
    );
}

#[test]
fn partition_and_order() {
    assert_sql(
        &windowed(Window::new().partition_by(["foo", "bar"])),
        "SELECT * WINDOW name AS (PARTITION BY foo, bar)",
        vec![],
    );
    assert_sql(
        &windowed(Window::new().order_by([
            col("foo").into(),
            col("bar").asc(),
            col("baz").desc().nulls_last(),
        ])),
        "SELECT * WINDOW name AS (ORDER BY foo, bar ASC, baz DESC NULLS LAST)",
        vec![],
    );
}

#[test]
fn single_bound_frames() {
    assert_sql(
        &windowed(Window::new().range(-1).unwrap()),
        "SELECT * WINDOW name AS (RANGE %s PRECEDING)",
        vec![json!(1)],
    );
    assert_sql(
        &windowed(Window::new().range(0).unwrap()),
        "SELECT * WINDOW name AS (RANGE CURRENT ROW)",
        vec![],
    );
    assert_sql(
        &windowed(Window::new().rows(1).unwrap()),
        "SELECT * WINDOW name AS (ROWS %s FOLLOWING)",
        vec![json!(1)],
    );
}

#[test]
fn between_frames() {
    let cases = [
        (
            FrameExtent::between(Some(-1), None),
            "RANGE BETWEEN %s PRECEDING AND UNBOUNDED FOLLOWING",
            vec![json!(1)],
        ),
        (
            FrameExtent::between(Some(-1), Some(0)),
            "RANGE BETWEEN %s PRECEDING AND CURRENT ROW",
            vec![json!(1)],
        ),
        (
            FrameExtent::between(None, Some(0)),
            "RANGE BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW",
            vec![],
        ),
        (
            FrameExtent::between(Some(0), None),
            "RANGE BETWEEN CURRENT ROW AND UNBOUNDED FOLLOWING",
            vec![],
        ),
        (
            FrameExtent::between(Some(0), Some(1)),
            "RANGE BETWEEN CURRENT ROW AND %s FOLLOWING",
            vec![json!(1)],
        ),
        (
            FrameExtent::between(None, Some(1)),
            "RANGE BETWEEN UNBOUNDED PRECEDING AND %s FOLLOWING",
            vec![json!(1)],
        ),
    ];
    for (extent, frame, params) in cases {
        assert_sql(
            &windowed(Window::new().range(extent).unwrap()),
            &format!("SELECT * WINDOW name AS ({frame})"),
            params,
        );
    }
}

#[test]
fn full_window_definition() {
    let window = Window::based_on("window_ref")
        .partition_by(["foo", "bar"])
        .order_by([col("foo").asc(), col("bar").desc()])
        .range(FrameExtent::between(Some(-1), Some(1)))
        .unwrap();
    assert_sql(
        &windowed(window),
        "SELECT * WINDOW name AS (window_ref PARTITION BY foo, bar ORDER BY foo ASC, bar DESC RANGE BETWEEN %s PRECEDING AND %s FOLLOWING)",
        vec![json!(1), json!(1)],
    );
}

#[test]
fn range_and_rows_conflict() {
    let err = Window::new().range(-1).unwrap().rows(1).unwrap_err();
    assert!(matches!(err, SqlBuilderError::Frame(_)));

    let err = Window::new().rows(-1).unwrap().range(1).unwrap_err();
    assert!(matches!(err, SqlBuilderError::Frame(_)));
}

#[test]
fn same_frame_kind_replaces_extent() {
    let window = Window::new().rows(-3).unwrap().rows(-1).unwrap();
    assert_sql(
        &windowed(window),
        "SELECT * WINDOW name AS (ROWS %s PRECEDING)",
        vec![json!(1)],
    );
}

#[test]
fn duplicate_window_name() {
    let err = Select::new()
        .window("w", Window::new())
        .unwrap()
        .window("w", Window::new())
        .unwrap_err();
    assert!(matches!(err, SqlBuilderError::DuplicateWindow(ref name) if name == "w"));
}

#[test]
fn windows_keep_insertion_order() {
    let query = Select::new()
        .window("b", Window::new())
        .unwrap()
        .window("a", Window::new())
        .unwrap();
    assert_sql(&query, "SELECT * WINDOW b AS (), a AS ()", vec![]);
}

#[test]
fn named_window_used_by_a_function() {
    let query = select([func("count", [col("id")]).over("w")])
        .from(table("t"))
        .window("w", Window::new().partition_by(["dept"]))
        .unwrap()
        .limit(3);
    assert_sql(
        &query,
        "SELECT count(id) OVER w FROM t WINDOW w AS (PARTITION BY dept) LIMIT %s",
        vec![json!(3)],
    );
}
