//! Shared helpers for the integration tests.

#![allow(dead_code)]

use serde_json::Value;
use sqlbuilder::dialect::{Dialect, PlainDialect};
use sqlbuilder::render::{Render, RenderExt};

/// Install a test-friendly subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn render_with<R: Render>(node: &R, dialect: &dyn Dialect) -> (String, Vec<Value>) {
    node.to_sql(dialect).expect("render should succeed")
}

pub fn render<R: Render>(node: &R) -> (String, Vec<Value>) {
    render_with(node, &PlainDialect)
}

/// Render with the plain dialect and check text, parameters and that every
/// parameter has exactly one placeholder.
pub fn assert_sql<R: Render>(node: &R, sql: &str, params: Vec<Value>) {
    let (got_sql, got_params) = render(node);
    assert_eq!(got_sql, sql);
    assert_eq!(got_params, params);
    assert_eq!(
        got_sql.matches("%s").count(),
        got_params.len(),
        "placeholder count must match parameter count"
    );
}
