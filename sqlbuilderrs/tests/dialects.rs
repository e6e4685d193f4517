//! Integration tests for dialect quoting, placeholders and operator overrides.

mod common;

use common::render_with;
use serde_json::json;
use sqlbuilder::config::SqlBuilderConfig;
use sqlbuilder::dialect::Dialect;
use sqlbuilder::expr::{col, func, var, Expr};
use sqlbuilder::query::select;
use sqlbuilder::render::{Context, Fragment, Render, RenderExt};
use sqlbuilder::source::{on, table};
use sqlbuilder::{Result, SqlBuilderError};

/// Spells `<>` as `!=` and refuses IN.
struct BangDialect;

impl Dialect for BangDialect {
    fn quote_ident(&self, ident: &str) -> String {
        format!("`{ident}`")
    }

    fn operator_to_sql(
        &self,
        op: &str,
        left: &Expr,
        right: Option<&Expr>,
        ctx: &dyn Context,
    ) -> Result<Option<Fragment>> {
        match (op, right) {
            ("<>", Some(right)) => {
                let mut fragment = left.render(self, ctx)?;
                fragment.push_str(" != ");
                fragment.append(right.render(self, ctx)?);
                Ok(Some(fragment.parenthesized()))
            }
            ("IN", _) => Err(SqlBuilderError::Other(anyhow::anyhow!(
                "IN is not supported here"
            ))),
            _ => Ok(None),
        }
    }
}

#[test]
fn operator_override_replaces_default_rendering() {
    let (sql, params) = render_with(&col("a").ne(1), &BangDialect);
    assert_eq!(sql, "(`a` != %s)");
    assert_eq!(params, vec![json!(1)]);

    let (sql, _) = render_with(&col("a").eq(1), &BangDialect);
    assert_eq!(sql, "(`a` = %s)");
}

#[test]
fn operator_override_errors_propagate_unchanged() {
    let err = col("a").in_list([1, 2]).to_sql(&BangDialect).unwrap_err();
    assert!(matches!(err, SqlBuilderError::Other(_)));
    assert_eq!(err.to_string(), "IN is not supported here");
}

#[cfg(feature = "postgres")]
#[test]
fn postgres_quotes_dotted_names() {
    use sqlbuilder::dialect::PostgresDialect;

    let query = select([col("u.name"), func("count", [col("u.id")]).into()])
        .from(table("public.users").alias("u"))
        .inner_join(table("orders").alias("o"), on(col("o.user_id").eq(col("u.id"))))
        .unwrap()
        .where_clause(col("u.id").eq(5))
        .unwrap();
    let (sql, params) = render_with(&query, &PostgresDialect);
    assert_eq!(
        sql,
        "SELECT \"u\".\"name\", count(\"u\".\"id\") FROM \"public\".\"users\" AS \"u\" \
         INNER JOIN \"orders\" AS \"o\" ON (\"o\".\"user_id\" = \"u\".\"id\") \
         WHERE (\"u\".\"id\" = %s)"
    );
    assert_eq!(params, vec![json!(5)]);
}

#[cfg(feature = "postgres")]
#[test]
fn postgres_quotes_wildcard_table() {
    use sqlbuilder::dialect::PostgresDialect;

    let (sql, _) = render_with(&select([table("t").all_columns()]), &PostgresDialect);
    assert_eq!(sql, "SELECT \"t\".*");
}

#[cfg(feature = "sqlite")]
#[test]
fn sqlite_uses_question_mark_placeholders() {
    use sqlbuilder::dialect::SqliteDialect;

    let query = select([col("a")])
        .from(table("t"))
        .where_clause(col("a").in_list([1, 2]))
        .unwrap()
        .limit(3);
    let (sql, params) = render_with(&query, &SqliteDialect);
    assert_eq!(sql, "SELECT \"a\" FROM \"t\" WHERE (\"a\" IN (?, ?)) LIMIT ?");
    assert_eq!(sql.matches('?').count(), params.len());
    assert_eq!(params, vec![json!(1), json!(2), json!(3)]);
}

#[cfg(feature = "sqlite")]
#[test]
fn configured_dialect_renders() {
    let cfg = SqlBuilderConfig::from_toml("[render]\ndialect = \"sqlite\"\n").unwrap();
    let dialect = cfg.dialect().unwrap();
    let (sql, _) = col("name")
        .ilike("a%")
        .to_sql(dialect.as_ref())
        .unwrap();
    assert_eq!(sql, "(lower(\"name\") LIKE lower(?))");
}

#[test]
fn default_config_renders_plain() {
    let dialect = SqlBuilderConfig::default().dialect().unwrap();
    let (sql, _) = col("t.c").eq(var("x")).inspect().unwrap();
    assert_eq!(sql, "(t.c = $x)");
    let (sql, _) = render_with(&col("t.c"), dialect.as_ref());
    assert_eq!(sql, "t.c");
}
