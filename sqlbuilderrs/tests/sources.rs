//! Integration tests for FROM sources: aliases, VALUES, subqueries and joins.

mod common;

use common::{assert_sql, render};
use serde_json::json;
use sqlbuilder::dialect::PlainDialect;
use sqlbuilder::expr::{col, func, val};
use sqlbuilder::query::{select, Select};
use sqlbuilder::render::RenderExt;
use sqlbuilder::source::{natural, on, only, table, using, values, JoinType, Values};
use sqlbuilder::SqlBuilderError;

#[test]
fn table_alias() {
    assert_sql(
        &Select::new().from(table("table").alias("table_alias")),
        "SELECT * FROM table AS table_alias",
        vec![],
    );
    assert_sql(
        &Select::new().from(table("table").alias("table_alias").with_columns(["foo", "bar"])),
        "SELECT * FROM table AS table_alias(foo, bar)",
        vec![],
    );
}

#[test]
fn only_table() {
    assert_sql(&Select::new().from(only("foo")), "SELECT * FROM ONLY foo", vec![]);
}

#[test]
fn subquery_alias() {
    let sub = || select([func("sum", [col("qty")]), func("avg", [col("price")])]);
    assert_sql(
        &Select::new().from(sub().alias("subquery")),
        "SELECT * FROM (SELECT sum(qty), avg(price)) AS subquery",
        vec![],
    );
    assert_sql(
        &Select::new().from(sub().alias("subquery").with_columns(["qty", "average"])),
        "SELECT * FROM (SELECT sum(qty), avg(price)) AS subquery(qty, average)",
        vec![],
    );
}

#[test]
fn lateral_subquery() {
    let sub = select([col("x")]).alias("s").lateral();
    assert_sql(
        &Select::new().from(table("t")).cross_join(sub).unwrap(),
        "SELECT * FROM t CROSS JOIN LATERAL (SELECT x) AS s",
        vec![],
    );
}

#[test]
fn values_alias() {
    let rows = values([1, 2, 3]).row([4, 5, 6]);
    assert_sql(
        &Select::new().from(rows.clone().alias("val_alias")),
        "SELECT * FROM (VALUES (%s, %s, %s), (%s, %s, %s)) AS val_alias",
        (1..=6).map(|n| json!(n)).collect(),
    );
    assert_sql(
        &Select::new().from(rows.alias("val_alias").with_columns(["foo", "bar", "baz"])),
        "SELECT * FROM (VALUES (%s, %s, %s), (%s, %s, %s)) AS val_alias(foo, bar, baz)",
        (1..=6).map(|n| json!(n)).collect(),
    );
}

#[test]
fn unaliased_values_source() {
    assert_sql(
        &Select::new().from(values([1, 2]).row([3, 4])),
        "SELECT * FROM (VALUES (%s, %s), (%s, %s))",
        (1..=4).map(|n| json!(n)).collect(),
    );
    let err = Select::new().from(Values::new()).to_sql(&PlainDialect).unwrap_err();
    assert!(matches!(err, SqlBuilderError::EmptyValues));
}

#[test]
fn values_rows_can_be_pushed() {
    let mut rows = Values::new();
    rows.push_row([val("a"), val(1)]);
    rows.push_row([val("b"), val(2)]);
    assert_eq!(rows.len(), 2);
    assert_sql(
        &rows,
        "VALUES (%s, %s), (%s, %s)",
        vec![json!("a"), json!(1), json!("b"), json!(2)],
    );
}

#[test]
fn empty_values_fail_at_render() {
    let query = Select::new().from(Values::new().alias("v"));
    let err = query.to_sql(&PlainDialect).unwrap_err();
    assert!(matches!(err, SqlBuilderError::EmptyValues));
}

#[test]
fn cross_join_from_clause() {
    assert_sql(
        &Select::new().from(table("foo")).cross_join(table("bar")).unwrap(),
        "SELECT * FROM foo CROSS JOIN bar",
        vec![],
    );
}

#[test]
fn qualified_joins_from_clause() {
    let kinds = [
        (JoinType::Left, "LEFT OUTER"),
        (JoinType::Right, "RIGHT OUTER"),
        (JoinType::Full, "FULL OUTER"),
        (JoinType::Inner, "INNER"),
    ];
    for (join_type, token) in kinds {
        let base = || Select::new().from(table("foo"));

        assert_sql(
            &base().join("bar", join_type, natural()).unwrap(),
            &format!("SELECT * FROM foo NATURAL {token} JOIN bar"),
            vec![],
        );
        assert_sql(
            &base().join("bar", join_type, using(["baz"])).unwrap(),
            &format!("SELECT * FROM foo {token} JOIN bar USING (baz)"),
            vec![],
        );
        assert_sql(
            &base().join("bar", join_type, using(["baz", "xyzzy"])).unwrap(),
            &format!("SELECT * FROM foo {token} JOIN bar USING (baz, xyzzy)"),
            vec![],
        );
        assert_sql(
            &base().join("bar", join_type, on(col("baz").gt(100))).unwrap(),
            &format!("SELECT * FROM foo {token} JOIN bar ON (baz > %s)"),
            vec![json!(100)],
        );
    }
}

#[test]
fn join_helpers_match_join_types() {
    let (left, _) = render(
        &Select::new()
            .from(table("a"))
            .left_join("b", using(["id"]))
            .unwrap(),
    );
    assert_eq!(left, "SELECT * FROM a LEFT OUTER JOIN b USING (id)");

    let (natural_inner, _) = render(&Select::new().from(table("a")).natural_join("b").unwrap());
    assert_eq!(natural_inner, "SELECT * FROM a NATURAL INNER JOIN b");
}

#[test]
fn chained_joins_in_from_clause() {
    let query = Select::new()
        .from(table("a"))
        .inner_join("b", using(["id"]))
        .unwrap()
        .left_join("c", using(["id"]))
        .unwrap();
    assert_sql(
        &query,
        "SELECT * FROM a INNER JOIN b USING (id) LEFT OUTER JOIN c USING (id)",
        vec![],
    );
}

#[test]
fn standalone_join_is_parenthesised() {
    let join = table("foo")
        .inner_join("bar", on(col("foo.id").eq(col("bar.id"))))
        .unwrap();
    assert_sql(&join, "(foo INNER JOIN bar ON (foo.id = bar.id))", vec![]);
}

#[test]
fn nested_join_keeps_inner_parentheses() {
    let source = table("a")
        .cross_join(table("b"))
        .left_join(table("c"), using(["id"]))
        .unwrap();
    assert_sql(
        &Select::new().from(source),
        "SELECT * FROM (a CROSS JOIN b) LEFT OUTER JOIN c USING (id)",
        vec![],
    );
}

#[test]
fn invalid_join_constraints_fail_at_the_call() {
    let err = Select::new()
        .from(table("a"))
        .inner_join("b", natural().on(col("x")))
        .unwrap_err();
    assert!(matches!(err, SqlBuilderError::Join(_)));

    let err = Select::new()
        .from(table("a"))
        .left_join("b", on(col("x")).using(["x"]))
        .unwrap_err();
    assert!(matches!(err, SqlBuilderError::Join(_)));
}

#[test]
fn join_without_from_fails() {
    let err = Select::new().cross_join("b").unwrap_err();
    assert!(matches!(err, SqlBuilderError::MissingFrom { clause: "JOIN" }));
}

#[test]
fn column_factories() {
    let users = table("users");
    assert_sql(&users.column("id"), "users.id", vec![]);
    assert_sql(&users.all_columns(), "users.*", vec![]);
    assert_sql(&table("public").attr("users").column("id"), "public.users.id", vec![]);

    let alias = table("users").alias("u");
    assert_sql(&alias.column("name"), "u.name", vec![]);
}

#[test]
fn parameters_across_sources_follow_text_order() {
    let query = Select::new()
        .from(select([val(1)]).alias("s"))
        .inner_join("t", on(col("t.x").eq(2)))
        .unwrap()
        .where_clause(col("y").eq(3))
        .unwrap();
    assert_sql(
        &query,
        "SELECT * FROM (SELECT %s) AS s INNER JOIN t ON (t.x = %s) WHERE (y = %s)",
        vec![json!(1), json!(2), json!(3)],
    );
}
