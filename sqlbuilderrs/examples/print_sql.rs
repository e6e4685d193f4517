//! Build a report query and print it for the configured dialect.
//!
//! Run with `RUST_LOG=sqlbuilder=debug cargo run --example print_sql`.

use anyhow::Context as _;
use sqlbuilder::prelude::*;
use sqlbuilder::SqlBuilderConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = SqlBuilderConfig::load_default();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let dialect = config.dialect().context("building dialect")?;

    let orders = table("orders").alias("o");
    let customers = table("customers").alias("c");

    let top_countries = select([
        customers.column("country"),
        func("sum", [orders.column("amount")]).alias("revenue"),
        func("rank", Vec::<Expr>::new())
            .over(Window::new().order_by([func("sum", [orders.column("amount")]).desc()])),
    ])
    .from(orders.clone())
    .inner_join(customers.clone(), on(orders.column("customer_id").eq(customers.column("id"))))?
    .where_clause(and([
        orders.column("status").in_list(["paid", "shipped"]),
        orders.column("created_at").ge(var("since")),
    ]))?
    .group_by([customers.column("country")])?
    .having(func("sum", [orders.column("amount")]).gt(1000))?
    .order_by([desc("revenue")])
    .limit(10);

    let vars = Variables::new().with("since", "2024-01-01");
    let (sql, params) = top_countries.to_sql_with(dialect.as_ref(), &vars)?;
    println!("{sql}");
    println!("{}", serde_json::to_string(&params)?);

    println!("{}", top_countries.debug_sql()?);
    Ok(())
}
