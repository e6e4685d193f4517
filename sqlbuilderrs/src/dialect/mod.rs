//! SQL dialect abstractions: the quoting and formatting delegate used by rendering.
//!
//! Each dialect is implemented in its own file and gated behind a feature flag.

use serde_json::Value;

use crate::error::Result;
use crate::expr::Expr;
use crate::render::{Context, Fragment};

/// Dialects quote names, pick the placeholder token and may take over the
/// rendering of individual operators. Tree walking lives in the node types;
/// the dialect only maps names and operators to SQL fragments.
pub trait Dialect {
    fn quote_ident(&self, ident: &str) -> String;
    fn quote_function_name(&self, name: &str) -> String {
        name.to_string()
    }
    fn placeholder(&self) -> &str {
        "%s"
    }
    /// Escape hatch for operators the database spells differently.
    ///
    /// `op` is the operator token as it would appear in the default
    /// rendering (`"ILIKE"`, `"NOT IN"`, `"IS NULL"`, `"-"`...). Returning
    /// `Ok(None)` keeps the default rendering; any `Some` is used verbatim and
    /// any error propagates to the caller unchanged.
    fn operator_to_sql(
        &self,
        _op: &str,
        _left: &Expr,
        _right: Option<&Expr>,
        _ctx: &dyn Context,
    ) -> Result<Option<Fragment>> {
        Ok(None)
    }
    /// Literal spelling of a parameter, used only by the inspection path.
    fn render_literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => format!("'{}'", s.replace('\'', "''")),
            Value::Array(items) => {
                let rendered: Vec<String> = items.iter().map(|v| self.render_literal(v)).collect();
                format!("({})", rendered.join(", "))
            }
            Value::Object(_) => {
                format!("'{}'", value.to_string().replace('\'', "''"))
            }
        }
    }
}

/// Quote every dot-separated part of a name (shared by PostgreSQL and SQLite).
#[cfg(any(feature = "postgres", feature = "sqlite"))]
pub(crate) fn quote_dotted(ident: &str) -> String {
    ident
        .split('.')
        .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(".")
}

mod generic;
pub use generic::PlainDialect;

// Feature-gated dialect implementations
#[cfg(feature = "postgres")]
mod postgres;
#[cfg(feature = "postgres")]
pub use postgres::PostgresDialect;

#[cfg(feature = "sqlite")]
mod sqlite;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDialect;
