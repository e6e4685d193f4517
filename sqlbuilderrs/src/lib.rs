//! Programmatic SQL construction.
//!
//! Statements are built as a tree of nodes (names, parameters, operators,
//! sources, SELECT clauses) and rendered to SQL text plus an ordered
//! parameter list suitable for a positional-placeholder driver.
//!
//! ```rust
//! use sqlbuilder::prelude::*;
//!
//! let query = select([col("foo"), col("bar")])
//!     .from(table("t"))
//!     .where_clause(col("foo").gt(100))?
//!     .order_by([col("bar").desc()])
//!     .limit(10);
//!
//! let (sql, params) = query.to_sql(&PlainDialect)?;
//! assert_eq!(sql, "SELECT foo, bar FROM t WHERE (foo > %s) ORDER BY bar DESC LIMIT %s");
//! assert_eq!(params, vec![serde_json::json!(100), serde_json::json!(10)]);
//! # Ok::<(), sqlbuilder::SqlBuilderError>(())
//! ```

pub mod config;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod query;
pub mod render;
pub mod sort;
pub mod source;
pub mod window;

pub use config::SqlBuilderConfig;
pub use dialect::{Dialect, PlainDialect};
pub use error::{Result, SqlBuilderError};
pub use expr::{Expr, FunctionCall, Identifier};
pub use query::{Cte, Query, Select, SetOperation};
pub use render::{Context, Fragment, Render, RenderExt, Variables};
pub use source::{Source, Table, Values};
pub use window::Window;

/// Everything needed to build and render statements.
pub mod prelude {
    pub use crate::dialect::{Dialect, PlainDialect};
    #[cfg(feature = "postgres")]
    pub use crate::dialect::PostgresDialect;
    #[cfg(feature = "sqlite")]
    pub use crate::dialect::SqliteDialect;
    pub use crate::expr::{
        and, case, col, func, ident, not, or, tuple, val, var, wildcard, xor, Expr, IntoName,
    };
    pub use crate::query::{select, Cte, Query, Select, SetOperation};
    pub use crate::render::{RenderExt, Variables};
    pub use crate::sort::{asc, desc, NullsOrder, OrderItem, SortDirection};
    pub use crate::source::{
        natural, on, only, table, using, values, JoinConstraint, JoinType, Source, Table, Values,
    };
    pub use crate::window::{FrameExtent, Window};
}
