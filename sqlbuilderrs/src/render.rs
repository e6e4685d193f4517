//! Rendering protocol shared by every node.
//!
//! A node renders to a [`Fragment`]: SQL text carrying one positional
//! placeholder per parameter, and the parameters in the same left-to-right
//! order. Composite nodes render their children depth-first and concatenate
//! both halves, so placeholder position and parameter position never drift.
//!
//! # Example
//!
//! ```rust
//! use sqlbuilder::dialect::PlainDialect;
//! use sqlbuilder::expr::col;
//! use sqlbuilder::render::RenderExt;
//!
//! let (sql, params) = col("foo").gt(100).to_sql(&PlainDialect).unwrap();
//! assert_eq!(sql, "(foo > %s)");
//! assert_eq!(params, vec![serde_json::json!(100)]);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

use serde_json::Value;

use crate::dialect::{Dialect, PlainDialect};
use crate::error::Result;
use crate::expr::Expr;

/// Rendered SQL text plus its positional parameters.
///
/// Placeholder positions are tracked through the methods below; editing
/// `sql` in place other than appending invalidates them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub params: Vec<Value>,
    placeholders: Vec<Range<usize>>,
}

impl Fragment {
    /// Parameterless fragment.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            placeholders: Vec::new(),
        }
    }

    /// A single placeholder bound to `value`.
    pub fn param(dialect: &dyn Dialect, value: Value) -> Self {
        let sql = dialect.placeholder().to_string();
        Self {
            placeholders: vec![0..sql.len()],
            sql,
            params: vec![value],
        }
    }

    pub fn push_str(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    pub fn append(&mut self, other: Fragment) {
        let offset = self.sql.len();
        self.sql.push_str(&other.sql);
        self.params.extend(other.params);
        self.placeholders.extend(
            other
                .placeholders
                .into_iter()
                .map(|range| range.start + offset..range.end + offset),
        );
    }

    pub fn parenthesized(self) -> Self {
        Self {
            sql: format!("({})", self.sql),
            params: self.params,
            placeholders: self
                .placeholders
                .into_iter()
                .map(|range| range.start + 1..range.end + 1)
                .collect(),
        }
    }

    /// Text with each placeholder replaced by its parameter as a literal.
    pub fn interpolate(&self, dialect: &dyn Dialect) -> String {
        let mut out = String::with_capacity(self.sql.len());
        let mut cursor = 0;
        for (range, value) in self.placeholders.iter().zip(&self.params) {
            out.push_str(&self.sql[cursor..range.start]);
            out.push_str(&dialect.render_literal(value));
            cursor = range.end;
        }
        out.push_str(&self.sql[cursor..]);
        out
    }

    /// Join fragments with `sep`, keeping parameters in order.
    pub fn join<I>(parts: I, sep: &str) -> Self
    where
        I: IntoIterator<Item = Fragment>,
    {
        let mut joined = Fragment::default();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                joined.sql.push_str(sep);
            }
            joined.append(part);
        }
        joined
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

/// Implemented by every node of the query tree.
pub trait Render {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment>;
}

impl<T: Render + ?Sized> Render for Box<T> {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        (**self).render(dialect, ctx)
    }
}

/// Render a list of nodes joined by `sep`.
pub fn render_list<'a, T, I>(
    items: I,
    sep: &str,
    dialect: &dyn Dialect,
    ctx: &dyn Context,
) -> Result<Fragment>
where
    T: Render + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let parts = items
        .into_iter()
        .map(|item| item.render(dialect, ctx))
        .collect::<Result<Vec<_>>>()?;
    Ok(Fragment::join(parts, sep))
}

/// Late-bound lookup for [`Expr::Variable`] nodes.
///
/// Only consulted at render time, so one tree can be rendered repeatedly
/// against different contexts.
pub trait Context {
    fn lookup(&self, name: &str) -> Option<Expr>;
}

impl Context for () {
    fn lookup(&self, _name: &str) -> Option<Expr> {
        None
    }
}

impl Context for HashMap<String, Expr> {
    fn lookup(&self, name: &str) -> Option<Expr> {
        self.get(name).cloned()
    }
}

impl Context for BTreeMap<String, Expr> {
    fn lookup(&self, name: &str) -> Option<Expr> {
        self.get(name).cloned()
    }
}

/// Owned variable bindings.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    values: HashMap<String, Expr>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Expr>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Expr>) -> Self {
        self.set(name, value);
        self
    }
}

impl Context for Variables {
    fn lookup(&self, name: &str) -> Option<Expr> {
        self.values.get(name).cloned()
    }
}

/// Resolves every variable to a literal `$name` token.
#[derive(Debug, Default, Clone, Copy)]
pub struct DebugContext;

impl Context for DebugContext {
    fn lookup(&self, name: &str) -> Option<Expr> {
        Some(Expr::Raw(format!("${name}")))
    }
}

/// Entry points for rendering a complete tree.
pub trait RenderExt: Render {
    /// Render with no variable bindings.
    fn to_sql(&self, dialect: &dyn Dialect) -> Result<(String, Vec<Value>)> {
        self.to_sql_with(dialect, &())
    }

    fn to_sql_with(
        &self,
        dialect: &dyn Dialect,
        ctx: &dyn Context,
    ) -> Result<(String, Vec<Value>)> {
        let fragment = self.render(dialect, ctx)?;
        tracing::debug!(sql = %fragment.sql, params = fragment.params.len(), "rendered SQL");
        Ok(fragment.into_parts())
    }

    /// Render for human inspection: no quoting, variables shown as `$name`.
    fn inspect(&self) -> Result<(String, Vec<Value>)> {
        Ok(self.render(&PlainDialect, &DebugContext)?.into_parts())
    }

    /// Like [`RenderExt::inspect`], with parameters spliced in as literals.
    /// Never execute the result.
    fn debug_sql(&self) -> Result<String> {
        Ok(self.render(&PlainDialect, &DebugContext)?.interpolate(&PlainDialect))
    }
}

impl<T: Render + ?Sized> RenderExt for T {}
