//! Window definitions: `(base PARTITION BY .. ORDER BY .. RANGE|ROWS ..)`.

use serde_json::Value;

use crate::dialect::Dialect;
use crate::error::{Result, SqlBuilderError};
use crate::expr::{Expr, Identifier, IntoName};
use crate::render::{render_list, Context, Fragment, Render};
use crate::sort::OrderItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Range,
    Rows,
}

impl FrameKind {
    pub fn token(self) -> &'static str {
        match self {
            FrameKind::Range => "RANGE",
            FrameKind::Rows => "ROWS",
        }
    }
}

/// Frame bounds. Offsets are signed: negative is PRECEDING, zero is
/// CURRENT ROW, positive is FOLLOWING. `None` in a `Between` means
/// unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameExtent {
    Offset(i64),
    Between(Option<i64>, Option<i64>),
}

impl FrameExtent {
    pub fn between(start: Option<i64>, end: Option<i64>) -> Self {
        FrameExtent::Between(start, end)
    }
}

impl From<i64> for FrameExtent {
    fn from(offset: i64) -> Self {
        FrameExtent::Offset(offset)
    }
}

impl From<i32> for FrameExtent {
    fn from(offset: i32) -> Self {
        FrameExtent::Offset(offset.into())
    }
}

impl From<(Option<i64>, Option<i64>)> for FrameExtent {
    fn from((start, end): (Option<i64>, Option<i64>)) -> Self {
        FrameExtent::Between(start, end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub kind: FrameKind,
    pub extent: FrameExtent,
}

fn frame_bound(dialect: &dyn Dialect, offset: Option<i64>, unbounded: &str) -> Fragment {
    match offset {
        None => Fragment::new(unbounded),
        Some(0) => Fragment::new("CURRENT ROW"),
        Some(n) => {
            let side = if n < 0 { " PRECEDING" } else { " FOLLOWING" };
            let mut fragment = Fragment::param(dialect, Value::from(n.unsigned_abs()));
            fragment.push_str(side);
            fragment
        }
    }
}

impl Render for Frame {
    fn render(&self, dialect: &dyn Dialect, _ctx: &dyn Context) -> Result<Fragment> {
        let mut fragment = Fragment::new(format!("{} ", self.kind.token()));
        match self.extent {
            FrameExtent::Offset(n) => {
                fragment.append(frame_bound(dialect, Some(n), "UNBOUNDED PRECEDING"));
            }
            FrameExtent::Between(start, end) => {
                fragment.push_str("BETWEEN ");
                fragment.append(frame_bound(dialect, start, "UNBOUNDED PRECEDING"));
                fragment.push_str(" AND ");
                fragment.append(frame_bound(dialect, end, "UNBOUNDED FOLLOWING"));
            }
        }
        Ok(fragment)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Window {
    base: Option<Identifier>,
    partition_by: Vec<Expr>,
    order_by: Vec<OrderItem>,
    frame: Option<Frame>,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extend a named window.
    pub fn based_on(name: impl Into<Identifier>) -> Self {
        Self {
            base: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn partition_by<I, E>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoName,
    {
        self.partition_by
            .extend(exprs.into_iter().map(IntoName::into_name));
        self
    }

    pub fn order_by<I, E>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<OrderItem>,
    {
        self.order_by.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn range(self, extent: impl Into<FrameExtent>) -> Result<Self> {
        self.with_frame(FrameKind::Range, extent.into())
    }

    pub fn rows(self, extent: impl Into<FrameExtent>) -> Result<Self> {
        self.with_frame(FrameKind::Rows, extent.into())
    }

    fn with_frame(mut self, kind: FrameKind, extent: FrameExtent) -> Result<Self> {
        if let Some(existing) = &self.frame {
            if existing.kind != kind {
                return Err(SqlBuilderError::Frame(format!(
                    "window already has a {} frame, cannot add {}",
                    existing.kind.token(),
                    kind.token()
                )));
            }
        }
        self.frame = Some(Frame { kind, extent });
        Ok(self)
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }
}

impl Render for Window {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        let mut clauses = Vec::new();
        if let Some(base) = &self.base {
            clauses.push(base.render(dialect, ctx)?);
        }
        if !self.partition_by.is_empty() {
            let mut clause = Fragment::new("PARTITION BY ");
            clause.append(render_list(&self.partition_by, ", ", dialect, ctx)?);
            clauses.push(clause);
        }
        if !self.order_by.is_empty() {
            let mut clause = Fragment::new("ORDER BY ");
            clause.append(render_list(&self.order_by, ", ", dialect, ctx)?);
            clauses.push(clause);
        }
        if let Some(frame) = &self.frame {
            clauses.push(frame.render(dialect, ctx)?);
        }
        Ok(Fragment::join(clauses, " ").parenthesized())
    }
}
