//! ORDER BY items.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::error::{Result, SqlBuilderError};
use crate::expr::{Expr, FunctionCall, Identifier, IntoName};
use crate::render::{Context, Fragment, Render};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn token(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = SqlBuilderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(SqlBuilderError::Sort(format!(
                "invalid sorting direction: {s:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullsOrder {
    First,
    Last,
}

impl NullsOrder {
    pub fn token(self) -> &'static str {
        match self {
            NullsOrder::First => "NULLS FIRST",
            NullsOrder::Last => "NULLS LAST",
        }
    }
}

impl FromStr for NullsOrder {
    type Err = SqlBuilderError;

    /// Accepts `first`/`last` as well as the full `NULLS FIRST` spelling.
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let token = upper.strip_prefix("NULLS ").unwrap_or(upper.as_str()).trim();
        match token {
            "FIRST" => Ok(NullsOrder::First),
            "LAST" => Ok(NullsOrder::Last),
            _ => Err(SqlBuilderError::Sort(format!(
                "invalid nulls ordering: {s:?}"
            ))),
        }
    }
}

/// An expression with optional direction and NULLS placement.
#[derive(Debug, Clone)]
pub struct OrderItem {
    expr: Expr,
    direction: Option<SortDirection>,
    nulls: Option<NullsOrder>,
}

impl OrderItem {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            direction: None,
            nulls: None,
        }
    }

    pub fn direction(mut self, direction: SortDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn asc(self) -> Self {
        self.direction(SortDirection::Asc)
    }

    pub fn desc(self) -> Self {
        self.direction(SortDirection::Desc)
    }

    pub fn nulls(mut self, nulls: NullsOrder) -> Self {
        self.nulls = Some(nulls);
        self
    }

    pub fn nulls_first(self) -> Self {
        self.nulls(NullsOrder::First)
    }

    pub fn nulls_last(self) -> Self {
        self.nulls(NullsOrder::Last)
    }
}

impl Render for OrderItem {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        let mut fragment = self.expr.render(dialect, ctx)?;
        if let Some(direction) = self.direction {
            fragment.push_str(" ");
            fragment.push_str(direction.token());
        }
        if let Some(nulls) = self.nulls {
            fragment.push_str(" ");
            fragment.push_str(nulls.token());
        }
        Ok(fragment)
    }
}

impl From<Expr> for OrderItem {
    fn from(expr: Expr) -> Self {
        OrderItem::new(expr)
    }
}

impl From<FunctionCall> for OrderItem {
    fn from(call: FunctionCall) -> Self {
        OrderItem::new(call)
    }
}

impl From<Identifier> for OrderItem {
    fn from(ident: Identifier) -> Self {
        OrderItem::new(ident)
    }
}

// Bare strings in ORDER BY are column names.
impl From<&str> for OrderItem {
    fn from(name: &str) -> Self {
        OrderItem::new(name.into_name())
    }
}

impl From<String> for OrderItem {
    fn from(name: String) -> Self {
        OrderItem::new(name.into_name())
    }
}

pub fn asc(expr: impl IntoName) -> OrderItem {
    OrderItem::new(expr.into_name()).asc()
}

pub fn desc(expr: impl IntoName) -> OrderItem {
    OrderItem::new(expr.into_name()).desc()
}
