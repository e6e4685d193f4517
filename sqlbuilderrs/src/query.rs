//! SELECT statements, common table expressions and set operations.
//!
//! Builders consume and return `self`. Calls that would break a statement
//! invariant (filtering without FROM, OFFSET without LIMIT, a repeated
//! window name) fail immediately with an error instead of at render time.

use crate::dialect::Dialect;
use crate::error::{Result, SqlBuilderError};
use crate::expr::{Expr, Identifier, IntoName, SetQuantifier};
use crate::render::{render_list, Context, Fragment, Render};
use crate::sort::OrderItem;
use crate::source::{
    Join, JoinConstraint, JoinKind, JoinType, Source, SubqueryAlias, SubquerySource,
};
use crate::window::Window;

/// ORDER BY / LIMIT / OFFSET, shared by SELECT and set operations.
#[derive(Debug, Clone, Default)]
struct Tail {
    order_by: Vec<OrderItem>,
    limit: Option<Expr>,
    offset: Option<Expr>,
}

impl Tail {
    fn is_empty(&self) -> bool {
        self.order_by.is_empty() && self.limit.is_none()
    }

    fn set_offset(&mut self, offset: Expr) -> Result<()> {
        if self.limit.is_none() {
            return Err(SqlBuilderError::OffsetWithoutLimit);
        }
        self.offset = Some(offset);
        Ok(())
    }

    fn render_into(
        &self,
        parts: &mut Vec<Fragment>,
        dialect: &dyn Dialect,
        ctx: &dyn Context,
    ) -> Result<()> {
        if !self.order_by.is_empty() {
            let mut clause = Fragment::new("ORDER BY ");
            clause.append(render_list(&self.order_by, ", ", dialect, ctx)?);
            parts.push(clause);
        }
        if let Some(limit) = &self.limit {
            let mut clause = Fragment::new("LIMIT ");
            clause.append(limit.render(dialect, ctx)?);
            parts.push(clause);
            if let Some(offset) = &self.offset {
                let mut clause = Fragment::new("OFFSET ");
                clause.append(offset.render(dialect, ctx)?);
                parts.push(clause);
            }
        }
        Ok(())
    }
}

/// The FROM clause with the filters that hang off it.
#[derive(Debug, Clone)]
pub struct FromClause {
    source: Source,
    where_clause: Option<Expr>,
    group_by: Vec<Expr>,
    having: Option<Expr>,
}

impl FromClause {
    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
            where_clause: None,
            group_by: Vec::new(),
            having: None,
        }
    }
}

impl Render for FromClause {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        let mut fragment = Fragment::new("FROM ");
        fragment.append(self.source.render(dialect, ctx)?);
        if let Some(condition) = &self.where_clause {
            fragment.push_str(" WHERE ");
            fragment.append(condition.render(dialect, ctx)?);
        }
        if !self.group_by.is_empty() {
            fragment.push_str(" GROUP BY ");
            fragment.append(render_list(&self.group_by, ", ", dialect, ctx)?);
        }
        if let Some(condition) = &self.having {
            fragment.push_str(" HAVING ");
            fragment.append(condition.render(dialect, ctx)?);
        }
        Ok(fragment)
    }
}

/// `WITH name[(columns)] AS (query)`
#[derive(Debug, Clone)]
pub struct Cte {
    name: Identifier,
    columns: Vec<Identifier>,
    recursive: bool,
    query: Query,
}

impl Cte {
    pub fn new(name: impl Into<Identifier>, query: impl Into<Query>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            recursive: false,
            query: query.into(),
        }
    }

    pub fn with_columns<I, N>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Identifier>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }
}

impl Render for Cte {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        let mut fragment = self.name.render(dialect, ctx)?;
        if !self.columns.is_empty() {
            fragment.append(render_list(&self.columns, ", ", dialect, ctx)?.parenthesized());
        }
        fragment.push_str(" AS ");
        fragment.append(self.query.render(dialect, ctx)?.parenthesized());
        Ok(fragment)
    }
}

#[derive(Debug, Clone)]
struct Quantifier {
    kind: SetQuantifier,
    on: Vec<Expr>,
}

#[derive(Debug, Clone, Default)]
pub struct Select {
    ctes: Vec<Cte>,
    quantifier: Option<Quantifier>,
    columns: Vec<Expr>,
    from: Option<FromClause>,
    windows: Vec<(Identifier, Window)>,
    tail: Tail,
}

/// `SELECT columns`; an empty column list renders `*`.
pub fn select<I, E>(columns: I) -> Select
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Select::new().columns(columns)
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns<I, E>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn column(mut self, column: impl Into<Expr>) -> Self {
        self.columns.push(column.into());
        self
    }

    fn quantified<I, E>(mut self, kind: SetQuantifier, on: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoName,
    {
        self.quantifier = Some(Quantifier {
            kind,
            on: on.into_iter().map(IntoName::into_name).collect(),
        });
        self
    }

    /// `SELECT DISTINCT`
    pub fn distinct(self) -> Self {
        self.quantified(SetQuantifier::Distinct, Vec::<Expr>::new())
    }

    /// `SELECT DISTINCT ON (exprs)`
    pub fn distinct_on<I, E>(self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoName,
    {
        self.quantified(SetQuantifier::Distinct, exprs)
    }

    /// `SELECT ALL`
    pub fn all(self) -> Self {
        self.quantified(SetQuantifier::All, Vec::<Expr>::new())
    }

    pub fn all_on<I, E>(self, exprs: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoName,
    {
        self.quantified(SetQuantifier::All, exprs)
    }

    /// Replace the FROM clause. Joins built on the source passed here keep
    /// their parentheses except for the outermost one.
    pub fn from(mut self, source: impl Into<Source>) -> Self {
        self.from = Some(FromClause::new(source.into().without_parens()));
        self
    }

    fn from_mut(&mut self, clause: &'static str) -> Result<&mut FromClause> {
        self.from
            .as_mut()
            .ok_or(SqlBuilderError::MissingFrom { clause })
    }

    pub fn where_clause(mut self, condition: impl Into<Expr>) -> Result<Self> {
        self.from_mut("WHERE")?.where_clause = Some(condition.into());
        Ok(self)
    }

    /// GROUP BY; plain strings are column names.
    pub fn group_by<I, E>(mut self, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: IntoName,
    {
        self.from_mut("GROUP BY")?.group_by = columns.into_iter().map(IntoName::into_name).collect();
        Ok(self)
    }

    pub fn having(mut self, condition: impl Into<Expr>) -> Result<Self> {
        self.from_mut("HAVING")?.having = Some(condition.into());
        Ok(self)
    }

    fn add_join(mut self, other: Source, kind: JoinKind) -> Result<Self> {
        let mut from = self
            .from
            .take()
            .ok_or(SqlBuilderError::MissingFrom { clause: "JOIN" })?;
        from.source = Join::new(from.source, other, kind).with_parens(false).into();
        self.from = Some(from);
        Ok(self)
    }

    pub fn cross_join(self, other: impl Into<Source>) -> Result<Self> {
        self.add_join(other.into(), JoinKind::Cross)
    }

    pub fn natural_join(self, other: impl Into<Source>) -> Result<Self> {
        self.add_join(other.into(), JoinKind::Natural(JoinType::Inner))
    }

    pub fn join(
        self,
        other: impl Into<Source>,
        join_type: JoinType,
        constraint: JoinConstraint,
    ) -> Result<Self> {
        let kind = constraint.into_kind(join_type)?;
        self.add_join(other.into(), kind)
    }

    pub fn inner_join(self, other: impl Into<Source>, constraint: JoinConstraint) -> Result<Self> {
        self.join(other, JoinType::Inner, constraint)
    }

    pub fn left_join(self, other: impl Into<Source>, constraint: JoinConstraint) -> Result<Self> {
        self.join(other, JoinType::Left, constraint)
    }

    pub fn right_join(self, other: impl Into<Source>, constraint: JoinConstraint) -> Result<Self> {
        self.join(other, JoinType::Right, constraint)
    }

    pub fn full_join(self, other: impl Into<Source>, constraint: JoinConstraint) -> Result<Self> {
        self.join(other, JoinType::Full, constraint)
    }

    /// Declare a named window in the WINDOW clause.
    pub fn window(mut self, name: impl Into<Identifier>, window: Window) -> Result<Self> {
        let name = name.into();
        if self.windows.iter().any(|(existing, _)| *existing == name) {
            return Err(SqlBuilderError::DuplicateWindow(name.name().to_string()));
        }
        self.windows.push((name, window));
        Ok(self)
    }

    pub fn with(self, name: impl Into<Identifier>, query: impl Into<Query>) -> Self {
        self.with_cte(Cte::new(name, query))
    }

    pub fn with_cte(mut self, cte: Cte) -> Self {
        self.ctes.push(cte);
        self
    }

    pub fn order_by<I, E>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<OrderItem>,
    {
        self.tail.order_by = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn limit(mut self, limit: impl Into<Expr>) -> Self {
        self.tail.limit = Some(limit.into());
        self
    }

    pub fn offset(mut self, offset: impl Into<Expr>) -> Result<Self> {
        self.tail.set_offset(offset.into())?;
        Ok(self)
    }

    pub fn limit_offset(mut self, limit: impl Into<Expr>, offset: impl Into<Expr>) -> Self {
        self.tail.limit = Some(limit.into());
        self.tail.offset = Some(offset.into());
        self
    }

    pub fn union(self, other: impl Into<Query>) -> SetOperation {
        SetOperation::new(self, SetOperator::Union, other)
    }

    pub fn intersect(self, other: impl Into<Query>) -> SetOperation {
        SetOperation::new(self, SetOperator::Intersect, other)
    }

    pub fn except(self, other: impl Into<Query>) -> SetOperation {
        SetOperation::new(self, SetOperator::Except, other)
    }

    /// Use as a FROM-clause subquery: `(SELECT ..) AS alias`.
    pub fn alias(self, alias: impl Into<Identifier>) -> SubqueryAlias {
        SubqueryAlias::new(SubquerySource::Query(self.into()), alias)
    }
}

impl Render for Select {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        let mut parts = Vec::new();

        if !self.ctes.is_empty() {
            let recursive = self.ctes.iter().any(Cte::is_recursive);
            let mut clause = Fragment::new(if recursive { "WITH RECURSIVE " } else { "WITH " });
            clause.append(render_list(&self.ctes, ", ", dialect, ctx)?);
            parts.push(clause);
        }

        let mut clause = Fragment::new("SELECT ");
        if let Some(quantifier) = &self.quantifier {
            clause.push_str(quantifier.kind.token());
            clause.push_str(" ");
            if !quantifier.on.is_empty() {
                clause.push_str("ON ");
                clause.append(render_list(&quantifier.on, ", ", dialect, ctx)?.parenthesized());
                clause.push_str(" ");
            }
        }
        if self.columns.is_empty() {
            clause.push_str("*");
        } else {
            clause.append(render_list(&self.columns, ", ", dialect, ctx)?);
        }
        parts.push(clause);

        if let Some(from) = &self.from {
            parts.push(from.render(dialect, ctx)?);
        }

        if !self.windows.is_empty() {
            let definitions = self
                .windows
                .iter()
                .map(|(name, window)| {
                    let mut definition = name.render(dialect, ctx)?;
                    definition.push_str(" AS ");
                    definition.append(window.render(dialect, ctx)?);
                    Ok(definition)
                })
                .collect::<Result<Vec<_>>>()?;
            let mut clause = Fragment::new("WINDOW ");
            clause.append(Fragment::join(definitions, ", "));
            parts.push(clause);
        }

        self.tail.render_into(&mut parts, dialect, ctx)?;
        Ok(Fragment::join(parts, " "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

impl SetOperator {
    pub fn token(self) -> &'static str {
        match self {
            SetOperator::Union => "UNION",
            SetOperator::Intersect => "INTERSECT",
            SetOperator::Except => "EXCEPT",
        }
    }
}

/// `left UNION|INTERSECT|EXCEPT [ALL|DISTINCT] right`
#[derive(Debug, Clone)]
pub struct SetOperation {
    left: Query,
    right: Query,
    op: SetOperator,
    quantifier: Option<SetQuantifier>,
    tail: Tail,
}

impl SetOperation {
    pub fn new(left: impl Into<Query>, op: SetOperator, right: impl Into<Query>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            op,
            quantifier: None,
            tail: Tail::default(),
        }
    }

    pub fn all(mut self) -> Self {
        self.quantifier = Some(SetQuantifier::All);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.quantifier = Some(SetQuantifier::Distinct);
        self
    }

    pub fn order_by<I, E>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<OrderItem>,
    {
        self.tail.order_by = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn limit(mut self, limit: impl Into<Expr>) -> Self {
        self.tail.limit = Some(limit.into());
        self
    }

    pub fn offset(mut self, offset: impl Into<Expr>) -> Result<Self> {
        self.tail.set_offset(offset.into())?;
        Ok(self)
    }

    pub fn limit_offset(mut self, limit: impl Into<Expr>, offset: impl Into<Expr>) -> Self {
        self.tail.limit = Some(limit.into());
        self.tail.offset = Some(offset.into());
        self
    }

    pub fn union(self, other: impl Into<Query>) -> SetOperation {
        SetOperation::new(self, SetOperator::Union, other)
    }

    pub fn intersect(self, other: impl Into<Query>) -> SetOperation {
        SetOperation::new(self, SetOperator::Intersect, other)
    }

    pub fn except(self, other: impl Into<Query>) -> SetOperation {
        SetOperation::new(self, SetOperator::Except, other)
    }

    pub fn alias(self, alias: impl Into<Identifier>) -> SubqueryAlias {
        SubqueryAlias::new(SubquerySource::Query(self.into()), alias)
    }
}

fn render_member(query: &Query, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
    let fragment = query.render(dialect, ctx)?;
    let nested = match query {
        Query::Set(_) => true,
        Query::Select(select) => !select.tail.is_empty() || !select.ctes.is_empty(),
    };
    Ok(if nested {
        fragment.parenthesized()
    } else {
        fragment
    })
}

impl Render for SetOperation {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        let mut fragment = render_member(&self.left, dialect, ctx)?;
        fragment.push_str(" ");
        fragment.push_str(self.op.token());
        if let Some(quantifier) = self.quantifier {
            fragment.push_str(" ");
            fragment.push_str(quantifier.token());
        }
        fragment.push_str(" ");
        fragment.append(render_member(&self.right, dialect, ctx)?);

        let mut parts = vec![fragment];
        self.tail.render_into(&mut parts, dialect, ctx)?;
        Ok(Fragment::join(parts, " "))
    }
}

/// Anything usable as a subquery, CTE body or set-operation member.
#[derive(Debug, Clone)]
pub enum Query {
    Select(Box<Select>),
    Set(Box<SetOperation>),
}

impl Render for Query {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        match self {
            Query::Select(select) => select.render(dialect, ctx),
            Query::Set(set) => set.render(dialect, ctx),
        }
    }
}

impl From<Select> for Query {
    fn from(select: Select) -> Self {
        Query::Select(Box::new(select))
    }
}

impl From<SetOperation> for Query {
    fn from(set: SetOperation) -> Self {
        Query::Set(Box::new(set))
    }
}

impl From<Query> for Expr {
    fn from(query: Query) -> Self {
        Expr::Subquery(Box::new(query))
    }
}

impl From<Select> for Expr {
    fn from(select: Select) -> Self {
        Expr::Subquery(Box::new(select.into()))
    }
}

impl From<SetOperation> for Expr {
    fn from(set: SetOperation) -> Self {
        Expr::Subquery(Box::new(set.into()))
    }
}
