//! Row sources: tables, aliases, VALUES lists, subqueries and joins.

use crate::dialect::Dialect;
use crate::error::{Result, SqlBuilderError};
use crate::expr::{Expr, Identifier};
use crate::query::Query;
use crate::render::{render_list, Context, Fragment, Render};

/// A named table, optionally `ONLY` (no descendant tables).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: Identifier,
    only: bool,
}

impl Table {
    pub fn new(name: impl Into<Identifier>) -> Self {
        Self {
            name: name.into(),
            only: false,
        }
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    /// `schema.table` style qualification.
    pub fn attr(&self, name: &str) -> Table {
        Table {
            name: self.name.attr(name),
            only: self.only,
        }
    }

    /// A column qualified by this table: `t.c`.
    pub fn column(&self, name: &str) -> Expr {
        Expr::Identifier(self.name.attr(name))
    }

    /// `t.*`
    pub fn all_columns(&self) -> Expr {
        Expr::Wildcard(Some(self.name.clone()))
    }

    pub fn alias(self, alias: impl Into<Identifier>) -> TableAlias {
        TableAlias {
            table: self,
            alias: alias.into(),
            columns: Vec::new(),
        }
    }
}

impl Render for Table {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        let name = self.name.render(dialect, ctx)?;
        if self.only {
            let mut fragment = Fragment::new("ONLY ");
            fragment.append(name);
            Ok(fragment)
        } else {
            Ok(name)
        }
    }
}

pub fn table(name: impl Into<Identifier>) -> Table {
    Table::new(name)
}

/// `ONLY name`
pub fn only(name: impl Into<Identifier>) -> Table {
    Table {
        name: name.into(),
        only: true,
    }
}

fn render_column_list(
    columns: &[Identifier],
    dialect: &dyn Dialect,
    ctx: &dyn Context,
) -> Result<Fragment> {
    if columns.is_empty() {
        return Ok(Fragment::default());
    }
    Ok(render_list(columns, ", ", dialect, ctx)?.parenthesized())
}

/// `table AS alias[(columns)]`
#[derive(Debug, Clone)]
pub struct TableAlias {
    table: Table,
    alias: Identifier,
    columns: Vec<Identifier>,
}

impl TableAlias {
    pub fn with_columns<I, N>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Identifier>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// A column qualified by the alias: `a.c`.
    pub fn column(&self, name: &str) -> Expr {
        Expr::Identifier(self.alias.attr(name))
    }
}

impl Render for TableAlias {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        let mut fragment = self.table.render(dialect, ctx)?;
        fragment.push_str(" AS ");
        fragment.append(self.alias.render(dialect, ctx)?);
        fragment.append(render_column_list(&self.columns, dialect, ctx)?);
        Ok(fragment)
    }
}

/// A `VALUES (..), (..)` list. Rows are rendered as tuples.
#[derive(Debug, Clone, Default)]
pub struct Values {
    rows: Vec<Vec<Expr>>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row<I, E>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.push_row(row);
        self
    }

    pub fn push_row<I, E>(&mut self, row: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn alias(self, alias: impl Into<Identifier>) -> SubqueryAlias {
        SubqueryAlias::new(SubquerySource::Values(self), alias)
    }
}

impl Render for Values {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        if self.rows.is_empty() {
            return Err(SqlBuilderError::EmptyValues);
        }
        let rows = self
            .rows
            .iter()
            .map(|row| Ok(render_list(row, ", ", dialect, ctx)?.parenthesized()))
            .collect::<Result<Vec<_>>>()?;
        let mut fragment = Fragment::new("VALUES ");
        fragment.append(Fragment::join(rows, ", "));
        Ok(fragment)
    }
}

/// `VALUES` starting with one row.
pub fn values<I, E>(row: I) -> Values
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Values::new().row(row)
}

#[derive(Debug, Clone)]
pub enum SubquerySource {
    Query(Query),
    Values(Values),
}

impl Render for SubquerySource {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        match self {
            SubquerySource::Query(query) => query.render(dialect, ctx),
            SubquerySource::Values(values) => values.render(dialect, ctx),
        }
    }
}

/// `[LATERAL ](subquery) AS alias[(columns)]`
#[derive(Debug, Clone)]
pub struct SubqueryAlias {
    source: Box<SubquerySource>,
    alias: Identifier,
    columns: Vec<Identifier>,
    lateral: bool,
}

impl SubqueryAlias {
    pub fn new(source: SubquerySource, alias: impl Into<Identifier>) -> Self {
        Self {
            source: Box::new(source),
            alias: alias.into(),
            columns: Vec::new(),
            lateral: false,
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

    pub fn lateral(mut self) -> Self {
        self.lateral = true;
        self
    }

    pub fn column(&self, name: &str) -> Expr {
        Expr::Identifier(self.alias.attr(name))
    }
}

impl Render for SubqueryAlias {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        let mut fragment = Fragment::new(if self.lateral { "LATERAL " } else { "" });
        fragment.append(self.source.render(dialect, ctx)?.parenthesized());
        fragment.push_str(" AS ");
        fragment.append(self.alias.render(dialect, ctx)?);
        fragment.append(render_column_list(&self.columns, dialect, ctx)?);
        Ok(fragment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinType {
    pub fn token(self) -> &'static str {
        match self {
            JoinType::Inner => "INNER",
            JoinType::Left => "LEFT OUTER",
            JoinType::Right => "RIGHT OUTER",
            JoinType::Full => "FULL OUTER",
        }
    }
}

#[derive(Debug, Clone)]
pub enum JoinCondition {
    On(Expr),
    Using(Vec<Identifier>),
}

#[derive(Debug, Clone)]
pub enum JoinKind {
    Cross,
    Natural(JoinType),
    Conditional {
        join_type: JoinType,
        condition: JoinCondition,
    },
}

/// Unvalidated join options. Exactly one of `natural`, `on` or `using`
/// must be set; [`JoinConstraint::into_kind`] enforces that.
#[derive(Debug, Clone, Default)]
pub struct JoinConstraint {
    natural: bool,
    on: Option<Expr>,
    using: Option<Vec<Identifier>>,
}

impl JoinConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn natural(mut self) -> Self {
        self.natural = true;
        self
    }

    pub fn on(mut self, condition: impl Into<Expr>) -> Self {
        self.on = Some(condition.into());
        self
    }

    pub fn using<I, N>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Identifier>,
    {
        self.using = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn into_kind(self, join_type: JoinType) -> Result<JoinKind> {
        match (self.natural, self.on, self.using) {
            (true, None, None) => Ok(JoinKind::Natural(join_type)),
            (true, _, _) => Err(SqlBuilderError::Join(
                "NATURAL join cannot have ON or USING clauses".to_string(),
            )),
            (false, Some(_), Some(_)) => Err(SqlBuilderError::Join(
                "cannot have both ON and USING clauses on a join".to_string(),
            )),
            (false, Some(on), None) => Ok(JoinKind::Conditional {
                join_type,
                condition: JoinCondition::On(on),
            }),
            (false, None, Some(using)) => {
                if using.is_empty() {
                    return Err(SqlBuilderError::Join(
                        "USING clause needs at least one column".to_string(),
                    ));
                }
                Ok(JoinKind::Conditional {
                    join_type,
                    condition: JoinCondition::Using(using),
                })
            }
            (false, None, None) => Err(SqlBuilderError::Join(format!(
                "{} JOIN requires NATURAL, ON or USING",
                join_type.token()
            ))),
        }
    }
}

pub fn natural() -> JoinConstraint {
    JoinConstraint::new().natural()
}

pub fn on(condition: impl Into<Expr>) -> JoinConstraint {
    JoinConstraint::new().on(condition)
}

pub fn using<I, N>(columns: I) -> JoinConstraint
where
    I: IntoIterator<Item = N>,
    N: Into<Identifier>,
{
    JoinConstraint::new().using(columns)
}

#[derive(Debug, Clone)]
pub struct Join {
    left: Source,
    right: Source,
    kind: JoinKind,
    parens: bool,
}

impl Join {
    pub fn new(left: Source, right: Source, kind: JoinKind) -> Self {
        Self {
            left,
            right,
            kind,
            parens: true,
        }
    }

    /// Joins at the top of a FROM clause render without outer parentheses.
    pub fn with_parens(mut self, parens: bool) -> Self {
        self.parens = parens;
        self
    }
}

impl Render for Join {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        let mut fragment = self.left.render(dialect, ctx)?;
        match &self.kind {
            JoinKind::Cross => fragment.push_str(" CROSS JOIN "),
            JoinKind::Natural(join_type) => {
                fragment.push_str(&format!(" NATURAL {} JOIN ", join_type.token()))
            }
            JoinKind::Conditional { join_type, .. } => {
                fragment.push_str(&format!(" {} JOIN ", join_type.token()))
            }
        }
        fragment.append(self.right.render(dialect, ctx)?);
        if let JoinKind::Conditional { condition, .. } = &self.kind {
            match condition {
                JoinCondition::On(on) => {
                    fragment.push_str(" ON ");
                    fragment.append(on.render(dialect, ctx)?);
                }
                JoinCondition::Using(columns) => {
                    fragment.push_str(" USING ");
                    fragment.append(render_list(columns, ", ", dialect, ctx)?.parenthesized());
                }
            }
        }
        Ok(if self.parens {
            fragment.parenthesized()
        } else {
            fragment
        })
    }
}

#[derive(Debug, Clone)]
pub enum Source {
    Table(Table),
    TableAlias(TableAlias),
    Subquery(SubqueryAlias),
    /// Unaliased `(VALUES ...)`.
    Values(Values),
    Join(Box<Join>),
}

impl Source {
    pub fn cross_join(self, other: impl Into<Source>) -> Source {
        Source::Join(Box::new(Join::new(self, other.into(), JoinKind::Cross)))
    }

    pub fn natural_join(self, other: impl Into<Source>) -> Source {
        Source::Join(Box::new(Join::new(
            self,
            other.into(),
            JoinKind::Natural(JoinType::Inner),
        )))
    }

    pub fn join(
        self,
        other: impl Into<Source>,
        join_type: JoinType,
        constraint: JoinConstraint,
    ) -> Result<Source> {
        let kind = constraint.into_kind(join_type)?;
        Ok(Source::Join(Box::new(Join::new(self, other.into(), kind))))
    }

    pub fn inner_join(self, other: impl Into<Source>, constraint: JoinConstraint) -> Result<Source> {
        self.join(other, JoinType::Inner, constraint)
    }

    pub fn left_join(self, other: impl Into<Source>, constraint: JoinConstraint) -> Result<Source> {
        self.join(other, JoinType::Left, constraint)
    }

    pub fn right_join(self, other: impl Into<Source>, constraint: JoinConstraint) -> Result<Source> {
        self.join(other, JoinType::Right, constraint)
    }

    pub fn full_join(self, other: impl Into<Source>, constraint: JoinConstraint) -> Result<Source> {
        self.join(other, JoinType::Full, constraint)
    }

    pub(crate) fn without_parens(self) -> Source {
        match self {
            Source::Join(join) => Source::Join(Box::new(join.with_parens(false))),
            other => other,
        }
    }
}

impl Render for Source {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        match self {
            Source::Table(table) => table.render(dialect, ctx),
            Source::TableAlias(alias) => alias.render(dialect, ctx),
            Source::Subquery(alias) => alias.render(dialect, ctx),
            Source::Values(values) => Ok(values.render(dialect, ctx)?.parenthesized()),
            Source::Join(join) => join.render(dialect, ctx),
        }
    }
}

impl From<Table> for Source {
    fn from(table: Table) -> Self {
        Source::Table(table)
    }
}

impl From<&str> for Source {
    fn from(name: &str) -> Self {
        Source::Table(Table::new(name))
    }
}

impl From<String> for Source {
    fn from(name: String) -> Self {
        Source::Table(Table::new(name))
    }
}

impl From<TableAlias> for Source {
    fn from(alias: TableAlias) -> Self {
        Source::TableAlias(alias)
    }
}

impl From<SubqueryAlias> for Source {
    fn from(alias: SubqueryAlias) -> Self {
        Source::Subquery(alias)
    }
}

impl From<Values> for Source {
    fn from(values: Values) -> Self {
        Source::Values(values)
    }
}

impl From<Join> for Source {
    fn from(join: Join) -> Self {
        Source::Join(Box::new(join))
    }
}

// Join construction straight from the concrete source types.
macro_rules! forward_joins {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                pub fn cross_join(self, other: impl Into<Source>) -> Source {
                    Source::from(self).cross_join(other)
                }

                pub fn natural_join(self, other: impl Into<Source>) -> Source {
                    Source::from(self).natural_join(other)
                }

                pub fn inner_join(
                    self,
                    other: impl Into<Source>,
                    constraint: JoinConstraint,
                ) -> Result<Source> {
                    Source::from(self).inner_join(other, constraint)
                }

                pub fn left_join(
                    self,
                    other: impl Into<Source>,
                    constraint: JoinConstraint,
                ) -> Result<Source> {
                    Source::from(self).left_join(other, constraint)
                }

                pub fn right_join(
                    self,
                    other: impl Into<Source>,
                    constraint: JoinConstraint,
                ) -> Result<Source> {
                    Source::from(self).right_join(other, constraint)
                }

                pub fn full_join(
                    self,
                    other: impl Into<Source>,
                    constraint: JoinConstraint,
                ) -> Result<Source> {
                    Source::from(self).full_join(other, constraint)
                }
            }
        )*
    };
}

forward_joins!(Table, TableAlias, SubqueryAlias);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::col;

    #[test]
    fn natural_excludes_on_and_using() {
        let err = natural().on(col("a").eq(col("b"))).into_kind(JoinType::Left);
        assert!(matches!(err, Err(SqlBuilderError::Join(_))));
    }

    #[test]
    fn on_and_using_are_exclusive() {
        let err = on(col("a").eq(col("b")))
            .using(["a"])
            .into_kind(JoinType::Inner);
        assert!(matches!(err, Err(SqlBuilderError::Join(_))));
    }

    #[test]
    fn conditional_join_needs_a_condition() {
        let err = JoinConstraint::new().into_kind(JoinType::Full);
        assert!(matches!(err, Err(SqlBuilderError::Join(_))));
    }

    #[test]
    fn empty_using_is_rejected() {
        let err = using(Vec::<&str>::new()).into_kind(JoinType::Inner);
        assert!(matches!(err, Err(SqlBuilderError::Join(_))));
    }

    #[test]
    fn only_flag_survives_attr() {
        let t = only("public").attr("foo");
        assert!(t.only);
        assert_eq!(t.name().name(), "public.foo");
    }
}
