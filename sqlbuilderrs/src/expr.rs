//! Expression nodes: names, parameters, variables, operators, function
//! calls, CASE and aliases.
//!
//! Operators always parenthesise their own output, so nesting never depends
//! on SQL precedence rules:
//!
//! ```rust
//! use sqlbuilder::dialect::PlainDialect;
//! use sqlbuilder::expr::col;
//! use sqlbuilder::render::RenderExt;
//!
//! let (sql, params) = (col("foo") + col("bar") * 2).to_sql(&PlainDialect).unwrap();
//! assert_eq!(sql, "(foo + (bar * %s))");
//! assert_eq!(params, vec![serde_json::json!(2)]);
//! ```

use std::ops;

use serde_json::Value;

use crate::dialect::Dialect;
use crate::error::{Result, SqlBuilderError};
use crate::query::Query;
use crate::render::{render_list, Context, Fragment, Render};
use crate::sort::OrderItem;
use crate::window::Window;

/// A (possibly dotted) name, quoted by the dialect.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qualify further: `t` -> `t.c`.
    pub fn attr(&self, name: &str) -> Identifier {
        Identifier::new(format!("{}.{}", self.name, name))
    }

    /// Call the name as a function.
    pub fn call<I, E>(&self, args: I) -> FunctionCall
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        FunctionCall::new(self.name.clone(), args)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::new(name)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::new(name)
    }
}

impl Render for Identifier {
    fn render(&self, dialect: &dyn Dialect, _ctx: &dyn Context) -> Result<Fragment> {
        Ok(Fragment::new(dialect.quote_ident(&self.name)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Lt,
    Le,
    Eq,
    Ne,
    Gt,
    Ge,
    Add,
    Subtract,
    Multiply,
    Divide,
    ShiftLeft,
    ShiftRight,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Or,
    Xor,
    RLike,
    NotRLike,
}

impl BinaryOp {
    pub fn token(self) -> &'static str {
        match self {
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "<>",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Xor => "XOR",
            BinaryOp::RLike => "RLIKE",
            BinaryOp::NotRLike => "NOT RLIKE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    BitNot,
    Not,
}

impl UnaryOp {
    pub fn token(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Pos => "+",
            UnaryOp::BitNot => "~",
            UnaryOp::Not => "NOT",
        }
    }
}

/// Connective applied across any number of operands: `(a AND b AND c)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOp {
    And,
    Or,
    Xor,
}

impl ChainOp {
    pub fn token(self) -> &'static str {
        match self {
            ChainOp::And => "AND",
            ChainOp::Or => "OR",
            ChainOp::Xor => "XOR",
        }
    }
}

/// Duplicate policy for aggregates, SELECT lists and set operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetQuantifier {
    All,
    Distinct,
}

impl SetQuantifier {
    pub fn token(self) -> &'static str {
        match self {
            SetQuantifier::All => "ALL",
            SetQuantifier::Distinct => "DISTINCT",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FunctionCall {
    name: String,
    args: Vec<Expr>,
    quantifier: Option<SetQuantifier>,
}

macro_rules! forward_binary {
    ($($method:ident),* $(,)?) => {
        $(
            pub fn $method(self, other: impl Into<Expr>) -> Expr {
                Expr::from(self).$method(other)
            }
        )*
    };
}

impl FunctionCall {
    pub fn new<I, E>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            quantifier: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `name(DISTINCT args)`
    pub fn distinct(mut self) -> Self {
        self.quantifier = Some(SetQuantifier::Distinct);
        self
    }

    /// `name(ALL args)`
    pub fn all(mut self) -> Self {
        self.quantifier = Some(SetQuantifier::All);
        self
    }

    /// Apply as a window function, either over a named window or an inline
    /// definition.
    pub fn over(self, window: impl Into<WindowSpec>) -> Expr {
        Expr::WindowFunction {
            call: self,
            window: Box::new(window.into()),
        }
    }

    forward_binary!(lt, le, eq, ne, gt, ge, and, or);

    pub fn alias(self, name: impl Into<Identifier>) -> Expr {
        Expr::from(self).alias(name)
    }

    pub fn asc(self) -> OrderItem {
        OrderItem::new(self).asc()
    }

    pub fn desc(self) -> OrderItem {
        OrderItem::new(self).desc()
    }
}

impl Render for FunctionCall {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        let mut fragment = Fragment::new(format!("{}(", dialect.quote_function_name(&self.name)));
        if let Some(quantifier) = self.quantifier {
            fragment.push_str(quantifier.token());
            fragment.push_str(" ");
        }
        fragment.append(render_list(&self.args, ", ", dialect, ctx)?);
        fragment.push_str(")");
        Ok(fragment)
    }
}

/// The target of `OVER`.
#[derive(Debug, Clone)]
pub enum WindowSpec {
    /// Reference to a window declared in the statement's WINDOW clause.
    Named(Identifier),
    Inline(Window),
}

impl From<&str> for WindowSpec {
    fn from(name: &str) -> Self {
        WindowSpec::Named(Identifier::new(name))
    }
}

impl From<Identifier> for WindowSpec {
    fn from(name: Identifier) -> Self {
        WindowSpec::Named(name)
    }
}

impl From<Window> for WindowSpec {
    fn from(window: Window) -> Self {
        WindowSpec::Inline(window)
    }
}

impl Render for WindowSpec {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        match self {
            WindowSpec::Named(name) => name.render(dialect, ctx),
            WindowSpec::Inline(window) => window.render(dialect, ctx),
        }
    }
}

/// `CASE WHEN .. THEN .. [ELSE ..] END`
#[derive(Debug, Clone, Default)]
pub struct Case {
    branches: Vec<(Expr, Expr)>,
    otherwise: Option<Box<Expr>>,
}

impl Case {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn when(mut self, condition: impl Into<Expr>, value: impl Into<Expr>) -> Self {
        self.branches.push((condition.into(), value.into()));
        self
    }

    pub fn otherwise(mut self, value: impl Into<Expr>) -> Self {
        self.otherwise = Some(Box::new(value.into()));
        self
    }

    pub fn end(self) -> Expr {
        Expr::Case(self)
    }
}

impl Render for Case {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        if self.branches.is_empty() {
            return Err(SqlBuilderError::EmptyCase);
        }
        let mut fragment = Fragment::new("CASE");
        for (condition, value) in &self.branches {
            fragment.push_str(" WHEN ");
            fragment.append(condition.render(dialect, ctx)?);
            fragment.push_str(" THEN ");
            fragment.append(value.render(dialect, ctx)?);
        }
        if let Some(otherwise) = &self.otherwise {
            fragment.push_str(" ELSE ");
            fragment.append(otherwise.render(dialect, ctx)?);
        }
        fragment.push_str(" END");
        Ok(fragment)
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    Identifier(Identifier),
    /// `*`, or `t.*` when qualified.
    Wildcard(Option<Identifier>),
    /// A parameter; the only node that contributes to the parameter list.
    Value(Value),
    /// Resolved through the render [`Context`].
    Variable(String),
    /// Emitted verbatim with no parameters. Used by the inspection path for
    /// `$name` variable tokens.
    Raw(String),
    /// `(a, b, c)`
    Tuple(Vec<Expr>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Chain {
        op: ChainOp,
        operands: Vec<Expr>,
    },
    Like {
        left: Box<Expr>,
        right: Box<Expr>,
        nocase: bool,
        invert: bool,
    },
    In {
        left: Box<Expr>,
        right: Box<Expr>,
        invert: bool,
    },
    IsNull {
        operand: Box<Expr>,
        invert: bool,
    },
    Function(FunctionCall),
    WindowFunction {
        call: FunctionCall,
        window: Box<WindowSpec>,
    },
    Case(Case),
    Alias {
        expr: Box<Expr>,
        alias: Identifier,
    },
    Subquery(Box<Query>),
}

impl Expr {
    fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn lt(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOp::Lt, other.into())
    }

    pub fn le(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOp::Le, other.into())
    }

    pub fn eq(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOp::Eq, other.into())
    }

    pub fn ne(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOp::Ne, other.into())
    }

    pub fn gt(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOp::Gt, other.into())
    }

    pub fn ge(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOp::Ge, other.into())
    }

    pub fn and(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOp::And, other.into())
    }

    pub fn or(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOp::Or, other.into())
    }

    pub fn xor(self, other: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOp::Xor, other.into())
    }

    /// `power(self, exponent)`
    pub fn pow(self, exponent: impl Into<Expr>) -> Expr {
        FunctionCall::new("power", [self, exponent.into()]).into()
    }

    /// `abs(self)`
    pub fn abs(self) -> Expr {
        FunctionCall::new("abs", [self]).into()
    }

    /// `(+ self)`
    pub fn pos(self) -> Expr {
        Expr::unary(UnaryOp::Pos, self)
    }

    /// `(~ self)`
    pub fn bit_not(self) -> Expr {
        Expr::unary(UnaryOp::BitNot, self)
    }

    fn like_op(self, pattern: Expr, nocase: bool, invert: bool) -> Expr {
        Expr::Like {
            left: Box::new(self),
            right: Box::new(pattern),
            nocase,
            invert,
        }
    }

    pub fn like(self, pattern: impl Into<Expr>) -> Expr {
        self.like_op(pattern.into(), false, false)
    }

    pub fn not_like(self, pattern: impl Into<Expr>) -> Expr {
        self.like_op(pattern.into(), false, true)
    }

    pub fn ilike(self, pattern: impl Into<Expr>) -> Expr {
        self.like_op(pattern.into(), true, false)
    }

    pub fn not_ilike(self, pattern: impl Into<Expr>) -> Expr {
        self.like_op(pattern.into(), true, true)
    }

    pub fn rlike(self, pattern: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOp::RLike, pattern.into())
    }

    pub fn not_rlike(self, pattern: impl Into<Expr>) -> Expr {
        Expr::binary(self, BinaryOp::NotRLike, pattern.into())
    }

    fn in_op(self, right: Expr, invert: bool) -> Expr {
        Expr::In {
            left: Box::new(self),
            right: Box::new(right),
            invert,
        }
    }

    /// `self IN (items...)`. An empty list renders `IN ()`.
    pub fn in_list<I, E>(self, items: I) -> Expr
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.in_op(tuple(items), false)
    }

    pub fn not_in_list<I, E>(self, items: I) -> Expr
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.in_op(tuple(items), true)
    }

    /// `self IN (<expr>)` for subqueries, variables or any other expression.
    pub fn in_expr(self, right: impl Into<Expr>) -> Expr {
        self.in_op(right.into(), false)
    }

    pub fn not_in_expr(self, right: impl Into<Expr>) -> Expr {
        self.in_op(right.into(), true)
    }

    pub fn is_null(self) -> Expr {
        Expr::IsNull {
            operand: Box::new(self),
            invert: false,
        }
    }

    pub fn is_not_null(self) -> Expr {
        Expr::IsNull {
            operand: Box::new(self),
            invert: true,
        }
    }

    /// Negate the expression, returning a new node. LIKE, IN, IS NULL and
    /// RLIKE toggle their own `NOT`; anything else is wrapped in `(NOT ..)`.
    pub fn invert(self) -> Expr {
        match self {
            Expr::Like {
                left,
                right,
                nocase,
                invert,
            } => Expr::Like {
                left,
                right,
                nocase,
                invert: !invert,
            },
            Expr::In {
                left,
                right,
                invert,
            } => Expr::In {
                left,
                right,
                invert: !invert,
            },
            Expr::IsNull { operand, invert } => Expr::IsNull {
                operand,
                invert: !invert,
            },
            Expr::Binary {
                op: BinaryOp::RLike,
                left,
                right,
            } => Expr::Binary {
                op: BinaryOp::NotRLike,
                left,
                right,
            },
            Expr::Binary {
                op: BinaryOp::NotRLike,
                left,
                right,
            } => Expr::Binary {
                op: BinaryOp::RLike,
                left,
                right,
            },
            other => Expr::unary(UnaryOp::Not, other),
        }
    }

    /// `self AS name`
    pub fn alias(self, name: impl Into<Identifier>) -> Expr {
        Expr::Alias {
            expr: Box::new(self),
            alias: name.into(),
        }
    }

    pub fn asc(self) -> OrderItem {
        OrderItem::new(self).asc()
    }

    pub fn desc(self) -> OrderItem {
        OrderItem::new(self).desc()
    }

    pub fn nulls_first(self) -> OrderItem {
        OrderItem::new(self).nulls_first()
    }

    pub fn nulls_last(self) -> OrderItem {
        OrderItem::new(self).nulls_last()
    }
}

/// Give the dialect first refusal on an operator, then fall back to the
/// default rendering.
fn render_operator(
    dialect: &dyn Dialect,
    ctx: &dyn Context,
    token: &str,
    left: &Expr,
    right: Option<&Expr>,
    default: impl FnOnce() -> Result<Fragment>,
) -> Result<Fragment> {
    match dialect.operator_to_sql(token, left, right, ctx)? {
        Some(fragment) => Ok(fragment),
        None => default(),
    }
}

fn render_infix(
    left: &Expr,
    token: &str,
    right: &Expr,
    dialect: &dyn Dialect,
    ctx: &dyn Context,
) -> Result<Fragment> {
    let mut fragment = left.render(dialect, ctx)?;
    fragment.push_str(&format!(" {token} "));
    fragment.append(right.render(dialect, ctx)?);
    Ok(fragment.parenthesized())
}

impl Render for Expr {
    fn render(&self, dialect: &dyn Dialect, ctx: &dyn Context) -> Result<Fragment> {
        match self {
            Expr::Identifier(ident) => ident.render(dialect, ctx),
            Expr::Wildcard(None) => Ok(Fragment::new("*")),
            Expr::Wildcard(Some(table)) => Ok(Fragment::new(format!(
                "{}.*",
                dialect.quote_ident(table.name())
            ))),
            Expr::Value(value) => Ok(Fragment::param(dialect, value.clone())),
            Expr::Variable(name) => {
                let resolved = ctx
                    .lookup(name)
                    .ok_or_else(|| SqlBuilderError::UnboundVariable(name.clone()))?;
                tracing::trace!(variable = %name, "resolved variable");
                resolved.render(dialect, ctx)
            }
            Expr::Raw(sql) => Ok(Fragment::new(sql.clone())),
            Expr::Tuple(items) => Ok(render_list(items, ", ", dialect, ctx)?.parenthesized()),
            Expr::Unary { op, operand } => {
                let token = op.token();
                render_operator(dialect, ctx, token, operand, None, || {
                    let mut fragment = Fragment::new(format!("{token} "));
                    fragment.append(operand.render(dialect, ctx)?);
                    Ok(fragment.parenthesized())
                })
            }
            Expr::Binary { op, left, right } => {
                let token = op.token();
                render_operator(dialect, ctx, token, left, Some(right.as_ref()), || {
                    render_infix(left, token, right, dialect, ctx)
                })
            }
            Expr::Chain { op, operands } => {
                if operands.is_empty() {
                    return Err(SqlBuilderError::EmptyChain { op: op.token() });
                }
                let sep = format!(" {} ", op.token());
                Ok(render_list(operands, &sep, dialect, ctx)?.parenthesized())
            }
            Expr::Like {
                left,
                right,
                nocase,
                invert,
            } => {
                let token = match (*invert, *nocase) {
                    (false, false) => "LIKE",
                    (false, true) => "ILIKE",
                    (true, false) => "NOT LIKE",
                    (true, true) => "NOT ILIKE",
                };
                render_operator(dialect, ctx, token, left, Some(right.as_ref()), || {
                    render_infix(left, token, right, dialect, ctx)
                })
            }
            Expr::In {
                left,
                right,
                invert,
            } => {
                let token = if *invert { "NOT IN" } else { "IN" };
                render_operator(dialect, ctx, token, left, Some(right.as_ref()), || {
                    // a variable bound to a tuple or subquery supplies its own parentheses
                    let resolved;
                    let right = match right.as_ref() {
                        Expr::Variable(name) => {
                            resolved = ctx
                                .lookup(name)
                                .ok_or_else(|| SqlBuilderError::UnboundVariable(name.clone()))?;
                            &resolved
                        }
                        other => other,
                    };
                    let items = match right {
                        Expr::Tuple(items) => {
                            if items.is_empty() {
                                tracing::warn!("rendering {token} with an empty list");
                            }
                            right.render(dialect, ctx)?
                        }
                        Expr::Subquery(_) => right.render(dialect, ctx)?,
                        other => other.render(dialect, ctx)?.parenthesized(),
                    };
                    let mut fragment = left.render(dialect, ctx)?;
                    fragment.push_str(&format!(" {token} "));
                    fragment.append(items);
                    Ok(fragment.parenthesized())
                })
            }
            Expr::IsNull { operand, invert } => {
                let token = if *invert { "IS NOT NULL" } else { "IS NULL" };
                render_operator(dialect, ctx, token, operand, None, || {
                    let mut fragment = operand.render(dialect, ctx)?;
                    fragment.push_str(&format!(" {token}"));
                    Ok(fragment.parenthesized())
                })
            }
            Expr::Function(call) => call.render(dialect, ctx),
            Expr::WindowFunction { call, window } => {
                let mut fragment = call.render(dialect, ctx)?;
                fragment.push_str(" OVER ");
                fragment.append(window.render(dialect, ctx)?);
                Ok(fragment)
            }
            Expr::Case(case) => case.render(dialect, ctx),
            Expr::Alias { expr, alias } => {
                let mut fragment = expr.render(dialect, ctx)?;
                fragment.push_str(" AS ");
                fragment.append(alias.render(dialect, ctx)?);
                Ok(fragment)
            }
            Expr::Subquery(query) => Ok(query.render(dialect, ctx)?.parenthesized()),
        }
    }
}

impl From<Identifier> for Expr {
    fn from(ident: Identifier) -> Self {
        Expr::Identifier(ident)
    }
}

impl From<FunctionCall> for Expr {
    fn from(call: FunctionCall) -> Self {
        Expr::Function(call)
    }
}

impl From<Case> for Expr {
    fn from(case: Case) -> Self {
        Expr::Case(case)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

impl<T: Into<Expr>> From<Option<T>> for Expr {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Expr::Value(Value::Null),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    Expr::Value(Value::from(value))
                }
            }
        )*
    };
}

value_from!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, &str, String);

macro_rules! expr_ops {
    ($ty:ty) => {
        impl<T: Into<Expr>> ops::Add<T> for $ty {
            type Output = Expr;
            fn add(self, rhs: T) -> Expr {
                Expr::binary(self.into(), BinaryOp::Add, rhs.into())
            }
        }

        impl<T: Into<Expr>> ops::Sub<T> for $ty {
            type Output = Expr;
            fn sub(self, rhs: T) -> Expr {
                Expr::binary(self.into(), BinaryOp::Subtract, rhs.into())
            }
        }

        impl<T: Into<Expr>> ops::Mul<T> for $ty {
            type Output = Expr;
            fn mul(self, rhs: T) -> Expr {
                Expr::binary(self.into(), BinaryOp::Multiply, rhs.into())
            }
        }

        impl<T: Into<Expr>> ops::Div<T> for $ty {
            type Output = Expr;
            fn div(self, rhs: T) -> Expr {
                Expr::binary(self.into(), BinaryOp::Divide, rhs.into())
            }
        }

        /// `mod(a, b)`
        impl<T: Into<Expr>> ops::Rem<T> for $ty {
            type Output = Expr;
            fn rem(self, rhs: T) -> Expr {
                let lhs: Expr = self.into();
                FunctionCall::new("mod", [lhs, rhs.into()]).into()
            }
        }

        impl<T: Into<Expr>> ops::Shl<T> for $ty {
            type Output = Expr;
            fn shl(self, rhs: T) -> Expr {
                Expr::binary(self.into(), BinaryOp::ShiftLeft, rhs.into())
            }
        }

        impl<T: Into<Expr>> ops::Shr<T> for $ty {
            type Output = Expr;
            fn shr(self, rhs: T) -> Expr {
                Expr::binary(self.into(), BinaryOp::ShiftRight, rhs.into())
            }
        }

        impl<T: Into<Expr>> ops::BitAnd<T> for $ty {
            type Output = Expr;
            fn bitand(self, rhs: T) -> Expr {
                Expr::binary(self.into(), BinaryOp::BitAnd, rhs.into())
            }
        }

        impl<T: Into<Expr>> ops::BitOr<T> for $ty {
            type Output = Expr;
            fn bitor(self, rhs: T) -> Expr {
                Expr::binary(self.into(), BinaryOp::BitOr, rhs.into())
            }
        }

        impl<T: Into<Expr>> ops::BitXor<T> for $ty {
            type Output = Expr;
            fn bitxor(self, rhs: T) -> Expr {
                Expr::binary(self.into(), BinaryOp::BitXor, rhs.into())
            }
        }

        impl ops::Neg for $ty {
            type Output = Expr;
            fn neg(self) -> Expr {
                Expr::unary(UnaryOp::Neg, self.into())
            }
        }

        /// Same as [`Expr::invert`].
        impl ops::Not for $ty {
            type Output = Expr;
            fn not(self) -> Expr {
                Expr::from(self).invert()
            }
        }
    };
}

expr_ops!(Expr);
expr_ops!(FunctionCall);

// Scalars on the left-hand side: `1 + col("x")`.
macro_rules! scalar_lhs_ops {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ops::Add<Expr> for $ty {
                type Output = Expr;
                fn add(self, rhs: Expr) -> Expr {
                    Expr::binary(self.into(), BinaryOp::Add, rhs)
                }
            }

            impl ops::Sub<Expr> for $ty {
                type Output = Expr;
                fn sub(self, rhs: Expr) -> Expr {
                    Expr::binary(self.into(), BinaryOp::Subtract, rhs)
                }
            }

            impl ops::Mul<Expr> for $ty {
                type Output = Expr;
                fn mul(self, rhs: Expr) -> Expr {
                    Expr::binary(self.into(), BinaryOp::Multiply, rhs)
                }
            }

            impl ops::Div<Expr> for $ty {
                type Output = Expr;
                fn div(self, rhs: Expr) -> Expr {
                    Expr::binary(self.into(), BinaryOp::Divide, rhs)
                }
            }
        )*
    };
}

scalar_lhs_ops!(i32, i64, u32, u64, f64);

/// A column (or any other name) reference.
pub fn col(name: impl Into<Identifier>) -> Expr {
    Expr::Identifier(name.into())
}

pub fn ident(name: impl Into<Identifier>) -> Identifier {
    name.into()
}

/// A parameter; strings passed here are values, never names.
pub fn val(value: impl Into<Value>) -> Expr {
    Expr::Value(value.into())
}

pub fn var(name: impl Into<String>) -> Expr {
    Expr::Variable(name.into())
}

/// `*`
pub fn wildcard() -> Expr {
    Expr::Wildcard(None)
}

pub fn func<I, E>(name: impl Into<String>, args: I) -> FunctionCall
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    FunctionCall::new(name, args)
}

pub fn tuple<I, E>(items: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Expr::Tuple(items.into_iter().map(Into::into).collect())
}

fn chain<I, E>(op: ChainOp, operands: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    Expr::Chain {
        op,
        operands: operands.into_iter().map(Into::into).collect(),
    }
}

pub fn and<I, E>(operands: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    chain(ChainOp::And, operands)
}

pub fn or<I, E>(operands: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    chain(ChainOp::Or, operands)
}

pub fn xor<I, E>(operands: I) -> Expr
where
    I: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    chain(ChainOp::Xor, operands)
}

/// `(NOT expr)`
pub fn not(expr: impl Into<Expr>) -> Expr {
    Expr::unary(UnaryOp::Not, expr.into())
}

pub fn case() -> Case {
    Case::new()
}

/// Conversion for positions that expect a name, such as GROUP BY or
/// PARTITION BY lists: plain strings become identifiers instead of
/// parameters.
pub trait IntoName {
    fn into_name(self) -> Expr;
}

impl IntoName for &str {
    fn into_name(self) -> Expr {
        col(self)
    }
}

impl IntoName for String {
    fn into_name(self) -> Expr {
        col(self)
    }
}

impl IntoName for Identifier {
    fn into_name(self) -> Expr {
        Expr::Identifier(self)
    }
}

impl IntoName for Expr {
    fn into_name(self) -> Expr {
        self
    }
}

impl IntoName for FunctionCall {
    fn into_name(self) -> Expr {
        Expr::Function(self)
    }
}
