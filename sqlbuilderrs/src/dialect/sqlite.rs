//! SQLite dialect implementation.

use crate::error::Result;
use crate::expr::Expr;
use crate::render::{Context, Fragment, Render};

use super::{quote_dotted, Dialect};

#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn quote_ident(&self, ident: &str) -> String {
        quote_dotted(ident)
    }

    fn placeholder(&self) -> &str {
        "?"
    }

    fn operator_to_sql(
        &self,
        op: &str,
        left: &Expr,
        right: Option<&Expr>,
        ctx: &dyn Context,
    ) -> Result<Option<Fragment>> {
        // SQLite has no ILIKE; compare lowercased operands instead
        let like = match op {
            "ILIKE" => "LIKE",
            "NOT ILIKE" => "NOT LIKE",
            _ => return Ok(None),
        };
        let Some(right) = right else {
            return Ok(None);
        };
        let lower = self.quote_function_name("lower");
        let mut fragment = Fragment::new(format!("({lower}("));
        fragment.append(left.render(self, ctx)?);
        fragment.push_str(&format!(") {like} {lower}("));
        fragment.append(right.render(self, ctx)?);
        fragment.push_str("))");
        Ok(Some(fragment))
    }
}
