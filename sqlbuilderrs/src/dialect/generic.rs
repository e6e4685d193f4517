//! Identity dialect: names are emitted as written.

use super::Dialect;

/// Leaves identifiers and function names untouched and uses `%s`
/// placeholders. Used for inspection and for drivers that do their own
/// quoting.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainDialect;

impl Dialect for PlainDialect {
    fn quote_ident(&self, ident: &str) -> String {
        ident.to_string()
    }
}
