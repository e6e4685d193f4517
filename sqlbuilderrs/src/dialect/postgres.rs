//! PostgreSQL dialect implementation.

use super::{quote_dotted, Dialect};

#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn quote_ident(&self, ident: &str) -> String {
        quote_dotted(ident)
    }

    fn placeholder(&self) -> &str {
        "%s" // psycopg-style positional markers
    }
}
