use thiserror::Error;

pub type Result<T> = std::result::Result<T, SqlBuilderError>;

#[derive(Debug, Error)]
pub enum SqlBuilderError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("invalid join: {0}")]
    Join(String),
    #[error("invalid window frame: {0}")]
    Frame(String),
    #[error("invalid sort order: {0}")]
    Sort(String),
    #[error("no rows in VALUES expression")]
    EmptyValues,
    #[error("CASE expression must have at least one WHEN clause")]
    EmptyCase,
    #[error("{op} needs at least one operand")]
    EmptyChain { op: &'static str },
    #[error("cannot specify OFFSET without LIMIT clause")]
    OffsetWithoutLimit,
    #[error("cannot add {clause} clause to a query with no FROM clause")]
    MissingFrom { clause: &'static str },
    #[error("duplicate window name: {0}")]
    DuplicateWindow(String),
    #[error("unbound variable: {0}")]
    UnboundVariable(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
