use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowError {
    /// the row describes something outside of the bus network and is ignored
    #[error("row skipped: {0}")]
    Skip(String),
    #[error("missing value for column '{0}'")]
    MissingField(String),
    #[error("invalid value '{value}' for column '{column}': {message}")]
    InvalidValue {
        column: String,
        value: String,
        message: String,
    },
    #[error("{0} are not supported for this agency")]
    Unsupported(String),
}
