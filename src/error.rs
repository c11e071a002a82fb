use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row that could not be turned into a transaction.
    #[error("Line {line}: {message}")]
    Row { line: u64, message: String },

    #[error("Missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("Transaction #{0} not found")]
    NotFound(usize),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl FinanceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FinanceError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type FinanceResult<T> = Result<T, FinanceError>;
