use thiserror::Error;

/// Error type for table loading, classification and analysis
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    #[error("failed to read file: {0}")]
    Load(String),

    #[error("spreadsheet is empty")]
    EmptyTable,

    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("CSV error")]
    Csv(#[source] csv::Error),

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("inconsistent row count: expected {expected}, found {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("column is not numeric: {0}")]
    NonNumericColumn(String),

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("computation error: {0}")]
    ComputationError(String),

    #[error("no table has been uploaded")]
    NoActiveTable,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error")]
    Json(#[source] serde_json::Error),

    #[error("TOML error")]
    Toml(#[source] toml::de::Error),

    #[error("YAML error")]
    Yaml(#[source] serde_yaml::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error is fatal to the current upload
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::Load(_)
                | Error::EmptyTable
                | Error::UnsupportedFormat(_)
                | Error::Csv(_)
                | Error::DuplicateColumnName(_)
                | Error::InconsistentRowCount { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml(err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Config(format!("invalid prefix pattern: {}", err))
    }
}
