use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] postgres::Error),

    #[cfg(feature = "postgres")]
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Column '{column}' not found in result of {table}")]
    MissingColumn { table: String, column: String },

    #[error("Column '{column}': expected {expected}, got {found}")]
    UnexpectedType {
        column: String,
        expected: &'static str,
        found: String,
    },

    #[error("Column '{column}' has unsupported type '{type_name}'")]
    UnsupportedColumnType { column: String, type_name: String },

    #[error("Row has {actual} values but table has {expected} columns")]
    RaggedRow { expected: usize, actual: usize },
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Problems reading the sectioned credentials file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Section {section} not found in {path}")]
    MissingSection { section: String, path: String },

    #[error("Line {line}: parameter outside of any section")]
    NoSection { line: usize },

    #[error("Line {line}: expected 'key = value', got '{text}'")]
    Malformed { line: usize, text: String },
}

/// Why a data source could not be opened. Callers treat this tier as
/// recoverable: log it and skip report generation.
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("Missing connection parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("Invalid value '{value}' for connection parameter '{key}'")]
    InvalidParameter { key: &'static str, value: String },

    #[error("Cannot open SQLite database: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(feature = "postgres")]
    #[error("Cannot create PostgreSQL pool: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Dialect '{0}' is not enabled in this build")]
    DialectDisabled(&'static str),
}
