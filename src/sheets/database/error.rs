// src/sheets/database/error.rs

use std::fmt;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
    SerdeJson(serde_json::Error),
    TableNotFound(String),
    RowOutOfRange { sheet: String, row: usize },
    ColumnOutOfRange { sheet: String, column: usize },
    InvalidMetadata(String),
    Other(String),
}

pub type DbResult<T> = Result<T, DbError>;

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbError::Sqlite(e) => write!(f, "SQLite error: {}", e),
            DbError::Io(e) => write!(f, "I/O error: {}", e),
            DbError::SerdeJson(e) => write!(f, "JSON error: {}", e),
            DbError::TableNotFound(name) => write!(f, "Table not found: {}", name),
            DbError::RowOutOfRange { sheet, row } => {
                write!(f, "Row {} is outside the data range of '{}'", row, sheet)
            }
            DbError::ColumnOutOfRange { sheet, column } => {
                write!(f, "Column {} is outside the header of '{}'", column, sheet)
            }
            DbError::InvalidMetadata(msg) => write!(f, "Invalid metadata: {}", msg),
            DbError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for DbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DbError::Sqlite(e) => Some(e),
            DbError::Io(e) => Some(e),
            DbError::SerdeJson(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(e: rusqlite::Error) -> Self {
        DbError::Sqlite(e)
    }
}

impl From<std::io::Error> for DbError {
    fn from(e: std::io::Error) -> Self {
        DbError::Io(e)
    }
}

impl From<serde_json::Error> for DbError {
    fn from(e: serde_json::Error) -> Self {
        DbError::SerdeJson(e)
    }
}
