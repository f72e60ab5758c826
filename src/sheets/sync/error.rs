// src/sheets/sync/error.rs

use thiserror::Error;

use crate::sheets::database::DbError;

/// Why a row could not be synced. Every variant aborts the current row only.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Columns not found: {}", .0.join(", "))]
    MissingColumn(Vec<String>),
    #[error("Required fields are blank in row {row}: {}", .fields.join(", "))]
    MissingKeyField { row: usize, fields: Vec<String> },
    #[error("'{0}' is neither a workbook id nor a workbook URL")]
    NotALocator(String),
    #[error("Cannot open workbook '{id}': {source}")]
    TargetOpen {
        id: String,
        #[source]
        source: DbError,
    },
    #[error("Sheet '{0}' not found in target workbook")]
    TargetSheetNotFound(String),
    #[error("Sheet '{0}' not found in main workbook")]
    MainSheetNotFound(String),
    #[error("Row {0} is not a data row")]
    NotADataRow(usize),
    #[error(transparent)]
    Store(#[from] DbError),
}

pub type SyncResult<T> = Result<T, SyncError>;
