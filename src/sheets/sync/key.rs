// src/sheets/sync/key.rs

use super::error::{SyncError, SyncResult};
use crate::sheets::definitions::TableSnapshot;

/// Fields read from one main-sheet row. All three are non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncKey {
    pub url: String,
    pub name: String,
    pub locator: String,
}

/// Positions of the key fields in the main sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyColumns {
    pub url: usize,
    pub name: usize,
    pub locator: usize,
}

pub fn extract_key(table: &TableSnapshot, row: usize, columns: KeyColumns) -> SyncResult<SyncKey> {
    if table.row(row).is_none() {
        return Err(SyncError::NotADataRow(row));
    }

    let read = |column: usize| table.cell(row, column).unwrap_or("").to_string();
    let url = read(columns.url);
    let name = read(columns.name);
    let locator = read(columns.locator);

    let blank: Vec<String> = [("url", &url), ("name", &name), ("locator", &locator)]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field.to_string())
        .collect();
    if !blank.is_empty() {
        return Err(SyncError::MissingKeyField { row, fields: blank });
    }

    Ok(SyncKey { url, name, locator })
}
