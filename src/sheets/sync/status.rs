// src/sheets/sync/status.rs

use super::error::SyncResult;
use crate::sheets::database::Sheet;

/// Write `label` into one cell, overwriting whatever is there, then flush so
/// the value is durable before anything reads the sheet again.
pub fn write_status(sheet: &Sheet<'_>, row: usize, column: usize, label: &str) -> SyncResult<()> {
    sheet.set_cell(row, column, label)?;
    sheet.flush()?;
    tracing::debug!(
        "write_status: '{}' R{}C{} <- '{}'",
        sheet.name(),
        row,
        column,
        label
    );
    Ok(())
}
