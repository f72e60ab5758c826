// src/sheets/database/workbook.rs
// Handles over an open workbook and its sheets

use rusqlite::Connection;
use std::path::{Path, PathBuf};

use super::checkpoint::checkpoint_database;
use super::connection::DbConnection;
use super::error::{DbError, DbResult};
use super::reader::DbReader;
use super::writer::{self, DbWriter};
use crate::sheets::definitions::{SheetFilter, TableSnapshot};

/// One open workbook file.
pub struct Workbook {
    id: String,
    path: Option<PathBuf>,
    conn: Connection,
}

impl Workbook {
    pub(crate) fn new(id: &str, path: Option<PathBuf>, conn: Connection) -> Self {
        Self {
            id: id.to_string(),
            path,
            conn,
        }
    }

    /// Workbook that lives only in memory.
    pub fn in_memory(id: &str) -> DbResult<Self> {
        Ok(Self::new(id, None, DbConnection::open_in_memory()?))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn sheet_names(&self) -> DbResult<Vec<String>> {
        DbReader::sheet_names(&self.conn)
    }

    /// Sheet by name, `None` if the workbook has no such sheet.
    pub fn sheet(&self, name: &str) -> DbResult<Option<Sheet<'_>>> {
        if DbReader::sheet_exists(&self.conn, name)? {
            Ok(Some(Sheet {
                conn: &self.conn,
                name: name.to_string(),
            }))
        } else {
            Ok(None)
        }
    }

    pub fn create_sheet(&self, name: &str, headers: &[String]) -> DbResult<Sheet<'_>> {
        if DbReader::sheet_exists(&self.conn, name)? {
            return Err(DbError::Other(format!(
                "sheet '{}' already exists in workbook '{}'",
                name, self.id
            )));
        }
        DbWriter::create_sheet(&self.conn, name, headers)?;
        Ok(Sheet {
            conn: &self.conn,
            name: name.to_string(),
        })
    }

    /// Make every committed write durable in the workbook file.
    pub fn flush(&self) -> DbResult<()> {
        checkpoint_database(&self.conn)?;
        Ok(())
    }
}

/// One sheet of an open workbook. Every read goes to the store; nothing is
/// cached between calls.
pub struct Sheet<'a> {
    conn: &'a Connection,
    name: String,
}

impl<'a> Sheet<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> DbResult<Vec<String>> {
        DbReader::read_header(self.conn, &self.name)
    }

    pub fn snapshot(&self) -> DbResult<TableSnapshot> {
        DbReader::read_snapshot(self.conn, &self.name)
    }

    pub fn data_row_count(&self) -> DbResult<usize> {
        DbReader::data_row_count(self.conn, &self.name)
    }

    /// Overwrite the cell at a spreadsheet position (row >= 2, column >= 1).
    pub fn set_cell(&self, row: usize, column: usize, value: &str) -> DbResult<()> {
        writer::update_cell(self.conn, &self.name, row, column, value)
    }

    /// Append a row, returning its spreadsheet row number.
    pub fn append_row(&self, values: &[String]) -> DbResult<usize> {
        DbWriter::append_row(self.conn, &self.name, values)
    }

    pub fn filter(&self) -> DbResult<Option<SheetFilter>> {
        DbReader::read_filter(self.conn, &self.name)
    }

    pub fn set_filter(&self, filter: &SheetFilter) -> DbResult<()> {
        DbWriter::write_filter(self.conn, &self.name, filter)
    }

    pub fn remove_filter(&self) -> DbResult<()> {
        DbWriter::remove_filter(self.conn, &self.name)
    }

    /// Data rows the current filter lets through, with their row numbers.
    pub fn visible_rows(&self) -> DbResult<Vec<(usize, Vec<String>)>> {
        let snapshot = self.snapshot()?;
        let filter = self.filter()?;
        Ok(snapshot
            .numbered_rows()
            .filter(|(row, cells)| {
                filter
                    .as_ref()
                    .map_or(true, |f| f.is_row_visible(*row, cells))
            })
            .map(|(row, cells)| (row, cells.to_vec()))
            .collect())
    }

    pub fn flush(&self) -> DbResult<()> {
        checkpoint_database(self.conn)?;
        Ok(())
    }
}
