// src/sheets/definitions.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rows of a sheet at one point in time.
///
/// Positions follow spreadsheet numbering: row 1 is the header, data starts
/// at row 2, and columns are 1-based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSnapshot {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableSnapshot {
    pub fn new(name: impl Into<String>, header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            header,
            rows,
        }
    }

    pub fn data_row_count(&self) -> usize {
        self.rows.len()
    }

    /// Last used row, counting the header.
    pub fn last_row(&self) -> usize {
        if self.header.is_empty() && self.rows.is_empty() {
            0
        } else {
            self.rows.len() + 1
        }
    }

    pub fn last_column(&self) -> usize {
        self.header.len()
    }

    /// Data cells of a spreadsheet row (row >= 2).
    pub fn row(&self, row: usize) -> Option<&[String]> {
        row.checked_sub(2)
            .and_then(|i| self.rows.get(i))
            .map(|cells| cells.as_slice())
    }

    /// Cell value at a spreadsheet position. Cells past the end of a short row
    /// read as empty.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        if column == 0 || column > self.header.len() {
            return None;
        }
        if row == 1 {
            return self.header.get(column - 1).map(String::as_str);
        }
        self.row(row)
            .map(|cells| cells.get(column - 1).map(String::as_str).unwrap_or(""))
    }

    /// Data rows paired with their spreadsheet row numbers.
    pub fn numbered_rows(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, cells)| (i + 2, cells.as_slice()))
    }
}

/// Condition a column filter applies to a cell. A row is shown only when
/// every condition on its columns accepts the cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterCriteria {
    WhenCellEmpty,
    WhenCellNotEmpty,
    TextEquals(String),
    TextContains(String),
}

impl FilterCriteria {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            FilterCriteria::WhenCellEmpty => value.is_empty(),
            FilterCriteria::WhenCellNotEmpty => !value.is_empty(),
            FilterCriteria::TextEquals(expected) => value == expected,
            FilterCriteria::TextContains(needle) => value.contains(needle.as_str()),
        }
    }
}

/// Sheet-wide filter: the covered range plus per-column criteria.
///
/// The range always starts at the header (row 1, column 1). Rows beyond
/// `last_row` are outside the filter and always visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetFilter {
    pub last_row: usize,
    pub last_column: usize,
    pub criteria: BTreeMap<usize, FilterCriteria>,
}

impl SheetFilter {
    /// Filter over the used range of a snapshot, with no criteria yet.
    pub fn covering(snapshot: &TableSnapshot) -> Self {
        Self {
            last_row: snapshot.last_row(),
            last_column: snapshot.last_column(),
            criteria: BTreeMap::new(),
        }
    }

    /// Grow the range so it covers the used range of `snapshot`. Never
    /// shrinks; criteria are untouched.
    pub fn extend_to(&mut self, snapshot: &TableSnapshot) {
        self.last_row = self.last_row.max(snapshot.last_row());
        self.last_column = self.last_column.max(snapshot.last_column());
    }

    pub fn column_criteria(&self, column: usize) -> Option<&FilterCriteria> {
        self.criteria.get(&column)
    }

    pub fn set_column_criteria(&mut self, column: usize, criteria: FilterCriteria) {
        self.criteria.insert(column, criteria);
    }

    pub fn remove_column_criteria(&mut self, column: usize) -> Option<FilterCriteria> {
        self.criteria.remove(&column)
    }

    pub fn is_row_visible(&self, row: usize, cells: &[String]) -> bool {
        if row < 2 || row > self.last_row {
            return true;
        }
        self.criteria.iter().all(|(&column, criteria)| {
            if column == 0 || column > self.last_column {
                return true;
            }
            let value = cells.get(column - 1).map(String::as_str).unwrap_or("");
            criteria.accepts(value)
        })
    }
}
