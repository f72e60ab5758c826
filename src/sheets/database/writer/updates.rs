// src/sheets/database/writer/updates.rs
// Cell updates addressed by spreadsheet position

use super::super::error::{DbError, DbResult};
use super::super::reader::DbReader;
use super::helpers::build_update_sql;
use rusqlite::{params, Connection};

/// Overwrite a single cell. `row` is the spreadsheet row (data starts at 2)
/// and `column` the 1-based header position.
pub fn update_cell(
    conn: &Connection,
    table_name: &str,
    row: usize,
    column: usize,
    value: &str,
) -> DbResult<()> {
    let column_name = DbReader::column_name_at(conn, table_name, column)?;
    let row_index = DbReader::row_index_at(conn, table_name, row)?.ok_or_else(|| {
        DbError::RowOutOfRange {
            sheet: table_name.to_string(),
            row,
        }
    })?;

    let sql = build_update_sql(table_name, &column_name, "row_index = ?");
    conn.execute(&sql, params![value, row_index])?;
    tracing::trace!(
        "update_cell: '{}' R{}C{} ({}) <- '{}'",
        table_name,
        row,
        column,
        column_name,
        value
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::database::writer::test_helpers::{insert_row, setup_sheet};

    #[test]
    fn test_update_cell_by_position() {
        let conn = Connection::open_in_memory().unwrap();
        setup_sheet(&conn, "Main", &["URL", "Status"]);
        insert_row(&conn, "Main", 0, &["u0", ""]);
        insert_row(&conn, "Main", 7, &["u7", ""]);

        update_cell(&conn, "Main", 3, 2, "done").unwrap();

        let snap = DbReader::read_snapshot(&conn, "Main").unwrap();
        assert_eq!(snap.cell(2, 2), Some(""));
        assert_eq!(snap.cell(3, 2), Some("done"));
    }

    #[test]
    fn test_update_cell_out_of_range() {
        let conn = Connection::open_in_memory().unwrap();
        setup_sheet(&conn, "Main", &["URL"]);
        insert_row(&conn, "Main", 0, &["u0"]);

        assert!(matches!(
            update_cell(&conn, "Main", 3, 1, "x"),
            Err(DbError::RowOutOfRange { row: 3, .. })
        ));
        assert!(matches!(
            update_cell(&conn, "Main", 2, 2, "x"),
            Err(DbError::ColumnOutOfRange { column: 2, .. })
        ));
    }
}
