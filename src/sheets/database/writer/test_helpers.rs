// src/sheets/database/writer/test_helpers.rs
// Test utilities for workbook tests

#![cfg(test)]

use rusqlite::{params_from_iter, Connection};

use super::helpers::build_insert_sql;
use super::DbWriter;
use crate::sheets::database::schema::ensure_workbook_tables;

/// Create a registered sheet with the given header in an in-memory (or any)
/// workbook connection.
///
/// # Example
/// ```ignore
/// let conn = Connection::open_in_memory().unwrap();
/// setup_sheet(&conn, "Main", &["URL", "Name"]);
/// ```
pub fn setup_sheet(conn: &Connection, sheet: &str, headers: &[&str]) {
    ensure_workbook_tables(conn).unwrap();
    let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    DbWriter::create_sheet(conn, sheet, &headers).unwrap();
}

/// Insert a data row with an explicit `row_index`, bypassing append order.
pub fn insert_row(conn: &Connection, sheet: &str, row_index: i64, values: &[&str]) {
    let header = crate::sheets::database::DbReader::read_header(conn, sheet).unwrap();
    let mut params: Vec<String> = vec![row_index.to_string()];
    for i in 0..header.len() {
        params.push(values.get(i).copied().unwrap_or("").to_string());
    }
    conn.execute(&build_insert_sql(sheet, &header), params_from_iter(params.iter()))
        .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_sheet_registers_header() {
        let conn = Connection::open_in_memory().unwrap();
        setup_sheet(&conn, "Main", &["A", "B", "C"]);

        let mut stmt = conn
            .prepare("SELECT column_name FROM \"Main_Metadata\" ORDER BY column_index")
            .unwrap();
        let cols: Vec<String> = stmt
            .query_map([], |r| r.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(cols, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_insert_row_pads_missing_values() {
        let conn = Connection::open_in_memory().unwrap();
        setup_sheet(&conn, "Main", &["A", "B"]);
        insert_row(&conn, "Main", 3, &["only"]);

        let b: String = conn
            .query_row("SELECT \"B\" FROM \"Main\" WHERE row_index = 3", [], |r| r.get(0))
            .unwrap();
        assert_eq!(b, "");
    }
}
