// src/sheets/database/writer/helpers.rs
// SQL text builders shared by the reader, the writer and the schema module

/// Quote a SQL identifier. Embedded double quotes are doubled, so header
/// names from users can never break out of the identifier.
///
/// # Example
/// ```
/// use sheetsync::sheets::database::writer::helpers::quote_identifier;
/// assert_eq!(quote_identifier("User Name"), "\"User Name\"");
/// ```
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn quote_column_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|name| quote_identifier(name))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn build_placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// `<sheet>_Metadata`
pub fn metadata_table_name(table_name: &str) -> String {
    format!("{}_Metadata", table_name)
}

/// SELECT of the given header columns in row order.
pub fn build_select_rows_sql(table_name: &str, columns: &[String]) -> String {
    if columns.is_empty() {
        return format!(
            "SELECT row_index FROM {} ORDER BY row_index",
            quote_identifier(table_name)
        );
    }
    format!(
        "SELECT row_index, {} FROM {} ORDER BY row_index",
        quote_column_list(columns),
        quote_identifier(table_name)
    )
}

/// INSERT of one row; the first placeholder is `row_index`.
pub fn build_insert_sql(table_name: &str, columns: &[String]) -> String {
    if columns.is_empty() {
        return format!("INSERT INTO {} (row_index) VALUES (?)", quote_identifier(table_name));
    }
    format!(
        "INSERT INTO {} (row_index, {}) VALUES (?, {})",
        quote_identifier(table_name),
        quote_column_list(columns),
        build_placeholders(columns.len())
    )
}

/// UPDATE of one cell, stamping `updated_at`.
pub fn build_update_sql(table_name: &str, column_name: &str, where_clause: &str) -> String {
    format!(
        "UPDATE {} SET {} = ?, updated_at = CURRENT_TIMESTAMP WHERE {}",
        quote_identifier(table_name),
        quote_identifier(column_name),
        where_clause
    )
}
