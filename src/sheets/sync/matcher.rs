// src/sheets/sync/matcher.rs
// Linear scan of a target sheet for a (url, name) pair

use super::key::SyncKey;
use crate::sheets::definitions::TableSnapshot;

/// Target row whose trimmed (url, name) equals the key's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRecord {
    /// Spreadsheet row number (data starts at 2).
    pub row: usize,
}

/// First row in sheet order whose trimmed URL and name cells both equal the
/// trimmed key fields. Rows with a blank URL or name are skipped. Comparison
/// is case-sensitive and leaves inner whitespace alone. Later duplicates are
/// ignored.
pub fn find_match(
    table: &TableSnapshot,
    url_column: usize,
    name_column: usize,
    key: &SyncKey,
) -> Option<MatchRecord> {
    let base_url = key.url.trim();
    let base_name = key.name.trim();

    table.numbered_rows().find_map(|(row, cells)| {
        let cell = |column: usize| {
            column
                .checked_sub(1)
                .and_then(|i| cells.get(i))
                .map(|v| v.trim())
                .unwrap_or("")
        };
        let row_url = cell(url_column);
        let row_name = cell(name_column);
        if row_url.is_empty() || row_name.is_empty() {
            return None;
        }
        (row_url == base_url && row_name == base_name).then_some(MatchRecord { row })
    })
}
