// src/sheets/sync/locator.rs
// Workbook id from a locator cell: either a bare id or a workbook URL

use regex::Regex;
use std::sync::LazyLock;

use super::error::{SyncError, SyncResult};

/// Bare ids need at least this many characters; a ten-character id such
/// as `abc1234567` is accepted, nine characters are not.
const MIN_BARE_ID_LEN: usize = 10;

static WORKBOOK_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"spreadsheets/d/([a-zA-Z0-9_-]+)").expect("workbook URL pattern is valid")
});

/// Bare ids are checked first: a value without `/` and at least ten
/// characters long is taken as-is. Anything else must contain
/// `spreadsheets/d/<id>`.
pub fn parse_locator(raw: &str) -> SyncResult<String> {
    let value = raw.trim();
    if !value.contains('/') && value.chars().count() >= MIN_BARE_ID_LEN {
        return Ok(value.to_string());
    }
    WORKBOOK_URL
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| SyncError::NotALocator(value.to_string()))
}
