// src/sheets/sync/header.rs
// Column name -> position lookup over a header row

use std::collections::HashMap;

use super::error::{SyncError, SyncResult};

/// Required column names resolved against one header snapshot. Positions are
/// 1-based. Never partial: it holds every requested name or is not built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    positions: HashMap<String, usize>,
}

impl ColumnMap {
    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Position of a column that was part of the resolved set.
    pub fn column(&self, name: &str) -> SyncResult<usize> {
        self.get(name)
            .ok_or_else(|| SyncError::MissingColumn(vec![name.to_string()]))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Resolve `required` against `header`, scanning left to right so that the
/// first occurrence of a name wins. Collects every missing name before failing.
pub fn resolve_columns<S: AsRef<str>>(header: &[String], required: &[S]) -> SyncResult<ColumnMap> {
    let mut positions = HashMap::with_capacity(required.len());
    let mut missing = Vec::new();

    for name in required {
        let name = name.as_ref();
        match header.iter().position(|h| h == name) {
            Some(index) => {
                positions.insert(name.to_string(), index + 1);
            }
            None => {
                if !missing.iter().any(|m: &String| m == name) {
                    missing.push(name.to_string());
                }
            }
        }
    }

    if !missing.is_empty() {
        return Err(SyncError::MissingColumn(missing));
    }
    Ok(ColumnMap { positions })
}
