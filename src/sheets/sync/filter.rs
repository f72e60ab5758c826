// src/sheets/sync/filter.rs
// Keeps a "hide completed rows" rule on a target sheet

use serde::{Deserialize, Serialize};

use super::error::SyncResult;
use crate::sheets::database::Sheet;
use crate::sheets::definitions::{FilterCriteria, SheetFilter};

/// How an existing filter is brought up to date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStrategy {
    /// Replace only the status column's rule and grow the range over rows
    /// and columns added since; other columns' rules stay as they are.
    #[default]
    Merge,
    /// Drop the whole filter and rebuild it over the used range with only
    /// the status rule. Other columns' rules are lost.
    Recreate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRefresh {
    /// Sheet has no data rows; nothing touched.
    Skipped,
    Created,
    Merged,
    Recreated,
}

/// Make sure rows with a non-empty status cell are hidden.
pub fn refresh_filter(
    sheet: &Sheet<'_>,
    status_column: usize,
    strategy: FilterStrategy,
) -> SyncResult<FilterRefresh> {
    let snapshot = sheet.snapshot()?;
    if snapshot.data_row_count() == 0 {
        tracing::debug!("refresh_filter: '{}' has no data rows, skipped", sheet.name());
        return Ok(FilterRefresh::Skipped);
    }

    let existing = sheet.filter()?;
    let (mut filter, outcome) = match (strategy, existing) {
        (FilterStrategy::Merge, Some(mut current)) => {
            current.extend_to(&snapshot);
            current.remove_column_criteria(status_column);
            (current, FilterRefresh::Merged)
        }
        (FilterStrategy::Merge, None) => (SheetFilter::covering(&snapshot), FilterRefresh::Created),
        (FilterStrategy::Recreate, existing) => {
            if existing.is_some() {
                sheet.remove_filter()?;
            }
            (SheetFilter::covering(&snapshot), FilterRefresh::Recreated)
        }
    };
    filter.set_column_criteria(status_column, FilterCriteria::WhenCellEmpty);
    sheet.set_filter(&filter)?;
    sheet.flush()?;

    tracing::debug!(
        "refresh_filter: '{}' column {} -> {:?}",
        sheet.name(),
        status_column,
        outcome
    );
    Ok(outcome)
}
