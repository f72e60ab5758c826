// src/sheets/sync/dispatcher.rs
// Turns trigger events into per-row sync runs.
//
// Per-row pipeline:
//   Idle -> KeyResolved -> TargetOpened -> Matched | NotFound -> Written | Skipped
// A failure at any step ends that row only; nothing is retried. The next
// sweep (or edit) picks unsynced rows up again.

use chrono::{DateTime, Local};

use super::error::{SyncError, SyncResult};
use super::filter::refresh_filter;
use super::header::resolve_columns;
use super::key::{extract_key, KeyColumns};
use super::locator::parse_locator;
use super::matcher::find_match;
use super::status::write_status;
use crate::settings::SyncConfig;
use crate::sheets::database::{Sheet, Workbook, WorkbookStore};
use crate::sheets::definitions::TableSnapshot;

/// A single-cell edit on some sheet of the main workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEvent {
    pub sheet_name: String,
    pub row: usize,
    pub column: usize,
    pub new_value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    Edit(EditEvent),
    Sweep,
}

/// Result of a pipeline run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// Status written at this target row and filter refreshed.
    Synced { target_row: usize },
    /// No target row carries the key.
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub started_at: DateTime<Local>,
    /// Rows that qualified and entered the pipeline.
    pub examined: usize,
    pub synced: usize,
    pub unmatched: usize,
    pub failed: usize,
}

impl SyncReport {
    fn new() -> Self {
        Self {
            started_at: Local::now(),
            examined: 0,
            synced: 0,
            unmatched: 0,
            failed: 0,
        }
    }

    fn record(&mut self, row: usize, result: &SyncResult<RowOutcome>) {
        self.examined += 1;
        match result {
            Ok(RowOutcome::Synced { .. }) => self.synced += 1,
            Ok(RowOutcome::NoMatch) => self.unmatched += 1,
            Err(e) => {
                self.failed += 1;
                log_row_failure(row, e);
            }
        }
    }
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] examined {}, synced {}, no match {}, failed {}",
            self.started_at.format("%Y-%m-%d %H:%M:%S"),
            self.examined,
            self.synced,
            self.unmatched,
            self.failed
        )
    }
}

fn log_row_failure(row: usize, error: &SyncError) {
    match error {
        SyncError::MissingKeyField { .. } => tracing::warn!("Row {} skipped: {}", row, error),
        _ => tracing::error!("Row {} aborted: {}", row, error),
    }
}

pub struct Dispatcher {
    config: SyncConfig,
    store: WorkbookStore,
}

impl Dispatcher {
    pub fn new(config: SyncConfig, store: WorkbookStore) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn store(&self) -> &WorkbookStore {
        &self.store
    }

    pub fn dispatch(&self, main: &Workbook, event: &TriggerEvent) -> SyncReport {
        match event {
            TriggerEvent::Edit(edit) => self.handle_edit(main, edit),
            TriggerEvent::Sweep => self.sweep(main),
        }
    }

    fn main_sheet<'w>(&self, main: &'w Workbook) -> SyncResult<Sheet<'w>> {
        main.sheet(&self.config.main_sheet_name)?
            .ok_or_else(|| SyncError::MainSheetNotFound(self.config.main_sheet_name.clone()))
    }

    fn handle_edit(&self, main: &Workbook, edit: &EditEvent) -> SyncReport {
        let mut report = SyncReport::new();

        if edit.sheet_name != self.config.main_sheet_name || edit.row < 2 {
            return report;
        }
        if edit.new_value.trim().is_empty() {
            tracing::debug!("Edit at R{}C{} cleared a cell, ignored", edit.row, edit.column);
            return report;
        }

        let sheet = match self.main_sheet(main) {
            Ok(sheet) => sheet,
            Err(e) => {
                tracing::error!("{}", e);
                return report;
            }
        };
        let snapshot = match sheet.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("Cannot read '{}': {}", sheet.name(), e);
                return report;
            }
        };
        let trigger_column = match resolve_columns(&snapshot.header, &[&self.config.trigger_column])
            .and_then(|map| map.column(&self.config.trigger_column))
        {
            Ok(column) => column,
            Err(e) => {
                tracing::error!("{}", e);
                return report;
            }
        };
        if edit.column != trigger_column {
            return report;
        }

        let result = self.sync_row(&snapshot, edit.row).and_then(|outcome| {
            if matches!(outcome, RowOutcome::Synced { .. }) {
                self.mark_synced_if_tracked(&sheet, &snapshot, edit.row)?;
            }
            Ok(outcome)
        });
        report.record(edit.row, &result);
        report
    }

    /// Edit-driven syncs stamp the marker too when the main sheet has the
    /// marker column; without it the edit path still works.
    fn mark_synced_if_tracked(
        &self,
        sheet: &Sheet<'_>,
        snapshot: &TableSnapshot,
        row: usize,
    ) -> SyncResult<()> {
        let Ok(map) = resolve_columns(&snapshot.header, &[&self.config.sync_status_column]) else {
            tracing::debug!(
                "'{}' has no '{}' column, sync marker not written",
                sheet.name(),
                self.config.sync_status_column
            );
            return Ok(());
        };
        let column = map.column(&self.config.sync_status_column)?;
        sheet.set_cell(row, column, &self.config.synced_label)?;
        sheet.flush()?;
        Ok(())
    }

    /// One pass over the main sheet. A row qualifies when its trigger cell is
    /// non-empty and its marker cell is not yet the synced label.
    pub fn sweep(&self, main: &Workbook) -> SyncReport {
        let mut report = SyncReport::new();

        let sheet = match self.main_sheet(main) {
            Ok(sheet) => sheet,
            Err(e) => {
                tracing::error!("{}", e);
                return report;
            }
        };
        let snapshot = match sheet.snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("Cannot read '{}': {}", sheet.name(), e);
                return report;
            }
        };
        let columns = match resolve_columns(
            &snapshot.header,
            &[&self.config.trigger_column, &self.config.sync_status_column],
        ) {
            Ok(map) => map,
            Err(e) => {
                tracing::error!("{}", e);
                return report;
            }
        };
        let (Some(trigger_column), Some(status_column)) = (
            columns.get(&self.config.trigger_column),
            columns.get(&self.config.sync_status_column),
        ) else {
            return report;
        };

        for (row, _) in snapshot.numbered_rows() {
            let trigger = snapshot.cell(row, trigger_column).unwrap_or("");
            let marker = snapshot.cell(row, status_column).unwrap_or("");
            if trigger.trim().is_empty() || marker.trim() == self.config.synced_label {
                continue;
            }
            tracing::info!("Unsynced row detected: {}", row);

            let result = self.sync_row(&snapshot, row).and_then(|outcome| {
                if matches!(outcome, RowOutcome::Synced { .. }) {
                    sheet.set_cell(row, status_column, &self.config.synced_label)?;
                    sheet.flush()?;
                }
                Ok(outcome)
            });
            report.record(row, &result);
        }

        tracing::info!("Sweep finished: {}", report);
        report
    }

    /// Run the pipeline for one main-sheet row of `main`.
    pub fn sync_row(&self, main: &TableSnapshot, row: usize) -> SyncResult<RowOutcome> {
        let cfg = &self.config;

        // Idle -> KeyResolved
        let main_columns = resolve_columns(
            &main.header,
            &[&cfg.url_column, &cfg.name_column, &cfg.locator_column],
        )?;
        let key = extract_key(
            main,
            row,
            KeyColumns {
                url: main_columns.column(&cfg.url_column)?,
                name: main_columns.column(&cfg.name_column)?,
                locator: main_columns.column(&cfg.locator_column)?,
            },
        )?;
        let workbook_id = parse_locator(&key.locator)?;

        // KeyResolved -> TargetOpened
        let target_book = self
            .store
            .open_by_id(&workbook_id)
            .map_err(|source| SyncError::TargetOpen {
                id: workbook_id.clone(),
                source,
            })?;
        let target = target_book
            .sheet(&cfg.target_sheet_name)?
            .ok_or_else(|| SyncError::TargetSheetNotFound(cfg.target_sheet_name.clone()))?;
        let target_snapshot = target.snapshot()?;
        let target_columns = resolve_columns(
            &target_snapshot.header,
            &[
                &cfg.target_url_column,
                &cfg.target_name_column,
                &cfg.target_status_column,
            ],
        )?;

        // TargetOpened -> Matched | NotFound
        let Some(matched) = find_match(
            &target_snapshot,
            target_columns.column(&cfg.target_url_column)?,
            target_columns.column(&cfg.target_name_column)?,
            &key,
        ) else {
            tracing::info!("No matching row found: {}", key.name.trim());
            return Ok(RowOutcome::NoMatch);
        };

        // Matched -> Written
        let status_column = target_columns.column(&cfg.target_status_column)?;
        write_status(&target, matched.row, status_column, &cfg.completed_label)?;
        refresh_filter(&target, status_column, cfg.filter_strategy)?;

        tracing::info!(
            "Synced: {} -> {}!R{}",
            key.name.trim(),
            workbook_id,
            matched.row
        );
        Ok(RowOutcome::Synced {
            target_row: matched.row,
        })
    }
}
