pub mod io;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::sheets::sync::FilterStrategy;

/// Environment variable overriding the workbook directory.
pub const DATA_DIR_ENV: &str = "SHEETSYNC_DATA_DIR";

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppSettings {
    /// Workbook directory; `Documents/SheetSync` when unset.
    pub data_dir: Option<PathBuf>,
    /// Seconds between sweeps in `watch` mode.
    pub watch_interval_secs: u64,
    pub sync: SyncConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            watch_interval_secs: 600,
            sync: SyncConfig::default(),
        }
    }
}

/// Sheet and column names the sync pipeline works with.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    /// Workbook id holding the main sheet.
    pub main_workbook: String,
    pub main_sheet_name: String,
    pub trigger_column: String,
    pub url_column: String,
    pub name_column: String,
    pub locator_column: String,
    /// Main-sheet column recording that a row was already synced.
    pub sync_status_column: String,
    pub synced_label: String,

    pub target_sheet_name: String,
    pub target_url_column: String,
    pub target_name_column: String,
    pub target_status_column: String,
    pub completed_label: String,

    pub filter_strategy: FilterStrategy,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            main_workbook: "main".to_string(),
            main_sheet_name: "推薦一覧".to_string(),
            trigger_column: "推薦済みフラグ".to_string(),
            url_column: "推薦URL".to_string(),
            name_column: "求職者名".to_string(),
            locator_column: "スプシ".to_string(),
            sync_status_column: "連携ステータス".to_string(),
            synced_label: "連携済".to_string(),
            target_sheet_name: "A社推薦管理".to_string(),
            target_url_column: "推薦URL（自動入力）".to_string(),
            target_name_column: "候補者名".to_string(),
            target_status_column: "推薦ステータス".to_string(),
            completed_label: "推薦済".to_string(),
            filter_strategy: FilterStrategy::default(),
        }
    }
}
