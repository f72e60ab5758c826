// src/cli/mod.rs
// Command line: trigger delivery and small workbook maintenance tools

pub mod init_config;
pub mod list_columns;
pub mod trigger;
pub mod workbook;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::settings::{self, AppSettings, DATA_DIR_ENV};
use crate::sheets::database::WorkbookStore;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "sheetsync")]
#[command(about = "Sync completion status from a main sheet into per-row target workbooks", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Workbook directory (overrides settings and SHEETSYNC_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a cell of the main workbook and deliver it as an edit event
    Edit {
        /// Sheet the edit happened on
        #[arg(long)]
        sheet: String,
        /// Spreadsheet row (data starts at 2)
        #[arg(long)]
        row: usize,
        /// 1-based column
        #[arg(long)]
        column: usize,
        /// New cell value
        #[arg(long)]
        value: String,
    },

    /// Sync every flagged row that is not marked synced yet
    Sweep,

    /// Sweep repeatedly until interrupted
    Watch {
        /// Seconds between sweeps (defaults to the settings value)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Create a sheet (and its workbook if needed)
    CreateSheet {
        #[arg(long)]
        workbook: String,
        #[arg(long)]
        sheet: String,
        /// Header cells, left to right
        #[arg(required = true)]
        headers: Vec<String>,
    },

    /// Append a data row to a sheet
    AppendRow {
        #[arg(long)]
        workbook: String,
        #[arg(long)]
        sheet: String,
        values: Vec<String>,
    },

    /// Print a sheet through its filter
    Show {
        #[arg(long)]
        workbook: String,
        #[arg(long)]
        sheet: String,
        /// Ignore the filter and print every row
        #[arg(long)]
        all: bool,
    },

    /// List a sheet's columns with their filter criteria
    ListColumns {
        #[arg(long)]
        workbook: String,
        #[arg(long)]
        sheet: String,
    },

    /// Write the default settings file
    InitConfig {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Settings and store resolved from flags, environment and settings file.
pub struct CliContext {
    pub settings: AppSettings,
    pub store: WorkbookStore,
}

impl CliContext {
    pub fn load(cli: &Cli) -> Result<Self, Box<dyn std::error::Error>> {
        let settings: AppSettings = settings::io::load_settings(cli.config.as_deref())?;
        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .or_else(|| settings.data_dir.clone())
            .unwrap_or_else(WorkbookStore::default_path);
        let store = WorkbookStore::new(data_dir);
        tracing::debug!("Workbook directory: {}", store.root().display());

        Ok(Self { settings, store })
    }
}

pub fn run(cli: Cli) -> CliResult {
    if let Commands::InitConfig { force } = cli.command {
        return init_config::run(cli.config.as_deref(), force);
    }

    let ctx = CliContext::load(&cli)?;
    match cli.command {
        Commands::Edit {
            sheet,
            row,
            column,
            value,
        } => trigger::run_edit(&ctx, sheet, row, column, value),
        Commands::Sweep => trigger::run_sweep(&ctx),
        Commands::Watch { interval } => {
            trigger::run_watch(&ctx, interval.unwrap_or(ctx.settings.watch_interval_secs))
        }
        Commands::CreateSheet {
            workbook,
            sheet,
            headers,
        } => workbook::create_sheet(&ctx, &workbook, &sheet, &headers),
        Commands::AppendRow {
            workbook,
            sheet,
            values,
        } => workbook::append_row(&ctx, &workbook, &sheet, &values),
        Commands::Show {
            workbook,
            sheet,
            all,
        } => workbook::show(&ctx, &workbook, &sheet, all),
        Commands::ListColumns { workbook, sheet } => list_columns::run(&ctx, &workbook, &sheet),
        Commands::InitConfig { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_edit() {
        let cli = Cli::try_parse_from([
            "sheetsync", "--data-dir", "/tmp/x", "edit", "--sheet", "Main", "--row", "3",
            "--column", "1", "--value", "TRUE",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Commands::Edit { sheet, row, column, value } => {
                assert_eq!((sheet.as_str(), row, column, value.as_str()), ("Main", 3, 1, "TRUE"));
            }
            _ => panic!("expected edit"),
        }
    }

    #[test]
    fn test_data_dir_flag_wins_over_settings() {
        let dir = std::env::temp_dir().join(format!("sheetsync-ctx-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let config = dir.join("settings.json");
        std::fs::write(&config, r#"{"data_dir": "/from/settings"}"#).unwrap();

        let cli = Cli::try_parse_from([
            "sheetsync",
            "--config",
            config.to_str().unwrap(),
            "--data-dir",
            dir.to_str().unwrap(),
            "sweep",
        ])
        .unwrap();
        let ctx = CliContext::load(&cli).unwrap();
        assert_eq!(ctx.store.root(), dir.as_path());
        assert_eq!(ctx.settings.data_dir, Some(PathBuf::from("/from/settings")));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_create_sheet_requires_headers() {
        assert!(Cli::try_parse_from(["sheetsync", "create-sheet", "--workbook", "w", "--sheet", "s"]).is_err());
    }
}
