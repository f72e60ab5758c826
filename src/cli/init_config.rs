// src/cli/init_config.rs
use std::path::Path;

use super::CliResult;
use crate::settings::{self, AppSettings};

pub fn run(path: Option<&Path>, force: bool) -> CliResult {
    let target = match path {
        Some(p) => p.to_path_buf(),
        None => settings::io::default_config_path()?,
    };
    if target.exists() && !force {
        return Err(format!("{} already exists (use --force to replace it)", target.display()).into());
    }
    let written = settings::io::save_settings(&AppSettings::default(), Some(target.as_path()))?;
    println!("Wrote default settings to {}", written.display());
    Ok(())
}
