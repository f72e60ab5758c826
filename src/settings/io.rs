use directories_next::ProjectDirs;
use std::fs;
use std::io::{self, BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "SheetSync";
const APPLICATION: &str = "sheetsync";
const CONFIG_FILE: &str = "settings.json";

pub fn default_config_path() -> io::Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION) {
        Ok(proj_dirs.config_dir().join(CONFIG_FILE))
    } else {
        Err(io::Error::new(
            ErrorKind::NotFound,
            "Could not determine project directories for settings.",
        ))
    }
}

/// Load settings from `path`, or from the per-user config file when no path
/// is given. A missing file yields the defaults.
pub fn load_settings<T: for<'de> serde::de::Deserialize<'de> + Default>(
    path: Option<&Path>,
) -> io::Result<T> {
    let config_file = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    info!("Settings: loading from {:?}", config_file);
    match fs::File::open(&config_file) {
        Ok(file) => {
            let reader = BufReader::new(file);
            match serde_json::from_reader(reader) {
                Ok(settings) => {
                    debug!("Settings: deserialized {:?}", config_file);
                    Ok(settings)
                }
                Err(e) => {
                    error!("Settings: failed to parse {:?}: {}", &config_file, e);
                    Err(io::Error::new(
                        ErrorKind::InvalidData,
                        format!("Failed to parse settings file: {}", e),
                    ))
                }
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("Settings: {:?} not found, using defaults", config_file);
            Ok(Default::default())
        }
        Err(e) => {
            error!("Settings: failed to open {:?}: {}", &config_file, e);
            Err(e)
        }
    }
}

/// Write settings as pretty JSON, creating parent directories.
pub fn save_settings<T: serde::Serialize>(settings: &T, path: Option<&Path>) -> io::Result<PathBuf> {
    let config_file = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if let Some(parent) = config_file.parent() {
        fs::create_dir_all(parent)?;
    }
    info!("Settings: saving to {:?}", config_file);
    let file = fs::File::create(&config_file)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, settings).map_err(|e| {
        error!("Settings: failed to serialize to {:?}: {}", &config_file, e);
        io::Error::new(ErrorKind::Other, e)
    })?;
    Ok(config_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppSettings;

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("sheetsync-settings-does-not-exist.json");
        let settings: AppSettings = load_settings(Some(path.as_path())).unwrap();
        assert_eq!(settings.watch_interval_secs, 600);
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("sheetsync-settings-{}", std::process::id()));
        let path = dir.join("nested").join("settings.json");
        let mut settings = AppSettings::default();
        settings.sync.completed_label = "Done".to_string();

        save_settings(&settings, Some(path.as_path())).unwrap();
        let loaded: AppSettings = load_settings(Some(path.as_path())).unwrap();
        assert_eq!(loaded.sync, settings.sync);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let dir = std::env::temp_dir().join(format!("sheetsync-badsettings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_settings::<AppSettings>(Some(path.as_path())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let _ = fs::remove_dir_all(&dir);
    }
}
