use log::{info, warn};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::mock::AUTO_REPLY_DELAY;
use crate::theme::ThemeName;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown theme '{0}' (expected one of neon, white, blue, purple, sunset, ocean)")]
    UnknownTheme(String),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeName,
    pub reply_delay_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            theme: ThemeName::default(),
            reply_delay_ms: AUTO_REPLY_DELAY.as_millis() as u64,
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Command line values win over whatever the settings file said.
    pub fn with_overrides(
        mut self,
        theme: Option<ThemeName>,
        reply_delay_ms: Option<u64>,
        log_file: Option<PathBuf>,
        log_level: Option<String>,
    ) -> Self {
        if let Some(theme) = theme {
            self.theme = theme;
        }
        if let Some(delay) = reply_delay_ms {
            self.reply_delay_ms = delay;
        }
        if log_file.is_some() {
            self.log_file = log_file;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

static SETTINGS_PATH_OVERRIDE: OnceCell<PathBuf> = OnceCell::new();

/// Points every later `settings_path()` call at `path`. Only the first call wins.
pub fn set_settings_path_override(path: PathBuf) {
    if SETTINGS_PATH_OVERRIDE.set(path).is_err() {
        warn!("Settings path override already set, ignoring");
    }
}

pub fn get_config_dir() -> Result<PathBuf, SettingsError> {
    let config_dir = dirs::config_dir()
        .ok_or(SettingsError::NoConfigDir)?
        .join("neonchat");
    Ok(config_dir)
}

pub fn settings_path() -> Result<PathBuf, SettingsError> {
    if let Some(path) = SETTINGS_PATH_OVERRIDE.get() {
        return Ok(path.clone());
    }
    Ok(get_config_dir()?.join("settings.json"))
}

/// Reads settings from `path`. A missing file is not an error and yields defaults.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    if !path.exists() {
        info!("No settings file at {}, using defaults", path.display());
        return Ok(Settings::default());
    }

    let io_err = |source| SettingsError::Io { path: path.to_path_buf(), source };

    let mut file = File::open(path).map_err(io_err)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(io_err)?;

    let settings: Settings = serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded settings from {} (theme {})", path.display(), settings.theme);
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let io_err = |source| SettingsError::Io { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let file = File::create(path).map_err(io_err)?;
    write_settings(file, path, settings)?;

    info!("Settings saved to {}", path.display());
    Ok(())
}

/// Serializes `settings` into `writer`. `path` only labels errors.
fn write_settings<W: Write>(writer: W, path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    serde_json::to_writer_pretty(writer, settings).map_err(|e| {
        if e.is_io() {
            SettingsError::Io {
                path: path.to_path_buf(),
                source: io::Error::from(e),
            }
        } else {
            SettingsError::Parse {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.theme, ThemeName::Neon);
        assert_eq!(settings.reply_delay_ms, 1500);
        assert_eq!(settings.log_level, "info");
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme":"ocean"}"#).unwrap();
        assert_eq!(settings.theme, ThemeName::Ocean);
        assert_eq!(settings.reply_delay_ms, 1500);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let file = Settings {
            theme: ThemeName::Blue,
            reply_delay_ms: 900,
            log_file: Some(PathBuf::from("file.log")),
            log_level: "warn".to_string(),
        };

        let merged = file.clone().with_overrides(Some(ThemeName::Ocean), None, None, Some("trace".to_string()));
        assert_eq!(merged.theme, ThemeName::Ocean);
        assert_eq!(merged.reply_delay_ms, 900);
        assert_eq!(merged.log_file, Some(PathBuf::from("file.log")));
        assert_eq!(merged.log_level, "trace");

        let untouched = file.clone().with_overrides(None, None, None, None);
        assert_eq!(untouched, file);
        assert_eq!(untouched.reply_delay(), Duration::from_millis(900));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        match load_settings(&path) {
            Err(SettingsError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_save_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            theme: ThemeName::Sunset,
            reply_delay_ms: 200,
            log_file: Some(PathBuf::from("/tmp/neonchat.log")),
            log_level: "debug".to_string(),
        };

        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_write_is_io_error() {
        let path = PathBuf::from("/tmp/settings.json");
        match write_settings(FullDisk, &path, &Settings::default()) {
            Err(SettingsError::Io { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.to_string(), "no space left on device");
            }
            other => panic!("Expected I/O error, got {:?}", other),
        }
    }
}
