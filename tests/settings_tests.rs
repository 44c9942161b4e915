// Settings file handling as seen from outside the crate

mod common;
use common::setup_logging;

use std::fs;
use std::path::PathBuf;

use neonchat::settings::{load_settings, save_settings, set_settings_path_override, settings_path};
use neonchat::{Settings, SettingsError, ThemeName};

#[test]
fn test_path_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.json");

    set_settings_path_override(path.clone());
    assert_eq!(settings_path().unwrap(), path);

    // Later overrides are ignored
    set_settings_path_override(PathBuf::from("/elsewhere.json"));
    assert_eq!(settings_path().unwrap(), path);
}

#[test]
fn test_theme_change_survives_restart() {
    setup_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut settings = load_settings(&path).unwrap();
    assert_eq!(settings.theme, ThemeName::Neon);

    settings.theme = ThemeName::Sunset;
    save_settings(&path, &settings).unwrap();

    let reloaded = load_settings(&path).unwrap();
    assert_eq!(reloaded.theme, ThemeName::Sunset);
    assert_eq!(reloaded.reply_delay_ms, 1500);
}

#[test]
fn test_file_written_as_lowercase_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let settings = Settings {
        theme: ThemeName::Purple,
        ..Settings::default()
    };
    save_settings(&path, &settings).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["theme"], "purple");
    assert_eq!(json["reply_delay_ms"], 1500);
    assert!(json.get("log_file").is_none());
}

#[test]
fn test_unknown_theme_in_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"theme":"forest"}"#).unwrap();

    assert!(matches!(load_settings(&path), Err(SettingsError::Parse { .. })));
}

#[test]
fn test_cli_style_overrides() {
    let merged = Settings::default().with_overrides(
        Some("ocean".parse().unwrap()),
        Some(250),
        Some(PathBuf::from("chat.log")),
        None,
    );
    assert_eq!(merged.theme, ThemeName::Ocean);
    assert_eq!(merged.reply_delay_ms, 250);
    assert_eq!(merged.log_file, Some(PathBuf::from("chat.log")));
    assert_eq!(merged.log_level, "info");
}
