//! Configuration and settings persistence tests

use serde_json::json;

use jinja_playground::config_paths;
use jinja_playground::settings::{get_or, FileSettings, SettingsStore, KEY_PREFIX};
use jinja_playground::{OutputMode, PlaygroundConfig};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("jinja-playground"));
    }
}

#[test]
fn test_config_file_is_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert_eq!(path.file_name().unwrap(), "config.yaml");
    }
}

#[test]
fn test_settings_and_logs_live_in_config_dir() {
    if let (Some(dir), Some(settings), Some(logs)) = (
        config_paths::config_dir(),
        config_paths::settings_file(),
        config_paths::logs_dir(),
    ) {
        assert_eq!(settings.parent().unwrap(), dir);
        assert_eq!(logs.parent().unwrap(), dir);
    }
}

// ========================================================================
// PlaygroundConfig Tests
// ========================================================================

#[test]
fn test_missing_config_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlaygroundConfig::load_from(&dir.path().join("config.yaml"));
    assert_eq!(config, PlaygroundConfig::default());
    assert_eq!(config.default_mode, OutputMode::RenderHtml);
    assert_eq!(config.template_extension, "html");
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");
    let config = PlaygroundConfig {
        default_mode: OutputMode::Instructions,
        py_compat: true,
        inject_markers: false,
        ..PlaygroundConfig::default()
    };
    config.save_to(&path).unwrap();
    assert_eq!(PlaygroundConfig::load_from(&path), config);
}

#[test]
fn test_partial_config_fills_in_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "default_mode: tokens\npy_compat: true\n").unwrap();

    let config = PlaygroundConfig::load_from(&path);
    assert_eq!(config.default_mode, OutputMode::Tokens);
    assert!(config.py_compat);
    assert!(config.inject_markers);
    assert_eq!(config.highlight_open, "<b>");
}

#[test]
fn test_invalid_config_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "default_mode: [not, a, mode]\n").unwrap();
    assert_eq!(PlaygroundConfig::load_from(&path), PlaygroundConfig::default());
}

// ========================================================================
// FileSettings Tests
// ========================================================================

#[test]
fn test_file_settings_persist_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut store = FileSettings::open(&path);
    store.set("outputHeight", json!(275)).unwrap();
    store.set("contextWidth", json!(410)).unwrap();

    let reopened = FileSettings::open(&path);
    assert_eq!(get_or(&reopened, "outputHeight", 200u32), 275);
    assert_eq!(get_or(&reopened, "contextWidth", 350u32), 410);
}

#[test]
fn test_file_settings_keys_are_namespaced_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    FileSettings::open(&path)
        .set("outputHeight", json!(180))
        .unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw[format!("{KEY_PREFIX}outputHeight")], json!(180));
}

#[test]
fn test_corrupt_settings_file_reads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = FileSettings::open(&path);
    assert_eq!(store.get("outputHeight", json!(200)), json!(200));
}

#[test]
fn test_unwritable_settings_report_error_but_keep_value() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be makes the write fail
    let path = dir.path().join("settings.json");
    std::fs::create_dir(&path).unwrap();

    let mut store = FileSettings::open(&path);
    assert!(store.set("contextWidth", json!(500)).is_err());
    assert_eq!(store.get("contextWidth", json!(350)), json!(500));
}
