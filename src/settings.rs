//! Key-value settings persistence
//!
//! Small UI preferences (pane sizes) are kept in a JSON object, one entry
//! per namespaced key. Reads never fail: a missing or unreadable value gives
//! back the caller's default. Writes report failures, and callers that treat
//! persistence as best-effort are free to ignore them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Namespace prepended to every stored key
pub const KEY_PREFIX: &str = "jinja-playground:";

pub const OUTPUT_HEIGHT_KEY: &str = "outputHeight";
pub const DEFAULT_OUTPUT_HEIGHT: u32 = 200;

pub const CONTEXT_WIDTH_KEY: &str = "contextWidth";
pub const DEFAULT_CONTEXT_WIDTH: u32 = 350;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no settings location available")]
    NoLocation,
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Get/set contract for persisted settings
pub trait SettingsStore {
    /// Stored value for `key`, or `default` when absent or unreadable
    fn get(&self, key: &str, default: Value) -> Value;

    fn set(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
}

/// Typed read: a stored value that doesn't fit `T` yields `default`
pub fn get_or<S, T>(store: &S, key: &str, default: T) -> T
where
    S: SettingsStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key, Value::Null) {
        Value::Null => default,
        value => serde_json::from_value(value).unwrap_or(default),
    }
}

fn namespaced(key: &str) -> String {
    format!("{KEY_PREFIX}{key}")
}

/// In-process store, used when nothing should touch the disk
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, Value>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str, default: Value) -> Value {
        self.values.get(&namespaced(key)).cloned().unwrap_or(default)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.values.insert(namespaced(key), value);
        Ok(())
    }
}

/// Store backed by a JSON file, rewritten on every `set`
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl FileSettings {
    /// Open the store at `~/.config/jinja-playground/settings.json`
    pub fn open_default() -> Result<Self, SettingsError> {
        let path = crate::config_paths::settings_file().ok_or(SettingsError::NoLocation)?;
        Ok(Self::open(path))
    }

    /// Open the store at `path`; an unreadable file starts empty
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!("Ignoring invalid settings at {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("Failed to read settings at {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), SettingsError> {
        let write_err = |source| SettingsError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content).map_err(write_err)
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: &str, default: Value) -> Value {
        self.values.get(&namespaced(key)).cloned().unwrap_or(default)
    }

    /// The value is kept in memory even when writing the file fails
    fn set(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.values.insert(namespaced(key), value);
        self.flush()
    }
}
