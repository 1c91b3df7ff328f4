//! Playground configuration persistence
//!
//! Stores user preferences in `~/.config/jinja-playground/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dispatch::DEFAULT_BOILERPLATE;
use crate::highlight::{DEFAULT_HIGHLIGHT_CLOSE, DEFAULT_HIGHLIGHT_OPEN};
use crate::marker::DEFAULT_MARKER;
use crate::mode::OutputMode;

/// Playground configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Output mode selected at startup
    pub default_mode: OutputMode,
    /// Start with Python-compatible method calls enabled
    pub py_compat: bool,
    /// Extension of the rendered template's name (`html` turns on auto-escaping)
    pub template_extension: String,
    /// Text prepended to every rendered output
    pub boilerplate: String,
    /// Inject position markers into the HTML preview source
    pub inject_markers: bool,
    pub marker: String,
    /// Tag pair wrapped around the editor selection in the HTML preview
    pub highlight_open: String,
    pub highlight_close: String,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            default_mode: OutputMode::default(),
            py_compat: false,
            template_extension: "html".to_string(),
            boilerplate: DEFAULT_BOILERPLATE.to_string(),
            inject_markers: true,
            marker: DEFAULT_MARKER.to_string(),
            highlight_open: DEFAULT_HIGHLIGHT_OPEN.to_string(),
            highlight_close: DEFAULT_HIGHLIGHT_CLOSE.to_string(),
        }
    }
}

impl PlaygroundConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
