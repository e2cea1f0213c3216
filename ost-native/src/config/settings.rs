//! Settings configuration
//!
//! Engine and logging settings for translation sessions.
//! Default values are defined in `config/default.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use ost_engine::EngineOptions;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default configuration TOML embedded from config/default.toml
const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default.toml");

/// Per-model override file looked up inside the model directory
pub const MODEL_CONFIG_FILE: &str = "translator.toml";

/// Configuration settings for a translation session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Translator options passed to the engine at load time
    pub engine: EngineOptions,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// tracing-subscriber filter directive, used when RUST_LOG is unset
    pub filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("embedded default.toml must be valid")
    }
}

/// Recursively merge `overlay` TOML values on top of `base`.
fn merge_toml(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(key) {
                    merge_toml(base_value, value);
                } else {
                    base_table.insert(key.clone(), value.clone());
                }
            }
        }
        (base, _) => {
            *base = overlay.clone();
        }
    }
}

/// Read and parse one override file.
fn read_layer(path: &Path) -> Result<toml::Value> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge every existing file in `layers` on top of default.toml, in order.
///
/// A layer that cannot be read or parsed is skipped with a warning.
fn load_layers(layers: &[PathBuf]) -> Result<Settings> {
    let mut base: toml::Value = toml::from_str(DEFAULT_CONFIG_TOML)?;
    for path in layers {
        if !path.is_file() {
            debug!("Config layer {:?} not found, skipping", path);
            continue;
        }
        match read_layer(path) {
            Ok(layer) => {
                debug!("Loading config layer {:?}", path);
                merge_toml(&mut base, &layer);
            }
            Err(e) => warn!("Ignoring unreadable config {:?}: {:#}", path, e),
        }
    }
    let settings: Settings = base.try_into()?;
    Ok(settings)
}

/// Get the project directories for ost-native.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "ost", "ost-native")
}

impl Settings {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the user configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load settings for a session on `model_dir`.
    ///
    /// Layers, lowest priority first: embedded defaults, the user config
    /// file, then `translator.toml` in the model directory. Never fails;
    /// invalid configuration falls back to the defaults.
    pub fn load_for_model_dir(model_dir: &Path) -> Self {
        let mut layers = Vec::with_capacity(2);
        match Self::config_file() {
            Some(file) => layers.push(file),
            None => warn!("Could not determine config directory, skipping user config"),
        }
        layers.push(model_dir.join(MODEL_CONFIG_FILE));

        load_layers(&layers).unwrap_or_else(|e| {
            warn!("Invalid configuration, using defaults: {:#}", e);
            Self::default()
        })
    }

    /// Load settings from a specific file, merged on top of defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let layer = read_layer(path)?;
        let mut base: toml::Value = toml::from_str(DEFAULT_CONFIG_TOML)?;
        merge_toml(&mut base, &layer);
        Ok(base.try_into()?)
    }
}
