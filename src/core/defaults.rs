use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::color::ColorMode;
use crate::logger::{Level, LogTarget};
use crate::paths;

/// Root configuration structure for utilkit.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UtilkitConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via utilkit.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "default_logger")]
    pub logger: LoggerConfig,

    #[serde(default = "default_json")]
    pub json: JsonConfig,

    #[serde(default = "default_strings")]
    pub strings: StringsConfig,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            logger: default_logger(),
            json: default_json(),
            strings: default_strings(),
        }
    }
}

/// Logger threshold, colorization and output stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default)]
    pub level: Level,

    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_log_target")]
    pub target: LogTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonConfig {
    #[serde(default = "default_json_indent")]
    pub indent: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringsConfig {
    #[serde(default = "default_truncate_suffix")]
    pub truncate_suffix: String,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_logger() -> LoggerConfig {
    LoggerConfig {
        level: Level::default(),
        color: ColorMode::default(),
        target: default_log_target(),
    }
}

// stderr keeps the CLI's JSON envelope on stdout parseable.
fn default_log_target() -> LogTarget {
    LogTarget::Stderr
}

fn default_json() -> JsonConfig {
    JsonConfig {
        indent: default_json_indent(),
    }
}

fn default_json_indent() -> usize {
    2
}

fn default_strings() -> StringsConfig {
    StringsConfig {
        truncate_suffix: default_truncate_suffix(),
    }
}

fn default_truncate_suffix() -> String {
    "...".to_string()
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load defaults, merging file config with built-in defaults.
/// If utilkit.json is missing or invalid, silently returns built-in defaults.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load the full utilkit.json config, falling back to defaults on any error.
pub fn load_config() -> UtilkitConfig {
    paths::utilkit_json()
        .and_then(|path| load_config_from(&path))
        .unwrap_or_default()
}

/// Load config from an explicit file path.
pub fn load_config_from(path: &Path) -> crate::Result<UtilkitConfig> {
    if !path.exists() {
        return Err(crate::Error::other(format!(
            "{} not found",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    let config: UtilkitConfig = serde_json::from_str(&content)
        .map_err(|e| crate::Error::config_invalid_json(path.display().to_string(), e))?;

    validate(&config)?;

    Ok(config)
}

fn validate(config: &UtilkitConfig) -> crate::Result<()> {
    if config.defaults.json.indent > 16 {
        return Err(crate::Error::config_invalid_value(
            "defaults.json.indent",
            Some(config.defaults.json.indent.to_string()),
            "indent must be between 0 and 16",
        ));
    }
    Ok(())
}

/// Save config to utilkit.json file (creates if missing).
pub fn save_config(config: &UtilkitConfig) -> crate::Result<()> {
    let path = paths::utilkit_json()?;
    save_config_to(&path, config)
}

/// Save config to an explicit file path, creating parent directories.
pub fn save_config_to(path: &Path, config: &UtilkitConfig) -> crate::Result<()> {
    validate(config)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
        })?;
    }

    let content = serde_json::to_string_pretty(config).map_err(|e| {
        crate::Error::validation_invalid_json(e, Some("serialize utilkit.json".to_string()))
    })?;

    fs::write(path, content).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("write {}", path.display())))
    })?;

    Ok(())
}

/// Check if utilkit.json file exists
pub fn config_exists() -> bool {
    paths::utilkit_json()
        .map(|p| p.exists())
        .unwrap_or(false)
}

/// Delete utilkit.json file (reset to defaults)
pub fn reset_config() -> crate::Result<bool> {
    let path = paths::utilkit_json()?;

    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("delete {}", path.display())))
        })?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Get the path to utilkit.json (for display purposes)
pub fn config_path() -> crate::Result<String> {
    Ok(paths::utilkit_json()?.display().to_string())
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}
