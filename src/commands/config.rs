use clap::{Args, Subcommand};
use serde::Serialize;

use utilkit::defaults::{self, Defaults, UtilkitConfig};
use utilkit::Error;

use super::CmdResult;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (merged defaults + file)
    Show {
        /// Show only built-in defaults (ignore utilkit.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Set a configuration value
    Set {
        /// Dotted key (logger.level, logger.color, logger.target, json.indent, strings.truncate_suffix)
        key: String,
        /// New value
        value: String,
    },
    /// Reset configuration to built-in defaults (deletes utilkit.json)
    Reset,
    /// Show the path to utilkit.json
    Path,
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<UtilkitConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    defaults: Option<Defaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted: Option<bool>,
}

impl ConfigOutput {
    fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            config: None,
            defaults: None,
            path: None,
            exists: None,
            key: None,
            deleted: None,
        }
    }
}

pub fn run_json(args: ConfigArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show { builtin } => show(builtin),
        ConfigCommand::Set { key, value } => set(&key, &value),
        ConfigCommand::Reset => reset(),
        ConfigCommand::Path => path(),
    }
}

fn show(builtin: bool) -> CmdResult<ConfigOutput> {
    let out = if builtin {
        ConfigOutput {
            defaults: Some(defaults::builtin_defaults()),
            ..ConfigOutput::new("config.show")
        }
    } else {
        ConfigOutput {
            config: Some(defaults::load_config()),
            ..ConfigOutput::new("config.show")
        }
    };
    Ok((out, 0))
}

fn set(key: &str, value: &str) -> CmdResult<ConfigOutput> {
    let mut config = defaults::load_config();
    apply(&mut config.defaults, key, value)?;
    defaults::save_config(&config)?;

    utilkit::log_debug!("config: set {} = {}", key, value);

    Ok((
        ConfigOutput {
            config: Some(config),
            key: Some(key.to_string()),
            ..ConfigOutput::new("config.set")
        },
        0,
    ))
}

pub(crate) fn apply(defaults: &mut Defaults, key: &str, value: &str) -> utilkit::Result<()> {
    let invalid = |problem: String| {
        Error::config_invalid_value(key.to_string(), Some(value.to_string()), problem)
    };

    match key {
        "logger.level" => {
            defaults.logger.level = value.parse().map_err(|e: Error| invalid(problem_of(&e)))?;
        }
        "logger.color" => {
            defaults.logger.color = value.parse().map_err(|e: Error| invalid(problem_of(&e)))?;
        }
        "logger.target" => {
            defaults.logger.target = value.parse().map_err(|e: Error| invalid(problem_of(&e)))?;
        }
        "json.indent" => {
            let indent: usize = value
                .parse()
                .map_err(|_| invalid("Expected a non-negative integer".to_string()))?;
            if indent > 16 {
                return Err(invalid("Indent must be at most 16".to_string()));
            }
            defaults.json.indent = indent;
        }
        "strings.truncate_suffix" => {
            defaults.strings.truncate_suffix = value.to_string();
        }
        _ => {
            return Err(Error::validation_invalid_argument(
                "key",
                format!("Unknown configuration key '{}'", key),
                Some(key.to_string()),
                Some(vec![
                    "logger.level".to_string(),
                    "logger.color".to_string(),
                    "logger.target".to_string(),
                    "json.indent".to_string(),
                    "strings.truncate_suffix".to_string(),
                ]),
            ));
        }
    }

    Ok(())
}

fn problem_of(err: &Error) -> String {
    err.details
        .get("problem")
        .and_then(|p| p.as_str())
        .unwrap_or(&err.message)
        .to_string()
}

fn reset() -> CmdResult<ConfigOutput> {
    let deleted = defaults::reset_config()?;

    Ok((
        ConfigOutput {
            defaults: Some(defaults::builtin_defaults()),
            deleted: Some(deleted),
            ..ConfigOutput::new("config.reset")
        },
        0,
    ))
}

fn path() -> CmdResult<ConfigOutput> {
    let path = defaults::config_path()?;
    let exists = defaults::config_exists();

    Ok((
        ConfigOutput {
            path: Some(path),
            exists: Some(exists),
            ..ConfigOutput::new("config.path")
        },
        0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use utilkit::color::ColorMode;
    use utilkit::logger::{Level, LogTarget};

    #[test]
    fn apply_updates_known_keys() {
        let mut d = defaults::builtin_defaults();
        apply(&mut d, "logger.level", "warning").unwrap();
        apply(&mut d, "logger.color", "never").unwrap();
        apply(&mut d, "logger.target", "stdout").unwrap();
        apply(&mut d, "json.indent", "4").unwrap();
        apply(&mut d, "strings.truncate_suffix", "…").unwrap();

        assert_eq!(d.logger.level, Level::Warn);
        assert_eq!(d.logger.color, ColorMode::Never);
        assert_eq!(d.logger.target, LogTarget::Stdout);
        assert_eq!(d.json.indent, 4);
        assert_eq!(d.strings.truncate_suffix, "…");
    }

    #[test]
    fn apply_rejects_bad_values() {
        let mut d = defaults::builtin_defaults();
        let err = apply(&mut d, "json.indent", "32").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");

        let err = apply(&mut d, "logger.level", "loud").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["key"], "logger.level");
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut d = defaults::builtin_defaults();
        let err = apply(&mut d, "logger.format", "x").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }
}
