use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;

use utilkit::env;

use super::CmdResult;

#[derive(Args)]
pub struct EnvArgs {
    #[command(subcommand)]
    command: EnvCommand,
}

#[derive(Subcommand)]
enum EnvCommand {
    /// Read a variable, falling back to a default
    Get {
        /// Variable name
        key: String,
        /// Value used when the variable is unset or empty
        #[arg(long)]
        default: Option<String>,
        /// Interpret the value as this type
        #[arg(long = "type", value_enum, default_value_t = ValueType::String)]
        value_type: ValueType,
        /// Fail with exit code 4 when the variable is unset or empty
        #[arg(long)]
        required: bool,
    },
    /// Check whether a variable is set
    Exists {
        /// Variable name
        key: String,
    },
    /// Split a variable into a list
    List {
        /// Variable name
        key: String,
        /// Item separator
        #[arg(long, default_value = ",")]
        sep: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ValueType {
    String,
    Int,
    Float,
    Bool,
}

#[derive(Debug, Serialize)]
pub struct EnvOutput {
    pub command: &'static str,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<String>>,
}

pub fn run_json(args: EnvArgs) -> CmdResult<EnvOutput> {
    match args.command {
        EnvCommand::Get {
            key,
            default,
            value_type,
            required,
        } => get(key, default, value_type, required),
        EnvCommand::Exists { key } => {
            let exists = env::exists(&key);
            Ok((
                EnvOutput {
                    command: "env.exists",
                    key,
                    value: None,
                    exists: Some(exists),
                    items: None,
                },
                0,
            ))
        }
        EnvCommand::List { key, sep } => {
            let items = env::get_list(&key, &sep);
            Ok((
                EnvOutput {
                    command: "env.list",
                    key,
                    value: None,
                    exists: None,
                    items: Some(items),
                },
                0,
            ))
        }
    }
}

fn get(
    key: String,
    default: Option<String>,
    value_type: ValueType,
    required: bool,
) -> CmdResult<EnvOutput> {
    if required {
        env::get_required(&key)?;
    }

    let fallback = default.unwrap_or_default();
    let value = match value_type {
        ValueType::String => Value::String(env::get(&key, &fallback)),
        ValueType::Int => {
            let fallback = parse_fallback::<i64>(&fallback, "int")?;
            Value::from(env::get_parsed(&key, fallback))
        }
        ValueType::Float => {
            let fallback = parse_fallback::<f64>(&fallback, "float")?;
            Value::from(env::get_parsed(&key, fallback))
        }
        ValueType::Bool => {
            let fallback = if fallback.is_empty() {
                false
            } else {
                env::parse_bool(&fallback).ok_or_else(|| {
                    invalid_default(&fallback, "bool", "expected true/false/1/0/yes/no/on/off")
                })?
            };
            Value::Bool(env::get_bool(&key, fallback))
        }
    };

    Ok((
        EnvOutput {
            command: "env.get",
            key,
            value: Some(value),
            exists: None,
            items: None,
        },
        0,
    ))
}

fn parse_fallback<T: std::str::FromStr + Default>(raw: &str, kind: &str) -> utilkit::Result<T>
where
    T::Err: std::fmt::Display,
{
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse::<T>()
        .map_err(|e| invalid_default(raw, kind, &e.to_string()))
}

fn invalid_default(raw: &str, kind: &str, problem: &str) -> utilkit::Error {
    utilkit::Error::validation_invalid_argument(
        "default",
        format!("Default is not a valid {}: {}", kind, problem),
        Some(raw.to_string()),
        None,
    )
}
