use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;

use utilkit::json;
use utilkit::Error;

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct JsonArgs {
    #[command(subcommand)]
    command: JsonCommand,
}

#[derive(Subcommand)]
enum JsonCommand {
    /// Re-indent a document
    Pretty {
        /// JSON input: literal, `@file`, or `-` for stdin
        input: String,
        /// Spaces per level (defaults to config json.indent)
        #[arg(long)]
        indent: Option<usize>,
    },
    /// Remove insignificant whitespace
    Compact {
        /// JSON input: literal, `@file`, or `-` for stdin
        input: String,
    },
    /// Check whether input is valid JSON
    Validate {
        /// JSON input: literal, `@file`, or `-` for stdin
        input: String,
    },
    /// Compare two documents structurally
    Equal {
        /// First JSON input
        left: String,
        /// Second JSON input
        right: String,
    },
    /// Strip `//` and `/* */` comments
    StripComments {
        /// Input text: literal, `@file`, or `-` for stdin
        input: String,
    },
    /// Append a JSON value to an array
    Append {
        /// JSON array input
        array: String,
        /// JSON value to append
        item: String,
    },
    /// Remove an array element by index
    Remove {
        /// JSON array input
        array: String,
        /// Zero-based index
        index: usize,
    },
    /// List the keys of an object
    Keys {
        /// JSON object input
        input: String,
    },
}

#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
}

impl JsonOutput {
    fn new(command: &'static str) -> Self {
        Self {
            command,
            output: None,
            valid: None,
            equal: None,
            keys: None,
        }
    }

    fn with_output(command: &'static str, output: String) -> Self {
        Self {
            output: Some(output),
            ..Self::new(command)
        }
    }
}

pub fn run(args: JsonArgs, global: &GlobalArgs) -> CmdResult<JsonOutput> {
    let out = match args.command {
        JsonCommand::Pretty { input, indent } => {
            let text = read_valid(&input)?;
            let indent = indent.unwrap_or(global.defaults.json.indent);
            JsonOutput::with_output("json.pretty", json::pretty_with_indent(&text, indent))
        }
        JsonCommand::Compact { input } => {
            let text = read_valid(&input)?;
            JsonOutput::with_output("json.compact", json::compact(&text))
        }
        JsonCommand::Validate { input } => {
            let text = json::read_json_spec_to_string(&input)?;
            JsonOutput {
                valid: Some(json::is_valid(&text)),
                ..JsonOutput::new("json.validate")
            }
        }
        JsonCommand::Equal { left, right } => {
            let left = json::read_json_spec_to_string(&left)?;
            let right = json::read_json_spec_to_string(&right)?;
            JsonOutput {
                equal: Some(json::equal(&left, &right)),
                ..JsonOutput::new("json.equal")
            }
        }
        JsonCommand::StripComments { input } => {
            let text = json::read_json_spec_to_string(&input)?;
            JsonOutput::with_output("json.strip_comments", json::strip_comments(&text))
        }
        JsonCommand::Append { array, item } => {
            let array = read_array(&array)?;
            let item = json::read_json_spec_to_string(&item)?;
            let item: Value = json::from_str(&item)?;
            JsonOutput::with_output("json.append", json::append(&array, &item))
        }
        JsonCommand::Remove { array, index } => {
            let array = read_array(&array)?;
            JsonOutput::with_output("json.remove", json::remove(&array, index))
        }
        JsonCommand::Keys { input } => {
            let text = read_valid(&input)?;
            let object = json::to_object(&text).ok_or_else(|| {
                Error::validation_invalid_argument(
                    "input",
                    "Input is not a JSON object",
                    None,
                    None,
                )
            })?;
            JsonOutput {
                keys: Some(object.keys().cloned().collect()),
                ..JsonOutput::new("json.keys")
            }
        }
    };

    Ok((out, 0))
}

fn read_valid(spec: &str) -> utilkit::Result<String> {
    let text = json::read_json_spec_to_string(spec)?;
    json::from_str::<serde::de::IgnoredAny>(&text)?;
    Ok(text)
}

fn read_array(spec: &str) -> utilkit::Result<String> {
    let text = json::read_json_spec_to_string(spec)?;
    let value: Value = json::from_str(&text)?;
    if !value.is_array() {
        return Err(Error::validation_invalid_argument(
            "array",
            "Input is not a JSON array",
            None,
            None,
        ));
    }
    Ok(text)
}
