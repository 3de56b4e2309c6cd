use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

use utilkit::color::{self, ColorMode};
use utilkit::Error;

use super::{CmdResult, GlobalArgs};
use crate::tty;

#[derive(Args)]
pub struct ColorArgs {
    #[command(subcommand)]
    command: ColorCommand,
}

#[derive(Subcommand)]
enum ColorCommand {
    /// Print every named color, each painted in itself
    List {
        #[arg(long, value_enum, default_value_t = When::Auto)]
        color: When,
    },
    /// Wrap text in a color and print it
    Paint {
        /// Text to paint
        text: String,
        /// Color name (see `color list`)
        #[arg(long, conflicts_with_all = ["ansi256", "rgb"])]
        name: Option<String>,
        /// 256-color palette index
        #[arg(long, conflicts_with = "rgb")]
        ansi256: Option<u8>,
        /// 24-bit color as `r,g,b`
        #[arg(long)]
        rgb: Option<String>,
        #[arg(long, value_enum, default_value_t = When::Auto)]
        color: When,
    },
    /// Show the escape sequence for a named color
    Code {
        /// Color name or HTTP method
        name: String,
    },
    /// Remove ANSI color sequences from text
    Strip {
        /// Text containing escape sequences
        text: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum When {
    Auto,
    Always,
    Never,
}

impl From<When> for ColorMode {
    fn from(when: When) -> Self {
        match when {
            When::Auto => ColorMode::Auto,
            When::Always => ColorMode::Always,
            When::Never => ColorMode::Never,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ColorOutput {
    pub command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Whether this invocation prints terminal text instead of a JSON envelope.
pub fn is_raw(args: &ColorArgs) -> bool {
    matches!(
        args.command,
        ColorCommand::List { .. } | ColorCommand::Paint { .. }
    )
}

pub fn run(args: ColorArgs, _global: &GlobalArgs) -> CmdResult<ColorOutput> {
    match args.command {
        ColorCommand::Code { name } => {
            let code = lookup(&name)?;
            Ok((
                ColorOutput {
                    command: "color.code",
                    name: Some(name),
                    code: Some(code.to_string()),
                    output: None,
                },
                0,
            ))
        }
        ColorCommand::Strip { text } => Ok((
            ColorOutput {
                command: "color.strip",
                name: None,
                code: None,
                output: Some(color::strip_ansi(&text)),
            },
            0,
        )),
        ColorCommand::List { .. } | ColorCommand::Paint { .. } => {
            Err(Error::validation_invalid_argument(
                "output_mode",
                "Command only supports raw output",
                None,
                None,
            ))
        }
    }
}

pub fn run_raw(args: ColorArgs, _global: &GlobalArgs) -> utilkit::Result<(String, i32)> {
    match args.command {
        ColorCommand::List { color: when } => {
            let enabled = ColorMode::from(when).enabled(tty::is_stdout_tty());
            let mut out = String::new();
            for name in color::color_names() {
                let line = match color::code_for_name(name) {
                    Some(code) if enabled => color::paint(name, code),
                    _ => name.to_string(),
                };
                out.push_str(&line);
                out.push('\n');
            }
            Ok((out, 0))
        }
        ColorCommand::Paint {
            text,
            name,
            ansi256,
            rgb,
            color: when,
        } => {
            let code = match (name, ansi256, rgb) {
                (Some(name), _, _) => lookup(&name)?.to_string(),
                (None, Some(n), _) => color::ansi256(n),
                (None, None, Some(spec)) => parse_rgb(&spec)?,
                (None, None, None) => {
                    return Err(Error::validation_missing_argument(vec![
                        "--name".to_string(),
                        "--ansi256".to_string(),
                        "--rgb".to_string(),
                    ]))
                }
            };
            let enabled = ColorMode::from(when).enabled(tty::is_stdout_tty());
            let painted = if enabled {
                color::paint(&text, &code)
            } else {
                text
            };
            Ok((format!("{}\n", painted), 0))
        }
        ColorCommand::Code { .. } | ColorCommand::Strip { .. } => {
            Err(Error::validation_invalid_argument(
                "output_mode",
                "Command does not support raw output",
                None,
                None,
            ))
        }
    }
}

fn lookup(name: &str) -> utilkit::Result<&'static str> {
    color::code_for_name(name)
        .or_else(|| color::http_method_color(&name.to_uppercase()))
        .ok_or_else(|| {
            Error::validation_invalid_argument(
                "name",
                format!("Unknown color '{}'", name),
                Some(name.to_string()),
                Some(color::color_names().map(str::to_string).collect()),
            )
        })
}

fn parse_rgb(spec: &str) -> utilkit::Result<String> {
    let parts: Vec<u8> = spec
        .split(',')
        .map(|p| p.trim().parse::<u8>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| invalid_rgb(spec))?;

    match parts.as_slice() {
        [r, g, b] => Ok(color::rgb(*r, *g, *b)),
        _ => Err(invalid_rgb(spec)),
    }
}

fn invalid_rgb(spec: &str) -> Error {
    Error::validation_invalid_argument(
        "rgb",
        "Expected three comma-separated values from 0 to 255",
        Some(spec.to_string()),
        None,
    )
}
