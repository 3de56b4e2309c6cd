use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

use utilkit::strings;

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct StringArgs {
    #[command(subcommand)]
    command: StringCommand,
}

#[derive(Subcommand)]
enum StringCommand {
    /// Convert text to another case
    Convert {
        /// Input text
        input: String,
        /// Target case
        #[arg(long, value_enum)]
        to: Case,
    },
    /// Cut text to a maximum length
    Truncate {
        /// Input text
        input: String,
        /// Maximum length in characters
        #[arg(long)]
        max: usize,
        /// Suffix appended when cut (defaults to config strings.truncate_suffix)
        #[arg(long)]
        suffix: Option<String>,
    },
    /// Pad text to a width
    Pad {
        /// Input text
        input: String,
        /// Target width in characters
        #[arg(long)]
        width: usize,
        /// Padding character
        #[arg(long, default_value_t = ' ')]
        with: char,
        /// Pad on the right instead of the left
        #[arg(long)]
        right: bool,
    },
    /// Reverse text
    Reverse {
        /// Input text
        input: String,
    },
    /// Remove all whitespace
    StripWhitespace {
        /// Input text
        input: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Case {
    Slug,
    Snake,
    Kebab,
    Camel,
    Pascal,
    Title,
    ShoutySnake,
}

impl Case {
    fn apply(self, input: &str) -> String {
        match self {
            Case::Slug => strings::slugify(input),
            Case::Snake => strings::snake_case(input),
            Case::Kebab => strings::kebab_case(input),
            Case::Camel => strings::camel_case(input),
            Case::Pascal => strings::pascal_case(input),
            Case::Title => strings::title_case(input),
            Case::ShoutySnake => strings::shouty_snake_case(input),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StringOutput {
    pub command: &'static str,
    pub input: String,
    pub output: String,
}

pub fn run(args: StringArgs, global: &GlobalArgs) -> CmdResult<StringOutput> {
    let (command, input, output) = match args.command {
        StringCommand::Convert { input, to } => {
            let output = to.apply(&input);
            ("string.convert", input, output)
        }
        StringCommand::Truncate { input, max, suffix } => {
            let suffix = suffix.unwrap_or_else(|| global.defaults.strings.truncate_suffix.clone());
            let output = strings::truncate_with(&input, max, &suffix);
            ("string.truncate", input, output)
        }
        StringCommand::Pad {
            input,
            width,
            with,
            right,
        } => {
            let output = if right {
                strings::pad_right(&input, with, width)
            } else {
                strings::pad_left(&input, with, width)
            };
            ("string.pad", input, output)
        }
        StringCommand::Reverse { input } => {
            let output = strings::reverse(&input);
            ("string.reverse", input, output)
        }
        StringCommand::StripWhitespace { input } => {
            let output = strings::remove_whitespace(&input);
            ("string.strip_whitespace", input, output)
        }
    };

    utilkit::log_debug!("{}: {} -> {}", command, input, output);

    Ok((
        StringOutput {
            command,
            input,
            output,
        },
        0,
    ))
}
