//! ANSI foreground color codes and helpers.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const RESET: &str = "\x1b[0m";

pub const BLACK: &str = "\x1b[30m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";
pub const WHITE: &str = "\x1b[37m";

pub const BRIGHT_BLACK: &str = "\x1b[90m";
pub const BRIGHT_RED: &str = "\x1b[91m";
pub const BRIGHT_GREEN: &str = "\x1b[92m";
pub const BRIGHT_YELLOW: &str = "\x1b[93m";
pub const BRIGHT_BLUE: &str = "\x1b[94m";
pub const BRIGHT_MAGENTA: &str = "\x1b[95m";
pub const BRIGHT_CYAN: &str = "\x1b[96m";
pub const BRIGHT_WHITE: &str = "\x1b[97m";

// HTTP methods
pub const GET_COLOR: &str = BRIGHT_GREEN;
pub const POST_COLOR: &str = BRIGHT_BLUE;
pub const PUT_COLOR: &str = BRIGHT_YELLOW;
pub const PATCH_COLOR: &str = BRIGHT_MAGENTA;
pub const DELETE_COLOR: &str = BRIGHT_RED;
pub const HEAD_COLOR: &str = CYAN;
pub const OPTIONS_COLOR: &str = WHITE;

// Status
pub const SUCCESS_COLOR: &str = BRIGHT_GREEN;
pub const WARN_COLOR: &str = BRIGHT_YELLOW;
pub const ERROR_COLOR: &str = BRIGHT_RED;
pub const INFO_COLOR: &str = BRIGHT_BLUE;
pub const DEBUG_COLOR: &str = BRIGHT_BLACK;

const NAMED: &[(&str, &str)] = &[
    ("reset", RESET),
    ("black", BLACK),
    ("red", RED),
    ("green", GREEN),
    ("yellow", YELLOW),
    ("blue", BLUE),
    ("magenta", MAGENTA),
    ("cyan", CYAN),
    ("white", WHITE),
    ("bright_black", BRIGHT_BLACK),
    ("bright_red", BRIGHT_RED),
    ("bright_green", BRIGHT_GREEN),
    ("bright_yellow", BRIGHT_YELLOW),
    ("bright_blue", BRIGHT_BLUE),
    ("bright_magenta", BRIGHT_MAGENTA),
    ("bright_cyan", BRIGHT_CYAN),
    ("bright_white", BRIGHT_WHITE),
    ("get", GET_COLOR),
    ("post", POST_COLOR),
    ("put", PUT_COLOR),
    ("patch", PATCH_COLOR),
    ("delete", DELETE_COLOR),
    ("head", HEAD_COLOR),
    ("options", OPTIONS_COLOR),
    ("success", SUCCESS_COLOR),
    ("warn", WARN_COLOR),
    ("error", ERROR_COLOR),
    ("info", INFO_COLOR),
    ("debug", DEBUG_COLOR),
];

static SGR_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("sgr pattern compiles"));

/// Color for an uppercase HTTP method name.
pub fn http_method_color(method: &str) -> Option<&'static str> {
    match method {
        "GET" => Some(GET_COLOR),
        "POST" => Some(POST_COLOR),
        "PUT" => Some(PUT_COLOR),
        "PATCH" => Some(PATCH_COLOR),
        "DELETE" => Some(DELETE_COLOR),
        "HEAD" => Some(HEAD_COLOR),
        "OPTIONS" => Some(OPTIONS_COLOR),
        _ => None,
    }
}

/// Escape code for a color name (`bright_red`) or semantic alias (`post`, `warn`).
pub fn code_for_name(name: &str) -> Option<&'static str> {
    NAMED
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, code)| *code)
}

/// Every name accepted by [`code_for_name`].
pub fn color_names() -> impl Iterator<Item = &'static str> {
    NAMED.iter().map(|(name, _)| *name)
}

/// Wrap `s` in `code` and a trailing reset.
pub fn paint(s: &str, code: &str) -> String {
    format!("{}{}{}", code, s, RESET)
}

/// 256-color palette foreground.
pub fn ansi256(n: u8) -> String {
    format!("\x1b[38;5;{}m", n)
}

/// 24-bit truecolor foreground.
pub fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

/// Remove SGR escape sequences.
pub fn strip_ansi(s: &str) -> String {
    SGR_SEQUENCE.replace_all(s, "").into_owned()
}

/// When colored output should be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ColorMode {
    /// Color when writing to a terminal and `NO_COLOR` is unset or empty.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_tty && crate::env::get("NO_COLOR", "").is_empty(),
        }
    }
}

impl std::str::FromStr for ColorMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(crate::Error::validation_invalid_argument(
                "color",
                format!("Unknown color mode '{}'", s),
                Some(s.to_string()),
                Some(vec![
                    "auto".to_string(),
                    "always".to_string(),
                    "never".to_string(),
                ]),
            )),
        }
    }
}

impl TryFrom<String> for ColorMode {
    type Error = crate::Error;

    fn try_from(s: String) -> crate::Result<Self> {
        s.parse()
    }
}
