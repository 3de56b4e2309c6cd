use chrono::{DateTime, Utc};
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

use utilkit::time::{self, DateTimeComponents};
use utilkit::Error;

use super::CmdResult;

#[derive(Args)]
pub struct TimeArgs {
    #[command(subcommand)]
    command: TimeCommand,
}

#[derive(Subcommand)]
enum TimeCommand {
    /// Current time
    Now {
        /// Use UTC instead of local time
        #[arg(long)]
        utc: bool,
        /// strftime layout (defaults to RFC 3339)
        #[arg(long)]
        format: Option<String>,
    },
    /// Parse a time string with a strftime layout
    Parse {
        /// Value to parse
        value: String,
        /// strftime layout, e.g. `%Y-%m-%d %H:%M:%S`
        #[arg(long, default_value = time::DATETIME_FORMAT)]
        layout: String,
    },
    /// Render a number of seconds as `1w 2d 3h 4m 5s`
    Duration {
        /// Seconds
        #[arg(allow_hyphen_values = true)]
        seconds: f64,
    },
    /// Convert a number of seconds into another unit
    Convert {
        /// Seconds
        #[arg(allow_hyphen_values = true)]
        seconds: f64,
        /// Target unit
        #[arg(long, value_enum)]
        to: Unit,
    },
    /// Convert a Unix timestamp to a date-time
    FromUnix {
        /// Seconds since the Unix epoch
        #[arg(allow_hyphen_values = true)]
        seconds: i64,
    },
    /// Seconds between two RFC 3339 times
    Diff {
        /// First time
        from: String,
        /// Second time
        to: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Unit {
    Minutes,
    Hours,
    Days,
    Weeks,
}

#[derive(Debug, Serialize)]
pub struct TimeOutput {
    pub command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfc3339: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unix: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<DateTimeComponents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl TimeOutput {
    fn new(command: &'static str) -> Self {
        Self {
            command,
            formatted: None,
            rfc3339: None,
            unix: None,
            components: None,
            value: None,
        }
    }

    fn at(command: &'static str, t: &DateTime<Utc>) -> Self {
        Self {
            rfc3339: Some(time::format_rfc3339(t)),
            unix: Some(time::to_unix_seconds(t)),
            components: Some(time::components(t)),
            ..Self::new(command)
        }
    }
}

pub fn run_json(args: TimeArgs) -> CmdResult<TimeOutput> {
    let out = match args.command {
        TimeCommand::Now { utc, format } => now(utc, format.as_deref())?,
        TimeCommand::Parse { value, layout } => {
            let parsed = time::parse(&layout, &value)?;
            TimeOutput::at("time.parse", &parsed)
        }
        TimeCommand::Duration { seconds } => TimeOutput {
            formatted: Some(time::format_duration(seconds)),
            value: Some(seconds),
            ..TimeOutput::new("time.duration")
        },
        TimeCommand::Convert { seconds, to } => {
            let value = match to {
                Unit::Minutes => time::seconds_to_minutes(seconds),
                Unit::Hours => time::seconds_to_hours(seconds),
                Unit::Days => time::seconds_to_days(seconds),
                Unit::Weeks => time::seconds_to_weeks(seconds),
            };
            TimeOutput {
                value: Some(value),
                ..TimeOutput::new("time.convert")
            }
        }
        TimeCommand::FromUnix { seconds } => {
            let t = time::from_unix(seconds).ok_or_else(|| {
                Error::validation_invalid_argument(
                    "seconds",
                    "Timestamp is out of range",
                    Some(seconds.to_string()),
                    None,
                )
            })?;
            TimeOutput::at("time.from_unix", &t)
        }
        TimeCommand::Diff { from, to } => {
            let from = parse_rfc3339(&from)?;
            let to = parse_rfc3339(&to)?;
            TimeOutput {
                value: Some(time::diff_seconds(&from, &to)),
                ..TimeOutput::new("time.diff")
            }
        }
    };

    Ok((out, 0))
}

fn now(utc: bool, format: Option<&str>) -> utilkit::Result<TimeOutput> {
    let t = time::now_utc();
    let formatted = match (utc, format) {
        (true, Some(layout)) => time::format_custom(&t, layout)?,
        (true, None) => time::format_rfc3339(&t),
        (false, Some(layout)) => time::format_custom(&t.with_timezone(&chrono::Local), layout)?,
        (false, None) => time::format_rfc3339(&t.with_timezone(&chrono::Local)),
    };

    Ok(TimeOutput {
        formatted: Some(formatted),
        ..TimeOutput::at("time.now", &t)
    })
}

fn parse_rfc3339(value: &str) -> utilkit::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::time_parse_failed("rfc3339", value, e.to_string()))
}
