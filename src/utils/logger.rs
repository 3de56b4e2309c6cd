//! Leveled, colored line logger.
//!
//! Lines look like:
//!
//! ```text
//! [2024-03-09 07:05:03] [INFO] [main.rs] listening on 8080
//! ```
//!
//! with the tag wrapped in its ANSI color when color is enabled. The source
//! file is the caller's, resolved through `#[track_caller]`, so the macros and
//! free functions report where they were invoked rather than this module.

use crate::color::{self, ColorMode};
use crate::defaults::LoggerConfig;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::panic::Location;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Debug,
            1 => Level::Info,
            2 => Level::Warn,
            _ => Level::Error,
        }
    }
}

impl std::str::FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            _ => Err(Error::validation_invalid_argument(
                "level",
                format!("Unknown log level '{}'", s),
                Some(s.to_string()),
                Some(vec![
                    "debug".to_string(),
                    "info".to_string(),
                    "warn".to_string(),
                    "error".to_string(),
                ]),
            )),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = Error;

    fn try_from(s: String) -> crate::Result<Self> {
        s.parse()
    }
}

/// Stream a [`Logger`] built from config writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LogTarget {
    Stdout,
    Stderr,
}

impl std::str::FromStr for LogTarget {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "stdout" => Ok(LogTarget::Stdout),
            "stderr" => Ok(LogTarget::Stderr),
            _ => Err(Error::validation_invalid_argument(
                "target",
                format!("Unknown log target '{}'", s),
                Some(s.to_string()),
                Some(vec!["stdout".to_string(), "stderr".to_string()]),
            )),
        }
    }
}

impl TryFrom<String> for LogTarget {
    type Error = Error;

    fn try_from(s: String) -> crate::Result<Self> {
        s.parse()
    }
}

/// Name and color printed in the bracketed tag of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogTag {
    pub name: &'static str,
    pub color: &'static str,
}

pub const DEBUG_TAG: LogTag = LogTag {
    name: "DEBUG",
    color: color::DEBUG_COLOR,
};
pub const INFO_TAG: LogTag = LogTag {
    name: "INFO",
    color: color::INFO_COLOR,
};
pub const WARN_TAG: LogTag = LogTag {
    name: "WARN",
    color: color::WARN_COLOR,
};
pub const ERROR_TAG: LogTag = LogTag {
    name: "ERROR",
    color: color::ERROR_COLOR,
};
pub const FATAL_TAG: LogTag = LogTag {
    name: "FATAL",
    color: color::ERROR_COLOR,
};

pub struct Logger {
    level: AtomicU8,
    color: bool,
    out: Mutex<Box<dyn Write + Send>>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Logger at `Info` without color, writing to `writer`.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            level: AtomicU8::new(Level::Info as u8),
            color: false,
            out: Mutex::new(Box::new(writer)),
        }
    }

    /// Logger writing to stdout, colored when stdout is a terminal.
    pub fn stdout() -> Self {
        Self::new(io::stdout()).with_color(ColorMode::Auto.enabled(io::stdout().is_terminal()))
    }

    /// Logger writing to stderr, colored when stderr is a terminal.
    pub fn stderr() -> Self {
        Self::new(io::stderr()).with_color(ColorMode::Auto.enabled(io::stderr().is_terminal()))
    }

    pub fn from_config(config: &LoggerConfig) -> Self {
        let (logger, is_tty) = match config.target {
            LogTarget::Stdout => (Self::new(io::stdout()), io::stdout().is_terminal()),
            LogTarget::Stderr => (Self::new(io::stderr()), io::stderr().is_terminal()),
        };
        logger
            .with_level(config.level)
            .with_color(config.color.enabled(is_tty))
    }

    pub fn with_level(self, level: Level) -> Self {
        self.set_level(level);
        self
    }

    pub fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::Debug) {
            self.emit(&DEBUG_TAG, args);
        }
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::Info) {
            self.emit(&INFO_TAG, args);
        }
    }

    #[track_caller]
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::Warn) {
            self.emit(&WARN_TAG, args);
        }
    }

    /// Log at ERROR (when enabled) and hand the message back as an error.
    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) -> Error {
        let message = args.to_string();
        if self.enabled(Level::Error) {
            self.emit(&ERROR_TAG, format_args!("{}", message));
        }
        Error::log_reported(message)
    }

    /// Log at FATAL regardless of level, then exit with status 1.
    #[track_caller]
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit(&FATAL_TAG, args);
        std::process::exit(1)
    }

    #[track_caller]
    fn emit(&self, tag: &LogTag, args: fmt::Arguments<'_>) {
        let file = caller_file(Location::caller());
        let timestamp = crate::time::format_datetime(&crate::time::now_local());
        let line = self.render(&timestamp, tag, file, args);

        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // A logger has nowhere to report its own write failures.
        let _ = writeln!(out, "{}", line);
        let _ = out.flush();
    }

    fn render(&self, timestamp: &str, tag: &LogTag, file: &str, args: fmt::Arguments<'_>) -> String {
        if self.color {
            format!(
                "[{}] {}[{}]{} [{}] {}",
                timestamp,
                tag.color,
                tag.name,
                color::RESET,
                file,
                args
            )
        } else {
            format!("[{}] [{}] [{}] {}", timestamp, tag.name, file, args)
        }
    }
}

fn caller_file(location: &'static Location<'static>) -> &'static str {
    let file = location.file();
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("???")
}

// =============================================================================
// Process-wide logger
// =============================================================================

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Install the process-wide logger. Returns false if one was already installed
/// (including the stdout default created by an earlier log call).
pub fn init(logger: Logger) -> bool {
    GLOBAL.set(logger).is_ok()
}

/// The process-wide logger, defaulting to [`Logger::stdout`].
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(Logger::stdout)
}

pub fn set_level(level: Level) {
    global().set_level(level);
}

pub fn level() -> Level {
    global().level()
}

#[track_caller]
pub fn debug(args: fmt::Arguments<'_>) {
    global().debug(args);
}

#[track_caller]
pub fn info(args: fmt::Arguments<'_>) {
    global().info(args);
}

#[track_caller]
pub fn warn(args: fmt::Arguments<'_>) {
    global().warn(args);
}

#[track_caller]
pub fn error(args: fmt::Arguments<'_>) -> Error {
    global().error(args)
}

#[track_caller]
pub fn fatal(args: fmt::Arguments<'_>) -> ! {
    global().fatal(args)
}

/// Log at DEBUG through the process-wide logger.
///
/// ```ignore
/// log_debug!("cache miss for {}", key);
/// ```
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logger::debug(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logger::info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logger::warn(format_args!($($arg)*))
    };
}

/// Log at ERROR and evaluate to the `Error` carrying the message.
///
/// ```ignore
/// return Err(log_error!("upload failed after {} attempts", attempts));
/// ```
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logger::error(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {
        $crate::logger::fatal(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    #[test]
    fn levels_are_ordered() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warn < Level::Error);
        assert_eq!(Level::default(), Level::Info);
        assert_eq!("WARNING".parse::<Level>().unwrap(), Level::Warn);
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn plain_line_format() {
        let buf = SharedBuf::default();
        let logger = Logger::new(buf.clone());
        logger.info(format_args!("listening on {}", 8080));

        let lines = buf.lines();
        assert_eq!(lines.len(), 1);
        let line = &lines[0];
        assert!(line.starts_with('['));
        assert!(line.ends_with("[INFO] [logger.rs] listening on 8080"), "{}", line);
        // "[YYYY-MM-DD HH:MM:SS]" prefix
        assert_eq!(&line[20..22], "] ");
    }

    #[test]
    fn colored_tag_uses_level_color() {
        let buf = SharedBuf::default();
        let logger = Logger::new(buf.clone()).with_color(true);
        logger.warn(format_args!("careful"));

        let line = &buf.lines()[0];
        assert!(line.contains("\x1b[93m[WARN]\x1b[0m"), "{:?}", line);
        assert!(color::strip_ansi(line).ends_with("[WARN] [logger.rs] careful"));
    }

    #[test]
    fn threshold_filters_lower_levels() {
        let buf = SharedBuf::default();
        let logger = Logger::new(buf.clone()).with_level(Level::Warn);
        logger.debug(format_args!("hidden"));
        logger.info(format_args!("hidden"));
        logger.warn(format_args!("shown"));

        let lines = buf.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("shown"));

        logger.set_level(Level::Debug);
        logger.debug(format_args!("now visible"));
        assert_eq!(buf.lines().len(), 2);
    }

    #[test]
    fn error_logs_and_returns_reported_error() {
        let buf = SharedBuf::default();
        let logger = Logger::new(buf.clone());

        let err = logger.error(format_args!("failed: {}", "disk"));
        assert_eq!(err.message, "failed: disk");
        assert_eq!(err.code.as_str(), "log.reported");
        assert!(buf.lines()[0].contains("[ERROR]"));

        logger.set_level(Level::Error);
        let _ = logger.error(format_args!("again"));
        assert_eq!(buf.lines().len(), 2);
    }

    #[test]
    fn concurrent_writers_never_interleave() {
        let buf = SharedBuf::default();
        let logger = Arc::new(Logger::new(buf.clone()));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        logger.info(format_args!("thread {} line {}", t, i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = buf.lines();
        assert_eq!(lines.len(), 400);
        assert!(lines.iter().all(|l| l.contains("[INFO] [logger.rs] thread ")));
    }

    #[test]
    fn caller_file_is_basename() {
        let here = Location::caller();
        assert_eq!(caller_file(here), "logger.rs");
    }
}
