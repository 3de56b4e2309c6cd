use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use utilkit::color::ColorMode;
use utilkit::defaults::LoggerConfig;
use utilkit::logger::{self, Level, LogTarget, Logger};
use utilkit::{log_debug, log_error, log_info, log_warn};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

// The process-wide logger can only be installed once, so the whole flow
// lives in a single test.
#[test]
fn macros_route_through_installed_logger() {
    let buf = Capture::default();
    assert!(logger::init(Logger::new(buf.clone())));
    assert!(!logger::init(Logger::new(Capture::default())));
    assert_eq!(logger::level(), Level::Info);

    log_info!("hi {}", 1);
    log_debug!("hidden at info");
    let lines = buf.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("[INFO] [global_logger.rs] hi 1"), "{}", lines[0]);

    logger::set_level(Level::Warn);
    assert_eq!(logger::level(), Level::Warn);
    log_info!("filtered");
    log_warn!("kept");
    let lines = buf.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("[WARN] [global_logger.rs] kept"));

    let err = log_error!("upload {} failed", "a.txt");
    assert_eq!(err.code.as_str(), "log.reported");
    assert_eq!(err.message, "upload a.txt failed");
    assert!(buf.lines()[2].contains("[ERROR] [global_logger.rs] upload a.txt failed"));

    logger::info(format_args!("free function"));
    assert_eq!(buf.lines().len(), 3);
    logger::set_level(Level::Debug);
    logger::debug(format_args!("free function"));
    assert!(buf.lines()[3].contains("[DEBUG] [global_logger.rs] free function"));
}

#[test]
fn from_config_applies_level_threshold() {
    let config = LoggerConfig {
        level: Level::Error,
        color: ColorMode::Never,
        target: LogTarget::Stderr,
    };

    let logger = Logger::from_config(&config);
    assert_eq!(logger.level(), Level::Error);
    assert!(!logger.enabled(Level::Warn));
    assert!(logger.enabled(Level::Error));
}
