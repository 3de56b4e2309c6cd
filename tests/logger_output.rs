use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use utilkit::color;
use utilkit::logger::{Level, Logger};

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
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn plain_lines_name_the_calling_file() {
    let buf = Capture::default();
    let logger = Logger::new(buf.clone());

    logger.info(format_args!("listening on {}", 8080));

    let text = buf.text();
    assert!(text.ends_with("[INFO] [logger_output.rs] listening on 8080\n"), "{}", text);
    assert!(text.starts_with('['));
    assert!(!text.contains('\x1b'));
}

#[test]
fn colored_tag_is_wrapped_and_reset() {
    let buf = Capture::default();
    let logger = Logger::new(buf.clone()).with_color(true);

    logger.warn(format_args!("disk almost full"));

    let text = buf.text();
    let expected = format!("{}[WARN]{}", color::WARN_COLOR, color::RESET);
    assert!(text.contains(&expected), "{:?}", text);
    assert_eq!(color::strip_ansi(&text).matches("[WARN]").count(), 1);
}

#[test]
fn threshold_filters_lower_levels() {
    let buf = Capture::default();
    let logger = Logger::new(buf.clone()).with_level(Level::Warn);

    logger.debug(format_args!("hidden"));
    logger.info(format_args!("hidden"));
    logger.warn(format_args!("shown"));

    let text = buf.text();
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("shown"));
}

#[test]
fn error_returns_reported_message() {
    let buf = Capture::default();
    let logger = Logger::new(buf.clone());

    let err = logger.error(format_args!("open {} failed", "db.sqlite"));

    assert_eq!(err.code.as_str(), "log.reported");
    assert_eq!(err.message, "open db.sqlite failed");
    assert!(buf.text().contains("[ERROR]"));
}
