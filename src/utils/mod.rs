//! Standalone utility packages. None of them share state.
//!
//! - `color` - ANSI color codes and painting
//! - `env` - Environment variable access with fallbacks
//! - `json` - JSON encoding, reformatting and array edits
//! - `logger` - Leveled, colored line logging
//! - `strings` - Case conversion, slugs, padding and parsing
//! - `time` - Formatting, parsing, durations and stopwatches
//! - `uuid` - UUIDv4 generation, formatting and validation

pub mod color;
pub mod env;
pub mod json;
pub mod logger;
pub mod strings;
pub mod time;
pub mod uuid;
