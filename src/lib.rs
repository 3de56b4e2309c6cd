pub mod core;
pub mod utils;

// Re-export everything from core for ergonomic library use
// Users can write `utilkit::defaults` instead of `utilkit::core::defaults`
pub use core::*;
pub use utils::{color, env, json, logger, strings, time, uuid};
