//! Environment variable access with fallbacks.
//!
//! An empty variable is treated the same as an unset one everywhere except
//! [`exists`].

use crate::error::{Error, Result};
use crate::strings;
use std::env;
use std::str::FromStr;

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.is_empty())
}

/// Value of `key`, or `fallback` when unset or empty.
pub fn get(key: &str, fallback: &str) -> String {
    non_empty(key).unwrap_or_else(|| fallback.to_string())
}

/// Value of `key`, or an `env.missing_variable` error when unset or empty.
pub fn get_required(key: &str) -> Result<String> {
    non_empty(key).ok_or_else(|| Error::env_missing_variable(key))
}

/// True when `key` is set, even to an empty string.
pub fn exists(key: &str) -> bool {
    env::var_os(key).is_some()
}

pub fn get_trimmed(key: &str, fallback: &str) -> String {
    get(key, fallback).trim().to_string()
}

pub fn get_upper(key: &str, fallback: &str) -> String {
    get(key, fallback).to_uppercase()
}

pub fn get_lower(key: &str, fallback: &str) -> String {
    get(key, fallback).to_lowercase()
}

/// Parse `key` as `T`. Unset, empty, malformed or out-of-range values yield `fallback`.
pub fn get_parsed<T: FromStr>(key: &str, fallback: T) -> T {
    match non_empty(key) {
        Some(val) => strings::parse_or(&val, fallback),
        None => fallback,
    }
}

/// Interpret `key` as a boolean flag.
///
/// Accepts `true/1/yes/on` and `false/0/no/off` in any case; anything else
/// yields `fallback`.
pub fn get_bool(key: &str, fallback: bool) -> bool {
    match non_empty(key) {
        Some(val) => parse_bool(&val).unwrap_or(fallback),
        None => fallback,
    }
}

/// Boolean spelling used by [`get_bool`], or `None` when unrecognized.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Split `key` on `sep` into trimmed, non-empty items. Unset yields an empty list.
pub fn get_list(key: &str, sep: &str) -> Vec<String> {
    non_empty(key)
        .map(|val| {
            strings::split_non_empty(&val, sep)
                .into_iter()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns its variable names; the test harness runs tests in parallel.

    #[test]
    fn get_falls_back_when_unset_or_empty() {
        env::set_var("UTILKIT_T_GET_SET", "value");
        env::set_var("UTILKIT_T_GET_EMPTY", "");
        assert_eq!(get("UTILKIT_T_GET_SET", "fb"), "value");
        assert_eq!(get("UTILKIT_T_GET_EMPTY", "fb"), "fb");
        assert_eq!(get("UTILKIT_T_GET_UNSET", "fb"), "fb");
    }

    #[test]
    fn get_required_errors_on_missing() {
        env::set_var("UTILKIT_T_REQ_SET", "present");
        assert_eq!(get_required("UTILKIT_T_REQ_SET").unwrap(), "present");

        let err = get_required("UTILKIT_T_REQ_UNSET").unwrap_err();
        assert_eq!(err.code.as_str(), "env.missing_variable");
        assert_eq!(err.details["key"], "UTILKIT_T_REQ_UNSET");
    }

    #[test]
    fn exists_sees_empty_values() {
        env::set_var("UTILKIT_T_EXISTS_EMPTY", "");
        assert!(exists("UTILKIT_T_EXISTS_EMPTY"));
        assert!(!exists("UTILKIT_T_EXISTS_UNSET"));
    }

    #[test]
    fn derived_string_getters() {
        env::set_var("UTILKIT_T_DERIVED", "  Mixed Case  ");
        assert_eq!(get_trimmed("UTILKIT_T_DERIVED", ""), "Mixed Case");
        assert_eq!(get_upper("UTILKIT_T_DERIVED", ""), "  MIXED CASE  ");
        assert_eq!(get_lower("UTILKIT_T_DERIVED_UNSET", "FALLBACK"), "fallback");
    }

    #[test]
    fn get_parsed_handles_numbers_and_garbage() {
        env::set_var("UTILKIT_T_PARSED_INT", "42");
        env::set_var("UTILKIT_T_PARSED_FLOAT", "2.5");
        env::set_var("UTILKIT_T_PARSED_BAD", "forty-two");
        env::set_var("UTILKIT_T_PARSED_BIG", "99999999999");

        assert_eq!(get_parsed::<i32>("UTILKIT_T_PARSED_INT", 0), 42);
        assert_eq!(get_parsed::<u64>("UTILKIT_T_PARSED_INT", 0), 42);
        assert_eq!(get_parsed::<f64>("UTILKIT_T_PARSED_FLOAT", 0.0), 2.5);
        assert_eq!(get_parsed::<i32>("UTILKIT_T_PARSED_BAD", 7), 7);
        assert_eq!(get_parsed::<i32>("UTILKIT_T_PARSED_BIG", 7), 7);
        assert_eq!(get_parsed::<i64>("UTILKIT_T_PARSED_BIG", 7), 99_999_999_999);
        assert_eq!(get_parsed::<u32>("UTILKIT_T_PARSED_UNSET", 3), 3);
    }

    #[test]
    fn get_bool_accepts_common_spellings() {
        for (i, raw) in ["true", "1", "YES", "On"].iter().enumerate() {
            let key = format!("UTILKIT_T_BOOL_TRUE_{}", i);
            env::set_var(&key, raw);
            assert!(get_bool(&key, false), "{} should be true", raw);
        }
        for (i, raw) in ["false", "0", "no", "OFF"].iter().enumerate() {
            let key = format!("UTILKIT_T_BOOL_FALSE_{}", i);
            env::set_var(&key, raw);
            assert!(!get_bool(&key, true), "{} should be false", raw);
        }
        env::set_var("UTILKIT_T_BOOL_ODD", "maybe");
        assert!(get_bool("UTILKIT_T_BOOL_ODD", true));
        assert!(!get_bool("UTILKIT_T_BOOL_UNSET", false));
    }

    #[test]
    fn get_list_splits_and_trims() {
        env::set_var("UTILKIT_T_LIST", "a, b ,,c");
        assert_eq!(get_list("UTILKIT_T_LIST", ","), vec!["a", "b", "c"]);
        assert!(get_list("UTILKIT_T_LIST_UNSET", ",").is_empty());
    }
}
