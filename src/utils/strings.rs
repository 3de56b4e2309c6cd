//! String transforms and predicates.
//!
//! Case conversions come in two flavours: the regex-driven `snake_case` /
//! `kebab_case` / `slugify`, which only split on a lowercase-to-uppercase
//! boundary, and the `heck`-backed `camel_case` / `pascal_case` /
//! `shouty_snake_case`, which understand acronyms.

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToUpperCamelCase};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern compiles"));

static NON_ALNUM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("alnum pattern compiles"));

static LOWER_UPPER_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("boundary pattern compiles"));

pub const TRUNCATE_SUFFIX: &str = "...";

/// True if `s` contains at least one of `subs`.
pub fn contains_any<S: AsRef<str>>(s: &str, subs: &[S]) -> bool {
    subs.iter().any(|sub| s.contains(sub.as_ref()))
}

/// True if `s` contains every one of `subs`. An empty list is trivially satisfied.
pub fn contains_all<S: AsRef<str>>(s: &str, subs: &[S]) -> bool {
    subs.iter().all(|sub| s.contains(sub.as_ref()))
}

pub fn starts_with_any<S: AsRef<str>>(s: &str, prefixes: &[S]) -> bool {
    prefixes.iter().any(|p| s.starts_with(p.as_ref()))
}

pub fn ends_with_any<S: AsRef<str>>(s: &str, suffixes: &[S]) -> bool {
    suffixes.iter().any(|sfx| s.ends_with(sfx.as_ref()))
}

/// Lowercase, dash-separated form suitable for URLs and identifiers.
///
/// Every run of characters outside `[a-z0-9]` (after lowercasing) collapses to
/// a single `-`, and leading/trailing dashes are dropped.
pub fn slugify(s: &str) -> String {
    let lowered = s.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Shorten `s` to at most `max` characters, ending in `...` when cut.
pub fn truncate(s: &str, max: usize) -> String {
    truncate_with(s, max, TRUNCATE_SUFFIX)
}

/// Like [`truncate`] with a caller-chosen suffix.
///
/// When `max` leaves no room for the suffix, the string is cut hard at `max`.
pub fn truncate_with(s: &str, max: usize, suffix: &str) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }

    let suffix_len = suffix.chars().count();
    if max <= suffix_len {
        return s.chars().take(max).collect();
    }

    let mut out: String = s.chars().take(max - suffix_len).collect();
    out.push_str(suffix);
    out
}

/// Lowercase everything, then capitalize the first letter of each word.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for ch in s.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = is_word_separator(ch);
    }

    out
}

fn is_word_separator(ch: char) -> bool {
    if ch.is_ascii() {
        !(ch.is_ascii_alphanumeric() || ch == '_')
    } else {
        ch.is_whitespace()
    }
}

pub fn snake_case(s: &str) -> String {
    separated_case(s, "_")
}

pub fn kebab_case(s: &str) -> String {
    separated_case(s, "-")
}

fn separated_case(s: &str, sep: &str) -> String {
    let joined = NON_ALNUM_RUN.replace_all(s, sep);
    let split = LOWER_UPPER_BOUNDARY.replace_all(&joined, format!("${{1}}{}${{2}}", sep));
    split.trim_matches(|c: char| sep.contains(c)).to_lowercase()
}

pub fn camel_case(s: &str) -> String {
    s.to_lower_camel_case()
}

pub fn pascal_case(s: &str) -> String {
    s.to_upper_camel_case()
}

pub fn shouty_snake_case(s: &str) -> String {
    s.to_shouty_snake_case()
}

pub fn remove_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Reverse by Unicode scalar value.
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

/// Prepend `pad` until `s` is `length` characters long.
pub fn pad_left(s: &str, pad: char, length: usize) -> String {
    let current = s.chars().count();
    if current >= length {
        return s.to_string();
    }
    let mut out: String = std::iter::repeat(pad).take(length - current).collect();
    out.push_str(s);
    out
}

/// Append `pad` until `s` is `length` characters long.
pub fn pad_right(s: &str, pad: char, length: usize) -> String {
    let current = s.chars().count();
    if current >= length {
        return s.to_string();
    }
    let mut out = s.to_string();
    out.extend(std::iter::repeat(pad).take(length - current));
    out
}

pub fn repeat(s: &str, count: usize) -> String {
    s.repeat(count)
}

/// Replace the first `n` occurrences of `from`, or all of them when `n` is `None`.
pub fn replace_n(s: &str, from: &str, to: &str, n: Option<usize>) -> String {
    match n {
        Some(n) => s.replacen(from, to, n),
        None => s.replace(from, to),
    }
}

/// Parse `s` as `T`, returning `fallback` on any failure (including overflow).
///
/// ```ignore
/// let port: u16 = strings::parse_or("8080", 80);
/// let ratio: f64 = strings::parse_or("n/a", 1.0);
/// ```
pub fn parse_or<T: FromStr>(s: &str, fallback: T) -> T {
    s.parse().unwrap_or(fallback)
}

/// Split on `sep`, trimming each part and dropping empty ones.
pub fn split_non_empty<'a>(s: &'a str, sep: &str) -> Vec<&'a str> {
    s.split(sep)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}
