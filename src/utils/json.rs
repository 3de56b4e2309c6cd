//! JSON encoding helpers and text-level transforms.
//!
//! `compact` and `pretty` work on the token stream rather than on a parsed
//! `Value`, so key order and number spelling survive reformatting.

use crate::error::{Error, Result};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::Read;

pub const DEFAULT_INDENT: usize = 2;

/// Compact JSON, or `"json error: <msg>"` if `v` cannot be serialized.
pub fn to_string<T: Serialize + ?Sized>(v: &T) -> String {
    serde_json::to_string(v).unwrap_or_else(|e| format!("json error: {}", e))
}

/// Pretty JSON with a two-space indent, or `"json error: <msg>"`.
pub fn to_string_pretty<T: Serialize + ?Sized>(v: &T) -> String {
    to_string_indented(v, DEFAULT_INDENT)
}

/// Pretty JSON with `indent` spaces per level, or `"json error: <msg>"`.
pub fn to_string_indented<T: Serialize + ?Sized>(v: &T, indent: usize) -> String {
    serialize_indented(v, indent).unwrap_or_else(|e| format!("json error: {}", e))
}

pub fn try_to_string<T: Serialize + ?Sized>(v: &T) -> Result<String> {
    serde_json::to_string(v)
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize value".to_string())))
}

pub fn try_to_string_indented<T: Serialize + ?Sized>(v: &T, indent: usize) -> Result<String> {
    serialize_indented(v, indent)
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize value".to_string())))
}

fn serialize_indented<T: Serialize + ?Sized>(
    v: &T,
    indent: usize,
) -> std::result::Result<String, serde_json::Error> {
    let unit = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(unit.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    v.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn from_str<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json)
        .map_err(|e| Error::validation_invalid_json(e, Some("parse json string".to_string())))
}

pub fn from_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    serde_json::from_slice(data)
        .map_err(|e| Error::validation_invalid_json(e, Some("parse json bytes".to_string())))
}

pub fn is_valid(json: &str) -> bool {
    serde_json::from_str::<IgnoredAny>(json).is_ok()
}

/// Remove insignificant whitespace. Invalid input is returned unchanged.
pub fn compact(json: &str) -> String {
    if !is_valid(json) {
        return json.to_string();
    }
    strip_insignificant_whitespace(json)
}

/// Re-indent with two spaces per level. Invalid input is returned unchanged.
pub fn pretty(json: &str) -> String {
    pretty_with_indent(json, DEFAULT_INDENT)
}

pub fn pretty_with_indent(json: &str, indent: usize) -> String {
    if !is_valid(json) {
        return json.to_string();
    }
    indent_tokens(&strip_insignificant_whitespace(json), &" ".repeat(indent))
}

fn strip_insignificant_whitespace(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for ch in json.chars() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            ' ' | '\t' | '\n' | '\r' => {}
            '"' => {
                in_string = true;
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }

    out
}

// Expects whitespace-free input. Empty containers stay on one line.
fn indent_tokens(compact: &str, unit: &str) -> String {
    let chars: Vec<char> = compact.chars().collect();
    let mut out = String::with_capacity(compact.len() * 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    let newline = |out: &mut String, depth: usize| {
        out.push('\n');
        for _ in 0..depth {
            out.push_str(unit);
        }
    };

    while i < chars.len() {
        let ch = chars[i];

        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            '{' | '[' => {
                let closer = if ch == '{' { '}' } else { ']' };
                out.push(ch);
                if chars.get(i + 1) == Some(&closer) {
                    out.push(closer);
                    i += 1;
                } else {
                    depth += 1;
                    newline(&mut out, depth);
                }
            }
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                newline(&mut out, depth);
                out.push(ch);
            }
            ',' => {
                out.push(ch);
                newline(&mut out, depth);
            }
            ':' => out.push_str(": "),
            _ => out.push(ch),
        }
        i += 1;
    }

    out
}

/// Semantic equality: key order is ignored and numbers compare by value.
/// Returns false if either side is invalid.
pub fn equal(a: &str, b: &str) -> bool {
    match (
        serde_json::from_str::<Value>(a),
        serde_json::from_str::<Value>(b),
    ) {
        (Ok(left), Ok(right)) => values_equal(&left, &right),
        _ => false,
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

// Integers compare exactly; f64 only when either side has a fraction or exponent.
fn numbers_equal(x: &serde_json::Number, y: &serde_json::Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    if x.is_f64() || y.is_f64() {
        return x.as_f64() == y.as_f64();
    }
    // One side negative i64, the other beyond i64::MAX.
    false
}

/// Remove `//` and `/* */` comments outside string literals, trim every line,
/// and drop lines left blank.
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match (ch, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    prev = skipped;
                }
            }
            _ => out.push(ch),
        }
    }

    out.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Append `item` to a JSON array string. Non-array input is returned unchanged.
pub fn append<T: Serialize + ?Sized>(array_json: &str, item: &T) -> String {
    let Ok(mut arr) = serde_json::from_str::<Vec<Value>>(array_json) else {
        return array_json.to_string();
    };
    let Ok(value) = serde_json::to_value(item) else {
        return array_json.to_string();
    };
    arr.push(value);
    serde_json::to_string(&arr).unwrap_or_else(|_| array_json.to_string())
}

/// Remove the element at `index`. Non-array input or an out-of-range index
/// returns the input unchanged.
pub fn remove(array_json: &str, index: usize) -> String {
    let Ok(mut arr) = serde_json::from_str::<Vec<Value>>(array_json) else {
        return array_json.to_string();
    };
    if index >= arr.len() {
        return array_json.to_string();
    }
    arr.remove(index);
    serde_json::to_string(&arr).unwrap_or_else(|_| array_json.to_string())
}

/// Parse into a generic object, or `None` unless the document is an object.
pub fn to_object(json: &str) -> Option<Map<String, Value>> {
    serde_json::from_str(json).ok()
}

/// Read JSON text from a CLI spec: `-` for stdin, `@path` for a file,
/// anything else is taken literally.
pub fn read_json_spec_to_string(spec: &str) -> Result<String> {
    use std::io::IsTerminal;

    if spec.trim() == "-" {
        let mut buf = String::new();
        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(Error::validation_invalid_argument(
                "json",
                "Cannot read JSON from stdin when stdin is a TTY",
                None,
                None,
            ));
        }
        stdin
            .read_to_string(&mut buf)
            .map_err(|e| Error::internal_io(e.to_string(), Some("read stdin".to_string())))?;
        return Ok(buf);
    }

    if let Some(path) = spec.strip_prefix('@') {
        if path.trim().is_empty() {
            return Err(Error::validation_invalid_argument(
                "json",
                "Invalid JSON spec '@' (missing file path)",
                None,
                None,
            ));
        }

        return fs::read_to_string(path).map_err(|e| {
            Error::internal_io(
                e.to_string(),
                Some(format!("read json file spec '{}'", path)),
            )
        });
    }

    Ok(spec.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Demo {
        name: String,
    }

    #[test]
    fn encode_and_decode_struct() {
        let demo = Demo {
            name: "Alice".to_string(),
        };
        let encoded = to_string(&demo);
        assert_eq!(encoded, r#"{"name":"Alice"}"#);

        let decoded: Demo = from_str(&encoded).unwrap();
        assert_eq!(decoded, demo);

        let from_bytes: Demo = from_slice(encoded.as_bytes()).unwrap();
        assert_eq!(from_bytes, demo);
    }

    #[test]
    fn from_str_reports_invalid_json() {
        let err = from_str::<Demo>("{oops").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_json");
    }

    #[test]
    fn to_string_pretty_uses_two_spaces() {
        let value = serde_json::json!({"a": [1]});
        assert_eq!(to_string_pretty(&value), "{\n  \"a\": [\n    1\n  ]\n}");
        assert_eq!(to_string_indented(&value, 4), "{\n    \"a\": [\n        1\n    ]\n}");
    }

    #[test]
    fn to_string_reports_serialization_failure() {
        let mut bad = std::collections::HashMap::new();
        bad.insert(vec![1u8], 1);
        assert!(to_string(&bad).starts_with("json error: "));
        assert!(try_to_string(&bad).is_err());
    }

    #[test]
    fn pretty_then_compact_restores_original() {
        let minified = r#"{"a":1,"b":2}"#;
        let expanded = pretty(minified);
        assert_eq!(expanded, "{\n  \"a\": 1,\n  \"b\": 2\n}");
        assert!(is_valid(&expanded));
        assert_eq!(compact(&expanded), minified);
    }

    #[test]
    fn pretty_keeps_key_order_numbers_and_empty_containers() {
        let src = r#"{"z":1.50,"a":{},"m":[ ],"s":"x : y, {z}"}"#;
        assert_eq!(
            pretty(src),
            "{\n  \"z\": 1.50,\n  \"a\": {},\n  \"m\": [],\n  \"s\": \"x : y, {z}\"\n}"
        );
    }

    #[test]
    fn compact_preserves_whitespace_inside_strings() {
        assert_eq!(
            compact("{ \"k\" : \"a b\\\" c\" }"),
            "{\"k\":\"a b\\\" c\"}"
        );
    }

    #[test]
    fn reformatting_invalid_input_is_a_no_op() {
        assert_eq!(compact("{ nope"), "{ nope");
        assert_eq!(pretty("[1,"), "[1,");
    }

    #[test]
    fn validity() {
        assert!(is_valid(r#"{"a":[1,2,{"b":null}]}"#));
        assert!(is_valid("42"));
        assert!(!is_valid("{'a':1}"));
        assert!(!is_valid(""));
    }

    #[test]
    fn equal_ignores_key_order_and_whitespace() {
        let a = r#"{"x":1,"y":2}"#;
        let b = "{\n  \"y\": 2,\n  \"x\": 1\n}";
        assert!(equal(a, b));
        assert!(equal("[1, 2.0]", "[1.0, 2]"));
        assert!(!equal("[1,2]", "[2,1]"));
        assert!(!equal(r#"{"x":1}"#, r#"{"x":1,"y":null}"#));
        assert!(!equal("{", "{"));
    }

    #[test]
    fn equal_keeps_large_integers_distinct() {
        assert!(!equal("9007199254740993", "9007199254740992"));
        assert!(!equal("18446744073709551615", "18446744073709551614"));
        assert!(equal("18446744073709551615", "18446744073709551615"));
        assert!(!equal("-1", "18446744073709551615"));
        assert!(equal("[3]", "[3.0]"));
    }

    #[test]
    fn strip_comments_removes_line_and_block_comments() {
        let input = r#"
	// this is a comment
	{ "a": 1 }
	/* block
	comment */
	{ "b": "http://kept" } // trailing
	"#;
        assert_eq!(strip_comments(input), "{ \"a\": 1 }\n{ \"b\": \"http://kept\" }");
    }

    #[test]
    fn strip_comments_result_parses() {
        let input = "{\n  // name\n  \"name\": \"x\", /* inline */ \"n\": 2\n}";
        let stripped = strip_comments(input);
        assert!(is_valid(&stripped));
        assert!(equal(&stripped, r#"{"name":"x","n":2}"#));
    }

    #[test]
    fn append_and_remove() {
        let added = append("[1,2,3]", &4);
        assert_eq!(added, "[1,2,3,4]");
        assert!(equal(&append("[]", "s"), r#"["s"]"#));

        let removed = remove(&added, 2);
        assert_eq!(removed, "[1,2,4]");
    }

    #[test]
    fn array_edits_leave_bad_input_alone() {
        assert_eq!(append(r#"{"a":1}"#, &4), r#"{"a":1}"#);
        assert_eq!(remove("[1,2]", 5), "[1,2]");
        assert_eq!(remove("nope", 0), "nope");
    }

    #[test]
    fn to_object_only_accepts_objects() {
        let obj = to_object(r#"{"k": "v"}"#).unwrap();
        assert_eq!(obj["k"], "v");
        assert!(to_object("[1]").is_none());
        assert!(to_object("garbage").is_none());
    }

    #[test]
    fn json_spec_reads_literal_and_file() {
        assert_eq!(read_json_spec_to_string("[1]").unwrap(), "[1]");

        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, r#"{{"from":"file"}}"#).unwrap();
        let spec = format!("@{}", temp.path().display());
        assert_eq!(read_json_spec_to_string(&spec).unwrap(), r#"{"from":"file"}"#);

        assert!(read_json_spec_to_string("@").is_err());
    }
}
