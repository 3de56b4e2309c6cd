//! RFC 4122 UUID helpers working on the canonical `8-4-4-4-12` hex form.

use crate::error::{Error, Result};
use ::uuid::Uuid;
use regex::Regex;
use std::sync::LazyLock;

// Versions 1-5 with the RFC 4122 variant; nil, braced and URN forms do not match.
static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[1-5][a-fA-F0-9]{3}-[89abAB][a-fA-F0-9]{3}-[a-fA-F0-9]{12}$",
    )
    .expect("uuid pattern compiles")
});

/// Random v4 UUID in lowercase hyphenated form.
pub fn generate() -> String {
    format(generate_bytes())
}

/// Raw bytes of a random v4 UUID (version nibble 4, variant `10`).
pub fn generate_bytes() -> [u8; 16] {
    *Uuid::new_v4().as_bytes()
}

/// Lowercase `8-4-4-4-12` hex form of `bytes`.
pub fn format(bytes: [u8; 16]) -> String {
    Uuid::from_bytes(bytes).hyphenated().to_string()
}

pub fn is_valid(s: &str) -> bool {
    UUID_PATTERN.is_match(s)
}

/// Decode a canonical UUID string into its 16 bytes.
pub fn parse(s: &str) -> Result<[u8; 16]> {
    if !is_valid(s) {
        return Err(invalid_uuid(s, "invalid UUID format"));
    }

    Uuid::parse_str(s)
        .map(|id| *id.as_bytes())
        .map_err(|e| invalid_uuid(s, format!("invalid UUID encoding: {}", e)))
}

/// Version digit of a valid UUID string.
pub fn version(s: &str) -> Option<u8> {
    if !is_valid(s) {
        return None;
    }
    s.chars()
        .nth(14)
        .and_then(|c| c.to_digit(16))
        .and_then(|d| u8::try_from(d).ok())
}

fn invalid_uuid(s: &str, problem: impl Into<String>) -> Error {
    Error::validation_invalid_argument("uuid", problem, Some(s.to_string()), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_valid_v4() {
        let id = generate();
        assert_eq!(id.len(), 36);
        assert!(is_valid(&id), "{} should be valid", id);
        assert_eq!(version(&id), Some(4));
        assert_eq!(&id[14..15], "4");
        assert!("89ab".contains(&id[19..20]));
        assert_eq!(id, id.to_lowercase());
    }

    #[test]
    fn generated_bytes_carry_version_and_variant_bits() {
        let bytes = generate_bytes();
        assert_eq!(bytes[6] & 0xF0, 0x40);
        assert_eq!(bytes[8] & 0xC0, 0x80);
    }

    #[test]
    fn generate_does_not_repeat() {
        let ids: HashSet<String> = (0..500).map(|_| generate()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn format_groups_hex_digits() {
        let bytes = [
            0x12, 0x3e, 0x45, 0x67, 0xe8, 0x9b, 0x12, 0xd3, 0xa4, 0x56, 0x42, 0x66, 0x14, 0x17,
            0x40, 0x00,
        ];
        assert_eq!(format(bytes), "123e4567-e89b-12d3-a456-426614174000");
    }

    #[test]
    fn validation_rules() {
        assert!(is_valid("123e4567-e89b-12d3-a456-426614174000"));
        assert!(is_valid("123E4567-E89B-42D3-B456-426614174000"));
        assert!(!is_valid("00000000-0000-0000-0000-000000000000"));
        assert!(!is_valid("123e4567-e89b-62d3-a456-426614174000"));
        assert!(!is_valid("123e4567-e89b-12d3-c456-426614174000"));
        assert!(!is_valid("{123e4567-e89b-12d3-a456-426614174000}"));
        assert!(!is_valid("123e4567e89b12d3a456426614174000"));
        assert!(!is_valid(""));
    }

    #[test]
    fn parse_decodes_bytes() {
        let bytes = parse("123e4567-e89b-12d3-a456-426614174000").unwrap();
        assert_eq!(bytes[0], 0x12);
        assert_eq!(bytes[15], 0x00);
        assert_eq!(format(bytes), "123e4567-e89b-12d3-a456-426614174000");
    }

    #[test]
    fn parse_rejects_malformed_input() {
        let err = parse("not-a-uuid").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
        assert_eq!(err.details["field"], "uuid");
        assert_eq!(err.details["id"], "not-a-uuid");
    }

    #[test]
    fn version_of_invalid_is_none() {
        assert_eq!(version("123e4567-e89b-12d3-a456-426614174000"), Some(1));
        assert_eq!(version("garbage"), None);
    }
}
