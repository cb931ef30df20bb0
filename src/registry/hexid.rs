//! Property id literals as written in the data file.
//!
//! This module is also compiled into the build script, so it must not depend on anything else
//! in the crate.

/// Parses a `0x`-prefixed hexadecimal id of up to four digits.
///
/// Ids without the prefix are rejected, which catches octal-looking literals such as `06670`.
pub(crate) fn parse_hex_id(literal: &str) -> Option<u16> {
    let digits = literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"))?;
    if digits.is_empty() || digits.len() > 4 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    u16::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_id() {
        assert_eq!(parse_hex_id("0x0037"), Some(0x0037));
        assert_eq!(parse_hex_id("0X3005"), Some(0x3005));
        assert_eq!(parse_hex_id("0xFFFF"), Some(0xFFFF));
        assert_eq!(parse_hex_id("0x1"), Some(0x0001));
        assert_eq!(parse_hex_id("06670"), None);
        assert_eq!(parse_hex_id("0x"), None);
        assert_eq!(parse_hex_id("0x10000"), None);
        assert_eq!(parse_hex_id("0xGG"), None);
        assert_eq!(parse_hex_id("0x+1"), None);
    }
}
