//! Deterministic integer codes for set members.
//!
//! Set elements are stored in a flat diff under their hash code, e.g.
//! `ports.2930241561.from`. Writers derive the code with the set schema's
//! [`HashFn`](crate::HashFn); these helpers provide the common building blocks.

use crate::error::TypeError;

/// Hash a string to a non-negative code using CRC-32 (IEEE).
pub fn string(s: &str) -> i64 {
    i64::from(crc32fast::hash(s.as_bytes()))
}

/// Hash a sequence of strings as one value.
///
/// Each part is terminated with `-` before hashing so that `["ab", "c"]` and
/// `["a", "bc"]` produce different codes.
pub fn strings<I, S>(parts: I) -> i64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = crc32fast::Hasher::new();
    for part in parts {
        hasher.update(part.as_ref().as_bytes());
        hasher.update(b"-");
    }
    i64::from(hasher.finalize())
}

/// Parse a set code as stored in a flat diff path segment.
///
/// Only the canonical decimal form is accepted: `+10` and `010` would
/// otherwise collide with `10`.
pub fn parse_code(segment: &str) -> Result<i64, TypeError> {
    let invalid = || TypeError::InvalidSetCode {
        segment: segment.to_string(),
    };
    let code = segment.parse::<i64>().map_err(|_| invalid())?;
    if code.to_string() != segment {
        return Err(invalid());
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_hash_is_deterministic() {
        assert_eq!(string("foo"), string("foo"));
        assert_ne!(string("foo"), string("bar"));
    }

    #[test]
    fn string_hash_matches_crc32_ieee() {
        // Reference value for CRC-32/IEEE("hello").
        assert_eq!(string("hello"), 0x3610_a686);
    }

    #[test]
    fn string_hash_is_non_negative() {
        for s in ["", "a", "\u{ffff}", "a much longer input string with spaces"] {
            assert!(string(s) >= 0);
        }
    }

    #[test]
    fn strings_separates_parts() {
        assert_ne!(strings(["ab", "c"]), strings(["a", "bc"]));
        assert_eq!(strings(["x", "y"]), strings(vec!["x".to_string(), "y".to_string()]));
    }

    #[test]
    fn parse_code_accepts_decimal() {
        assert_eq!(parse_code("10"), Ok(10));
        assert_eq!(parse_code("-7"), Ok(-7));
    }

    #[test]
    fn parse_code_rejects_garbage() {
        assert_eq!(
            parse_code("~10"),
            Err(TypeError::InvalidSetCode {
                segment: "~10".into()
            })
        );
        assert!(parse_code("").is_err());
        assert!(parse_code("+10").is_err());
        assert!(parse_code("010").is_err());
        assert!(parse_code("-0").is_err());
        assert!(parse_code("index").is_err());
    }
}
