//! Lexical tables shared by the parser and the serializer.
//!
//! ARSON has a closed set of reserved tag names. A reserved tag may only
//! decorate a value whose syntactic shape appears in that tag's
//! compatibility set; any other pairing is rejected before the value is
//! built. Tag names outside the reserved set are never rejected here —
//! they are routed to the extension hooks.

use num_bigint::BigInt;
use std::fmt;

/// The syntactic category of an untagged value, determined by its leading
/// character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    List,
    Str,
    Number,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Object => "objects",
            Shape::List => "lists",
            Shape::Str => "strings",
            Shape::Number => "numbers",
        })
    }
}

/// Returns `true` if `name` has a codec-defined meaning.
///
/// Note that `record` is deliberately absent: `@record {}` is accepted as
/// a plain object, but on any other shape `record` routes to the
/// extension hook like any other non-reserved name.
pub fn is_reserved(name: &str) -> bool {
    matches!(
        name,
        "bool"
            | "int"
            | "float"
            | "complex"
            | "string"
            | "bytestring"
            | "base64"
            | "duration"
            | "datetime"
            | "set"
            | "list"
            | "dict"
            | "object"
            | "unknown"
    ) || width_bits(name).is_some()
        || is_float_width(name)
}

/// Returns `true` if the reserved tag `name` may decorate a value of the
/// given shape.
pub fn allowed_for(name: &str, shape: Shape) -> bool {
    match shape {
        Shape::Object => matches!(name, "object" | "record" | "dict"),
        Shape::List => {
            matches!(name, "object" | "list" | "set" | "complex" | "string")
                || width_bits(name).is_some()
        }
        Shape::Str => matches!(
            name,
            "object" | "string" | "float" | "datetime" | "bytestring" | "base64"
        ),
        Shape::Number => {
            matches!(name, "object" | "int" | "float" | "duration") || width_bits(name).is_some()
        }
    }
}

/// Reserved floating-point width tags (`f8`..`f128`). They have no
/// implemented representation and always fail.
pub fn is_float_width(name: &str) -> bool {
    matches!(name, "f8" | "f16" | "f32" | "f64" | "f128")
}

fn width_bits(name: &str) -> Option<(bool, u32)> {
    Some(match name {
        "i8" => (true, 8),
        "i16" => (true, 16),
        "i32" => (true, 32),
        "i64" => (true, 64),
        "i128" => (true, 128),
        "u8" => (false, 8),
        "u16" => (false, 16),
        "u32" => (false, 32),
        "u64" => (false, 64),
        "u128" => (false, 128),
        _ => return None,
    })
}

/// The inclusive `[min, max]` bound for a width tag, or `None` if `name`
/// is not a width tag.
///
/// Unsigned tags enforce the full declared range, not merely positivity.
pub fn width_bounds(name: &str) -> Option<(BigInt, BigInt)> {
    let (signed, bits) = width_bits(name)?;
    let one = BigInt::from(1);
    if signed {
        let half: BigInt = one << (bits - 1);
        Some((-half.clone(), half - 1))
    } else {
        Some((BigInt::from(0), (one << bits) - 1))
    }
}

/// Decodes a single-character escape (`\n`, `\t`, ...). Hex escapes are
/// handled by the scanner directly.
pub fn unescape_char(c: char) -> Option<char> {
    Some(match c {
        'b' => '\u{0008}',
        'f' => '\u{000C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '/' => '/',
        '"' => '"',
        '\'' => '\'',
        '\\' => '\\',
        _ => return None,
    })
}

/// The escape sequence the serializer emits for `c`, if the escape table
/// covers it. Remaining control characters are written as `\xHH`.
pub fn escape_char(c: char) -> Option<&'static str> {
    Some(match c {
        '\u{0008}' => "\\b",
        '\n' => "\\n",
        '\u{000C}' => "\\f",
        '\r' => "\\r",
        '\t' => "\\t",
        '"' => "\\\"",
        '\'' => "\\'",
        '\\' => "\\\\",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn reserved_names() {
        for name in [
            "bool", "int", "float", "complex", "string", "bytestring", "base64", "duration",
            "datetime", "set", "list", "dict", "object", "unknown", "i8", "u128", "f64",
        ] {
            assert!(is_reserved(name), "{name} should be reserved");
        }
        assert!(!is_reserved("record"));
        assert!(!is_reserved("point"));
        assert!(!is_reserved("i256"));
    }

    #[test]
    fn shape_compatibility() {
        assert!(allowed_for("dict", Shape::Object));
        assert!(allowed_for("set", Shape::List));
        assert!(allowed_for("i8", Shape::List));
        assert!(allowed_for("datetime", Shape::Str));
        assert!(allowed_for("duration", Shape::Number));
        assert!(!allowed_for("int", Shape::Object));
        assert!(!allowed_for("set", Shape::Number));
        assert!(!allowed_for("f32", Shape::Number));
        assert!(!allowed_for("unknown", Shape::List));
    }

    #[test]
    fn width_bounds_exact() {
        let (lo, hi) = width_bounds("i8").unwrap();
        assert_eq!(lo, BigInt::from(-128));
        assert_eq!(hi, BigInt::from(127));

        let (lo, hi) = width_bounds("u128").unwrap();
        assert_eq!(lo, BigInt::from(0));
        assert_eq!(hi, (BigInt::from(1) << 128) - 1);

        assert!(width_bounds("f32").is_none());
        assert!(width_bounds("int").is_none());
    }

    #[test]
    fn escape_tables_are_inverse() {
        for raw in ['\u{0008}', '\n', '\u{000C}', '\r', '\t', '"', '\'', '\\'] {
            let esc = escape_char(raw).unwrap();
            let short = esc.chars().nth(1).unwrap();
            assert_eq!(unescape_char(short), Some(raw));
        }
    }
}
