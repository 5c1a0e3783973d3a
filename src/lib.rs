//! # arson
//!
//! A codec for ARSON (Augmented Restructured Object Notation), a textual
//! format that is a strict superset of JSON.
//!
//! ## What is ARSON?
//!
//! ARSON keeps JSON's look and feel while fixing its everyday
//! annoyances and extending its value vocabulary:
//!
//! - **Any root**: a document is any single value, not just an object
//!   or array
//! - **Comments**: `#` to end of line
//! - **Trailing commas**: allowed in objects and lists
//! - **Richer numbers**: arbitrary-precision integers, `0x`/`0o`/`0b`
//!   bases, `_` digit separators
//! - **Richer strings**: single or double quotes, `\x`/`\u`/`\U`
//!   escapes, line continuations
//! - **Tagged values**: `@set [...]`, `@complex [...]`,
//!   `@bytestring '...'`, `@base64 '...'`, `@datetime '...'`,
//!   `@duration ...`, width-checked integers `@u8 255`, and
//!   host-defined tags via extension hooks
//!
//! The full notation is documented in the [`spec`] module.
//!
//! ## Quick Start
//!
//! ```rust
//! use arson::{parse, dump, Value};
//!
//! let value = parse("[1, 2, 3, ] # comments welcome").unwrap();
//! assert_eq!(
//!     value,
//!     Value::List(vec![Value::from(1), Value::from(2), Value::from(3)])
//! );
//!
//! let text = dump(&value).unwrap();
//! assert_eq!(text, "[1, 2, 3]");
//! ```
//!
//! ### Tagged values
//!
//! ```rust
//! use arson::{parse, Value};
//!
//! let bytes = parse("@base64 'Zm9v'").unwrap();
//! assert_eq!(bytes, Value::Bytes(b"foo".to_vec()));
//!
//! let set = parse("@set [1, 2, 3]").unwrap();
//! assert!(set.is_set());
//!
//! assert!(parse("@set [1, 1]").is_err());
//! ```
//!
//! ### Building values with the arson! macro
//!
//! ```rust
//! use arson::{arson, dump};
//!
//! let doc = arson!({
//!     "name": "Alice",
//!     "scores": [10, 20],
//! });
//! assert_eq!(dump(&doc).unwrap(), r#"{"name": "Alice", "scores": [10, 20]}"#);
//! ```
//!
//! ### Extension hooks
//!
//! Tags outside the reserved set are bridged to host values through a
//! [`Codec`] carrying hooks; see the [`codec`] module for the details.
//!
//! ## Round-tripping
//!
//! `dump` writes canonical text: one line, `", "` separators, double
//! quotes, insertion-ordered objects and sorted `@dict`s. For any value
//! built from the built-in kinds, `parse(&dump(&v)?)` succeeds and
//! `dump(&parse(&text)?)` is a fixed point.

pub mod codec;
mod de;
pub mod error;
pub mod macros;
pub mod map;
mod ser;
pub mod spec;
pub mod tags;
pub mod value;

#[cfg(feature = "serde")]
mod serde;

pub use codec::Codec;
pub use error::{Error, Result};
pub use map::Map;
pub use value::Value;

use std::io;

/// The MIME content type for ARSON documents.
pub const CONTENT_TYPE: &str = "application/arson";

/// Parses one ARSON document with a hookless [`Codec`].
///
/// # Examples
///
/// ```rust
/// use arson::{parse, Value};
///
/// assert_eq!(parse("0x10").unwrap(), Value::from(16));
/// ```
///
/// # Errors
///
/// Returns an error on malformed input, on misapplied reserved tags, and
/// on any non-reserved tag (a hook would be needed to interpret it).
pub fn parse(text: &str) -> Result<Value> {
    Codec::new().parse(text)
}

/// Serializes a value to canonical ARSON text with a hookless [`Codec`].
///
/// # Examples
///
/// ```rust
/// use arson::{dump, Value};
///
/// assert_eq!(dump(&Value::from("hi")).unwrap(), "\"hi\"");
/// ```
///
/// # Errors
///
/// Returns an error only for [`Value::Extension`] nodes, which need a
/// hook to map them back to a tag.
pub fn dump(value: &Value) -> Result<String> {
    Codec::new().dump(value)
}

/// Reads a full document from `reader` and parses it.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise as [`parse`].
pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Value> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    parse(&text)
}

/// Serializes `value` and writes the text to `writer`.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails, otherwise as [`dump`].
pub fn to_writer<W: io::Write>(mut writer: W, value: &Value) -> Result<()> {
    let text = dump(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}
