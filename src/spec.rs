//! ARSON Format Notes
//!
//! This module documents the ARSON notation as implemented by this
//! library. ARSON is a superset of JSON: every JSON document is a valid
//! ARSON document with the same meaning, and ARSON layers a small number
//! of ergonomic and typed extensions on top.
//!
//! # Overview
//!
//! - Any value may be a document root, not only objects and arrays
//! - `#` starts a comment that runs to the end of the line
//! - Trailing commas are allowed in objects and lists
//! - A byte-order mark is treated as whitespace, anywhere it appears
//! - `@tag` prefixes extend the value vocabulary beyond JSON's
//!
//! # Core Syntax
//!
//! ## Numbers
//!
//! Integers have arbitrary precision and four spellings:
//!
//! ```text
//! 255  0xFF  0o377  0b1111_1111   # the same value
//! ```
//!
//! Underscores may separate digits in any base. A literal with a
//! fraction or exponent is a 64-bit float: `1.5`, `2e-1`, `1_000.25`.
//! An exponent must carry at least one digit or it is not consumed.
//!
//! ## Strings
//!
//! Single or double quotes, same escape set either way:
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `\b \f \n \r \t` | the usual control characters |
//! | `\"` `\'` `\\` `\/` | the character itself |
//! | `\xHH` | code point from two hex digits |
//! | `\uHHHH` | code point from four hex digits |
//! | `\UHHHHHHHH` | code point from eight hex digits |
//! | `\` before a line break | line continuation, contributes nothing |
//!
//! Raw control characters and surrogate escapes are syntax errors. The
//! serializer always emits double quotes.
//!
//! ## Tags
//!
//! A tag is `@name` followed by one or more spaces and then a plain
//! value. Tags do not nest. The reserved names and the shapes they
//! accept:
//!
//! | Tag | Shape | Result |
//! |-----|-------|--------|
//! | `@object` | any | the value unchanged |
//! | `@bool` | `true`/`false` | the value unchanged |
//! | `@int` | integer | the value unchanged |
//! | `@float` | number | float; string form accepts C99 hex floats, `nan`, `inf` |
//! | `@i8`..`@i128`, `@u8`..`@u128` | integer or integer list | range-checked integer |
//! | `@duration` | number | seconds as a duration |
//! | `@complex` | `[re, im]` | complex number |
//! | `@string` | string or string list | string (lists concatenate) |
//! | `@bytestring` | string | bytes, ASCII and escapes only |
//! | `@base64` | string | bytes, decoded from base64 |
//! | `@datetime` | string | UTC instant, `YYYY-MM-DDTHH:MM:SS[.ffffff]Z` |
//! | `@list` | list | the list unchanged |
//! | `@set` | list | set, duplicates rejected |
//! | `@record` | object | the object unchanged |
//! | `@dict` | object | explicitly unordered mapping |
//! | `@f8`..`@f128` | nothing | always an error, reserved |
//! | `@unknown` | nothing | always an error, reserved |
//!
//! Any other name is routed to the codec's extension hooks.
//!
//! # Canonical Output
//!
//! The serializer writes one line: `", "` between elements, `": "` after
//! keys. Objects keep insertion order; `@dict` sorts its keys. Finite
//! floats always carry a `.` or exponent so they read back as floats;
//! non-finite floats are written `@float "nan"`, `@float "inf"`,
//! `@float "-inf"`. Bytes are written `@base64 "..."`.
//!
//! The MIME content type for ARSON documents is `application/arson`
//! ([`CONTENT_TYPE`](crate::CONTENT_TYPE)).
