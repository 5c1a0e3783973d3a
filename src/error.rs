//! Error types for ARSON parsing and serialization.
//!
//! Two kinds of failure matter to callers:
//!
//! - **Syntax errors**: lexical or grammatical violations. They carry the
//!   byte offset of the offending input and a short snippet of the
//!   surrounding text.
//! - **Semantic errors**: structurally well-formed input with an invalid
//!   meaning — duplicate object keys, duplicate set elements, a tag applied
//!   to an incompatible shape, a width-tagged integer out of range, or a
//!   malformed typed-tag payload (bad base64, bad datetime, bad float).
//!
//! Both are terminal for the current `parse`/`dump` call: no partial value
//! is ever returned. Errors raised by extension hooks propagate unchanged.
//!
//! ## Examples
//!
//! ```rust
//! let err = arson::parse("[1, 2").unwrap_err();
//! assert!(err.is_syntax());
//!
//! let err = arson::parse("@set [1, 1]").unwrap_err();
//! assert!(err.is_semantic());
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors produced by the ARSON codec.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Lexical or grammatical violation at a byte position in the input.
    #[error("syntax error at position {pos}: {msg} (near {context:?})")]
    Syntax {
        pos: usize,
        msg: String,
        context: String,
    },

    /// Well-formed input with an invalid meaning.
    #[error("semantic error at position {pos}: {msg}")]
    Semantic { pos: usize, msg: String },

    /// An extension was needed but the codec has no hook for it.
    #[error("no {hook} handler registered (tag {tag:?})")]
    NoHandler { hook: &'static str, tag: String },

    /// IO error from the reader/writer wrappers.
    #[error("IO error: {0}")]
    Io(String),

    /// Generic message, typically raised by an extension hook.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a syntax error at `pos`, extracting a context snippet from
    /// the input buffer.
    pub fn syntax_at(buf: &str, pos: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            pos,
            msg: msg.into(),
            context: snippet(buf, pos),
        }
    }

    /// Creates a semantic error at `pos`.
    pub fn semantic(pos: usize, msg: impl Into<String>) -> Self {
        Error::Semantic {
            pos,
            msg: msg.into(),
        }
    }

    /// Creates an error with a display message.
    ///
    /// Extension hooks use this to surface their own failures; the codec
    /// propagates them without reclassification.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// Creates an I/O error for the reader/writer wrappers.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` for lexical/grammatical violations.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }

    /// Returns `true` for meaning-level violations.
    #[must_use]
    pub fn is_semantic(&self) -> bool {
        matches!(self, Error::Semantic { .. })
    }
}

/// A short window of input around `pos`, clamped to char boundaries.
fn snippet(buf: &str, pos: usize) -> String {
    let pos = pos.min(buf.len());
    let mut start = pos.saturating_sub(10);
    while !buf.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (pos + 10).min(buf.len());
    while !buf.is_char_boundary(end) {
        end += 1;
    }
    buf[start..end].to_string()
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_carry_position_and_context() {
        let err = Error::syntax_at("[1, 2, oops]", 7, "unexpected identifier");
        assert!(err.is_syntax());
        let text = err.to_string();
        assert!(text.contains("position 7"));
        assert!(text.contains("oops"));
    }

    #[test]
    fn snippet_respects_char_boundaries() {
        let buf = "ααααααααααααα";
        // An offset inside a two-byte sequence must not panic.
        let err = Error::syntax_at(buf, 11, "x");
        assert!(err.to_string().contains("α"));
    }

    #[test]
    fn error_kinds() {
        assert!(Error::semantic(0, "dup").is_semantic());
        assert!(!Error::custom("hook failed").is_syntax());
    }
}
