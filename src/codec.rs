//! The ARSON codec: parse/dump plus the extension hook seam.
//!
//! A [`Codec`] bundles the parser and serializer with the two optional
//! extension hooks that bridge non-reserved tags to host-defined values:
//!
//! - `tagged_to_object(name, payload)` is invoked by the parser for any
//!   tag outside the reserved set;
//! - `object_to_tagged(value)` is invoked by the serializer for
//!   [`Value::Extension`] values, returning the tag name and payload to
//!   write.
//!
//! A codec with no hooks parses and dumps every built-in kind; it fails
//! with a "no handler registered" error only at the point an extension is
//! actually needed. A codec is stateless between calls and safe to reuse.
//!
//! ```rust
//! use arson::{Codec, Value};
//!
//! let codec = Codec::new()
//!     .with_tagged_to_object(|name, payload| {
//!         Ok(Value::Extension(name.to_string(), Box::new(payload)))
//!     })
//!     .with_object_to_tagged(|value| match value {
//!         Value::Extension(name, payload) => Ok((name.clone(), (**payload).clone())),
//!         other => Err(arson::Error::custom(format!("no tag for {}", other.kind()))),
//!     });
//!
//! let value = codec.parse("@point {\"x\": 1, \"y\": 2}").unwrap();
//! assert!(matches!(value, Value::Extension(..)));
//! assert_eq!(codec.dump(&value).unwrap(), "@point {\"x\": 1, \"y\": 2}");
//! ```

use crate::de::Parser;
use crate::ser::Serializer;
use crate::{Error, Result, Value};
use std::fmt;

type ObjectToTagged = Box<dyn Fn(&Value) -> Result<(String, Value)> + Send + Sync>;
type TaggedToObject = Box<dyn Fn(&str, Value) -> Result<Value> + Send + Sync>;

/// A reusable ARSON codec instance.
#[derive(Default)]
pub struct Codec {
    object_to_tagged: Option<ObjectToTagged>,
    tagged_to_object: Option<TaggedToObject>,
}

impl Codec {
    /// Creates a codec with no extension hooks.
    #[must_use]
    pub fn new() -> Self {
        Codec::default()
    }

    /// Registers the serializer-side hook mapping a host value to a
    /// `(tag, payload)` pair.
    #[must_use]
    pub fn with_object_to_tagged<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Value) -> Result<(String, Value)> + Send + Sync + 'static,
    {
        self.object_to_tagged = Some(Box::new(hook));
        self
    }

    /// Registers the parser-side hook mapping a non-reserved tag and its
    /// payload to a host value.
    #[must_use]
    pub fn with_tagged_to_object<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.tagged_to_object = Some(Box::new(hook));
        self
    }

    /// Parses one ARSON document into a value tree.
    ///
    /// # Errors
    ///
    /// Fails on any lexical, structural or semantic violation, and on
    /// trailing non-whitespace content after the root value.
    pub fn parse(&self, text: &str) -> Result<Value> {
        Parser::new(text, self, None).parse_document()
    }

    /// Parses like [`parse`](Codec::parse), applying `transform` bottom-up
    /// to every constructed node (innermost values first, object keys
    /// included) before it is attached to its parent.
    pub fn parse_with(
        &self,
        text: &str,
        transform: &mut dyn FnMut(Value) -> Value,
    ) -> Result<Value> {
        Parser::new(text, self, Some(transform)).parse_document()
    }

    /// Serializes a value tree to canonical ARSON text.
    ///
    /// # Errors
    ///
    /// Fails only if an extension hook is missing or itself fails.
    pub fn dump(&self, value: &Value) -> Result<String> {
        let mut ser = Serializer::new(self, None);
        ser.write_value(value)?;
        Ok(ser.into_inner())
    }

    /// Serializes like [`dump`](Codec::dump), applying `transform`
    /// top-down to every value (the root and every nested element or
    /// field) before it is classified for writing. Returning `None` keeps
    /// the value unchanged; returning `Some` substitutes it.
    pub fn dump_with(
        &self,
        value: &Value,
        transform: &mut dyn FnMut(&Value) -> Option<Value>,
    ) -> Result<String> {
        let mut ser = Serializer::new(self, Some(transform));
        ser.write_value(value)?;
        Ok(ser.into_inner())
    }

    pub(crate) fn call_tagged_to_object(&self, name: &str, payload: Value) -> Result<Value> {
        match &self.tagged_to_object {
            Some(hook) => hook(name, payload),
            None => Err(Error::NoHandler {
                hook: "tagged_to_object",
                tag: name.to_string(),
            }),
        }
    }

    pub(crate) fn call_object_to_tagged(&self, value: &Value) -> Result<(String, Value)> {
        match &self.object_to_tagged {
            Some(hook) => hook(value),
            None => Err(Error::NoHandler {
                hook: "object_to_tagged",
                tag: match value {
                    Value::Extension(name, _) => name.clone(),
                    other => other.kind().to_string(),
                },
            }),
        }
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("object_to_tagged", &self.object_to_tagged.is_some())
            .field("tagged_to_object", &self.tagged_to_object.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hookless_codec_reports_missing_handler() {
        let codec = Codec::new();
        let err = codec.parse("@point {}").unwrap_err();
        assert!(matches!(err, Error::NoHandler { hook: "tagged_to_object", .. }));

        let value = Value::Extension("point".into(), Box::new(Value::Null));
        let err = codec.dump(&value).unwrap_err();
        assert!(matches!(err, Error::NoHandler { hook: "object_to_tagged", .. }));
    }

    #[test]
    fn codec_is_reusable() {
        let codec = Codec::new();
        assert_eq!(codec.parse("1").unwrap(), Value::from(1));
        assert_eq!(codec.parse("2").unwrap(), Value::from(2));
        assert_eq!(codec.dump(&Value::from(3)).unwrap(), "3");
    }

    #[test]
    fn debug_shows_hook_presence() {
        let codec = Codec::new().with_tagged_to_object(|_, payload| Ok(payload));
        let text = format!("{codec:?}");
        assert!(text.contains("tagged_to_object: true"));
        assert!(text.contains("object_to_tagged: false"));
    }
}
