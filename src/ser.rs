//! ARSON serialization.
//!
//! The [`Serializer`] writes a value tree back out as canonical text: one
//! line, `", "` between elements, `": "` after keys, double-quoted
//! strings. Every built-in kind is written in a form the parser maps back
//! to the same value, which is what makes `parse(dump(v))` total for
//! hookless trees.
//!
//! Kinds without a plain JSON spelling are written with their reserved
//! tag: `@set`, `@dict` (keys sorted), `@complex`, `@base64`,
//! `@datetime`, `@duration`, and `@float` for non-finite floats.

use crate::codec::Codec;
use crate::tags;
use crate::{Error, Result, Value};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub(crate) struct Serializer<'a> {
    out: String,
    codec: &'a Codec,
    transform: Option<&'a mut dyn FnMut(&Value) -> Option<Value>>,
}

impl<'a> Serializer<'a> {
    pub(crate) fn new(
        codec: &'a Codec,
        transform: Option<&'a mut dyn FnMut(&Value) -> Option<Value>>,
    ) -> Self {
        Serializer {
            out: String::with_capacity(256),
            codec,
            transform,
        }
    }

    pub(crate) fn into_inner(self) -> String {
        self.out
    }

    /// Writes one value, consulting the transform first. A substituted
    /// value is written as-is; its children still go through the
    /// transform when they are reached.
    pub(crate) fn write_value(&mut self, value: &Value) -> Result<()> {
        if let Some(transform) = self.transform.as_mut() {
            if let Some(replacement) = transform(value) {
                return self.write_inner(&replacement);
            }
        }
        self.write_inner(value)
    }

    fn write_inner(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Int(i) => self.out.push_str(&i.to_string()),
            Value::Float(f) => self.write_float(*f),
            Value::Complex(c) => {
                self.out.push_str("@complex [");
                self.write_decimal(c.re);
                self.out.push_str(", ");
                self.write_decimal(c.im);
                self.out.push(']');
            }
            Value::Text(s) => self.write_text(s),
            Value::Bytes(b) => {
                self.out.push_str("@base64 \"");
                self.out.push_str(&STANDARD.encode(b));
                self.out.push('"');
            }
            Value::List(items) => self.write_items(items)?,
            Value::Set(items) => {
                // Insertion order, same as parsing left it.
                self.out.push_str("@set ");
                self.write_items(items)?;
            }
            Value::Object(map) => self.write_entries(map.iter())?,
            Value::Dict(map) => {
                self.out.push_str("@dict ");
                self.write_entries(map.sorted_iter())?;
            }
            Value::Datetime(dt) => {
                self.out.push_str("@datetime \"");
                self.out
                    .push_str(&dt.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string());
                self.out.push('"');
            }
            Value::Duration(seconds) => {
                // The parser only builds finite durations; a non-finite
                // one has no spelling that reads back as a duration.
                if !seconds.is_finite() {
                    return Err(Error::custom("cannot serialize a non-finite duration"));
                }
                self.out.push_str("@duration ");
                self.write_decimal(*seconds);
            }
            Value::Extension(..) => {
                let (name, payload) = self.codec.call_object_to_tagged(value)?;
                self.out.push('@');
                self.out.push_str(&name);
                self.out.push(' ');
                // A dict payload is flattened to a plain object so the
                // output does not nest tags.
                match payload {
                    Value::Dict(map) => self.write_entries(map.sorted_iter())?,
                    other => self.write_value(&other)?,
                }
            }
        }
        Ok(())
    }

    fn write_items(&mut self, items: &[Value]) -> Result<()> {
        self.out.push('[');
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.out.push_str(", ");
            }
            self.write_value(item)?;
        }
        self.out.push(']');
        Ok(())
    }

    fn write_entries<'m, I>(&mut self, entries: I) -> Result<()>
    where
        I: Iterator<Item = (&'m String, &'m Value)>,
    {
        self.out.push('{');
        let mut first = true;
        for (key, item) in entries {
            if !first {
                self.out.push_str(", ");
            }
            first = false;
            if self.transform.is_some() {
                let key_value = Value::Text(key.clone());
                self.write_value(&key_value)?;
            } else {
                self.write_text(key);
            }
            self.out.push_str(": ");
            self.write_value(item)?;
        }
        self.out.push('}');
        Ok(())
    }

    fn write_text(&mut self, text: &str) {
        self.out.push('"');
        for c in text.chars() {
            if let Some(escaped) = tags::escape_char(c) {
                self.out.push_str(escaped);
            } else {
                let n = c as u32;
                if n < 0x20 || (0x7F..=0x9F).contains(&n) {
                    // The parser refuses these raw, so they must leave as
                    // escapes.
                    self.out.push_str(&format!("\\x{n:02X}"));
                } else {
                    self.out.push(c);
                }
            }
        }
        self.out.push('"');
    }

    fn write_float(&mut self, f: f64) {
        if f.is_nan() {
            self.out.push_str("@float \"nan\"");
        } else if f == f64::INFINITY {
            self.out.push_str("@float \"inf\"");
        } else if f == f64::NEG_INFINITY {
            self.out.push_str("@float \"-inf\"");
        } else {
            self.write_decimal(f);
        }
    }

    /// Writes a finite float so it reads back as a float, not an
    /// integer: a trailing `.0` is added when the digits alone would be
    /// an integer literal.
    fn write_decimal(&mut self, f: f64) {
        let s = f.to_string();
        let needs_point = f.is_finite() && !s.contains(['.', 'e', 'E']);
        self.out.push_str(&s);
        if needs_point {
            self.out.push_str(".0");
        }
    }
}
