//! The in-memory representation of an ARSON value.
//!
//! [`Value`] is a single closed sum type covering every representable ARSON
//! value. Values are constructed once — by the parser, by the host
//! application, or via the [`arson!`](crate::arson) macro — and are not
//! mutated afterwards; transformation happens through the optional
//! parse/dump transforms or by building a new tree.
//!
//! ## Creating values
//!
//! ```rust
//! use arson::Value;
//!
//! let null = Value::Null;
//! let flag = Value::from(true);
//! let count = Value::from(42);
//! let name = Value::from("hello");
//! ```
//!
//! ## Type checking and extraction
//!
//! ```rust
//! use arson::Value;
//!
//! let value = Value::from(42);
//! assert!(value.is_int());
//! assert_eq!(value.as_i64(), Some(42));
//! assert_eq!(value.as_str(), None);
//! ```
//!
//! ## Equality
//!
//! `Value` implements `PartialEq` but not `Eq`: a `Float(NaN)` never equals
//! itself, mirroring IEEE semantics through the whole tree. Set elements
//! are deduplicated with this same equality.

use crate::Map;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use num_complex::Complex64;
use num_traits::ToPrimitive;

/// A dynamically-typed ARSON value.
///
/// The two map variants share the same container: [`Object`](Value::Object)
/// keeps insertion order and serializes as plain `{...}`, while
/// [`Dict`](Value::Dict) is the explicitly unordered mapping written as
/// `@dict {...}` with sorted keys.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// Arbitrary-precision signed integer.
    Int(BigInt),
    Float(f64),
    Complex(Complex64),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    /// Unique elements, kept in insertion order.
    Set(Vec<Value>),
    Object(Map),
    Dict(Map),
    /// UTC instant with microsecond precision.
    Datetime(DateTime<Utc>),
    /// Signed duration in fractional seconds.
    Duration(f64),
    /// A host-defined value: tag name plus payload, bridged through the
    /// codec's extension hooks.
    Extension(String, Box<Value>),
}

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns `true` if the value is a text string.
    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Returns `true` if the value is a byte string.
    #[inline]
    #[must_use]
    pub const fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    /// Returns `true` if the value is a list.
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns `true` if the value is a set.
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Value::Set(_))
    }

    /// Returns `true` for either map variant.
    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Dict(_))
    }

    /// If the value is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is an integer that fits in an `i64`, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => i.to_i64(),
            _ => None,
        }
    }

    /// If the value is numeric (integer or float), returns it as an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => i.to_f64(),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a text string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a byte string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// If the value is a list or set, returns its elements.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is a map of either kind, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Object(map) | Value::Dict(map) => Some(map),
            _ => None,
        }
    }

    /// If the value is a datetime, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Datetime(dt) => Some(dt),
            _ => None,
        }
    }

    /// The name of the value's kind, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Complex(_) => "complex",
            Value::Text(_) => "string",
            Value::Bytes(_) => "bytestring",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Object(_) => "object",
            Value::Dict(_) => "dict",
            Value::Datetime(_) => "datetime",
            Value::Duration(_) => "duration",
            Value::Extension(..) => "extension",
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(BigInt::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(BigInt::from(value))
    }
}

impl From<i128> for Value {
    fn from(value: i128) -> Self {
        Value::Int(BigInt::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(BigInt::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Int(BigInt::from(value))
    }
}

impl From<u128> for Value {
    fn from(value: u128) -> Self {
        Value::Int(BigInt::from(value))
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<Complex64> for Value {
    fn from(value: Complex64) -> Self {
        Value::Complex(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Datetime(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(42).as_i64(), Some(42));
        assert_eq!(Value::from(42).as_f64(), Some(42.0));
        assert_eq!(Value::from(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::from("hi").as_str(), Some("hi"));
        assert_eq!(Value::from(vec![1u8, 2]).as_bytes(), Some(&[1u8, 2][..]));
        assert_eq!(Value::from(42).as_str(), None);
    }

    #[test]
    fn huge_int_does_not_fit_i64() {
        let big = Value::Int(BigInt::from(u128::MAX));
        assert!(big.is_int());
        assert_eq!(big.as_i64(), None);
        assert!(big.as_f64().is_some());
    }

    #[test]
    fn nan_is_not_equal_to_itself() {
        let nan = Value::Float(f64::NAN);
        assert_ne!(nan, nan.clone());
        assert_ne!(
            Value::List(vec![Value::Float(f64::NAN)]),
            Value::List(vec![Value::Float(f64::NAN)])
        );
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::from("x").kind(), "string");
        assert_eq!(Value::Set(vec![]).kind(), "set");
        assert_eq!(Value::Extension("point".into(), Box::new(Value::Null)).kind(), "extension");
    }

    #[test]
    fn map_variants() {
        let map = Map::new();
        assert!(Value::Object(map.clone()).is_map());
        assert!(Value::Dict(map).is_map());
        assert!(!Value::Null.is_map());
    }
}
