//! Serde integration, enabled by the `serde` feature.
//!
//! [`Value`] serializes into the closest data-model equivalent of each
//! kind: sets and lists become sequences, both map kinds become maps,
//! datetimes become their canonical string form, integers degrade to a
//! decimal string only when they exceed 64 bits. Deserialization builds
//! the JSON-shaped subset of kinds; tagged kinds have no self-describing
//! wire form to recover from.

use crate::{Map, Value};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use std::fmt;

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => {
                if let Some(n) = i.to_i64() {
                    serializer.serialize_i64(n)
                } else if let Some(n) = i.to_u64() {
                    serializer.serialize_u64(n)
                } else {
                    serializer.serialize_str(&i.to_string())
                }
            }
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Complex(c) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&c.re)?;
                seq.serialize_element(&c.im)?;
                seq.end()
            }
            Value::Text(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::List(items) | Value::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) | Value::Dict(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, item) in map.iter() {
                    out.serialize_entry(key, item)?;
                }
                out.end()
            }
            Value::Datetime(dt) => {
                serializer.serialize_str(&dt.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string())
            }
            Value::Duration(seconds) => serializer.serialize_f64(*seconds),
            Value::Extension(name, payload) => {
                let mut out = serializer.serialize_map(Some(1))?;
                out.serialize_entry(name, payload)?;
                out.end()
            }
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any valid ARSON value")
    }

    fn visit_bool<E>(self, b: bool) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E>(self, n: i64) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Int(BigInt::from(n)))
    }

    fn visit_u64<E>(self, n: u64) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Int(BigInt::from(n)))
    }

    fn visit_f64<E>(self, f: f64) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Float(f))
    }

    fn visit_str<E>(self, s: &str) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Text(s.to_string()))
    }

    fn visit_string<E>(self, s: String) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Text(s))
    }

    fn visit_bytes<E>(self, b: &[u8]) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Bytes(b.to_vec()))
    }

    fn visit_byte_buf<E>(self, b: Vec<u8>) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Bytes(b))
    }

    fn visit_none<E>(self) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_unit<E>(self) -> Result<Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Map::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, item)) = access.next_entry::<String, Value>()? {
            map.insert(key, item);
        }
        Ok(Value::Object(map))
    }
}

impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}
