//! Property-based round-trip tests.

use arson::{dump, parse, Map, Value};
use proptest::prelude::*;

fn roundtrip(value: &Value) -> Value {
    let text = dump(value).unwrap_or_else(|e| panic!("dump: {e}"));
    parse(&text).unwrap_or_else(|e| panic!("reparse of {text:?}: {e}"))
}

proptest! {
    #[test]
    fn integers_round_trip(n in any::<i64>()) {
        prop_assert_eq!(roundtrip(&Value::from(n)), Value::from(n));
    }

    #[test]
    fn floats_round_trip_bit_exact(f in any::<f64>()) {
        match roundtrip(&Value::from(f)) {
            Value::Float(g) => {
                if f.is_nan() {
                    prop_assert!(g.is_nan());
                } else {
                    prop_assert_eq!(g.to_bits(), f.to_bits());
                }
            }
            other => {
                prop_assert!(false, "came back as {}", other.kind());
            }
        }
    }

    #[test]
    fn strings_round_trip(s in any::<String>()) {
        prop_assert_eq!(roundtrip(&Value::from(s.clone())), Value::from(s));
    }

    #[test]
    fn bytes_round_trip(b in any::<Vec<u8>>()) {
        prop_assert_eq!(roundtrip(&Value::from(b.clone())), Value::from(b));
    }

    #[test]
    fn lists_round_trip(items in prop::collection::vec(any::<i64>(), 0..16)) {
        let value = Value::List(items.into_iter().map(Value::from).collect());
        prop_assert_eq!(roundtrip(&value), value);
    }

    #[test]
    fn sets_round_trip(items in prop::collection::btree_set(any::<i64>(), 0..16)) {
        let value = Value::Set(items.into_iter().map(Value::from).collect());
        prop_assert_eq!(roundtrip(&value), value);
    }

    #[test]
    fn objects_round_trip(
        entries in prop::collection::btree_map(any::<String>(), any::<i64>(), 0..8)
    ) {
        let map: Map = entries
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect();
        let value = Value::Object(map);
        prop_assert_eq!(roundtrip(&value), value);
    }

    #[test]
    fn dump_is_a_fixed_point(items in prop::collection::vec(any::<f64>(), 0..8)) {
        let value = Value::List(items.into_iter().map(Value::from).collect());
        let once = dump(&value).unwrap();
        let twice = dump(&parse(&once).unwrap()).unwrap();
        prop_assert_eq!(once, twice);
    }
}
