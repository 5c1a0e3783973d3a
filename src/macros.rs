#[macro_export]
macro_rules! arson {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty list
    ([]) => {
        $crate::Value::List(vec![])
    };

    // Handle non-empty list
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::arson!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::arson!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Fallback for any expression with a From conversion
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Value};

    #[test]
    fn test_arson_macro_primitives() {
        assert_eq!(arson!(null), Value::Null);
        assert_eq!(arson!(true), Value::Bool(true));
        assert_eq!(arson!(false), Value::Bool(false));
        assert_eq!(arson!(42), Value::from(42));
        assert_eq!(arson!(3.5), Value::from(3.5));
        assert_eq!(arson!("hello"), Value::from("hello"));
    }

    #[test]
    fn test_arson_macro_lists() {
        assert_eq!(arson!([]), Value::List(vec![]));

        let list = arson!([1, 2, 3]);
        match list {
            Value::List(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], Value::from(1));
                assert_eq!(items[1], Value::from(2));
                assert_eq!(items[2], Value::from(3));
            }
            _ => panic!("Expected list"),
        }
    }

    #[test]
    fn test_arson_macro_objects() {
        assert_eq!(arson!({}), Value::Object(Map::new()));

        let obj = arson!({
            "name": "Alice",
            "age": 30
        });

        match obj {
            Value::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name"), Some(&Value::from("Alice")));
                assert_eq!(map.get("age"), Some(&Value::from(30)));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_arson_macro_nesting() {
        let doc = arson!({
            "tags": ["a", "b"],
            "meta": {"empty": null}
        });
        let text = crate::dump(&doc).unwrap();
        assert_eq!(text, r#"{"tags": ["a", "b"], "meta": {"empty": null}}"#);
    }
}
