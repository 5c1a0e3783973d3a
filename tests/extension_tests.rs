//! Tests for the extension hooks and the parse/dump transforms.

use arson::{arson, Codec, Error, Value};

fn extension_codec() -> Codec {
    Codec::new()
        .with_tagged_to_object(|name, payload| {
            Ok(Value::Extension(name.to_string(), Box::new(payload)))
        })
        .with_object_to_tagged(|value| match value {
            Value::Extension(name, payload) => Ok((name.clone(), (**payload).clone())),
            other => Err(Error::custom(format!("no tag for {}", other.kind()))),
        })
}

#[test]
fn unknown_tags_round_trip_through_hooks() {
    let codec = extension_codec();
    let text = "@point {\"x\": 1, \"y\": 2}";
    let value = codec.parse(text).unwrap();
    match &value {
        Value::Extension(name, payload) => {
            assert_eq!(name, "point");
            assert_eq!(**payload, arson!({"x": 1, "y": 2}));
        }
        other => panic!("expected an extension, got {}", other.kind()),
    }
    assert_eq!(codec.dump(&value).unwrap(), text);
}

#[test]
fn hooks_see_every_payload_shape() {
    let codec = extension_codec();
    for (text, payload) in [
        ("@blob 'abc'", Value::from("abc")),
        ("@blob [1, 2]", arson!([1, 2])),
        ("@blob 42", Value::from(42)),
        ("@blob null", Value::Null),
        ("@blob {}", arson!({})),
    ] {
        let value = codec.parse(text).unwrap();
        assert_eq!(
            value,
            Value::Extension("blob".to_string(), Box::new(payload)),
            "{text}"
        );
    }
}

#[test]
fn record_is_only_special_on_objects() {
    let codec = extension_codec();
    assert_eq!(codec.parse("@record {}").unwrap(), arson!({}));
    // On any other shape it is an ordinary extension tag.
    assert_eq!(
        codec.parse("@record [1]").unwrap(),
        Value::Extension("record".to_string(), Box::new(arson!([1])))
    );
}

#[test]
fn missing_hooks_are_reported_not_panicked() {
    let codec = Codec::new();

    let err = codec.parse("@point {}").unwrap_err();
    assert!(matches!(
        err,
        Error::NoHandler { hook: "tagged_to_object", .. }
    ));
    assert!(err.to_string().contains("point"), "{err}");

    let value = Value::Extension("point".to_string(), Box::new(Value::Null));
    let err = codec.dump(&value).unwrap_err();
    assert!(matches!(
        err,
        Error::NoHandler { hook: "object_to_tagged", .. }
    ));
}

#[test]
fn hook_failures_propagate_unchanged() {
    let codec = Codec::new().with_tagged_to_object(|name, _| {
        Err(Error::custom(format!("tag {name} is not supported here")))
    });
    let err = codec.parse("@widget 1").unwrap_err();
    assert_eq!(err.to_string(), "tag widget is not supported here");
}

#[test]
fn parse_with_runs_bottom_up() {
    let codec = Codec::new();
    let mut seen = Vec::new();
    let value = codec
        .parse_with("{'a': [1, 2]}", &mut |value| {
            seen.push(value.kind());
            value
        })
        .unwrap();
    assert_eq!(value, arson!({"a": [1, 2]}));
    // Innermost values first, the key included, the object last.
    assert_eq!(seen, vec!["string", "int", "int", "list", "object"]);
}

#[test]
fn parse_with_can_rewrite_values() {
    let codec = Codec::new();
    let value = codec
        .parse_with("[1, 2, 3]", &mut |value| match value.as_i64() {
            Some(n) => Value::from(n * 10),
            None => value,
        })
        .unwrap();
    assert_eq!(value, arson!([10, 20, 30]));
}

#[test]
fn dump_with_substitutes_top_down() {
    let codec = Codec::new();
    let doc = arson!({"keep": 1, "secret": "hunter2"});
    let text = codec
        .dump_with(&doc, &mut |value| {
            value.as_str().and_then(|s| {
                (s == "hunter2").then(|| Value::from("[redacted]"))
            })
        })
        .unwrap();
    assert_eq!(text, r#"{"keep": 1, "secret": "[redacted]"}"#);
}

#[test]
fn dump_with_none_means_unchanged() {
    let codec = Codec::new();
    let doc = arson!([1, [2, 3]]);
    let text = codec.dump_with(&doc, &mut |_| None).unwrap();
    assert_eq!(text, "[1, [2, 3]]");
}
