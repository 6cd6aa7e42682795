use std::collections::BTreeMap;

use json_transcoder::backend::{CodecBackend, FastBackend, ReferenceBackend};
use json_transcoder::{BackendKind, NativeValue};
use proptest::prelude::*;

fn both() -> [Box<dyn CodecBackend>; 2] {
    [
        BackendKind::Fast.instantiate(),
        BackendKind::Reference.instantiate(),
    ]
}

/// Same tree, with `-0.0` and `0.0` told apart.
fn assert_same_tree(left: &NativeValue, right: &NativeValue) {
    match (left, right) {
        (NativeValue::Float(a), NativeValue::Float(b)) => {
            assert_eq!(a.to_bits(), b.to_bits(), "{a} vs {b}")
        }
        (NativeValue::Integer(a), NativeValue::Integer(b)) => assert_eq!(a, b),
        (NativeValue::UInteger(a), NativeValue::UInteger(b)) => assert_eq!(a, b),
        (NativeValue::Array(a), NativeValue::Array(b)) => {
            assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(b) {
                assert_same_tree(x, y);
            }
        }
        (NativeValue::Object(a), NativeValue::Object(b)) => {
            assert_eq!(a.keys().collect::<Vec<_>>(), b.keys().collect::<Vec<_>>());
            for (x, y) in a.values().zip(b.values()) {
                assert_same_tree(x, y);
            }
        }
        _ => assert_eq!(left, right),
    }
}

#[test]
fn backends_by_kind() {
    assert_eq!(BackendKind::Fast.instantiate().id(), "json-fast");
    assert_eq!(BackendKind::Reference.instantiate().id(), "json-reference");
    for backend in both() {
        assert_eq!(backend.kind().instantiate().id(), backend.id());
    }
}

#[test]
fn serialize_matrix_is_byte_identical() {
    let values = vec![
        NativeValue::Null,
        NativeValue::Bool(false),
        NativeValue::Integer(0),
        NativeValue::Integer(i64::MIN),
        NativeValue::Integer(i64::MAX),
        NativeValue::UInteger(u64::MAX),
        NativeValue::Float(0.1),
        NativeValue::Float(-0.0),
        NativeValue::Float(1e300),
        NativeValue::Float(5e-324),
        NativeValue::Float(f64::NAN),
        NativeValue::Float(f64::NEG_INFINITY),
        NativeValue::from(""),
        NativeValue::from("\u{0}\u{1f}\u{7f}\"\\/\u{8}\u{c}\n\r\t é 😀"),
        NativeValue::Array(vec![]),
        NativeValue::Object(BTreeMap::new()),
        NativeValue::object([
            ("z", NativeValue::from(vec![NativeValue::Null, NativeValue::from(1.5)])),
            ("a", NativeValue::object([("", NativeValue::from(true))])),
            ("é", NativeValue::from("x")),
        ]),
    ];
    for value in &values {
        let fast = FastBackend.serialize(value).unwrap();
        let reference = ReferenceBackend.serialize(value).unwrap();
        assert_eq!(
            String::from_utf8_lossy(&fast),
            String::from_utf8_lossy(&reference),
            "{value:?}"
        );
    }
}

#[test]
fn parse_matrix_agrees() {
    let inputs = [
        "null",
        " [ true , false ] ",
        "0",
        "-0",
        "-0.0",
        "12",
        "-9223372036854775808",
        "-9223372036854775809",
        "9223372036854775807",
        "9223372036854775808",
        "18446744073709551615",
        "18446744073709551616",
        "123456789012345678901234567890",
        "1E2",
        "1e-2",
        "2.5e+3",
        "0.30000000000000004",
        "1e-400",
        r#""\u00e9\ud83d\ude00\/""#,
        r#"{"a":1,"a":2}"#,
        r#"{"b":{},"a":[[],{}]}"#,
        "\t\r\n{}\n",
    ];
    for input in inputs {
        let fast = FastBackend.parse(input.as_bytes()).unwrap();
        let reference = ReferenceBackend.parse(input.as_bytes()).unwrap();
        assert_same_tree(&fast, &reference);
    }
}

#[test]
fn malformed_matrix_fails_in_both() {
    let inputs: &[&[u8]] = &[
        b"",
        b"   ",
        b"nul",
        b"nulx",
        b"True",
        b"01",
        b"-",
        b"1.",
        b".1",
        b"+1",
        b"1e",
        b"1e400",
        b"-1e400",
        b"NaN",
        b"[1,]",
        b"[1 2]",
        b"{\"a\" 1}",
        b"{\"a\":1,}",
        b"{a:1}",
        b"[1]]",
        b"[1] x",
        b"\"abc",
        b"\"\\x\"",
        b"\"\\u12\"",
        b"\"\\ud800\"",
        b"\"\\udc00\"",
        b"\"\\ud800\\u0041\"",
        b"\"tab\there\"",
        b"\"\xff\"",
        b"\"\xc3\"",
        b"\x0c1",
    ];
    for input in inputs {
        for backend in both() {
            assert!(
                backend.parse(input).is_err(),
                "{} accepted {:?}",
                backend.id(),
                String::from_utf8_lossy(input)
            );
        }
    }
}

#[test]
fn nesting_limit_matches() {
    let nest = |depth: usize| format!("{}{}", "[".repeat(depth), "]".repeat(depth));
    for backend in both() {
        assert!(backend.parse(nest(127).as_bytes()).is_ok(), "{}", backend.id());
        assert!(backend.parse(nest(128).as_bytes()).is_err(), "{}", backend.id());
        assert!(backend.parse(nest(200).as_bytes()).is_err(), "{}", backend.id());
    }
}

fn native_tree() -> impl Strategy<Value = NativeValue> {
    let leaf = prop_oneof![
        Just(NativeValue::Null),
        any::<bool>().prop_map(NativeValue::Bool),
        any::<i64>().prop_map(NativeValue::Integer),
        any::<u64>().prop_map(NativeValue::from),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(NativeValue::Float),
        any::<String>().prop_map(NativeValue::Str),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(NativeValue::Array),
            prop::collection::btree_map(any::<String>(), inner, 0..6)
                .prop_map(NativeValue::Object),
        ]
    })
}

proptest! {
    #[test]
    fn generated_trees_agree(tree in native_tree()) {
        let fast = FastBackend.serialize(&tree).unwrap();
        let reference = ReferenceBackend.serialize(&tree).unwrap();
        prop_assert_eq!(&fast, &reference);

        let from_fast = FastBackend.parse(&fast).unwrap();
        let from_reference = ReferenceBackend.parse(&fast).unwrap();
        prop_assert_eq!(&from_fast, &from_reference);
        prop_assert_eq!(&from_fast, &tree);
    }

    #[test]
    fn arbitrary_bytes_agree_on_acceptance(bytes in prop::collection::vec(any::<u8>(), 0..24)) {
        let fast = FastBackend.parse(&bytes);
        let reference = ReferenceBackend.parse(&bytes);
        prop_assert_eq!(fast.is_ok(), reference.is_ok());
        if let (Ok(fast), Ok(reference)) = (fast, reference) {
            prop_assert_eq!(fast, reference);
        }
    }
}
