//! Rewrites a [`Value`] into a [`NativeValue`], enveloping custom values.

use std::collections::BTreeMap;

use crate::constants::MAX_DEPTH;
use crate::error::{Result, TranscoderError};
use crate::native_value::NativeValue;
use crate::registry::Registry;
use crate::value::{CustomValue, Value};

/// Depth-first encoder bound to a registry and a pair of envelope keys.
///
/// Output nests at most `MAX_DEPTH - 1` containers, envelopes included, so
/// whatever it produces parses back.
pub struct Encoder<'a> {
    registry: &'a Registry,
    type_key: &'a str,
    data_key: &'a str,
}

impl<'a> Encoder<'a> {
    pub fn new(registry: &'a Registry, type_key: &'a str, data_key: &'a str) -> Self {
        Self {
            registry,
            type_key,
            data_key,
        }
    }

    pub fn encode(&self, value: &Value) -> Result<NativeValue> {
        self.encode_at(value, 0)
    }

    fn encode_at(&self, value: &Value, depth: usize) -> Result<NativeValue> {
        match value {
            Value::Null => Ok(NativeValue::Null),
            Value::Bool(b) => Ok(NativeValue::Bool(*b)),
            Value::Integer(i) => Ok(NativeValue::Integer(*i)),
            Value::UInteger(u) => Ok(NativeValue::UInteger(*u)),
            Value::Float(f) => Ok(NativeValue::Float(*f)),
            Value::Str(s) => Ok(NativeValue::Str(s.clone())),
            Value::Array(items) => self.encode_arr(items, depth),
            Value::Object(map) => self.encode_obj(map, depth),
            Value::Custom(custom) => self.encode_custom(custom, depth),
        }
    }

    fn enter(depth: usize) -> Result<usize> {
        let depth = depth + 1;
        if depth >= MAX_DEPTH {
            return Err(TranscoderError::RecursionLimit {
                limit: MAX_DEPTH - 1,
            });
        }
        Ok(depth)
    }

    fn encode_arr(&self, items: &[Value], depth: usize) -> Result<NativeValue> {
        let depth = Self::enter(depth)?;
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            out.push(self.encode_at(item, depth)?);
        }
        Ok(NativeValue::Array(out))
    }

    fn encode_obj(&self, map: &BTreeMap<String, Value>, depth: usize) -> Result<NativeValue> {
        let depth = Self::enter(depth)?;
        let mut out = BTreeMap::new();
        for (key, value) in map {
            out.insert(key.clone(), self.encode_at(value, depth)?);
        }
        Ok(NativeValue::Object(out))
    }

    /// The payload may itself hold custom values, so the whole envelope is
    /// encoded again rather than just wrapped.
    fn encode_custom(&self, custom: &CustomValue, depth: usize) -> Result<NativeValue> {
        let key = custom.type_key();
        let transcoding = self.registry.lookup_by_type(&key).ok_or_else(|| {
            TranscoderError::UnsupportedType {
                type_name: key.name().to_owned(),
            }
        })?;
        let payload = transcoding.encode(custom)?;
        let mut envelope = BTreeMap::new();
        envelope.insert(
            self.type_key.to_owned(),
            Value::Str(transcoding.name().to_owned()),
        );
        envelope.insert(self.data_key.to_owned(), payload);
        self.encode_obj(&envelope, depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DATA_KEY, TYPE_KEY};
    use crate::transcoding::TypedTranscoding;
    use crate::transcodings::{Tuple, TupleAsList};

    #[derive(Debug, PartialEq)]
    struct Wrapper(Tuple);

    struct WrapperAsTuple;

    impl TypedTranscoding for WrapperAsTuple {
        type Target = Wrapper;
        const NAME: &'static str = "wrapper";

        fn encode(&self, value: &Wrapper) -> Value {
            Value::custom(value.0.clone())
        }

        fn decode(&self, data: Value) -> std::result::Result<Wrapper, String> {
            data.downcast_ref::<Tuple>()
                .cloned()
                .map(Wrapper)
                .ok_or_else(|| "expected tuple".to_owned())
        }
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register_typed(TupleAsList).unwrap();
        registry.register_typed(WrapperAsTuple).unwrap();
        registry
    }

    fn envelope(name: &str, data: NativeValue) -> NativeValue {
        NativeValue::object([(TYPE_KEY, NativeValue::from(name)), (DATA_KEY, data)])
    }

    #[test]
    fn native_passes_through() {
        let registry = Registry::new();
        let encoder = Encoder::new(&registry, TYPE_KEY, DATA_KEY);
        let value = Value::object([
            ("a", Value::Array(vec![1.into(), 2.5.into(), Value::Null])),
            ("b", Value::from("x")),
        ]);
        let expected = NativeValue::object([
            (
                "a",
                NativeValue::Array(vec![1.into(), 2.5.into(), NativeValue::Null]),
            ),
            ("b", NativeValue::from("x")),
        ]);
        assert_eq!(encoder.encode(&value).unwrap(), expected);
    }

    #[test]
    fn custom_becomes_envelope() {
        let registry = registry();
        let encoder = Encoder::new(&registry, TYPE_KEY, DATA_KEY);
        let value = Value::from(Tuple::from(vec![Value::from(1), Value::from(2)]));
        assert_eq!(
            encoder.encode(&value).unwrap(),
            envelope("tuple_as_list", NativeValue::Array(vec![1.into(), 2.into()]))
        );
    }

    #[test]
    fn payload_is_encoded_again() {
        let registry = registry();
        let encoder = Encoder::new(&registry, TYPE_KEY, DATA_KEY);
        let inner = Tuple::from(vec![Value::from(Tuple::from(vec![Value::from("deep")]))]);
        let value = Value::custom(Wrapper(inner));
        let expected = envelope(
            "wrapper",
            envelope(
                "tuple_as_list",
                NativeValue::Array(vec![envelope(
                    "tuple_as_list",
                    NativeValue::Array(vec!["deep".into()]),
                )]),
            ),
        );
        assert_eq!(encoder.encode(&value).unwrap(), expected);
    }

    #[test]
    fn unregistered_type_fails() {
        let registry = registry();
        let encoder = Encoder::new(&registry, TYPE_KEY, DATA_KEY);
        let value = Value::Array(vec![1.into(), Value::custom(42u16)]);
        let err = encoder.encode(&value).unwrap_err();
        assert!(matches!(err, TranscoderError::UnsupportedType { ref type_name } if type_name == "u16"));
    }

    #[test]
    fn custom_envelope_keys() {
        let registry = registry();
        let encoder = Encoder::new(&registry, "$t", "$v");
        let value = Value::from(Tuple::default());
        assert_eq!(
            encoder.encode(&value).unwrap(),
            NativeValue::object([
                ("$t", NativeValue::from("tuple_as_list")),
                ("$v", NativeValue::Array(vec![])),
            ])
        );
    }

    fn nested_arrays(levels: usize) -> Value {
        let mut value = Value::from(1);
        for _ in 0..levels {
            value = Value::Array(vec![value]);
        }
        value
    }

    fn nested_tuples(levels: usize) -> Value {
        let mut value = Value::from(1);
        for _ in 0..levels {
            value = Value::from(Tuple::new(vec![value]));
        }
        value
    }

    #[test]
    fn depth_limit_counts_containers() {
        let registry = Registry::new();
        let encoder = Encoder::new(&registry, TYPE_KEY, DATA_KEY);
        assert!(encoder.encode(&nested_arrays(MAX_DEPTH - 1)).is_ok());
        let err = encoder.encode(&nested_arrays(MAX_DEPTH)).unwrap_err();
        assert!(matches!(err, TranscoderError::RecursionLimit { limit } if limit == MAX_DEPTH - 1));
    }

    #[test]
    fn depth_limit_counts_envelopes() {
        let registry = registry();
        let encoder = Encoder::new(&registry, TYPE_KEY, DATA_KEY);
        // Each tuple is an envelope object around an array.
        assert!(encoder.encode(&nested_tuples(63)).is_ok());
        assert!(matches!(
            encoder.encode(&nested_tuples(64)),
            Err(TranscoderError::RecursionLimit { .. })
        ));
    }

    #[test]
    fn very_deep_value_fails_without_overflow() {
        let registry = Registry::new();
        let encoder = Encoder::new(&registry, TYPE_KEY, DATA_KEY);
        assert!(matches!(
            encoder.encode(&nested_arrays(1_000)),
            Err(TranscoderError::RecursionLimit { .. })
        ));
    }
}
