//! Rebuilds a [`Value`] from a [`NativeValue`], innermost envelopes first.

use std::collections::BTreeMap;

use crate::error::{Result, TranscoderError};
use crate::native_value::NativeValue;
use crate::registry::Registry;
use crate::value::Value;

/// Bottom-up decoder bound to a registry and a pair of envelope keys.
///
/// Any object whose key set is exactly `{type_key, data_key}` is treated as
/// an envelope, including application objects that happen to use those two
/// keys.
pub struct Decoder<'a> {
    registry: &'a Registry,
    type_key: &'a str,
    data_key: &'a str,
}

impl<'a> Decoder<'a> {
    pub fn new(registry: &'a Registry, type_key: &'a str, data_key: &'a str) -> Self {
        Self {
            registry,
            type_key,
            data_key,
        }
    }

    pub fn decode(&self, tree: NativeValue) -> Result<Value> {
        match tree {
            NativeValue::Null => Ok(Value::Null),
            NativeValue::Bool(b) => Ok(Value::Bool(b)),
            NativeValue::Integer(i) => Ok(Value::Integer(i)),
            NativeValue::UInteger(u) => Ok(Value::UInteger(u)),
            NativeValue::Float(f) => Ok(Value::Float(f)),
            NativeValue::Str(s) => Ok(Value::Str(s)),
            NativeValue::Array(items) => self.decode_arr(items),
            NativeValue::Object(map) => self.decode_obj(map),
        }
    }

    fn decode_arr(&self, items: Vec<NativeValue>) -> Result<Value> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            out.push(self.decode(item)?);
        }
        Ok(Value::Array(out))
    }

    fn decode_obj(&self, map: BTreeMap<String, NativeValue>) -> Result<Value> {
        let mut out = BTreeMap::new();
        for (key, value) in map {
            out.insert(key, self.decode(value)?);
        }
        match self.split_envelope(&mut out) {
            Some((name, payload)) => self.decode_envelope(name, payload),
            None => Ok(Value::Object(out)),
        }
    }

    /// Takes the discriminator and payload out of `map` when its key set is
    /// exactly the envelope pair; otherwise leaves `map` untouched.
    fn split_envelope(&self, map: &mut BTreeMap<String, Value>) -> Option<(Value, Value)> {
        if map.len() != 2 || !map.contains_key(self.type_key) {
            return None;
        }
        let payload = map.remove(self.data_key)?;
        let name = map.remove(self.type_key)?;
        Some((name, payload))
    }

    fn decode_envelope(&self, name: Value, payload: Value) -> Result<Value> {
        let name = match name {
            Value::Str(name) => name,
            other => {
                return Err(TranscoderError::UnknownTypeName {
                    name: format!("{other:?}"),
                })
            }
        };
        match self.registry.lookup_by_name(&name) {
            Some(transcoding) => transcoding.decode(payload),
            None => Err(TranscoderError::UnknownTypeName { name }),
        }
    }
}
