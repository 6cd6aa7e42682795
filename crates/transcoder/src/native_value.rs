//! [`NativeValue`]: the closed value tree understood by codec backends.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

/// A value built only from shapes the wire format expresses directly.
///
/// Integers compare numerically across `Integer` and `UInteger`, so
/// `Integer(5) == UInteger(5)`. Parsers only produce `UInteger` for values
/// above `i64::MAX`.
#[derive(Debug, Clone)]
pub enum NativeValue {
    Null,
    Bool(bool),
    Integer(i64),
    UInteger(u64),
    Float(f64),
    Str(String),
    Array(Vec<NativeValue>),
    Object(BTreeMap<String, NativeValue>),
}

impl NativeValue {
    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Bool(_) => "bool",
            NativeValue::Integer(_) | NativeValue::UInteger(_) => "integer",
            NativeValue::Float(_) => "float",
            NativeValue::Str(_) => "string",
            NativeValue::Array(_) => "array",
            NativeValue::Object(_) => "object",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NativeValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[NativeValue]> {
        match self {
            NativeValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, NativeValue>> {
        match self {
            NativeValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Builds an object from key/value pairs; later duplicates win.
    pub fn object<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, NativeValue)>,
    {
        NativeValue::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Numeric equality between the two integer representations.
pub(crate) fn int_eq(a: Option<i128>, b: Option<i128>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

impl NativeValue {
    fn as_i128(&self) -> Option<i128> {
        match self {
            NativeValue::Integer(i) => Some(*i as i128),
            NativeValue::UInteger(u) => Some(*u as i128),
            _ => None,
        }
    }
}

impl PartialEq for NativeValue {
    fn eq(&self, other: &Self) -> bool {
        use NativeValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Integer(_) | UInteger(_), Integer(_) | UInteger(_)) => {
                int_eq(self.as_i128(), other.as_i128())
            }
            (Float(a), Float(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Object(a), Object(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for NativeValue {
    fn from(b: bool) -> Self {
        NativeValue::Bool(b)
    }
}

impl From<i32> for NativeValue {
    fn from(i: i32) -> Self {
        NativeValue::Integer(i as i64)
    }
}

impl From<i64> for NativeValue {
    fn from(i: i64) -> Self {
        NativeValue::Integer(i)
    }
}

impl From<u64> for NativeValue {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => NativeValue::Integer(i),
            Err(_) => NativeValue::UInteger(u),
        }
    }
}

impl From<f64> for NativeValue {
    fn from(f: f64) -> Self {
        NativeValue::Float(f)
    }
}

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        NativeValue::Str(s.to_owned())
    }
}

impl From<String> for NativeValue {
    fn from(s: String) -> Self {
        NativeValue::Str(s)
    }
}

impl From<Vec<NativeValue>> for NativeValue {
    fn from(items: Vec<NativeValue>) -> Self {
        NativeValue::Array(items)
    }
}

impl From<BTreeMap<String, NativeValue>> for NativeValue {
    fn from(map: BTreeMap<String, NativeValue>) -> Self {
        NativeValue::Object(map)
    }
}

impl From<JsonValue> for NativeValue {
    fn from(v: JsonValue) -> Self {
        match v {
            JsonValue::Null => NativeValue::Null,
            JsonValue::Bool(b) => NativeValue::Bool(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    NativeValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    NativeValue::UInteger(u)
                } else {
                    n.as_f64().map_or(NativeValue::Null, NativeValue::Float)
                }
            }
            JsonValue::String(s) => NativeValue::Str(s),
            JsonValue::Array(items) => {
                NativeValue::Array(items.into_iter().map(NativeValue::from).collect())
            }
            JsonValue::Object(map) => NativeValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, NativeValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Non-finite floats have no JSON form and become `null`.
impl From<&NativeValue> for JsonValue {
    fn from(v: &NativeValue) -> Self {
        match v {
            NativeValue::Null => JsonValue::Null,
            NativeValue::Bool(b) => JsonValue::Bool(*b),
            NativeValue::Integer(i) => JsonValue::from(*i),
            NativeValue::UInteger(u) => JsonValue::from(*u),
            NativeValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            NativeValue::Str(s) => JsonValue::String(s.clone()),
            NativeValue::Array(items) => JsonValue::Array(items.iter().map(JsonValue::from).collect()),
            NativeValue::Object(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<NativeValue> for JsonValue {
    fn from(v: NativeValue) -> Self {
        JsonValue::from(&v)
    }
}
