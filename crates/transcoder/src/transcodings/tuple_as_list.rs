//! [`Tuple`], the fixed-length sequence, carried as a JSON array.

use crate::transcoding::TypedTranscoding;
use crate::value::Value;

/// A fixed-length ordered sequence.
///
/// JSON has a single array shape, so a `Tuple` is not native: it only
/// encodes when [`TupleAsList`] is registered, and decodes back as a
/// `Tuple` rather than a [`Value::Array`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tuple(pub Vec<Value>);

impl Tuple {
    pub fn new(items: Vec<Value>) -> Self {
        Self(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }
}

impl From<Vec<Value>> for Tuple {
    fn from(items: Vec<Value>) -> Self {
        Self(items)
    }
}

impl From<Tuple> for Value {
    fn from(tuple: Tuple) -> Self {
        Value::custom(tuple)
    }
}

pub struct TupleAsList;

impl TypedTranscoding for TupleAsList {
    type Target = Tuple;
    const NAME: &'static str = "tuple_as_list";

    fn encode(&self, value: &Tuple) -> Value {
        Value::Array(value.0.clone())
    }

    fn decode(&self, data: Value) -> Result<Tuple, String> {
        match data {
            Value::Array(items) => Ok(Tuple(items)),
            other => Err(format!("expected array, found {}", other.kind())),
        }
    }
}
