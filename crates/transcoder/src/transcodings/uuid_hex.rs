//! `uuid::Uuid` as 32-character lowercase hex text.

use uuid::Uuid;

use crate::transcoding::TypedTranscoding;
use crate::value::Value;

pub struct UuidAsHex;

impl TypedTranscoding for UuidAsHex {
    type Target = Uuid;
    const NAME: &'static str = "uuid_hex";

    fn encode(&self, value: &Uuid) -> Value {
        Value::Str(value.simple().to_string())
    }

    /// Hyphenated and braced forms are accepted too.
    fn decode(&self, data: Value) -> Result<Uuid, String> {
        match data {
            Value::Str(hex) => Uuid::parse_str(&hex).map_err(|e| e.to_string()),
            other => Err(format!("expected hex text, found {}", other.kind())),
        }
    }
}
