//! Reference backend: a plain `serde_json` round trip.

use serde_json::Value as JsonValue;

use crate::constants::BackendKind;
use crate::native_value::NativeValue;

use super::{CodecBackend, CodecError};

/// Converts through [`serde_json::Value`]. Simple and portable; the fast
/// backend is checked against it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceBackend;

impl ReferenceBackend {
    pub fn new() -> Self {
        Self
    }

    pub fn id(&self) -> &'static str {
        "json-reference"
    }

    pub fn serialize(&self, value: &NativeValue) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(&JsonValue::from(value))?)
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<NativeValue, CodecError> {
        let value: JsonValue = serde_json::from_slice(bytes)?;
        Ok(NativeValue::from(value))
    }
}

impl CodecBackend for ReferenceBackend {
    fn id(&self) -> &'static str {
        self.id()
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Reference
    }

    fn serialize(&self, value: &NativeValue) -> Result<Vec<u8>, CodecError> {
        self.serialize(value)
    }

    fn parse(&self, bytes: &[u8]) -> Result<NativeValue, CodecError> {
        self.parse(bytes)
    }
}
