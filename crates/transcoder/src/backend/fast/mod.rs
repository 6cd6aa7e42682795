//! Fast backend: direct buffer writer and table-driven parser.

mod constants;
mod decoder;
mod encoder;

pub use decoder::FastDecoder;
pub use encoder::FastEncoder;

use crate::constants::BackendKind;
use crate::native_value::NativeValue;

use super::{CodecBackend, CodecError};

/// Writes JSON straight into a [`json_transcoder_buffers::Writer`] and
/// parses with a recursive-descent parser dispatching on a lead-byte table.
///
/// Output is byte-identical to [`super::ReferenceBackend`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FastBackend;

impl FastBackend {
    pub fn new() -> Self {
        Self
    }

    pub fn id(&self) -> &'static str {
        "json-fast"
    }

    pub fn serialize(&self, value: &NativeValue) -> Result<Vec<u8>, CodecError> {
        Ok(FastEncoder::new().encode(value))
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<NativeValue, CodecError> {
        FastDecoder::new().decode(bytes)
    }
}

impl CodecBackend for FastBackend {
    fn id(&self) -> &'static str {
        self.id()
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Fast
    }

    fn serialize(&self, value: &NativeValue) -> Result<Vec<u8>, CodecError> {
        self.serialize(value)
    }

    fn parse(&self, bytes: &[u8]) -> Result<NativeValue, CodecError> {
        self.parse(bytes)
    }
}
