//! [`Transcoder`]: registry, envelope keys and a codec backend bundled
//! behind the `encode`/`decode` entry points.

use serde::{Deserialize, Serialize};

use crate::backend::CodecBackend;
use crate::constants::{BackendKind, DATA_KEY, TYPE_KEY};
use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{Result, TranscoderError};
use crate::native_value::NativeValue;
use crate::registry::Registry;
use crate::transcoding::{Transcoding, TypedTranscoding};
use crate::value::Value;

/// Transcoder configuration. Every field has a default, so a partial (or
/// empty) document deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscoderOptions {
    pub backend: BackendKind,
    pub type_key: String,
    pub data_key: String,
}

impl Default for TranscoderOptions {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            type_key: TYPE_KEY.to_owned(),
            data_key: DATA_KEY.to_owned(),
        }
    }
}

impl TranscoderOptions {
    pub fn validate(&self) -> Result<()> {
        if self.type_key == self.data_key {
            return Err(TranscoderError::InvalidOptions(format!(
                "type_key and data_key must differ, both are `{}`",
                self.type_key
            )));
        }
        Ok(())
    }
}

/// Converts [`Value`] trees to bytes and back.
///
/// Register transcodings first, then share the transcoder (`&` or `Arc`)
/// for concurrent `encode`/`decode` calls.
pub struct Transcoder {
    registry: Registry,
    options: TranscoderOptions,
    backend: Box<dyn CodecBackend>,
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Transcoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcoder")
            .field("registry", &self.registry)
            .field("options", &self.options)
            .field("backend", &self.backend.id())
            .finish()
    }
}

impl Transcoder {
    /// Default options with [`Registry::with_defaults`].
    pub fn new() -> Self {
        Self::build(Registry::with_defaults(), TranscoderOptions::default())
    }

    pub fn with_options(options: TranscoderOptions) -> Result<Self> {
        Self::with_registry(Registry::with_defaults(), options)
    }

    pub fn with_registry(registry: Registry, options: TranscoderOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(registry, options))
    }

    fn build(registry: Registry, options: TranscoderOptions) -> Self {
        let backend = options.backend.instantiate();
        tracing::debug!(
            backend = backend.id(),
            type_key = %options.type_key,
            data_key = %options.data_key,
            transcodings = registry.len(),
            "transcoder ready"
        );
        Self {
            registry,
            options,
            backend,
        }
    }

    /// Swaps the codec backend; `options().backend` follows it.
    pub fn with_backend(mut self, backend: Box<dyn CodecBackend>) -> Self {
        self.options.backend = backend.kind();
        self.backend = backend;
        self
    }

    pub fn register<T: Transcoding>(&mut self, transcoding: T) -> Result<()> {
        self.registry.register(transcoding)
    }

    pub fn register_typed<T: TypedTranscoding>(&mut self, transcoding: T) -> Result<()> {
        self.registry.register_typed(transcoding)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn options(&self) -> &TranscoderOptions {
        &self.options
    }

    pub fn backend_id(&self) -> &'static str {
        self.backend.id()
    }

    pub fn encode(&self, value: &Value) -> Result<Vec<u8>> {
        let tree = self.encode_to_native(value)?;
        self.backend
            .serialize(&tree)
            .map_err(TranscoderError::Serialize)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Value> {
        let tree = self.backend.parse(bytes)?;
        self.decode_native(tree)
    }

    /// The tree `encode` hands to the backend.
    pub fn encode_to_native(&self, value: &Value) -> Result<NativeValue> {
        Encoder::new(&self.registry, &self.options.type_key, &self.options.data_key).encode(value)
    }

    pub fn decode_native(&self, tree: NativeValue) -> Result<Value> {
        Decoder::new(&self.registry, &self.options.type_key, &self.options.data_key).decode(tree)
    }
}
