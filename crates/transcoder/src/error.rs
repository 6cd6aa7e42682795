//! Transcoder error type.

use thiserror::Error;

use crate::backend::CodecError;

/// Errors surfaced by registration, encoding and decoding.
///
/// Every failure aborts the whole call; no partial output is produced.
#[derive(Debug, Error)]
pub enum TranscoderError {
    #[error("a transcoding for type `{type_name}` is already registered")]
    DuplicateType { type_name: String },
    #[error("a transcoding named `{name}` is already registered")]
    DuplicateName { name: String },
    #[error("object of type `{type_name}` is not serializable, register a transcoding for this type")]
    UnsupportedType { type_name: String },
    #[error("malformed input: {0}")]
    MalformedInput(#[from] CodecError),
    #[error("data serialized with name `{name}` is not deserializable, register a transcoding for this name")]
    UnknownTypeName { name: String },
    #[error("transcoding `{name}` rejected its payload: {reason}")]
    InvalidPayload { name: String, reason: String },
    #[error("value nests deeper than {limit} containers")]
    RecursionLimit { limit: usize },
    #[error("backend failed to serialize: {0}")]
    Serialize(CodecError),
    #[error("invalid transcoder options: {0}")]
    InvalidOptions(String),
}

pub type Result<T> = std::result::Result<T, TranscoderError>;
