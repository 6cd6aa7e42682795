//! Codec backend error type.

use thiserror::Error;

/// Parse failures. Offsets are byte positions into the input.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEof(usize),
    #[error("invalid byte at offset {0}")]
    InvalidByte(usize),
    #[error("invalid number at byte {0}")]
    InvalidNumber(usize),
    #[error("invalid escape at byte {0}")]
    InvalidEscape(usize),
    #[error("invalid UTF-8 at byte {0}")]
    InvalidUtf8(usize),
    #[error("control character in string at byte {0}")]
    ControlCharacter(usize),
    #[error("lone surrogate in escape at byte {0}")]
    LoneSurrogate(usize),
    #[error("recursion limit exceeded at byte {0}")]
    RecursionLimit(usize),
    #[error("trailing characters at byte {0}")]
    TrailingCharacters(usize),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
