//! Top-level constants for json-transcoder.

use serde::{Deserialize, Serialize};

/// Default envelope key carrying the transcoding name.
pub const TYPE_KEY: &str = "_type_";

/// Default envelope key carrying the encoded payload.
pub const DATA_KEY: &str = "_data_";

/// Containers may nest at most `MAX_DEPTH - 1` levels deep when parsing.
pub const MAX_DEPTH: usize = 128;

/// Selects which codec backend a transcoder uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// `serde_json` round trip through `serde_json::Value`.
    Reference,
    /// Direct buffer writer and table-driven parser.
    #[default]
    Fast,
}
