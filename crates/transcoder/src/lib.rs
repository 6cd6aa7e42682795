//! Pluggable value transcoder: application values with custom Rust types to
//! JSON bytes and back.
//!
//! Custom types travel inside two-key envelopes
//! (`{"_type_": <name>, "_data_": <payload>}`) produced by registered
//! [`Transcoding`]s. Encoding rewrites depth-first until only native shapes
//! remain; decoding rebuilds innermost envelopes first.
//!
//! ```
//! use json_transcoder::{Transcoder, Tuple, Value};
//!
//! let transcoder = Transcoder::new();
//! let value = Value::object([
//!     ("name", Value::from("probe")),
//!     ("coords", Value::from(Tuple::new(vec![1.into(), 2.into()]))),
//! ]);
//! let bytes = transcoder.encode(&value).unwrap();
//! assert_eq!(
//!     bytes,
//!     br#"{"coords":{"_data_":[1,2],"_type_":"tuple_as_list"},"name":"probe"}"#
//! );
//! assert_eq!(transcoder.decode(&bytes).unwrap(), value);
//! ```

mod constants;
mod decoder;
mod encoder;
mod error;
mod native_value;
mod registry;
mod transcoder;
mod transcoding;
mod value;

pub mod backend;
pub mod transcodings;

pub use constants::{BackendKind, DATA_KEY, MAX_DEPTH, TYPE_KEY};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{Result, TranscoderError};
pub use native_value::NativeValue;
pub use registry::Registry;
pub use transcoder::{Transcoder, TranscoderOptions};
pub use transcoding::{Transcoding, TypeKey, TypedTranscoding, TypedTranscodingAdapter};
pub use transcodings::{DatetimeAsIso, Tuple, TupleAsList, UuidAsHex};
pub use value::{AnyValue, CustomValue, Value};
