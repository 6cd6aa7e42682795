//! Codec backend trait.

use crate::constants::BackendKind;
use crate::native_value::NativeValue;

use super::CodecError;

/// Converts between bytes and [`NativeValue`] trees.
///
/// Backends hold no per-call state, so one instance serves concurrent
/// callers.
pub trait CodecBackend: Send + Sync {
    fn id(&self) -> &'static str;
    fn kind(&self) -> BackendKind;
    fn serialize(&self, value: &NativeValue) -> Result<Vec<u8>, CodecError>;
    fn parse(&self, bytes: &[u8]) -> Result<NativeValue, CodecError>;
}
