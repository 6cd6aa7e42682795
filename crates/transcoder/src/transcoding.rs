//! The [`Transcoding`] plugin seam and its typed authoring helper.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Result, TranscoderError};
use crate::value::{AnyValue, CustomValue, Value};

/// Registry key for a concrete Rust type.
///
/// Equality and hashing use the [`TypeId`] only; the name is carried for
/// error messages.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub(crate) fn from_parts(id: TypeId, name: &'static str) -> Self {
        Self { id, name }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Conversion pair plus identity for exactly one custom value type.
///
/// `encode` may return a tree that still contains [`Value::Custom`] values;
/// the encoder keeps rewriting until only native shapes remain. `decode`
/// receives its payload with every nested envelope already reconstructed.
///
/// Implementations must be pure: the transcoder may call them from several
/// threads at once.
pub trait Transcoding: Send + Sync + 'static {
    /// The concrete type this transcoding handles.
    fn type_key(&self) -> TypeKey;

    /// Stable wire discriminator.
    fn name(&self) -> &str;

    fn encode(&self, value: &CustomValue) -> Result<Value>;

    fn decode(&self, data: Value) -> Result<Value>;
}

/// Statically typed transcoding; register through [`TypedTranscodingAdapter`]
/// or [`crate::Registry::register_typed`].
///
/// ```
/// use json_transcoder::{Transcoder, TypedTranscoding, Value};
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(f64);
///
/// struct CelsiusAsFloat;
///
/// impl TypedTranscoding for CelsiusAsFloat {
///     type Target = Celsius;
///     const NAME: &'static str = "celsius";
///
///     fn encode(&self, value: &Celsius) -> Value {
///         Value::Float(value.0)
///     }
///
///     fn decode(&self, data: Value) -> Result<Celsius, String> {
///         data.as_f64().map(Celsius).ok_or_else(|| format!("expected float, found {}", data.kind()))
///     }
/// }
///
/// let mut transcoder = Transcoder::new();
/// transcoder.register_typed(CelsiusAsFloat).unwrap();
/// let bytes = transcoder.encode(&Value::custom(Celsius(21.5))).unwrap();
/// assert_eq!(bytes, br#"{"_data_":21.5,"_type_":"celsius"}"#);
/// let back = transcoder.decode(&bytes).unwrap();
/// assert_eq!(back.downcast_ref::<Celsius>(), Some(&Celsius(21.5)));
/// ```
pub trait TypedTranscoding: Send + Sync + 'static {
    type Target: AnyValue;

    const NAME: &'static str;

    fn encode(&self, value: &Self::Target) -> Value;

    /// Rebuilds the value; the error string becomes
    /// [`TranscoderError::InvalidPayload`]'s reason.
    fn decode(&self, data: Value) -> std::result::Result<Self::Target, String>;
}

/// Adapts a [`TypedTranscoding`] to the object-safe [`Transcoding`] trait.
pub struct TypedTranscodingAdapter<T> {
    inner: T,
}

impl<T: TypedTranscoding> TypedTranscodingAdapter<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: TypedTranscoding> Transcoding for TypedTranscodingAdapter<T> {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T::Target>()
    }

    fn name(&self) -> &str {
        T::NAME
    }

    fn encode(&self, value: &CustomValue) -> Result<Value> {
        match value.downcast_ref::<T::Target>() {
            Some(target) => Ok(self.inner.encode(target)),
            None => Err(TranscoderError::InvalidPayload {
                name: T::NAME.to_owned(),
                reason: format!(
                    "expected `{}`, found `{}`",
                    std::any::type_name::<T::Target>(),
                    value.type_name()
                ),
            }),
        }
    }

    fn decode(&self, data: Value) -> Result<Value> {
        self.inner
            .decode(data)
            .map(Value::custom)
            .map_err(|reason| TranscoderError::InvalidPayload {
                name: T::NAME.to_owned(),
                reason,
            })
    }
}
