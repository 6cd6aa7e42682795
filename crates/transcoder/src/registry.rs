//! [`Registry`]: transcodings indexed by type and by name.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, TranscoderError};
use crate::transcoding::{Transcoding, TypeKey, TypedTranscoding, TypedTranscodingAdapter};
use crate::transcodings::{DatetimeAsIso, TupleAsList, UuidAsHex};

/// Registered transcodings.
///
/// Populate it before handing it to a [`crate::Transcoder`]; registration
/// needs `&mut self`, so a registry shared behind `&` or `Arc` is frozen.
#[derive(Clone, Default)]
pub struct Registry {
    by_type: HashMap<TypeKey, Arc<dyn Transcoding>>,
    by_name: HashMap<String, Arc<dyn Transcoding>>,
    names: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding [`UuidAsHex`], [`DatetimeAsIso`] and [`TupleAsList`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(Arc::new(TypedTranscodingAdapter::new(UuidAsHex)));
        registry.insert(Arc::new(TypedTranscodingAdapter::new(DatetimeAsIso)));
        registry.insert(Arc::new(TypedTranscodingAdapter::new(TupleAsList)));
        registry
    }

    /// Adds a transcoding under its type and its name.
    ///
    /// Fails with [`TranscoderError::DuplicateType`] or
    /// [`TranscoderError::DuplicateName`] and leaves the registry unchanged
    /// when either key is taken. The type is checked first.
    pub fn register<T: Transcoding>(&mut self, transcoding: T) -> Result<()> {
        self.register_arc(Arc::new(transcoding))
    }

    pub fn register_typed<T: TypedTranscoding>(&mut self, transcoding: T) -> Result<()> {
        self.register(TypedTranscodingAdapter::new(transcoding))
    }

    pub fn register_arc(&mut self, transcoding: Arc<dyn Transcoding>) -> Result<()> {
        let key = transcoding.type_key();
        if self.by_type.contains_key(&key) {
            tracing::debug!(
                type_name = key.name(),
                name = transcoding.name(),
                "rejected transcoding: type already registered"
            );
            return Err(TranscoderError::DuplicateType {
                type_name: key.name().to_owned(),
            });
        }
        if self.by_name.contains_key(transcoding.name()) {
            tracing::debug!(
                type_name = key.name(),
                name = transcoding.name(),
                "rejected transcoding: name already registered"
            );
            return Err(TranscoderError::DuplicateName {
                name: transcoding.name().to_owned(),
            });
        }
        self.insert(transcoding);
        Ok(())
    }

    fn insert(&mut self, transcoding: Arc<dyn Transcoding>) {
        let key = transcoding.type_key();
        let name = transcoding.name().to_owned();
        tracing::debug!(type_name = key.name(), name = %name, "registered transcoding");
        self.by_type.insert(key, Arc::clone(&transcoding));
        self.by_name.insert(name.clone(), transcoding);
        self.names.push(name);
    }

    pub fn lookup_by_type(&self, key: &TypeKey) -> Option<&dyn Transcoding> {
        self.by_type.get(key).map(|t| &**t)
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<&dyn Transcoding> {
        self.by_name.get(name).map(|t| &**t)
    }

    pub fn contains_type<T: 'static>(&self) -> bool {
        self.by_type.contains_key(&TypeKey::of::<T>())
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcodings::Tuple;
    use crate::Value;

    #[derive(Debug, PartialEq)]
    struct Point(i64, i64);

    struct PointAsList;

    impl TypedTranscoding for PointAsList {
        type Target = Point;
        const NAME: &'static str = "point";

        fn encode(&self, value: &Point) -> Value {
            Value::Array(vec![value.0.into(), value.1.into()])
        }

        fn decode(&self, data: Value) -> std::result::Result<Point, String> {
            match data.as_array() {
                Some([x, y]) => Ok(Point(
                    x.as_i64().ok_or("x")?,
                    y.as_i64().ok_or("y")?,
                )),
                _ => Err("expected [x, y]".to_owned()),
            }
        }
    }

    struct PointAsText;

    impl TypedTranscoding for PointAsText {
        type Target = Point;
        const NAME: &'static str = "point_text";

        fn encode(&self, value: &Point) -> Value {
            Value::from(format!("{},{}", value.0, value.1))
        }

        fn decode(&self, _data: Value) -> std::result::Result<Point, String> {
            Err("unused".to_owned())
        }
    }

    struct TupleNamedPoint;

    impl TypedTranscoding for TupleNamedPoint {
        type Target = Tuple;
        const NAME: &'static str = "point";

        fn encode(&self, value: &Tuple) -> Value {
            Value::Array(value.0.clone())
        }

        fn decode(&self, data: Value) -> std::result::Result<Tuple, String> {
            Err(format!("unused: {}", data.kind()))
        }
    }

    #[test]
    fn lookup_by_type_and_name() {
        let mut registry = Registry::new();
        registry.register_typed(PointAsList).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains_type::<Point>());
        assert!(registry.contains_name("point"));
        let by_type = registry.lookup_by_type(&TypeKey::of::<Point>()).unwrap();
        assert_eq!(by_type.name(), "point");
        let by_name = registry.lookup_by_name("point").unwrap();
        assert_eq!(by_name.type_key(), TypeKey::of::<Point>());
        assert!(registry.lookup_by_name("nope").is_none());
        assert!(registry.lookup_by_type(&TypeKey::of::<u8>()).is_none());
    }

    #[test]
    fn duplicate_type_keeps_first() {
        let mut registry = Registry::new();
        registry.register_typed(PointAsList).unwrap();
        let err = registry.register_typed(PointAsText).unwrap_err();
        assert!(matches!(err, TranscoderError::DuplicateType { .. }));
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains_name("point_text"));
        assert_eq!(
            registry.lookup_by_type(&TypeKey::of::<Point>()).unwrap().name(),
            "point"
        );
    }

    #[test]
    fn duplicate_name_keeps_first() {
        let mut registry = Registry::new();
        registry.register_typed(PointAsList).unwrap();
        let err = registry.register_typed(TupleNamedPoint).unwrap_err();
        assert!(matches!(err, TranscoderError::DuplicateName { ref name } if name == "point"));
        assert!(!registry.contains_type::<Tuple>());
        assert_eq!(
            registry.lookup_by_name("point").unwrap().type_key(),
            TypeKey::of::<Point>()
        );
    }

    #[test]
    fn defaults_in_registration_order() {
        let registry = Registry::with_defaults();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["uuid_hex", "datetime_iso", "tuple_as_list"]
        );
        assert!(registry.contains_type::<uuid::Uuid>());
        assert_eq!(
            format!("{registry:?}"),
            r#"Registry { names: ["uuid_hex", "datetime_iso", "tuple_as_list"] }"#
        );
    }
}
