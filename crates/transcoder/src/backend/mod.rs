//! Codec backends: bytes to and from [`crate::NativeValue`].
//!
//! Both backends speak the same JSON wire format and must stay
//! interchangeable: identical bytes out, identical trees (or failures) in.

mod error;
pub mod fast;
mod reference;
mod types;

pub use error::CodecError;
pub use fast::FastBackend;
pub use reference::ReferenceBackend;
pub use types::CodecBackend;

use crate::constants::BackendKind;

impl BackendKind {
    pub fn instantiate(self) -> Box<dyn CodecBackend> {
        match self {
            BackendKind::Reference => Box::new(ReferenceBackend::new()),
            BackendKind::Fast => Box::new(FastBackend::new()),
        }
    }
}
