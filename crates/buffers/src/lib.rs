//! Byte buffer utilities for json-transcoder.
//!
//! # Overview
//!
//! - [`Reader`] - Reads bytes from a slice with bounds-checked cursor tracking
//! - [`Writer`] - Writes bytes into an auto-growing buffer
//!
//! # Example
//!
//! ```
//! use json_transcoder_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(b'[');
//! writer.ascii("1,2");
//! writer.u8(b']');
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8(), Some(b'['));
//! assert_eq!(reader.peek(), Some(b'1'));
//! assert_eq!(reader.size(), 4);
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;
