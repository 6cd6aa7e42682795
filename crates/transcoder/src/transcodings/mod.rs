//! Transcodings shipped with the crate.

mod datetime_iso;
mod tuple_as_list;
mod uuid_hex;

pub use datetime_iso::DatetimeAsIso;
pub use tuple_as_list::{Tuple, TupleAsList};
pub use uuid_hex::UuidAsHex;
