//! `FastEncoder`: writes a [`NativeValue`] as compact JSON.

use std::collections::BTreeMap;

use json_transcoder_buffers::Writer;
use serde_json::Number;

use super::constants::{ESCAPE, HEX_DIGITS, NO, UU};
use crate::native_value::NativeValue;

/// Compact JSON encoder over a reusable [`Writer`].
///
/// Object keys come out in `BTreeMap` order and non-finite floats as
/// `null`, matching `serde_json`.
pub struct FastEncoder {
    pub writer: Writer,
}

impl Default for FastEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FastEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    /// Encode a value and return the JSON bytes.
    pub fn encode(&mut self, value: &NativeValue) -> Vec<u8> {
        self.writer.reset();
        self.write_any(value);
        self.writer.flush()
    }

    pub fn write_any(&mut self, value: &NativeValue) {
        match value {
            NativeValue::Null => self.write_null(),
            NativeValue::Bool(b) => self.write_boolean(*b),
            NativeValue::Integer(i) => self.write_integer(*i),
            NativeValue::UInteger(u) => self.write_u_integer(*u),
            NativeValue::Float(f) => self.write_float(*f),
            NativeValue::Str(s) => self.write_str(s),
            NativeValue::Array(items) => self.write_arr(items),
            NativeValue::Object(map) => self.write_obj(map),
        }
    }

    pub fn write_null(&mut self) {
        self.writer.ascii("null");
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.ascii(if b { "true" } else { "false" });
    }

    pub fn write_integer(&mut self, int: i64) {
        if int < 0 {
            self.writer.u8(b'-');
        }
        self.write_u_integer(int.unsigned_abs());
    }

    pub fn write_u_integer(&mut self, mut uint: u64) {
        let mut digits = [0u8; 20];
        let mut i = digits.len();
        loop {
            i -= 1;
            digits[i] = b'0' + (uint % 10) as u8;
            uint /= 10;
            if uint == 0 {
                break;
            }
        }
        self.writer.buf(&digits[i..]);
    }

    /// Shortest round-trip text, as `serde_json` prints it; `null` when not
    /// finite.
    pub fn write_float(&mut self, float: f64) {
        match Number::from_f64(float) {
            Some(number) => self.writer.ascii(&number.to_string()),
            None => self.write_null(),
        }
    }

    /// Writes a quoted string. Runs of bytes that need no escaping are
    /// copied in one go.
    pub fn write_str(&mut self, s: &str) {
        let bytes = s.as_bytes();
        self.writer.ensure_capacity(bytes.len() + 2);
        self.writer.u8(b'"');
        let mut start = 0;
        for (i, &byte) in bytes.iter().enumerate() {
            let escape = ESCAPE[byte as usize];
            if escape == NO {
                continue;
            }
            if start < i {
                self.writer.buf(&bytes[start..i]);
            }
            if escape == UU {
                self.writer.buf(&[
                    b'\\',
                    b'u',
                    b'0',
                    b'0',
                    HEX_DIGITS[(byte >> 4) as usize],
                    HEX_DIGITS[(byte & 0xf) as usize],
                ]);
            } else {
                self.writer.buf(&[b'\\', escape]);
            }
            start = i + 1;
        }
        if start < bytes.len() {
            self.writer.buf(&bytes[start..]);
        }
        self.writer.u8(b'"');
    }

    pub fn write_arr(&mut self, items: &[NativeValue]) {
        self.writer.u8(b'[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.writer.u8(b',');
            }
            self.write_any(item);
        }
        self.writer.u8(b']');
    }

    pub fn write_obj(&mut self, map: &BTreeMap<String, NativeValue>) {
        self.writer.u8(b'{');
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                self.writer.u8(b',');
            }
            self.write_str(key);
            self.writer.u8(b':');
            self.write_any(value);
        }
        self.writer.u8(b'}');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: &NativeValue) -> String {
        String::from_utf8(FastEncoder::new().encode(value)).unwrap()
    }

    #[test]
    fn scalars() {
        assert_eq!(encode(&NativeValue::Null), "null");
        assert_eq!(encode(&NativeValue::Bool(false)), "false");
        assert_eq!(encode(&NativeValue::Integer(0)), "0");
        assert_eq!(encode(&NativeValue::Integer(i64::MIN)), "-9223372036854775808");
        assert_eq!(encode(&NativeValue::UInteger(u64::MAX)), "18446744073709551615");
        assert_eq!(encode(&NativeValue::Float(1.0)), "1.0");
        assert_eq!(encode(&NativeValue::Float(-0.5)), "-0.5");
        assert_eq!(encode(&NativeValue::Float(f64::NAN)), "null");
    }

    #[test]
    fn floats_print_like_serde_json() {
        for float in [0.1, -0.0, 1e300, 5e-324, 123456789.125, f64::MAX, f64::MIN_POSITIVE] {
            assert_eq!(
                encode(&NativeValue::Float(float)),
                serde_json::to_string(&float).unwrap()
            );
        }
        assert_eq!(encode(&NativeValue::Float(f64::INFINITY)), "null");
    }

    #[test]
    fn string_escapes() {
        assert_eq!(
            encode(&NativeValue::from("a\"b\\c\nd\u{1}e/日本")),
            "\"a\\\"b\\\\c\\nd\\u0001e/日本\""
        );
        assert_eq!(encode(&NativeValue::from("\u{1f}\u{7f}")), "\"\\u001f\u{7f}\"");
    }

    #[test]
    fn containers() {
        let value = NativeValue::object([
            ("z", NativeValue::Array(vec![])),
            ("a", NativeValue::Array(vec![1.into(), "x".into()])),
            ("m", NativeValue::object(Vec::<(String, NativeValue)>::new())),
        ]);
        assert_eq!(encode(&value), r#"{"a":[1,"x"],"m":{},"z":[]}"#);
    }

    #[test]
    fn encoder_is_reusable() {
        let mut encoder = FastEncoder::new();
        assert_eq!(encoder.encode(&NativeValue::from(12)), b"12");
        assert_eq!(encoder.encode(&NativeValue::from("x")), b"\"x\"");
    }
}
