//! `FastDecoder`: parses JSON bytes into a [`NativeValue`].

use std::collections::BTreeMap;
use std::str;

use json_transcoder_buffers::Reader;

use super::constants::{is_whitespace, Lead, LEAD};
use crate::backend::CodecError;
use crate::constants::MAX_DEPTH;
use crate::native_value::NativeValue;

/// Recursive-descent JSON parser.
///
/// Accepts and rejects exactly what `serde_json::from_slice` does for a
/// `serde_json::Value`: numbers become `Integer`, `UInteger` or `Float` by
/// the same rules (`-0` is a float), lone surrogates and raw control
/// characters are rejected, and nesting is capped at [`MAX_DEPTH`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FastDecoder;

impl FastDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<NativeValue, CodecError> {
        let mut parser = Parser {
            reader: Reader::new(bytes),
            remaining_depth: MAX_DEPTH,
        };
        let value = parser.read_any()?;
        parser.skip_whitespace();
        if !parser.reader.is_eof() {
            return Err(CodecError::TrailingCharacters(parser.reader.x));
        }
        Ok(value)
    }
}

struct Parser<'a> {
    reader: Reader<'a>,
    remaining_depth: usize,
}

impl<'a> Parser<'a> {
    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.reader.peek() {
            if !is_whitespace(byte) {
                break;
            }
            self.reader.skip(1);
        }
    }

    fn eof(&self) -> CodecError {
        CodecError::UnexpectedEof(self.reader.x)
    }

    fn read_any(&mut self) -> Result<NativeValue, CodecError> {
        self.skip_whitespace();
        let byte = self.reader.peek().ok_or_else(|| self.eof())?;
        match LEAD[byte as usize] {
            Lead::Null => self.read_literal(b"null", NativeValue::Null),
            Lead::True => self.read_literal(b"true", NativeValue::Bool(true)),
            Lead::False => self.read_literal(b"false", NativeValue::Bool(false)),
            Lead::Number => self.read_number(),
            Lead::Str => self.read_str().map(NativeValue::Str),
            Lead::Arr => self.read_arr(),
            Lead::Obj => self.read_obj(),
            Lead::Invalid => Err(CodecError::InvalidByte(self.reader.x)),
        }
    }

    fn read_literal(
        &mut self,
        literal: &'static [u8],
        value: NativeValue,
    ) -> Result<NativeValue, CodecError> {
        let start = self.reader.x;
        for &expected in literal {
            match self.reader.u8() {
                Some(byte) if byte == expected => {}
                Some(_) => return Err(CodecError::InvalidByte(self.reader.x - 1)),
                None => return Err(CodecError::UnexpectedEof(start)),
            }
        }
        Ok(value)
    }

    fn enter(&mut self) -> Result<(), CodecError> {
        self.remaining_depth -= 1;
        if self.remaining_depth == 0 {
            return Err(CodecError::RecursionLimit(self.reader.x));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.remaining_depth += 1;
    }

    fn read_arr(&mut self) -> Result<NativeValue, CodecError> {
        self.enter()?;
        self.reader.skip(1);
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.reader.peek() == Some(b']') {
            self.reader.skip(1);
            self.leave();
            return Ok(NativeValue::Array(items));
        }
        loop {
            items.push(self.read_any()?);
            self.skip_whitespace();
            match self.reader.u8() {
                Some(b',') => continue,
                Some(b']') => break,
                Some(_) => return Err(CodecError::InvalidByte(self.reader.x - 1)),
                None => return Err(self.eof()),
            }
        }
        self.leave();
        Ok(NativeValue::Array(items))
    }

    fn read_obj(&mut self) -> Result<NativeValue, CodecError> {
        self.enter()?;
        self.reader.skip(1);
        let mut map = BTreeMap::new();
        self.skip_whitespace();
        if self.reader.peek() == Some(b'}') {
            self.reader.skip(1);
            self.leave();
            return Ok(NativeValue::Object(map));
        }
        loop {
            self.skip_whitespace();
            match self.reader.peek() {
                Some(b'"') => {}
                Some(_) => return Err(CodecError::InvalidByte(self.reader.x)),
                None => return Err(self.eof()),
            }
            let key = self.read_str()?;
            self.skip_whitespace();
            match self.reader.u8() {
                Some(b':') => {}
                Some(_) => return Err(CodecError::InvalidByte(self.reader.x - 1)),
                None => return Err(self.eof()),
            }
            let value = self.read_any()?;
            map.insert(key, value);
            self.skip_whitespace();
            match self.reader.u8() {
                Some(b',') => continue,
                Some(b'}') => break,
                Some(_) => return Err(CodecError::InvalidByte(self.reader.x - 1)),
                None => return Err(self.eof()),
            }
        }
        self.leave();
        Ok(NativeValue::Object(map))
    }

    /// Cursor is on the opening quote.
    fn read_str(&mut self) -> Result<String, CodecError> {
        self.reader.skip(1);
        let mut out = String::new();
        loop {
            let run_start = self.reader.x;
            while let Some(byte) = self.reader.peek() {
                if byte == b'"' || byte == b'\\' || byte < 0x20 {
                    break;
                }
                self.reader.skip(1);
            }
            let run = self.reader.subarray(run_start, self.reader.x);
            if !run.is_empty() {
                let text = str::from_utf8(run)
                    .map_err(|e| CodecError::InvalidUtf8(run_start + e.valid_up_to()))?;
                out.push_str(text);
            }
            match self.reader.u8() {
                Some(b'"') => return Ok(out),
                Some(b'\\') => self.read_escape(&mut out)?,
                Some(_) => return Err(CodecError::ControlCharacter(self.reader.x - 1)),
                None => return Err(self.eof()),
            }
        }
    }

    /// Cursor is just past the backslash.
    fn read_escape(&mut self, out: &mut String) -> Result<(), CodecError> {
        let at = self.reader.x;
        let ch = match self.reader.u8().ok_or_else(|| self.eof())? {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => self.read_unicode_escape()?,
            _ => return Err(CodecError::InvalidEscape(at)),
        };
        out.push(ch);
        Ok(())
    }

    /// Cursor is just past `\u`.
    fn read_unicode_escape(&mut self) -> Result<char, CodecError> {
        let at = self.reader.x;
        let first = self.read_hex4()?;
        let code = match first {
            0xdc00..=0xdfff => return Err(CodecError::LoneSurrogate(at)),
            0xd800..=0xdbff => {
                if self.reader.u8() != Some(b'\\') || self.reader.u8() != Some(b'u') {
                    return Err(CodecError::LoneSurrogate(at));
                }
                let second = self.read_hex4()?;
                if !(0xdc00..=0xdfff).contains(&second) {
                    return Err(CodecError::LoneSurrogate(at));
                }
                0x10000 + (((first - 0xd800) << 10) | (second - 0xdc00))
            }
            code => code,
        };
        char::from_u32(code).ok_or(CodecError::InvalidEscape(at))
    }

    fn read_hex4(&mut self) -> Result<u32, CodecError> {
        let at = self.reader.x;
        let digits = self.reader.buf(4).ok_or(CodecError::UnexpectedEof(at))?;
        let mut code = 0u32;
        for &digit in digits {
            let nibble = (digit as char)
                .to_digit(16)
                .ok_or(CodecError::InvalidEscape(at))?;
            code = (code << 4) | nibble;
        }
        Ok(code)
    }

    fn read_number(&mut self) -> Result<NativeValue, CodecError> {
        let start = self.reader.x;
        let negative = self.reader.peek() == Some(b'-');
        if negative {
            self.reader.skip(1);
        }

        // Integer part: a single `0` or a non-zero digit run.
        let int_start = self.reader.x;
        match self.reader.u8() {
            Some(b'0') => {
                if matches!(self.reader.peek(), Some(b'0'..=b'9')) {
                    return Err(CodecError::InvalidNumber(self.reader.x));
                }
            }
            Some(b'1'..=b'9') => self.skip_digits(),
            Some(_) => return Err(CodecError::InvalidNumber(int_start)),
            None => return Err(self.eof()),
        }
        let int_end = self.reader.x;

        let mut is_float = false;
        if self.reader.peek() == Some(b'.') {
            self.reader.skip(1);
            self.expect_digits()?;
            is_float = true;
        }
        if matches!(self.reader.peek(), Some(b'e' | b'E')) {
            self.reader.skip(1);
            if matches!(self.reader.peek(), Some(b'+' | b'-')) {
                self.reader.skip(1);
            }
            self.expect_digits()?;
            is_float = true;
        }

        if !is_float {
            if let Some(significand) = parse_u64(self.reader.subarray(int_start, int_end)) {
                return Ok(integer(negative, significand));
            }
        }
        let lexeme = self.reader.subarray(start, self.reader.x);
        let float = str::from_utf8(lexeme)
            .ok()
            .and_then(|text| text.parse::<f64>().ok())
            .filter(|float| float.is_finite())
            .ok_or(CodecError::InvalidNumber(start))?;
        Ok(NativeValue::Float(float))
    }

    fn skip_digits(&mut self) {
        while matches!(self.reader.peek(), Some(b'0'..=b'9')) {
            self.reader.skip(1);
        }
    }

    fn expect_digits(&mut self) -> Result<(), CodecError> {
        match self.reader.peek() {
            Some(b'0'..=b'9') => {
                self.skip_digits();
                Ok(())
            }
            Some(_) => Err(CodecError::InvalidNumber(self.reader.x)),
            None => Err(self.eof()),
        }
    }
}

/// `None` on overflow; the caller then falls back to a float.
fn parse_u64(digits: &[u8]) -> Option<u64> {
    digits.iter().try_fold(0u64, |acc, &digit| {
        acc.checked_mul(10)?.checked_add((digit - b'0') as u64)
    })
}

fn integer(negative: bool, significand: u64) -> NativeValue {
    if !negative {
        return NativeValue::from(significand);
    }
    match significand {
        0 => NativeValue::Float(-0.0),
        s if s <= i64::MIN.unsigned_abs() => NativeValue::Integer((s as i64).wrapping_neg()),
        s => NativeValue::Float(-(s as f64)),
    }
}
