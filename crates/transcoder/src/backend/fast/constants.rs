//! Lookup tables for the fast JSON backend.

/// How a value starting with a given byte is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lead {
    Invalid,
    Null,
    True,
    False,
    Number,
    Str,
    Arr,
    Obj,
}

pub static LEAD: [Lead; 256] = lead_table();

const fn lead_table() -> [Lead; 256] {
    let mut table = [Lead::Invalid; 256];
    table[b'n' as usize] = Lead::Null;
    table[b't' as usize] = Lead::True;
    table[b'f' as usize] = Lead::False;
    table[b'-' as usize] = Lead::Number;
    let mut digit = b'0';
    while digit <= b'9' {
        table[digit as usize] = Lead::Number;
        digit += 1;
    }
    table[b'"' as usize] = Lead::Str;
    table[b'[' as usize] = Lead::Arr;
    table[b'{' as usize] = Lead::Obj;
    table
}

/// Escape marker for unicode escapes (`\u00XX`).
pub const UU: u8 = b'u';
/// No escaping needed.
pub const NO: u8 = 0;

/// Per-byte escape: `NO`, the letter following the backslash, or `UU`.
pub static ESCAPE: [u8; 256] = escape_table();

const fn escape_table() -> [u8; 256] {
    let mut table = [NO; 256];
    let mut byte = 0;
    while byte < 0x20 {
        table[byte] = UU;
        byte += 1;
    }
    table[0x08] = b'b';
    table[0x09] = b't';
    table[0x0a] = b'n';
    table[0x0c] = b'f';
    table[0x0d] = b'r';
    table[b'"' as usize] = b'"';
    table[b'\\' as usize] = b'\\';
    table
}

pub const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

#[inline]
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\t' | b'\r')
}
