//! Byte reader with bounds-checked cursor tracking.

/// A byte reader over a borrowed slice.
///
/// Every accessor returns `None` instead of panicking when the cursor would
/// move past `end`, so parsers can turn exhaustion into their own error type.
///
/// # Example
///
/// ```
/// use json_transcoder_buffers::Reader;
///
/// let data = b"abc";
/// let mut reader = Reader::new(data);
///
/// assert_eq!(reader.u8(), Some(b'a'));
/// assert_eq!(reader.buf(2), Some(&b"bc"[..]));
/// assert_eq!(reader.u8(), None);
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end.saturating_sub(self.x)
    }

    /// Returns `true` once the cursor has reached the end.
    pub fn is_eof(&self) -> bool {
        self.x >= self.end
    }

    /// Peeks at the current byte without advancing the cursor.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        if self.x < self.end {
            Some(self.uint8[self.x])
        } else {
            None
        }
    }

    /// Advances the cursor by the given number of bytes, clamped to `end`.
    #[inline]
    pub fn skip(&mut self, length: usize) {
        self.x = (self.x + length).min(self.end);
    }

    /// Reads one byte.
    #[inline]
    pub fn u8(&mut self) -> Option<u8> {
        let val = self.peek()?;
        self.x += 1;
        Some(val)
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Option<&'a [u8]> {
        let x = self.x;
        let end = x.checked_add(size)?;
        if end > self.end {
            return None;
        }
        self.x = end;
        Some(&self.uint8[x..end])
    }

    /// Returns the bytes between two absolute positions without moving the cursor.
    pub fn subarray(&self, start: usize, end: usize) -> &'a [u8] {
        &self.uint8[start..end.min(self.end)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let data = [0x01, 0x02];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8(), Some(0x01));
        assert_eq!(reader.u8(), Some(0x02));
        assert_eq!(reader.u8(), None);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_skip_clamps_to_end() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        reader.skip(2);
        assert_eq!(reader.u8(), Some(0x03));
        reader.skip(10);
        assert_eq!(reader.size(), 0);
    }

    #[test]
    fn test_buf_out_of_range() {
        let data = [1, 2, 3];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.buf(4), None);
        assert_eq!(reader.x, 0);
        assert_eq!(reader.buf(3), Some(&data[..]));
    }
}
