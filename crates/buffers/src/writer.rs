//! Auto-growing byte writer.

const DEFAULT_ALLOC_SIZE: usize = 1024;

/// A byte writer backed by a growable buffer.
///
/// `uint8` is pre-sized so hot paths can write through an index after a
/// single [`Writer::ensure_capacity`] call; `x` is the write cursor.
///
/// # Example
///
/// ```
/// use json_transcoder_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.buf("日本".as_bytes());
/// writer.u8(b'!');
/// assert_eq!(writer.flush(), "日本!".as_bytes());
/// ```
#[derive(Debug, Clone)]
pub struct Writer {
    /// Backing storage. Only `uint8[..x]` is initialised output.
    pub uint8: Vec<u8>,
    /// Current write position.
    pub x: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new writer with the default allocation size.
    pub fn new() -> Self {
        Self::with_alloc_size(DEFAULT_ALLOC_SIZE)
    }

    /// Creates a new writer with a custom initial allocation size.
    pub fn with_alloc_size(alloc_size: usize) -> Self {
        Self {
            uint8: vec![0; alloc_size],
            x: 0,
        }
    }

    /// Rewinds the cursor; the allocation is kept for reuse.
    pub fn reset(&mut self) {
        self.x = 0;
    }

    /// Number of bytes written since the last reset.
    pub fn len(&self) -> usize {
        self.x
    }

    pub fn is_empty(&self) -> bool {
        self.x == 0
    }

    /// Makes sure at least `capacity` more bytes can be written by index.
    #[inline]
    pub fn ensure_capacity(&mut self, capacity: usize) {
        let required = self.x + capacity;
        if required > self.uint8.len() {
            let grown = (self.uint8.len() * 2).max(required);
            self.uint8.resize(grown, 0);
        }
    }

    /// Returns the written bytes and resets the cursor.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.uint8[..self.x].to_vec();
        self.x = 0;
        out
    }

    /// Returns the written bytes without resetting.
    pub fn as_slice(&self) -> &[u8] {
        &self.uint8[..self.x]
    }

    /// Writes one byte.
    #[inline]
    pub fn u8(&mut self, byte: u8) {
        self.ensure_capacity(1);
        self.uint8[self.x] = byte;
        self.x += 1;
    }

    /// Writes a byte slice.
    #[inline]
    pub fn buf(&mut self, buf: &[u8]) {
        let length = buf.len();
        self.ensure_capacity(length);
        let x = self.x;
        self.uint8[x..x + length].copy_from_slice(buf);
        self.x = x + length;
    }

    /// Writes an ASCII string.
    pub fn ascii(&mut self, s: &str) {
        self.buf(s.as_bytes());
    }
}
