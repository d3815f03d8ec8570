//! A small byte-stream reader and writer.
//!
//! These are used by the container envelope (§6 of the codec's own minimal
//! on-disk format) to read and write the fixed-width little-endian header
//! fields that precede the entropy-coded payload. They intentionally do not
//! try to be a general-purpose I/O abstraction the way `std::io::Cursor` is;
//! they only support the endian-aware fixed-size reads/writes the envelope
//! needs.

static ERROR_MSG: &str = "No more bytes";

/// An encapsulation of a byte stream reader.
///
/// This provides an interface similar to [`std::io::Cursor`] but without
/// generics, and with fine grained options for reading little-endian
/// integers from the underlying buffer.
pub struct ZByteReader<'a>
{
    stream:   &'a [u8],
    position: usize
}

impl<'a> ZByteReader<'a>
{
    /// Create a new instance of the byte stream reader.
    pub const fn new(buf: &'a [u8]) -> ZByteReader<'a>
    {
        ZByteReader {
            stream:   buf,
            position: 0
        }
    }

    /// Return whether the underlying buffer has `num` bytes available for
    /// reading.
    #[inline]
    pub const fn has(&self, num: usize) -> bool
    {
        self.position + num <= self.stream.len()
    }

    /// Number of bytes left unread in this stream.
    #[inline]
    pub const fn remaining(&self) -> usize
    {
        self.stream.len().saturating_sub(self.position)
    }

    /// Current position of the reader in the underlying buffer.
    #[inline]
    pub const fn position(&self) -> usize
    {
        self.position
    }

    /// Retrieve a byte from the underlying stream, or an error if there are
    /// no more bytes available.
    #[inline]
    pub fn get_u8(&mut self) -> Result<u8, &'static str>
    {
        match self.stream.get(self.position)
        {
            Some(byte) =>
            {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ERROR_MSG)
        }
    }

    /// Read a `u32` as a little-endian integer, or an error if the
    /// underlying buffer does not have four more bytes.
    #[inline]
    pub fn get_u32_le(&mut self) -> Result<u32, &'static str>
    {
        match self.stream.get(self.position..self.position + 4)
        {
            Some(bytes) =>
            {
                let mut space = [0u8; 4];
                space.copy_from_slice(bytes);
                self.position += 4;
                Ok(u32::from_le_bytes(space))
            }
            None => Err(ERROR_MSG)
        }
    }

    /// Return the remaining, unread portion of the stream.
    pub fn remaining_bytes(&self) -> &'a [u8]
    {
        &self.stream[self.position..]
    }
}

/// A small byte stream writer, writing into an owned `Vec<u8>`.
pub struct ZByteWriter
{
    buffer: Vec<u8>
}

impl ZByteWriter
{
    /// Create a new, empty writer.
    pub const fn new() -> ZByteWriter
    {
        ZByteWriter { buffer: Vec::new() }
    }

    /// Write a single byte.
    #[inline]
    pub fn write_u8(&mut self, byte: u8)
    {
        self.buffer.push(byte);
    }

    /// Write a `u32` as a little-endian integer.
    #[inline]
    pub fn write_u32_le(&mut self, value: u32)
    {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Append raw bytes verbatim.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8])
    {
        self.buffer.extend_from_slice(bytes);
    }

    /// Consume the writer, returning the accumulated bytes.
    pub fn into_vec(self) -> Vec<u8>
    {
        self.buffer
    }
}

impl Default for ZByteWriter
{
    fn default() -> Self
    {
        Self::new()
    }
}
