//! Error kinds produced by the encoder and decoder.
//!
//! Follows the manual-`Debug`-impl style the pack's decoder crates use
//! (e.g. `zune-bmp`'s `BmpDecoderErrors`) rather than a derive-macro crate:
//! one variant per abstract error kind named by the codec's design, each
//! carrying just enough context to explain itself.
use std::fmt;

/// Everything that can go wrong building, encoding, or decoding a stream.
#[derive(Clone, PartialEq, Eq)]
pub enum CodecError
{
    /// Shape mismatch, non-RGB input, quality out of range, or an internal
    /// size that should be a multiple of 8 and isn't.
    InvalidArgument(String),
    /// A Huffman table's BITS/HUFFVAL pair is inconsistent, or canonical
    /// code generation overflowed.
    BadTable(String),
    /// A decoded bit sequence matched no code within the table's maximum
    /// code length.
    BadCode,
    /// The bit reader hit end-of-stream inside a code, a VLI tail, or
    /// mid-MCU.
    StreamTruncated,
    /// A decoded RLE pair would overflow the 63-coefficient AC limit.
    /// Never returned by this crate's decoder: `rle::rle_decode` recovers
    /// in-block per `spec.md` §7, so this variant only documents the
    /// condition by name.
    BadRle,
    /// A VLI category and bit-string length disagree.
    BadVli
}

impl fmt::Debug for CodecError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::BadTable(msg) => write!(f, "bad huffman table: {msg}"),
            Self::BadCode => write!(f, "no huffman code matched within max code length"),
            Self::StreamTruncated => write!(f, "bit stream truncated before decode completed"),
            Self::BadRle => write!(f, "ac run-length pair would overflow 63-coefficient block"),
            Self::BadVli => write!(f, "vli category and bit length disagree")
        }
    }
}

impl fmt::Display for CodecError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::Debug::fmt(self, f)
    }
}

impl std::error::Error for CodecError {}

pub type Result<T> = std::result::Result<T, CodecError>;
