//! Minimal container envelope (`spec.md` §6). Explicitly not JFIF: a
//! fixed-width header naming the mode and logical dimensions, followed by
//! the raw entropy-coded payload produced by [`crate::encoder`].
//!
//! Field width is an Open Question in `spec.md`; `examples/original_source/main.py`
//! has a stray `to_bytes(40, ...)` in scratch debug code that isn't part of
//! its real compress/decompress path, so this doesn't follow it. Decided
//! (see `DESIGN.md`) on 4-byte little-endian fields, matching the width
//! `jcodec-core`'s byte-stream reader/writer already supports.
//!
//! `spec.md` §6 lists only mode/width/height before the payload, but the
//! quantization tables the payload was built with depend on the quality
//! factor, which the decoder has no other way to recover (Huffman tables
//! are always the fixed Annex K defaults, so they need no such field). A
//! `quality` field is added here for that reason; see `DESIGN.md`.

use jcodec_core::bytestream::{ZByteReader, ZByteWriter};

use crate::errors::{CodecError, Result};

/// Only one mode exists today: baseline sequential YCbCr 4:2:0. Kept as an
/// enum (rather than a bare constant) so the envelope can grow without
/// breaking the format.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u32)]
pub enum Mode
{
    BaselineYCbCr420 = 0
}

impl Mode
{
    fn from_u32(v: u32) -> Result<Mode>
    {
        match v
        {
            0 => Ok(Mode::BaselineYCbCr420),
            other => Err(CodecError::InvalidArgument(format!("unknown container mode {other}")))
        }
    }
}

pub struct Envelope<'a>
{
    pub mode: Mode,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub payload: &'a [u8]
}

/// Serialize mode, width, height, quality and payload into one byte buffer.
pub fn write_envelope(envelope: &Envelope<'_>) -> Vec<u8>
{
    let mut writer = ZByteWriter::new();
    writer.write_u32_le(envelope.mode as u32);
    writer.write_u32_le(envelope.width);
    writer.write_u32_le(envelope.height);
    writer.write_u32_le(u32::from(envelope.quality));
    writer.write_bytes(envelope.payload);
    writer.into_vec()
}

#[derive(Debug, PartialEq)]
pub struct DecodedEnvelope
{
    pub mode: Mode,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub payload: Vec<u8>
}

/// Parse an envelope written by [`write_envelope`].
pub fn read_envelope(bytes: &[u8]) -> Result<DecodedEnvelope>
{
    let mut reader = ZByteReader::new(bytes);
    let mode = Mode::from_u32(
        reader
            .get_u32_le()
            .map_err(|_| CodecError::StreamTruncated)?
    )?;
    let width = reader.get_u32_le().map_err(|_| CodecError::StreamTruncated)?;
    let height = reader.get_u32_le().map_err(|_| CodecError::StreamTruncated)?;
    let quality_field = reader.get_u32_le().map_err(|_| CodecError::StreamTruncated)?;
    let quality = u8::try_from(quality_field)
        .map_err(|_| CodecError::InvalidArgument(format!("quality field {quality_field} out of range")))?;
    let payload = reader.remaining_bytes().to_vec();

    Ok(DecodedEnvelope { mode, width, height, quality, payload })
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn round_trip()
    {
        let payload = vec![1, 2, 3, 4, 5];
        let envelope =
            Envelope { mode: Mode::BaselineYCbCr420, width: 640, height: 480, quality: 85, payload: &payload };
        let bytes = write_envelope(&envelope);
        let decoded = read_envelope(&bytes).unwrap();
        assert_eq!(decoded.mode, Mode::BaselineYCbCr420);
        assert_eq!(decoded.width, 640);
        assert_eq!(decoded.height, 480);
        assert_eq!(decoded.quality, 85);
        assert_eq!(decoded.payload, payload);
    }

    #[test]
    fn truncated_header_fails()
    {
        assert_eq!(read_envelope(&[0, 0]), Err(CodecError::StreamTruncated));
    }

    #[test]
    fn unknown_mode_fails()
    {
        let mut writer = ZByteWriter::new();
        writer.write_u32_le(99);
        writer.write_u32_le(1);
        writer.write_u32_le(1);
        writer.write_u32_le(75);
        let bytes = writer.into_vec();
        assert!(matches!(read_envelope(&bytes), Err(CodecError::InvalidArgument(_))));
    }
}
