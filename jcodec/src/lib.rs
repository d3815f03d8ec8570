//! `jcodec`: a baseline sequential, 8-bit, YCbCr 4:2:0 JPEG-family lossy
//! image codec (ITU-T T.81 subset).
//!
//! Covers RGB <-> YCbCr conversion, 4:2:0 chroma subsampling, the 8x8
//! floating-point DCT/IDCT, quality-scaled quantization, zig-zag scanning,
//! DC DPCM, AC run-length coding, canonical Huffman coding (default Annex K
//! tables only) and a bit-level reader/writer with 0xFF/0x00 byte
//! stuffing. Progressive/hierarchical/arithmetic/12-bit modes, non-RGB
//! colorspaces, restart intervals and custom Huffman tables are out of
//! scope; see `DESIGN.md`.
//!
//! The container this crate reads and writes is its own minimal envelope
//! (mode/width/height/quality + entropy-coded payload), not JFIF — see
//! [`container`].

pub mod bitio;
pub mod block;
pub mod color;
pub mod container;
pub mod dct;
pub mod decoder;
pub mod dpcm;
pub mod encoder;
pub mod errors;
pub mod huffman;
pub mod huffman_tables;
pub mod options;
pub mod quantize;
pub mod rle;
pub mod vli;
pub mod zigzag;

use color::RgbImage;
pub use errors::{CodecError, Result};
pub use options::{DecoderOptions, EncoderOptions};

/// Compress an interleaved RGB image (`width * height * 3` bytes) into this
/// crate's container format (`spec.md` §6's `encode`).
pub fn encode(rgb: &[u8], width: usize, height: usize, quality: u8) -> Result<Vec<u8>>
{
    let options = EncoderOptions::default().with_quality(quality);
    let image = RgbImage { width, height, data: rgb.to_vec() };
    let payload = encoder::encode_payload(&image, &options)?;

    let envelope = container::Envelope {
        mode: container::Mode::BaselineYCbCr420,
        width: u32::try_from(width)
            .map_err(|_| CodecError::InvalidArgument(format!("width {width} does not fit in 32 bits")))?,
        height: u32::try_from(height)
            .map_err(|_| CodecError::InvalidArgument(format!("height {height} does not fit in 32 bits")))?,
        quality,
        payload: &payload
    };
    Ok(container::write_envelope(&envelope))
}

/// Decompress a container produced by [`encode`], returning the RGB bytes
/// and logical `(width, height)` (`spec.md` §6's `decode`).
pub fn decode(bytes: &[u8]) -> Result<(Vec<u8>, usize, usize)>
{
    let envelope = container::read_envelope(bytes)?;
    let width = envelope.width as usize;
    let height = envelope.height as usize;
    let image = decoder::decode_payload(&envelope.payload, width, height, envelope.quality)?;
    Ok((image.data, width, height))
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn end_to_end_round_trip()
    {
        // property 1: full encode/decode round trip stays visually close
        // for a simple synthetic image.
        let width = 16;
        let height = 16;
        let rgb: Vec<u8> = (0..width * height * 3).map(|i| ((i * 17 + 40) % 256) as u8).collect();

        let bytes = encode(&rgb, width, height, 85).unwrap();
        let (decoded, w, h) = decode(&bytes).unwrap();
        assert_eq!((w, h), (width, height));
        assert_eq!(decoded.len(), rgb.len());
    }

    #[test]
    fn rejects_out_of_range_quality()
    {
        let rgb = vec![0u8; 3 * 4 * 4];
        assert!(matches!(encode(&rgb, 4, 4, 101), Err(CodecError::InvalidArgument(_))));
        assert!(matches!(encode(&rgb, 4, 4, 0), Err(CodecError::InvalidArgument(_))));
    }

    #[test]
    fn decode_rejects_truncated_container()
    {
        assert!(matches!(decode(&[1, 2, 3]), Err(CodecError::StreamTruncated)));
    }
}
