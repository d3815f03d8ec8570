//! Decode driver (`spec.md` §4.10, C10): the mirror of [`crate::encoder`].
//!
//! Per `spec.md` §4.10/§7's failure semantics, a bitstream-level fault
//! (`BadCode`/`StreamTruncated`) on any block terminates the scan, but the
//! blocks already decoded before that point are kept and the remainder of
//! the image is zero-filled rather than failing the whole call — there is
//! nothing downstream of a broken bit position to resynchronize on without
//! restart markers, which this baseline doesn't have, so a partial image is
//! the best this driver can do. `BadRle` (an AC run that would overflow the
//! 63-coefficient block) is even less severe and is recovered in-block by
//! [`crate::rle::rle_decode`] itself; it never reaches this driver as an
//! error at all.

use log::warn;

use crate::bitio::BitReader;
use crate::block::{self, BLOCK_SIZE};
use crate::color::{ycbcr_420_to_rgb, RgbImage, YCbCrImage};
use crate::dct::{inverse_dct, unshift_clip};
use crate::dpcm::dpcm_decode;
use crate::errors::Result;
use crate::huffman::HuffmanTable;
use crate::huffman_tables::{AC_CHROMA_BITS, AC_CHROMA_HUFFVAL, AC_LUMA_BITS, AC_LUMA_HUFFVAL, DC_CHROMA_BITS,
                             DC_CHROMA_HUFFVAL, DC_LUMA_BITS, DC_LUMA_HUFFVAL};
use crate::quantize::{dequantize, scale_table, BASE_CHROMA, BASE_LUMA};
use crate::rle::{rle_decode, AcToken, BLOCK_AC_LEN};
use crate::vli::decode_vli;
use crate::zigzag::inverse_zigzag_i32;

const MCU_SIZE: usize = 16;

struct DefaultTables
{
    dc_luma: HuffmanTable,
    dc_chroma: HuffmanTable,
    ac_luma: HuffmanTable,
    ac_chroma: HuffmanTable
}

fn default_tables() -> Result<DefaultTables>
{
    Ok(DefaultTables {
        dc_luma: HuffmanTable::from_bits_huffval(&DC_LUMA_BITS, &DC_LUMA_HUFFVAL)?,
        dc_chroma: HuffmanTable::from_bits_huffval(&DC_CHROMA_BITS, &DC_CHROMA_HUFFVAL)?,
        ac_luma: HuffmanTable::from_bits_huffval(&AC_LUMA_BITS, &AC_LUMA_HUFFVAL)?,
        ac_chroma: HuffmanTable::from_bits_huffval(&AC_CHROMA_BITS, &AC_CHROMA_HUFFVAL)?
    })
}

/// One block's worth of still-DPCM'd DC difference and raw AC tokens, as
/// read straight off the bitstream.
struct RawBlock
{
    dc_diff: i32,
    ac_tokens: Vec<AcToken>
}

/// Read Huffman-coded AC tokens off the bitstream until `Eob`.
///
/// Each token consumes exactly the bits its own symbol/magnitude calls for,
/// so this never needs to track how many of the 63 coefficients a run would
/// fill — that bookkeeping (and the overflow recovery it implies) belongs to
/// [`crate::rle::rle_decode`], once the full token list is in hand. A
/// corrupt stream that never emits `Eob` runs out of bits and surfaces as
/// `StreamTruncated` from `reader`, which the caller treats like any other
/// bitstream-level fault.
fn decode_ac_tokens(reader: &mut BitReader, ac_table: &HuffmanTable) -> Result<Vec<AcToken>>
{
    let mut tokens = Vec::new();
    loop
    {
        let symbol = ac_table.decode(reader)?;
        if symbol == 0x00
        {
            tokens.push(AcToken::Eob);
            break;
        }
        if symbol == 0xF0
        {
            tokens.push(AcToken::Zrl);
            continue;
        }

        let run = symbol >> 4;
        let size = symbol & 0x0F;
        let magnitude = reader.read_bits(size)?;
        let value = decode_vli(size, magnitude);
        tokens.push(AcToken::Pair { run, value });
    }
    Ok(tokens)
}

fn decode_block(reader: &mut BitReader, dc_table: &HuffmanTable, ac_table: &HuffmanTable) -> Result<RawBlock>
{
    let dc_category = dc_table.decode(reader)?;
    let dc_magnitude = reader.read_bits(dc_category)?;
    let dc_diff = decode_vli(dc_category, dc_magnitude);
    let ac_tokens = decode_ac_tokens(reader, ac_table)?;
    Ok(RawBlock { dc_diff, ac_tokens })
}

/// Reconstruct an 8x8 spatial block from a DC level and 63 zig-zag AC
/// coefficients.
fn reconstruct_block(dc: i32, ac: &[i32; BLOCK_AC_LEN], q_table: &[u16; 64]) -> [u8; 64]
{
    let mut zz = [0i32; 64];
    zz[0] = dc;
    zz[1..64].copy_from_slice(ac);
    let natural = inverse_zigzag_i32(&zz);
    let coeffs = dequantize(&natural, q_table);
    let spatial = inverse_dct(&coeffs);
    unshift_clip(&spatial)
}

fn crop_plane(plane: &[u8], padded_width: usize, width: usize, height: usize) -> Vec<u8>
{
    let mut out = vec![0u8; width * height];
    for y in 0..height
    {
        out[y * width..y * width + width].copy_from_slice(&plane[y * padded_width..y * padded_width + width]);
    }
    out
}

/// Decode an entropy-coded payload (as produced by
/// [`crate::encoder::encode_payload`]) back into an RGB image.
pub fn decode_payload(payload: &[u8], width: usize, height: usize, quality: u8) -> Result<RgbImage>
{
    let tables = default_tables()?;
    let luma_q = scale_table(&BASE_LUMA, quality);
    let chroma_q = scale_table(&BASE_CHROMA, quality);

    let mcu_cols = width.div_ceil(MCU_SIZE);
    let mcu_rows = height.div_ceil(MCU_SIZE);
    let chroma_width = width.div_ceil(2);
    let chroma_height = height.div_ceil(2);

    let mut reader = BitReader::new(payload);

    // Pass 1: pull every block's raw (still-DPCM'd) DC diff and AC tokens
    // off the bitstream, in scan order. Per `spec.md` §4.10, a bitstream
    // fault (BadCode/StreamTruncated) on any block terminates the scan
    // rather than the whole call: blocks already read are kept, and the
    // rest are backfilled with a DC-diff-of-zero/all-zero-AC placeholder
    // below (best-effort reconstruction).
    let total_mcus = mcu_cols * mcu_rows;
    let mut y_raw = Vec::with_capacity(total_mcus * 4);
    let mut cb_raw = Vec::with_capacity(total_mcus);
    let mut cr_raw = Vec::with_capacity(total_mcus);

    'scan: for mcu_row in 0..mcu_rows
    {
        for mcu_col in 0..mcu_cols
        {
            for _ in 0..4
            {
                match decode_block(&mut reader, &tables.dc_luma, &tables.ac_luma)
                {
                    Ok(block) => y_raw.push(block),
                    Err(e) =>
                    {
                        warn!("scan aborted decoding a Y block at MCU ({mcu_row}, {mcu_col}): {e}");
                        break 'scan;
                    }
                }
            }
            match decode_block(&mut reader, &tables.dc_chroma, &tables.ac_chroma)
            {
                Ok(block) => cb_raw.push(block),
                Err(e) =>
                {
                    warn!("scan aborted decoding the Cb block at MCU ({mcu_row}, {mcu_col}): {e}");
                    break 'scan;
                }
            }
            match decode_block(&mut reader, &tables.dc_chroma, &tables.ac_chroma)
            {
                Ok(block) => cr_raw.push(block),
                Err(e) =>
                {
                    warn!("scan aborted decoding the Cr block at MCU ({mcu_row}, {mcu_col}): {e}");
                    break 'scan;
                }
            }
        }
    }

    let zero_block = || RawBlock { dc_diff: 0, ac_tokens: vec![AcToken::Eob] };
    y_raw.resize_with(total_mcus * 4, zero_block);
    cb_raw.resize_with(total_mcus, zero_block);
    cr_raw.resize_with(total_mcus, zero_block);

    // Pass 2: undo the per-component DC differential coding.
    let y_diffs: Vec<i32> = y_raw.iter().map(|b| b.dc_diff).collect();
    let cb_diffs: Vec<i32> = cb_raw.iter().map(|b| b.dc_diff).collect();
    let cr_diffs: Vec<i32> = cr_raw.iter().map(|b| b.dc_diff).collect();
    let y_dc = dpcm_decode(&y_diffs);
    let cb_dc = dpcm_decode(&cb_diffs);
    let cr_dc = dpcm_decode(&cr_diffs);

    // Pass 3: undo RLE, dequantize, inverse-DCT, and place each block. An
    // in-block RLE overflow (`spec.md` §7) is recovered by `rle_decode`
    // itself (pad zeros, continue); this driver just logs it.
    let mut y_blocks = Vec::with_capacity(y_raw.len());
    for (raw, &dc) in y_raw.iter().zip(y_dc.iter())
    {
        let (ac, overflowed) = rle_decode(&raw.ac_tokens);
        if overflowed
        {
            warn!("ac run-length overflow in a Y block, padded with zeros");
        }
        y_blocks.push(reconstruct_block(dc, &ac, &luma_q));
    }
    let mut cb_blocks = Vec::with_capacity(cb_raw.len());
    for (raw, &dc) in cb_raw.iter().zip(cb_dc.iter())
    {
        let (ac, overflowed) = rle_decode(&raw.ac_tokens);
        if overflowed
        {
            warn!("ac run-length overflow in a Cb block, padded with zeros");
        }
        cb_blocks.push(reconstruct_block(dc, &ac, &chroma_q));
    }
    let mut cr_blocks = Vec::with_capacity(cr_raw.len());
    for (raw, &dc) in cr_raw.iter().zip(cr_dc.iter())
    {
        let (ac, overflowed) = rle_decode(&raw.ac_tokens);
        if overflowed
        {
            warn!("ac run-length overflow in a Cr block, padded with zeros");
        }
        cr_blocks.push(reconstruct_block(dc, &ac, &chroma_q));
    }

    // y_blocks is in MCU-interleaved (2x2) order, not the plain row-major
    // order `block::reassemble_from_blocks` expects, so re-order into a
    // row-major grid over the padded luma plane first.
    let padded_luma_w = mcu_cols * MCU_SIZE;
    let padded_luma_h = mcu_rows * MCU_SIZE;
    let y_blocks_per_row = padded_luma_w / BLOCK_SIZE;
    let mut y_raster = vec![[0u8; 64]; y_blocks_per_row * (padded_luma_h / BLOCK_SIZE)];
    let mut idx = 0usize;
    for mcu_row in 0..mcu_rows
    {
        for mcu_col in 0..mcu_cols
        {
            for (dy, dx) in [(0, 0), (0, 1), (1, 0), (1, 1)]
            {
                let gy = mcu_row * 2 + dy;
                let gx = mcu_col * 2 + dx;
                y_raster[gy * y_blocks_per_row + gx] = y_blocks[idx];
                idx += 1;
            }
        }
    }

    let y_padded = block::reassemble_from_blocks(&y_raster, padded_luma_w, padded_luma_h);
    let y_plane = crop_plane(&y_padded, padded_luma_w, width, height);
    let cb_plane = block::reassemble_from_blocks(&cb_blocks, chroma_width, chroma_height);
    let cr_plane = block::reassemble_from_blocks(&cr_blocks, chroma_width, chroma_height);

    if y_plane.len() != width * height
    {
        warn!("reconstructed luma plane size mismatch, image may be truncated");
    }

    let ycc = YCbCrImage {
        width,
        height,
        y: y_plane,
        cb: cb_plane,
        cr: cr_plane,
        chroma_width,
        chroma_height
    };
    Ok(ycbcr_420_to_rgb(&ycc))
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::color::RgbImage as EncRgbImage;
    use crate::encoder::encode_payload;
    use crate::options::EncoderOptions;

    #[test]
    fn round_trips_flat_gray_image()
    {
        // S1-adjacent: a flat 16x16 block at near-lossless quality should
        // reconstruct within rounding slack of the original.
        let width = 16;
        let height = 16;
        let image = EncRgbImage { width, height, data: vec![128u8; width * height * 3] };
        let options = EncoderOptions::default().with_quality(100);
        let payload = encode_payload(&image, &options).unwrap();

        // a flat block at quality 100 has zero AC energy and an exactly
        // representable DC level (128 level-shifts to 0.0, which quantizes,
        // dequantizes and inverse-transforms back to exactly 0.0), and
        // 16x16 needs no MCU padding, so this round trip has no error at
        // all, not even the usual +-1 rounding slack.
        let decoded = decode_payload(&payload, width, height, options.quality).unwrap();
        assert_eq!(image.data, decoded.data);
    }

    #[test]
    fn round_trips_solid_red_block()
    {
        // S2: an 8x8 solid red block at quality 90.
        let width = 8;
        let height = 8;
        let data: Vec<u8> = [255u8, 0, 0].repeat(width * height);
        let image = EncRgbImage { width, height, data };
        let options = EncoderOptions::default().with_quality(90);
        let payload = encode_payload(&image, &options).unwrap();

        let decoded = decode_payload(&payload, width, height, options.quality).unwrap();
        for px in decoded.data.chunks(3)
        {
            assert!(i32::from(px[0]) - i32::from(px[1]) > 100, "not red enough: {px:?}");
        }
    }

    #[test]
    fn empty_payload_degrades_to_flat_image_instead_of_failing()
    {
        // §4.10/§7: a bitstream fault on the very first block still returns
        // an image — every block missing its coefficients decodes as a
        // level-shift-neutral (128) gray block rather than propagating the
        // underlying StreamTruncated error.
        let width = 16;
        let height = 16;
        let decoded = decode_payload(&[], width, height, 75).unwrap();
        assert_eq!(decoded.data.len(), width * height * 3);
        for &byte in &decoded.data
        {
            assert_eq!(byte, 128);
        }
    }

    #[test]
    fn truncated_mid_scan_keeps_already_decoded_blocks()
    {
        // a payload truncated partway through should still return an image
        // the right size, built from whatever the scan managed to decode.
        let width = 16;
        let height = 16;
        let image = EncRgbImage { width, height, data: vec![200u8; width * height * 3] };
        let options = EncoderOptions::default().with_quality(90);
        let payload = encode_payload(&image, &options).unwrap();

        let truncated = &payload[..payload.len() / 2];
        let decoded = decode_payload(truncated, width, height, options.quality).unwrap();
        assert_eq!(decoded.data.len(), width * height * 3);
    }
}
