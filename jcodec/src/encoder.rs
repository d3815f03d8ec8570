//! Encode driver (`spec.md` §4.10, C10): stitches color conversion,
//! blocking, DCT, quantization, zig-zag, DPCM and RLE into per-component
//! entropy-coded scans.
//!
//! MCU interleaving order is an Open Question in `spec.md`; resolved (see
//! `DESIGN.md`) as four Y blocks (top-left, top-right, bottom-left,
//! bottom-right) then one Cb block then one Cr block per 16x16 MCU, the
//! standard T.81 4:2:0 order and the one `zune-jpeg`'s own decoder assumes
//! in `mcu.rs`.

use log::debug;

use crate::bitio::BitWriter;
use crate::block::{self, BLOCK_SIZE};
use crate::color::{rgb_to_ycbcr_420, RgbImage};
use crate::dct::{forward_dct, level_shift};
use crate::dpcm::dpcm_encode;
use crate::errors::{CodecError, Result};
use crate::huffman::HuffmanTable;
use crate::huffman_tables::{AC_CHROMA_BITS, AC_CHROMA_HUFFVAL, AC_LUMA_BITS, AC_LUMA_HUFFVAL, DC_CHROMA_BITS,
                             DC_CHROMA_HUFFVAL, DC_LUMA_BITS, DC_LUMA_HUFFVAL};
use crate::options::EncoderOptions;
use crate::quantize::{quantize, scale_table, BASE_CHROMA, BASE_LUMA};
use crate::rle::{rle_encode, AcToken, BLOCK_AC_LEN};
use crate::vli::encode_vli;
use crate::zigzag::zigzag_i32;

const MCU_SIZE: usize = 16;

/// Pad a row-major plane to `new_width x new_height` with zero fill,
/// keeping existing samples in their top-left positions.
fn pad_plane(plane: &[u8], width: usize, height: usize, new_width: usize, new_height: usize) -> Vec<u8>
{
    let mut out = vec![0u8; new_width * new_height];
    for y in 0..height
    {
        out[y * new_width..y * new_width + width].copy_from_slice(&plane[y * width..y * width + width]);
    }
    out
}

/// One block's worth of transform-domain coefficients: the raw DC level
/// (pre-DPCM) and the 63 zig-zag-ordered AC coefficients.
struct TransformedBlock
{
    dc: i32,
    ac: [i32; BLOCK_AC_LEN]
}

fn transform_block(block: &[u8; 64], q_table: &[u16; 64]) -> TransformedBlock
{
    let shifted = level_shift(block);
    let coeffs = forward_dct(&shifted);
    let quantized = quantize(&coeffs, q_table);
    let zz = zigzag_i32(&quantized);

    let mut ac = [0i32; BLOCK_AC_LEN];
    ac.copy_from_slice(&zz[1..64]);
    TransformedBlock { dc: zz[0], ac }
}

/// Huffman-encode one block's already-DPCM'd DC difference and raw AC
/// coefficients.
fn emit_block(dc_diff: i32, ac: &[i32; BLOCK_AC_LEN], dc_table: &HuffmanTable, ac_table: &HuffmanTable,
              writer: &mut BitWriter) -> Result<()>
{
    let dc_vli = encode_vli(dc_diff);
    dc_table.encode(writer, dc_vli.category)?;
    writer.write_bits(dc_vli.magnitude, dc_vli.category);

    for token in rle_encode(ac)
    {
        match token
        {
            AcToken::Eob => ac_table.encode(writer, 0x00)?,
            AcToken::Zrl => ac_table.encode(writer, 0xF0)?,
            AcToken::Pair { run, value } =>
            {
                let vli = encode_vli(value);
                let symbol = (run << 4) | vli.category;
                ac_table.encode(writer, symbol)?;
                writer.write_bits(vli.magnitude, vli.category);
            }
        }
    }
    Ok(())
}

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

/// Encode an RGB image into the entropy-coded payload (no container
/// header) `spec.md` §6's `encode` builds on top of.
pub fn encode_payload(image: &RgbImage, options: &EncoderOptions) -> Result<Vec<u8>>
{
    options.validate()?;
    if image.data.len() != image.width * image.height * 3
    {
        return Err(CodecError::InvalidArgument(format!(
            "expected {} RGB bytes for a {}x{} image, got {}",
            image.width * image.height * 3,
            image.width,
            image.height,
            image.data.len()
        )));
    }

    let ycc = rgb_to_ycbcr_420(image);
    let tables = default_tables()?;
    let luma_q = scale_table(&BASE_LUMA, options.quality);
    let chroma_q = scale_table(&BASE_CHROMA, options.quality);

    let mcu_cols = ycc.width.div_ceil(MCU_SIZE);
    let mcu_rows = ycc.height.div_ceil(MCU_SIZE);
    debug!(
        "encoding {}x{} image as {}x{} MCUs at quality {}",
        ycc.width, ycc.height, mcu_cols, mcu_rows, options.quality
    );

    let padded_luma_w = mcu_cols * MCU_SIZE;
    let padded_luma_h = mcu_rows * MCU_SIZE;
    let y_padded = pad_plane(&ycc.y, ycc.width, ycc.height, padded_luma_w, padded_luma_h);
    let y_blocks = block::split_into_blocks(&y_padded, padded_luma_w, padded_luma_h);
    let y_blocks_per_row = padded_luma_w / BLOCK_SIZE;

    let cb_blocks = block::split_into_blocks(&ycc.cb, ycc.chroma_width, ycc.chroma_height);
    let cr_blocks = block::split_into_blocks(&ycc.cr, ycc.chroma_width, ycc.chroma_height);

    // Pass 1: transform every block in scan order, per component, so the
    // DC sequence each component's DPCM predictor sees is exactly the
    // order it will be emitted in.
    let mut y_transformed = Vec::with_capacity(mcu_cols * mcu_rows * 4);
    let mut cb_transformed = Vec::with_capacity(mcu_cols * mcu_rows);
    let mut cr_transformed = Vec::with_capacity(mcu_cols * mcu_rows);

    for mcu_row in 0..mcu_rows
    {
        for mcu_col in 0..mcu_cols
        {
            for (dy, dx) in [(0, 0), (0, 1), (1, 0), (1, 1)]
            {
                let gy = mcu_row * 2 + dy;
                let gx = mcu_col * 2 + dx;
                y_transformed.push(transform_block(&y_blocks[gy * y_blocks_per_row + gx], &luma_q));
            }
            let chroma_idx = mcu_row * mcu_cols + mcu_col;
            cb_transformed.push(transform_block(&cb_blocks[chroma_idx], &chroma_q));
            cr_transformed.push(transform_block(&cr_blocks[chroma_idx], &chroma_q));
        }
    }

    let y_dc: Vec<i32> = y_transformed.iter().map(|b| b.dc).collect();
    let cb_dc: Vec<i32> = cb_transformed.iter().map(|b| b.dc).collect();
    let cr_dc: Vec<i32> = cr_transformed.iter().map(|b| b.dc).collect();
    let y_diffs = dpcm_encode(&y_dc);
    let cb_diffs = dpcm_encode(&cb_dc);
    let cr_diffs = dpcm_encode(&cr_dc);

    // Pass 2: emit in the same scan order, reading the precomputed DC
    // differences and AC coefficients.
    let mut writer = BitWriter::new();
    let mut y_idx = 0usize;
    for mcu_row in 0..mcu_rows
    {
        for mcu_col in 0..mcu_cols
        {
            for _ in 0..4
            {
                emit_block(y_diffs[y_idx], &y_transformed[y_idx].ac, &tables.dc_luma, &tables.ac_luma, &mut writer)?;
                y_idx += 1;
            }
            let chroma_idx = mcu_row * mcu_cols + mcu_col;
            emit_block(
                cb_diffs[chroma_idx], &cb_transformed[chroma_idx].ac, &tables.dc_chroma, &tables.ac_chroma,
                &mut writer
            )?;
            emit_block(
                cr_diffs[chroma_idx], &cr_transformed[chroma_idx].ac, &tables.dc_chroma, &tables.ac_chroma,
                &mut writer
            )?;
        }
    }

    Ok(writer.finalize())
}
