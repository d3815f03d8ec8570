//! Canonical Huffman tables (`spec.md` §4.3, C3).
//!
//! Construction follows T.81 Annex C ("generate_size_table" /
//! "generate_code_table") as laid out in
//! `examples/original_source/huffman_coding.py`'s `build_huffman_table`:
//! codes are assigned in symbol order, shortest codes first, incrementing
//! within a length and shifting left by one bit when the length grows. The
//! teacher builds an analogous table in `zune-jpeg/src/huffman_constants.rs`
//! plus a 9-bit lookahead table in its decoder; this crate keeps the
//! simpler bit-by-bit decode `spec.md` §4.3 asks for instead of a lookahead
//! table, since the fast path isn't a goal here.

use std::collections::HashMap;

use crate::bitio::{BitReader, BitWriter};
use crate::errors::{CodecError, Result};

/// A canonical Huffman table built from a JPEG-style `(BITS, HUFFVAL)`
/// pair.
#[derive(Debug, Clone)]
pub struct HuffmanTable
{
    /// symbol -> (code, code length in bits)
    encode_map: HashMap<u8, (u16, u8)>,
    /// (code length, code) -> symbol
    decode_map: HashMap<(u8, u16), u8>,
    max_code_length: u8
}

impl HuffmanTable
{
    /// Build a canonical table from per-length code counts (`bits[i]` is
    /// the number of codes of length `i + 1`) and the symbols in
    /// code-assignment order (`huffval`).
    ///
    /// Fails with [`CodecError::BadTable`] if the counts don't add up to
    /// `huffval.len()`, or if a length would need more codes than fit in
    /// that many bits.
    pub fn from_bits_huffval(bits: &[u8; 16], huffval: &[u8]) -> Result<HuffmanTable>
    {
        let total: usize = bits.iter().map(|&b| usize::from(b)).sum();
        if total != huffval.len()
        {
            return Err(CodecError::BadTable(format!(
                "BITS sums to {total} codes but HUFFVAL has {} symbols",
                huffval.len()
            )));
        }

        // generate_size_table: one entry per symbol, its code length.
        let mut sizes = Vec::with_capacity(huffval.len());
        for (len_minus_one, &count) in bits.iter().enumerate()
        {
            for _ in 0..count
            {
                sizes.push((len_minus_one + 1) as u8);
            }
        }

        // generate_code_table: assign codes in symbol order, shortest
        // first, incrementing within a length and shifting on growth.
        let mut codes = Vec::with_capacity(sizes.len());
        let mut code: u32 = 0;
        let mut si = sizes.first().copied().unwrap_or(0);
        let mut k = 0;
        while k < sizes.len()
        {
            while k < sizes.len() && sizes[k] == si
            {
                if code >= (1u32 << si)
                {
                    return Err(CodecError::BadTable(format!(
                        "too many codes of length {si} for a canonical table"
                    )));
                }
                codes.push(code as u16);
                code += 1;
                k += 1;
            }
            code <<= 1;
            si += 1;
        }

        let mut encode_map = HashMap::with_capacity(huffval.len());
        let mut decode_map = HashMap::with_capacity(huffval.len());
        let mut max_code_length = 0u8;
        for ((&symbol, &len), &code) in huffval.iter().zip(sizes.iter()).zip(codes.iter())
        {
            encode_map.insert(symbol, (code, len));
            decode_map.insert((len, code), symbol);
            max_code_length = max_code_length.max(len);
        }

        Ok(HuffmanTable { encode_map, decode_map, max_code_length })
    }

    /// Write the canonical code for `symbol` to `writer`.
    pub fn encode(&self, writer: &mut BitWriter, symbol: u8) -> Result<()>
    {
        let &(code, len) = self
            .encode_map
            .get(&symbol)
            .ok_or_else(|| CodecError::BadTable(format!("no code assigned for symbol {symbol}")))?;
        writer.write_bits(u32::from(code), len);
        Ok(())
    }

    /// Read one Huffman-coded symbol, bit by bit, from `reader`.
    pub fn decode(&self, reader: &mut BitReader) -> Result<u8>
    {
        let mut code: u16 = 0;
        for len in 1..=self.max_code_length
        {
            let bit = reader.read_bits(1)?;
            code = (code << 1) | bit as u16;
            if let Some(&symbol) = self.decode_map.get(&(len, code))
            {
                return Ok(symbol);
            }
        }
        Err(CodecError::BadCode)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::huffman_tables::{DC_LUMA_BITS, DC_LUMA_HUFFVAL};

    #[test]
    fn dc_luma_canonical_codes() -> Result<()>
    {
        // S3: the default DC luminance table's codes, per T.81 Annex K.
        let table = HuffmanTable::from_bits_huffval(&DC_LUMA_BITS, &DC_LUMA_HUFFVAL)?;
        let (code, len) = table.encode_map[&0];
        assert_eq!((code, len), (0b00, 2));
        let (code, len) = table.encode_map[&1];
        assert_eq!((code, len), (0b010, 3));
        let (code, len) = table.encode_map[&2];
        assert_eq!((code, len), (0b011, 3));
        let (code, len) = table.encode_map[&11];
        assert_eq!((code, len), (0b111111110, 9));
        Ok(())
    }

    #[test]
    fn every_symbol_round_trips_through_bits() -> Result<()>
    {
        // property 2
        let table = HuffmanTable::from_bits_huffval(&DC_LUMA_BITS, &DC_LUMA_HUFFVAL)?;
        for &symbol in DC_LUMA_HUFFVAL.iter()
        {
            let mut writer = BitWriter::new();
            table.encode(&mut writer, symbol)?;
            let bytes = writer.finalize();
            let mut reader = BitReader::new(&bytes);
            assert_eq!(table.decode(&mut reader)?, symbol);
        }
        Ok(())
    }

    #[test]
    fn mismatched_counts_are_rejected()
    {
        let bits = [1u8; 16];
        let huffval = [0u8, 1];
        assert!(matches!(
            HuffmanTable::from_bits_huffval(&bits, &huffval),
            Err(CodecError::BadTable(_))
        ));
    }

    #[test]
    fn garbage_bits_fail_to_decode() -> Result<()>
    {
        let table = HuffmanTable::from_bits_huffval(&DC_LUMA_BITS, &DC_LUMA_HUFFVAL)?;
        // all-ones, long enough to exhaust every valid code length (max 9
        // bits here) without ever matching one
        let mut writer = BitWriter::new();
        writer.write_bits(0xFFFF, 16);
        let bytes = writer.finalize();
        let mut reader = BitReader::new(&bytes);
        assert_eq!(table.decode(&mut reader), Err(CodecError::BadCode));
        Ok(())
    }
}
