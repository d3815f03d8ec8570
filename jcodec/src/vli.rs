//! Variable-Length Integer (VLI) codec (`spec.md` §4.2, C2).
//!
//! Category + magnitude coding of signed integers, grounded on
//! `examples/original_source/vli_coding.py`'s `get_vli_category_and_value`
//! / `decode_vli`.

/// Category (`SSSS`) and magnitude bits for a signed integer `x`.
///
/// `category` is `0` iff `x == 0`. `magnitude` holds the low `category` bits
/// of the VLI encoding (MSB-first within those bits).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Vli
{
    pub category:  u8,
    pub magnitude: u32
}

/// Encode a signed integer as (category, magnitude bits).
pub fn encode_vli(x: i32) -> Vli
{
    if x == 0
    {
        return Vli { category: 0, magnitude: 0 };
    }

    let magnitude_abs = x.unsigned_abs();
    let category = 32 - magnitude_abs.leading_zeros();

    let bits = if x > 0
    {
        magnitude_abs
    }
    else
    {
        ((1u32 << category) - 1) - magnitude_abs
    };

    Vli {
        category:  category as u8,
        magnitude: bits
    }
}

/// Decode (category, magnitude bits) back into the signed integer.
///
/// `magnitude` must satisfy `0 <= magnitude < 2^category`; the caller (the
/// Huffman/bitstream layer) is responsible for only ever handing in bits it
/// actually read for that category.
pub fn decode_vli(category: u8, magnitude: u32) -> i32
{
    if category == 0
    {
        return 0;
    }

    let sign_threshold = 1u32 << (category - 1);
    if magnitude >= sign_threshold
    {
        magnitude as i32
    }
    else
    {
        magnitude as i32 - ((1i32 << category) - 1)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn corners()
    {
        // S4
        assert_eq!(encode_vli(-1), Vli { category: 1, magnitude: 0b0 });
        assert_eq!(encode_vli(1), Vli { category: 1, magnitude: 0b1 });
        assert_eq!(encode_vli(-3), Vli { category: 2, magnitude: 0b00 });
        assert_eq!(encode_vli(3), Vli { category: 2, magnitude: 0b11 });
        assert_eq!(encode_vli(0), Vli { category: 0, magnitude: 0 });
    }

    #[test]
    fn round_trip_full_dc_range()
    {
        for x in -2047..=2047
        {
            let v = encode_vli(x);
            assert_eq!(decode_vli(v.category, v.magnitude), x);
            assert_eq!(v.category == 0, x == 0);
        }
    }
}
