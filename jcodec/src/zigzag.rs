//! Zig-zag scan order (`spec.md` §4.4, C4).
//!
//! `ZIGZAG_ORDER[i]` is the natural row-major index of the pixel visited at
//! zig-zag position `i`. This is the same table the teacher bakes in as
//! `UN_ZIGZAG` (`zune-jpeg/src/misc.rs`) for "undo run length encoding of
//! coefficients by placing them in natural order" — used here in both
//! directions since the mapping is its own permutation's key.

#[rustfmt::skip]
pub const ZIGZAG_ORDER: [usize; 64] = [
    0,  1,  8,  16, 9,  2,  3, 10,
    17, 24, 32, 25, 18, 11, 4,  5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13, 6,  7,  14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63,
];

/// Scan an 8x8 row-major block of `i32` coefficients into zig-zag order
/// (used post-quantization, where coefficients are already integral).
pub fn zigzag_i32(block: &[i32; 64]) -> [i32; 64]
{
    let mut out = [0; 64];
    for (i, &natural_idx) in ZIGZAG_ORDER.iter().enumerate()
    {
        out[i] = block[natural_idx];
    }
    out
}

/// Inverse of [`zigzag_i32`]: place a zig-zag ordered vector back into
/// row-major order.
pub fn inverse_zigzag_i32(scan: &[i32; 64]) -> [i32; 64]
{
    let mut out = [0; 64];
    for (i, &natural_idx) in ZIGZAG_ORDER.iter().enumerate()
    {
        out[natural_idx] = scan[i];
    }
    out
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn round_trip()
    {
        let mut block = [0i32; 64];
        for (i, v) in block.iter_mut().enumerate()
        {
            *v = i as i32;
        }
        let scanned = zigzag_i32(&block);
        let restored = inverse_zigzag_i32(&scanned);
        assert_eq!(block, restored);
    }

    #[test]
    fn permutation_is_bijective()
    {
        let mut seen = [false; 64];
        for &idx in ZIGZAG_ORDER.iter()
        {
            assert!(!seen[idx], "index {idx} visited twice");
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&b| b));
    }
}
