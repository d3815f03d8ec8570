//! Quality-scaled quantization (`spec.md` §4.6, C6).
//!
//! Base tables are the T.81 Annex K luminance/chrominance matrices, baked
//! in verbatim like the teacher bakes in its zig-zag table. Scaling follows
//! `examples/original_source/adjust_quantization_matrix.py`; quantize/
//! dequantize follow `examples/original_source/quantization.py`, with
//! round-half-away-from-zero rather than numpy's round-half-to-even since
//! `spec.md` §4.6 calls for the former explicitly.

#[rustfmt::skip]
pub const BASE_LUMA: [u16; 64] = [
    16, 11, 10, 16, 24,  40,  51,  61,
    12, 12, 14, 19, 26,  58,  60,  55,
    14, 13, 16, 24, 40,  57,  69,  56,
    14, 17, 22, 29, 51,  87,  80,  62,
    18, 22, 37, 56, 68, 109, 103,  77,
    24, 35, 55, 64, 81, 104, 113,  92,
    49, 64, 78, 87,103, 121, 120, 101,
    72, 92, 95, 98,112, 100, 103,  99,
];

#[rustfmt::skip]
pub const BASE_CHROMA: [u16; 64] = [
    17, 18, 24, 47, 99, 99, 99, 99,
    18, 21, 26, 66, 99, 99, 99, 99,
    24, 26, 56, 99, 99, 99, 99, 99,
    47, 66, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
];

/// Quality-scale factor, `spec.md` §3: `q < 50 -> 5000/q`, else `200 - 2q`.
fn scale_factor(quality: u8) -> f64
{
    let q = f64::from(quality);
    if quality < 50
    {
        5000.0 / q
    }
    else
    {
        200.0 - 2.0 * q
    }
}

/// Scale a base table by the quality factor: `clip(floor((Q*scale+50)/100), 1, 255)`.
pub fn scale_table(base: &[u16; 64], quality: u8) -> [u16; 64]
{
    let scale = scale_factor(quality);
    let mut out = [0u16; 64];
    for (o, &b) in out.iter_mut().zip(base.iter())
    {
        let scaled = ((f64::from(b) * scale + 50.0) / 100.0).floor();
        *o = scaled.clamp(1.0, 255.0) as u16;
    }
    out
}

/// Round half away from zero: sign-preserving half-up on magnitude.
fn round_half_away_from_zero(x: f64) -> f64
{
    if x >= 0.0
    {
        (x + 0.5).floor()
    }
    else
    {
        (x - 0.5).ceil()
    }
}

/// `Qe[u][v] = round(S[u][v] / Q[u][v])`.
pub fn quantize(coeffs: &[f64; 64], table: &[u16; 64]) -> [i32; 64]
{
    let mut out = [0i32; 64];
    for ((o, &s), &q) in out.iter_mut().zip(coeffs.iter()).zip(table.iter())
    {
        debug_assert!(q >= 1, "quantization table entries must be >= 1");
        *o = round_half_away_from_zero(s / f64::from(q)) as i32;
    }
    out
}

/// `Sd[u][v] = Qe[u][v] * Q[u][v]`.
pub fn dequantize(quantized: &[i32; 64], table: &[u16; 64]) -> [f64; 64]
{
    let mut out = [0.0; 64];
    for ((o, &qe), &q) in out.iter_mut().zip(quantized.iter()).zip(table.iter())
    {
        *o = f64::from(qe) * f64::from(q);
    }
    out
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn scaled_tables_stay_in_range()
    {
        for q in 1..=100u8
        {
            let luma = scale_table(&BASE_LUMA, q);
            let chroma = scale_table(&BASE_CHROMA, q);
            for v in luma.iter().chain(chroma.iter())
            {
                assert!((1..=255).contains(v));
            }
        }
    }

    #[test]
    fn dequantize_error_bounded_by_half_step() -> ()
    {
        // property 5: dequantize(quantize(S,Q),Q) differs from S by at most Q/2
        let table = scale_table(&BASE_LUMA, 50);
        let coeffs: [f64; 64] = std::array::from_fn(|i| (i as f64 - 32.0) * 3.7);

        let q = quantize(&coeffs, &table);
        let deq = dequantize(&q, &table);

        for i in 0..64
        {
            let diff = (deq[i] - coeffs[i]).abs();
            assert!(diff <= f64::from(table[i]) / 2.0 + 1e-9);
        }
    }

    #[test]
    fn quality_100_is_near_lossless_scale()
    {
        let table = scale_table(&BASE_LUMA, 100);
        // scale factor at q=100 is 0, so every entry collapses to the
        // minimum of 1 (finest quantization step available).
        assert!(table.iter().all(|&v| v == 1));
    }
}
