//! Forward/inverse 8x8 DCT-II, direct floating point form (`spec.md` §4.5,
//! C5).
//!
//! `spec.md` explicitly calls for a direct floating-point DCT rather than
//! the teacher's integer AAN fast IDCT (`zune-jpeg/src/idct.rs` exists
//! purely to avoid this cost, which isn't a constraint this codec has), so
//! this module is grounded instead on
//! `examples/original_source/dct_2d_matrix_form.py`'s matrix formulation,
//! expressed as plain nested loops rather than a matrix library since the
//! teacher doesn't carry one either.

const N: usize = 8;

/// `T[k][n] = cos((2n+1) k pi / 16)`, the 1D DCT-II basis matrix.
fn basis_matrix() -> [[f64; N]; N]
{
    let mut t = [[0.0; N]; N];
    for (k, row) in t.iter_mut().enumerate()
    {
        for (n, cell) in row.iter_mut().enumerate()
        {
            *cell = (std::f64::consts::PI * (2 * n + 1) as f64 * k as f64 / 16.0).cos();
        }
    }
    t
}

/// `alpha(0) = 1/sqrt(2)`, `alpha(k >= 1) = 1`.
fn alpha(k: usize) -> f64
{
    if k == 0
    {
        std::f64::consts::FRAC_1_SQRT_2
    }
    else
    {
        1.0
    }
}

fn matmul(a: &[[f64; N]; N], b: &[[f64; N]; N]) -> [[f64; N]; N]
{
    let mut out = [[0.0; N]; N];
    for i in 0..N
    {
        for j in 0..N
        {
            let mut sum = 0.0;
            for k in 0..N
            {
                sum += a[i][k] * b[k][j];
            }
            out[i][j] = sum;
        }
    }
    out
}

fn transpose(a: &[[f64; N]; N]) -> [[f64; N]; N]
{
    let mut out = [[0.0; N]; N];
    for i in 0..N
    {
        for j in 0..N
        {
            out[j][i] = a[i][j];
        }
    }
    out
}

fn flatten(a: [[f64; N]; N]) -> [f64; 64]
{
    let mut out = [0.0; 64];
    for i in 0..N
    {
        out[i * N..i * N + N].copy_from_slice(&a[i]);
    }
    out
}

fn unflatten(a: &[f64; 64]) -> [[f64; N]; N]
{
    let mut out = [[0.0; N]; N];
    for i in 0..N
    {
        out[i].copy_from_slice(&a[i * N..i * N + N]);
    }
    out
}

/// Subtract 128 from every sample, the level shift `spec.md` §4.5 applies
/// before the forward transform.
pub fn level_shift(block: &[u8; 64]) -> [f64; 64]
{
    let mut out = [0.0; 64];
    for (o, &p) in out.iter_mut().zip(block.iter())
    {
        *o = f64::from(p) - 128.0;
    }
    out
}

/// Inverse of [`level_shift`]: add 128 back and clip to `u8` range.
pub fn unshift_clip(spatial: &[f64; 64]) -> [u8; 64]
{
    let mut out = [0u8; 64];
    for (o, &s) in out.iter_mut().zip(spatial.iter())
    {
        *o = (s + 128.0).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Forward DCT-II of a level-shifted 8x8 spatial block (row-major, 64
/// entries): `S = (1/4) C (T s T^T)`, `C[u][v] = alpha(u) alpha(v)`.
pub fn forward_dct(spatial: &[f64; 64]) -> [f64; 64]
{
    let t = basis_matrix();
    let s = unflatten(spatial);

    let ts = matmul(&t, &s);
    let t_transposed = transpose(&t);
    let tst = matmul(&ts, &t_transposed);

    let mut coeffs = [[0.0; N]; N];
    for u in 0..N
    {
        for v in 0..N
        {
            coeffs[u][v] = 0.25 * alpha(u) * alpha(v) * tst[u][v];
        }
    }
    flatten(coeffs)
}

/// Inverse DCT: `s = (1/4) T^T (C . S) T`.
pub fn inverse_dct(coeffs: &[f64; 64]) -> [f64; 64]
{
    let t = basis_matrix();
    let s = unflatten(coeffs);

    let mut scaled = [[0.0; N]; N];
    for u in 0..N
    {
        for v in 0..N
        {
            scaled[u][v] = alpha(u) * alpha(v) * s[u][v];
        }
    }

    let t_transposed = transpose(&t);
    let ts = matmul(&t_transposed, &scaled);
    let tst = matmul(&ts, &t);

    let mut spatial = [[0.0; N]; N];
    for i in 0..N
    {
        for j in 0..N
        {
            spatial[i][j] = 0.25 * tst[i][j];
        }
    }
    flatten(spatial)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn round_trip_within_one_per_pixel()
    {
        // property 4
        let pixels: [u8; 64] = std::array::from_fn(|i| ((i * 37 + 11) % 256) as u8);
        let shifted = level_shift(&pixels);
        let coeffs = forward_dct(&shifted);
        let back = inverse_dct(&coeffs);
        let restored = unshift_clip(&back);

        for (orig, rest) in pixels.iter().zip(restored.iter())
        {
            let diff = i32::from(*orig) - i32::from(*rest);
            assert!(diff.abs() <= 1, "pixel drifted by {diff}");
        }
    }

    #[test]
    fn dc_only_block_is_flat()
    {
        let pixels = [128u8; 64];
        let shifted = level_shift(&pixels);
        let coeffs = forward_dct(&shifted);
        // a constant block has zero energy in every AC coefficient
        for &c in coeffs.iter().skip(1)
        {
            assert!(c.abs() < 1e-9, "unexpected AC energy {c}");
        }
    }
}
