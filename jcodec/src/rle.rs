//! AC run-length coding (`spec.md` §4.9, C9).
//!
//! Grounded on `examples/original_source/rle_ac_coding.py`'s
//! `rle_encode_ac_coefficients`/`rle_decode_ac_coefficients`, replacing the
//! Python `(run, value)` tuple-with-sentinels with an explicit tagged
//! variant the way `spec.md` §9 asks for ("the AC decoder distinguishes
//! {EOB, ZRL, (run,size)} as a tagged variant") — this also matches how the
//! teacher decomposes a run/size byte in `huffman.rs`'s `ac_lookup` table
//! building (`run = (rs >> 4) & 15`, `size = rs & 15`).

pub const BLOCK_AC_LEN: usize = 63;

/// One decoded token from an AC coefficient stream.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AcToken
{
    /// `run` zeros followed by a nonzero `value`.
    Pair { run: u8, value: i32 },
    /// 16 zeros in a row (`(15, 0)`).
    Zrl,
    /// Remainder of the 63 AC coefficients are zero.
    Eob
}

/// Run-length encode 63 AC coefficients (zig-zag order, DC excluded) into a
/// token stream.
pub fn rle_encode(ac: &[i32; BLOCK_AC_LEN]) -> Vec<AcToken>
{
    let mut tokens = Vec::new();
    let mut run = 0u8;

    for &coeff in ac.iter()
    {
        if coeff == 0
        {
            run += 1;
            if run == 16
            {
                tokens.push(AcToken::Zrl);
                run = 0;
            }
        }
        else
        {
            tokens.push(AcToken::Pair { run, value: coeff });
            run = 0;
        }
    }

    // trailing run of zeros, or a block that produced no pair at all
    tokens.push(AcToken::Eob);
    tokens
}

/// Rebuild the 63-coefficient vector from a token stream.
///
/// Defensive per `spec.md` §4.9/§7: any operation that would write past the
/// 63rd coefficient discards the excess and stops the block rather than
/// panicking or growing past bounds. This is recoverable in-block — the
/// second element of the return value reports whether that happened, so the
/// caller can log a warning, but the block itself is never a hard error.
pub fn rle_decode(tokens: &[AcToken]) -> ([i32; BLOCK_AC_LEN], bool)
{
    let mut out = [0i32; BLOCK_AC_LEN];
    let mut pos = 0usize;
    let mut overflowed = false;

    for token in tokens
    {
        if pos >= BLOCK_AC_LEN
        {
            break;
        }
        match *token
        {
            AcToken::Eob =>
            {
                break;
            }
            AcToken::Zrl =>
            {
                let n = 16.min(BLOCK_AC_LEN - pos);
                if n < 16
                {
                    overflowed = true;
                }
                pos += n;
            }
            AcToken::Pair { run, value } =>
            {
                let n = usize::from(run).min(BLOCK_AC_LEN - pos);
                if n < usize::from(run)
                {
                    overflowed = true;
                }
                pos += n;
                if pos < BLOCK_AC_LEN
                {
                    out[pos] = value;
                    pos += 1;
                }
                else
                {
                    overflowed = true;
                }
            }
        }
    }

    (out, overflowed)
}
