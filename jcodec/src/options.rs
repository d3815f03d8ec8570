//! Encoder and decoder options.
//!
//! Mirrors the teacher's `EncoderOptions`/`DecoderOptions` pattern: a small
//! `Copy` struct with a `Default` impl and builder-style `with_*` setters,
//! so the call site reads `EncoderOptions::default().with_quality(90)`
//! instead of constructing the struct by hand.

use crate::errors::{CodecError, Result};

/// Options controlling how an image is encoded.
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions
{
    /// Quality factor in `1..=100`. 1 is worst/smallest, 100 is best/largest.
    ///
    /// - Default value: 75 (libjpeg's long-standing default, also what the
    ///   sibling encoders in the example pack default to).
    pub quality: u8
}

impl Default for EncoderOptions
{
    fn default() -> Self
    {
        Self { quality: 75 }
    }
}

impl EncoderOptions
{
    /// Set the quality factor.
    #[must_use]
    pub const fn with_quality(mut self, quality: u8) -> Self
    {
        self.quality = quality;
        self
    }

    /// Validate the quality factor, returning `InvalidArgument` if it is out
    /// of `spec.md`'s `1..=100` range.
    pub fn validate(&self) -> Result<()>
    {
        if self.quality == 0 || self.quality > 100
        {
            return Err(CodecError::InvalidArgument(format!(
                "quality must be in 1..=100, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}

/// Options controlling how a stream is decoded.
///
/// The baseline decoder has no per-call knobs today (no restart intervals,
/// no progressive scan limits to cap) — this is kept as a struct, rather
/// than dropped, so a future option has somewhere to live without changing
/// `decode`'s signature. The teacher's own `DecoderOptions` is passed to
/// every decoder in the pack even when a given format only reads a fraction
/// of its fields; this follows the same convention.
#[derive(Debug, Copy, Clone, Default)]
pub struct DecoderOptions {}
