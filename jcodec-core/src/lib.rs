//! Core utilities shared by the `jcodec` crate family.
//!
//! This crate holds the pieces that would otherwise be duplicated between an
//! encoder and a decoder crate for the same image format: a small
//! endian-aware byte-stream reader/writer.

pub mod bytestream;
