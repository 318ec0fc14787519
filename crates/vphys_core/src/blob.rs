//! Decoding of KV3 byte arrays into fixed-size records.
//!
//! A byte array (`#[ 3F 80 00 00 .. ]`) is a stream of hex byte pairs. The
//! stream is cut into `size_of::<R>()`-byte chunks and each chunk is read as
//! one little-endian record. No semantic validation happens here; bad
//! indices surface later in the hull and mesh builders.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vphys_math::Vec3;

/// Errors that can occur while decoding a byte array.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid hex digit {found:?} at offset {offset}")]
    InvalidHexDigit { found: char, offset: usize },

    #[error("Odd number of hex digits ({0}), last byte is incomplete")]
    IncompletePair(usize),

    #[error("{extra} trailing byte(s) do not fill a {record_size}-byte record")]
    TrailingBytes { extra: usize, record_size: usize },
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// What to do with bytes left over after the last complete record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TailPolicy {
    /// Discard them (with a warning)
    #[default]
    Drop,

    /// Fail with [`DecodeError::TrailingBytes`]
    Reject,
}

/// A plain value that can be read from little-endian bytes.
pub trait Record: bytemuck::Pod {
    /// Convert a value read with native byte order from little-endian storage.
    fn from_le(raw: Self) -> Self;
}

impl Record for u8 {
    fn from_le(raw: Self) -> Self {
        raw
    }
}

impl Record for u32 {
    fn from_le(raw: Self) -> Self {
        u32::from_le(raw)
    }
}

impl Record for i32 {
    fn from_le(raw: Self) -> Self {
        i32::from_le(raw)
    }
}

impl Record for f32 {
    fn from_le(raw: Self) -> Self {
        f32::from_bits(u32::from_le(raw.to_bits()))
    }
}

impl Record for [f32; 3] {
    fn from_le(raw: Self) -> Self {
        raw.map(<f32 as Record>::from_le)
    }
}

/// Decode a hex byte string. Whitespace anywhere is ignored.
pub fn hex_to_bytes(hex: &str) -> DecodeResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(hex.len() / 3 + 1);
    let mut high: Option<u8> = None;
    let mut digits = 0usize;

    for (offset, c) in hex.char_indices() {
        if c.is_ascii_whitespace() {
            continue;
        }

        let nibble = c
            .to_digit(16)
            .ok_or(DecodeError::InvalidHexDigit { found: c, offset })? as u8;
        digits += 1;

        match high.take() {
            Some(h) => bytes.push((h << 4) | nibble),
            None => high = Some(nibble),
        }
    }

    if high.is_some() {
        return Err(DecodeError::IncompletePair(digits));
    }

    Ok(bytes)
}

/// Decode a hex byte string into a sequence of `R` records.
pub fn decode<R: Record>(hex: &str, tail: TailPolicy) -> DecodeResult<Vec<R>> {
    let bytes = hex_to_bytes(hex)?;
    let record_size = std::mem::size_of::<R>();

    let chunks = bytes.chunks_exact(record_size);
    let extra = chunks.remainder().len();

    if extra > 0 {
        match tail {
            TailPolicy::Drop => log::warn!(
                "Dropping {} trailing byte(s) that do not fill a {}-byte record",
                extra,
                record_size
            ),
            TailPolicy::Reject => {
                return Err(DecodeError::TrailingBytes { extra, record_size });
            }
        }
    }

    Ok(chunks
        .map(|chunk| R::from_le(bytemuck::pod_read_unaligned(chunk)))
        .collect())
}

/// Decode packed `float[3]` positions.
pub fn decode_points(hex: &str, tail: TailPolicy) -> DecodeResult<Vec<Vec3>> {
    Ok(decode::<[f32; 3]>(hex, tail)?
        .into_iter()
        .map(Vec3::from_array)
        .collect())
}
