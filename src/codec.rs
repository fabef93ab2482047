//! Entry points for the row/column writer: one value in or out of a caller-supplied buffer.
//!
//! A buffer of [`MAX_ENCODED_LEN`](crate::MAX_ENCODED_LEN) bytes is always large enough.

use crate::chunk::{Encoded, VarInt};
use crate::float::{decode_float, encode_float};
use crate::format::{Double, Extended, Extended80, Single};
use crate::reader::Result;
use crate::word::{UWord, Word};
use core::fmt;

fn copy_out(encoded: Encoded, out: &mut [u8]) -> core::result::Result<usize, EncodeError> {
    let len = encoded.len();
    let Some(dst) = out.get_mut(..len) else {
        return Err(EncodeError::BufferTooSmall {
            needed: len,
            available: out.len(),
        });
    };
    dst.copy_from_slice(&encoded);
    Ok(len)
}

/// Encodes a signed [`Word`] into `out`. Returns the number of bytes written.
pub fn encode_signed_int(value: Word, out: &mut [u8]) -> core::result::Result<usize, EncodeError> {
    copy_out(value.encode(), out)
}

/// Encodes an unsigned [`UWord`] into `out`. Returns the number of bytes written.
pub fn encode_unsigned_int(
    value: UWord,
    out: &mut [u8],
) -> core::result::Result<usize, EncodeError> {
    copy_out(value.encode(), out)
}

/// Decodes a signed [`Word`]. Returns the value and the number of bytes consumed.
pub fn decode_signed_int(data: &[u8]) -> Result<(Word, usize)> {
    Word::decode(data)
}

/// Decodes an unsigned [`UWord`]. Returns the value and the number of bytes consumed.
pub fn decode_unsigned_int(data: &[u8]) -> Result<(UWord, usize)> {
    UWord::decode(data)
}

/// Encodes an `f32` into `out`. Returns the number of bytes written.
pub fn encode_float32(value: f32, out: &mut [u8]) -> core::result::Result<usize, EncodeError> {
    copy_out(encode_float::<Single>(value), out)
}

/// Encodes an `f64` into `out`. Returns the number of bytes written.
pub fn encode_float64(value: f64, out: &mut [u8]) -> core::result::Result<usize, EncodeError> {
    copy_out(encode_float::<Double>(value), out)
}

/// Encodes an x87 extended precision value into `out`. Returns the number of bytes written.
///
/// Non-canonical bit patterns are written as the canonical value they stand for; see
/// [`Extended80`].
pub fn encode_float80(
    value: Extended80,
    out: &mut [u8],
) -> core::result::Result<usize, EncodeError> {
    copy_out(encode_float::<Extended>(value), out)
}

/// Decodes an `f32`. Returns the value and the number of bytes consumed.
pub fn decode_float32(data: &[u8]) -> Result<(f32, usize)> {
    decode_float::<Single>(data)
}

/// Decodes an `f64`. Returns the value and the number of bytes consumed.
pub fn decode_float64(data: &[u8]) -> Result<(f64, usize)> {
    decode_float::<Double>(data)
}

/// Decodes an x87 extended precision value. Returns the value and the number of bytes consumed.
pub fn decode_float80(data: &[u8]) -> Result<(Extended80, usize)> {
    decode_float::<Extended>(data)
}

/// Error type for the functions that encode into a caller-supplied buffer.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum EncodeError {
    /// The output buffer is too short for the encoded value. Nothing was written.
    BufferTooSmall {
        /// Length of the encoded value.
        needed: usize,
        /// Length of the output buffer.
        available: usize,
    },
}

impl core::error::Error for EncodeError {}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall { needed, available } => write!(
                f,
                "The output buffer is too small: {needed} bytes needed, {available} available"
            ),
        }
    }
}
