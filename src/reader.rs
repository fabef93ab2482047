use crate::chunk::{max_len, VarInt, MORE};
use crate::float::decode_float;
use crate::format::{Double, Extended, Extended80, FloatFormat, Single};
use crate::word::{UWord, Word};
use core::fmt;

pub type Result<T> = core::result::Result<T, DecodeError>;

/// Reads values from a slice of bytes, one after another.
///
/// Each `read_*` method decodes one value from the front of `data` and, on success, advances
/// `data` past it. On failure `data` is left unchanged, so a caller that receives
/// `Err(DecodeError::Truncated)` can read more input, extend the slice, and call the same method
/// again.
pub struct ValueReader<'a> {
    /// The input data being parsed. Each time a value is parsed from `data`, `data` is reassigned
    /// to the remaining data.
    pub data: &'a [u8],
}

impl<'a> ValueReader<'a> {
    /// Constructor
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Whether all input has been consumed.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    fn advance<T>(&mut self, (value, len): (T, usize)) -> T {
        self.data = &self.data[len..];
        value
    }

    /// Reads an integer of any [`VarInt`] type.
    pub fn read_varint<T: VarInt>(&mut self) -> Result<T> {
        let decoded = T::decode(self.data)?;
        Ok(self.advance(decoded))
    }

    /// Reads a signed [`Word`].
    pub fn read_word(&mut self) -> Result<Word> {
        self.read_varint()
    }

    /// Reads an unsigned [`UWord`].
    pub fn read_uword(&mut self) -> Result<UWord> {
        self.read_varint()
    }

    /// Reads an `i32`.
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_varint()
    }

    /// Reads a `u32`.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_varint()
    }

    /// Reads an `i64`.
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_varint()
    }

    /// Reads a `u64`.
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_varint()
    }

    /// Reads an `i128`.
    pub fn read_i128(&mut self) -> Result<i128> {
        self.read_varint()
    }

    /// Reads a `u128`.
    pub fn read_u128(&mut self) -> Result<u128> {
        self.read_varint()
    }

    /// Reads the bytes of one encoded integer without decoding them. The result can be compared
    /// with [`cmp_signed_encoded`](crate::cmp_signed_encoded) or
    /// [`cmp_unsigned_encoded`](crate::cmp_unsigned_encoded).
    ///
    /// Only framing is checked; the value may still be malformed or too wide for any type.
    pub fn read_encoded_int(&mut self) -> Result<&'a [u8]> {
        let Some(last) = self.data.iter().position(|&b| b & MORE == 0) else {
            return Err(DecodeError::Truncated);
        };
        if last >= max_len(u128::BITS) {
            return Err(DecodeError::Overflow);
        }
        let (lo, hi) = self.data.split_at(last + 1);
        self.data = hi;
        Ok(lo)
    }

    /// Reads a float of format `F`.
    pub fn read_float<F: FloatFormat>(&mut self) -> Result<F::Value> {
        let decoded = decode_float::<F>(self.data)?;
        Ok(self.advance(decoded))
    }

    /// Reads an `f32`.
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_float::<Single>()
    }

    /// Reads an `f64`.
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_float::<Double>()
    }

    /// Reads an x87 extended precision value.
    pub fn read_f80(&mut self) -> Result<Extended80> {
        self.read_float::<Extended>()
    }
}

/// Error type for decoding.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum DecodeError {
    /// The input ended inside a value.
    ///
    /// The value may still be well-formed, if the rest of the data can be read.
    Truncated,

    /// The value does not fit the type being decoded.
    Overflow,

    /// The input is not a valid encoding: it is not minimal, it uses an unassigned special-value
    /// sentinel, or it describes a float the format cannot represent exactly.
    Malformed,
}

impl core::error::Error for DecodeError {}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => f.write_str("The input ended inside a value"),
            Self::Overflow => f.write_str("The value does not fit the target type"),
            Self::Malformed => f.write_str("The input is not a valid encoding"),
        }
    }
}

#[cfg(feature = "std")]
impl From<DecodeError> for std::io::Error {
    fn from(e: DecodeError) -> Self {
        let kind = match e {
            DecodeError::Truncated => std::io::ErrorKind::UnexpectedEof,
            DecodeError::Overflow | DecodeError::Malformed => std::io::ErrorKind::InvalidData,
        };
        std::io::Error::new(kind, e)
    }
}
