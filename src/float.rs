//! Float encoding.
//!
//! A finite non-zero value is reduced to `mantissa * 2^exponent`, where the mantissa is an odd
//! integer carrying the sign. The exponent is written first, then the mantissa, both as signed
//! integers. Because the pair describes the real value and not the format's fields, a value has
//! the same encoding in every format that can represent it: `1.0f32` and `1.0f64` are both
//! `00 01`.

use crate::chunk::{Encoded, VarInt};
use crate::format::{Decomposed, FieldLayout, FloatFormat};
use crate::reader::{DecodeError, Result};
use crate::special;
use crate::word::{MantissaWord, Word};

/// The canonical `(exponent, mantissa)` pair of a finite value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Reduced<M> {
    pub exponent: i32,
    pub mantissa: M,
}

impl<M: MantissaWord> Reduced<M> {
    /// Reduces a finite value. Returns `None` for zero, which has its own handling.
    pub fn from_fields(layout: &FieldLayout, fields: &Decomposed) -> Option<Self> {
        let (lead, significand) = layout.significand(fields);
        if significand == 0 {
            return None;
        }

        let mut exponent = lead - (layout.digits() as i32 - 1);
        let mut mantissa = M::from_field(significand);
        if fields.negative {
            mantissa = mantissa.negate();
        }

        // Trailing zeros: first in whole chunks, then bit by bit.
        let chunk = M::from(0x7f);
        while mantissa & chunk == M::ZERO {
            mantissa = mantissa >> 7;
            exponent += 7;
        }
        while mantissa & M::ONE == M::ZERO {
            mantissa = mantissa >> 1;
            exponent += 1;
        }

        Some(Self { exponent, mantissa })
    }

    pub fn encode_into(&self, out: &mut Encoded) {
        Word::from(self.exponent).encode_into(out);
        self.mantissa.encode_into(out);
    }

    /// Rebuilds the bit pattern. Fails if the mantissa is even, or if the value is out of the
    /// format's range or needs more precision than it has.
    pub fn to_bits(&self, layout: &FieldLayout) -> Result<u128> {
        if self.mantissa & M::ONE == M::ZERO {
            return Err(DecodeError::Malformed);
        }

        let (negative, magnitude) = self.mantissa.to_sign_magnitude();
        let width = u128::BITS - magnitude.leading_zeros();
        let digits = layout.digits();
        if width > digits {
            return Err(DecodeError::Malformed);
        }

        let exponent = i64::from(self.exponent);
        let lead = exponent + i64::from(width) - 1;
        if lead > i64::from(layout.bias()) {
            return Err(DecodeError::Malformed);
        }

        let min_normal = i64::from(layout.min_normal_exponent());
        let (biased_exponent, significand) = if lead >= min_normal {
            (
                (lead + i64::from(layout.bias())) as u32,
                magnitude << (digits - width),
            )
        } else {
            // Subnormal. The shift is below `digits - width`, since `lead < min_normal`.
            let shift = exponent - (min_normal - (i64::from(digits) - 1));
            if shift < 0 {
                return Err(DecodeError::Malformed);
            }
            (0, magnitude << shift as u32)
        };

        let mantissa = if layout.explicit_leading_bit {
            significand
        } else {
            significand & layout.fraction_mask()
        };

        Ok(layout.compose(&Decomposed {
            negative,
            biased_exponent,
            mantissa,
        }))
    }
}

/// Encodes a float of format `F`.
///
/// Finite values and infinities decode to the same bits, apart from the non-canonical x87
/// patterns listed on [`Extended80`](crate::Extended80). Quiet NaNs decode to the format's default
/// quiet NaN; signaling NaNs keep their payload and lose their sign.
pub fn encode_float<F: FloatFormat>(value: F::Value) -> Encoded {
    let layout = F::LAYOUT;
    let fields = layout.decompose(F::to_bits(value));
    let mut out = Encoded::new();

    if fields.biased_exponent == layout.max_exponent() {
        special::encode_non_finite::<F::Mantissa>(&layout, &fields, &mut out);
    } else if let Some(reduced) = Reduced::<F::Mantissa>::from_fields(&layout, &fields) {
        reduced.encode_into(&mut out);
    } else if fields.negative {
        special::encode_negative_zero::<F::Mantissa>(&mut out);
    } else {
        Reduced {
            exponent: 0,
            mantissa: F::Mantissa::ZERO,
        }
        .encode_into(&mut out);
    }

    out
}

/// Decodes a float of format `F` from the start of `data`. Returns the value and the number of
/// bytes consumed.
///
/// # Errors
/// * [`DecodeError::Truncated`] if `data` ends inside the value.
/// * [`DecodeError::Overflow`] if the exponent or mantissa does not fit the format's mantissa
///   integer type.
/// * [`DecodeError::Malformed`] for an unknown sentinel, a non-canonical pair, or a value the
///   format cannot represent exactly.
pub fn decode_float<F: FloatFormat>(data: &[u8]) -> Result<(F::Value, usize)> {
    let layout = F::LAYOUT;

    // The exponent position also holds signaling NaN payloads, which can be as wide as the
    // mantissa.
    let (exponent, exponent_len) = F::Mantissa::decode(data)?;
    let (mantissa, mantissa_len) = F::Mantissa::decode(&data[exponent_len..])?;

    let bits = if mantissa == F::Mantissa::ZERO {
        special::decode(&layout, exponent)?
    } else {
        let exponent =
            i32::try_from(exponent.to_i128()).map_err(|_| DecodeError::Malformed)?;
        Reduced { exponent, mantissa }.to_bits(&layout)?
    };

    Ok((F::from_bits(bits), exponent_len + mantissa_len))
}
