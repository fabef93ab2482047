//! Infinities, NaNs, and negative zero.
//!
//! These are written as an `(exponent, mantissa)` pair whose mantissa is zero and whose exponent
//! is one of the sentinels below. The general path writes a zero mantissa only for positive zero,
//! with a zero exponent, so the two never collide.
//!
//! | value             | exponent        | bytes   |
//! |-------------------|-----------------|---------|
//! | `+inf`            | 1               | `01 00` |
//! | `-inf`            | -1              | `7f 00` |
//! | quiet NaN         | 2               | `02 00` |
//! | `-0`              | -2              | `7e 00` |
//! | signaling NaN     | payload + 3     | `.. 00` |
//!
//! Quiet NaNs lose their sign and payload. Signaling NaNs keep their payload, and lose their sign.

use crate::chunk::Encoded;
use crate::format::{Decomposed, FieldLayout};
use crate::reader::{DecodeError, Result};
use crate::word::MantissaWord;

pub(crate) const POSITIVE_INFINITY: i32 = 1;
pub(crate) const NEGATIVE_INFINITY: i32 = -1;
pub(crate) const QUIET_NAN: i32 = 2;
pub(crate) const NEGATIVE_ZERO: i32 = -2;

/// Added to a signaling NaN's payload, which is never zero, so the result is never one of the
/// fixed sentinels.
pub(crate) const SIGNALING_NAN_OFFSET: i32 = 3;

/// Writes a value whose exponent field is all ones.
pub(crate) fn encode_non_finite<M: MantissaWord>(
    layout: &FieldLayout,
    fields: &Decomposed,
    out: &mut Encoded,
) {
    let fraction = fields.mantissa & layout.fraction_mask();
    let exponent = if fraction == 0 {
        M::from(if fields.negative {
            NEGATIVE_INFINITY
        } else {
            POSITIVE_INFINITY
        })
    } else if fraction & layout.quiet_bit() != 0 {
        M::from(QUIET_NAN)
    } else {
        M::from_field(fraction + SIGNALING_NAN_OFFSET as u128)
    };
    write_sentinel(exponent, out);
}

/// Writes negative zero.
pub(crate) fn encode_negative_zero<M: MantissaWord>(out: &mut Encoded) {
    write_sentinel(M::from(NEGATIVE_ZERO), out);
}

fn write_sentinel<M: MantissaWord>(exponent: M, out: &mut Encoded) {
    exponent.encode_into(out);
    M::ZERO.encode_into(out);
}

/// Rebuilds the bit pattern for a sentinel exponent that was followed by a zero mantissa.
pub(crate) fn decode<M: MantissaWord>(layout: &FieldLayout, exponent: M) -> Result<u128> {
    let non_finite = |negative: bool, fraction: u128| {
        let leading = if layout.explicit_leading_bit {
            layout.leading_bit()
        } else {
            0
        };
        layout.compose(&Decomposed {
            negative,
            biased_exponent: layout.max_exponent(),
            mantissa: leading | fraction,
        })
    };

    let bits = match exponent.to_i128() {
        // Positive zero comes from the general path.
        0 => 0,
        e if e == NEGATIVE_ZERO as i128 => layout.compose(&Decomposed {
            negative: true,
            biased_exponent: 0,
            mantissa: 0,
        }),
        e if e == POSITIVE_INFINITY as i128 => non_finite(false, 0),
        e if e == NEGATIVE_INFINITY as i128 => non_finite(true, 0),
        e if e == QUIET_NAN as i128 => non_finite(false, layout.quiet_bit()),
        e if e > SIGNALING_NAN_OFFSET as i128 => {
            let payload = (e - SIGNALING_NAN_OFFSET as i128) as u128;
            if payload >= layout.quiet_bit() {
                return Err(DecodeError::Malformed);
            }
            non_finite(false, payload)
        }
        _ => return Err(DecodeError::Malformed),
    };

    Ok(bits)
}
