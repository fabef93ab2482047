//! Native integer widths, and the integer types a float mantissa can be coded through.

use crate::chunk::VarInt;
use core::ops::{BitAnd, Shr};

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("chunkcode supports only 32-bit and 64-bit targets");

#[cfg(all(target_pointer_width = "64", not(feature = "word32")))]
mod native {
    /// Signed integer as wide as a general-purpose register.
    pub type Word = i64;
    /// Unsigned integer as wide as a general-purpose register.
    pub type UWord = u64;
    /// Signed integer twice as wide as [`Word`].
    pub type DoubleWord = i128;
    /// Unsigned integer twice as wide as [`UWord`].
    pub type UDoubleWord = u128;
}

#[cfg(any(
    target_pointer_width = "32",
    all(target_pointer_width = "64", feature = "word32")
))]
mod native {
    /// Signed integer as wide as a general-purpose register.
    pub type Word = i32;
    /// Unsigned integer as wide as a general-purpose register.
    pub type UWord = u32;
    /// Signed integer twice as wide as [`Word`].
    pub type DoubleWord = i64;
    /// Unsigned integer twice as wide as [`UWord`].
    pub type UDoubleWord = u64;
}

pub use native::*;

/// Width of [`Word`], in bits.
pub const WORD_BITS: u32 = Word::BITS;

/// A signed integer that holds a reduced float mantissa, with its sign folded in.
///
/// Each [`FloatFormat`](crate::FloatFormat) picks one of these at build time: [`Word`] when the
/// format's significand and a sign bit fit in it, a wider type otherwise.
pub trait MantissaWord:
    VarInt + From<i32> + BitAnd<Output = Self> + Shr<u32, Output = Self>
{
    /// Zero.
    const ZERO: Self;
    /// One.
    const ONE: Self;

    /// Converts a significand field. The field must fit, leaving room for the sign.
    fn from_field(bits: u128) -> Self;

    /// Two's complement negation.
    fn negate(self) -> Self;

    /// Whether the value is negative, and its magnitude.
    fn to_sign_magnitude(self) -> (bool, u128);

    /// Widens to `i128`.
    fn to_i128(self) -> i128;
}

macro_rules! impl_mantissa_word {
    ($($t:ty),*) => {$(
        impl MantissaWord for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline(always)]
            fn from_field(bits: u128) -> Self {
                bits as $t
            }

            #[inline(always)]
            fn negate(self) -> Self {
                self.wrapping_neg()
            }

            #[inline(always)]
            fn to_sign_magnitude(self) -> (bool, u128) {
                (self < 0, self.unsigned_abs() as u128)
            }

            #[inline(always)]
            fn to_i128(self) -> i128 {
                self as i128
            }
        }
    )*};
}

impl_mantissa_word!(i32, i64, i128);
