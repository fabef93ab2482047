//! Float formats and their bit-field layouts.

use crate::chunk::VarInt;
use crate::word::{DoubleWord, MantissaWord, Word};
use core::fmt;
use zerocopy::byteorder::{LE, U16, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Positions and widths of the fields of an IEEE-754 binary format.
///
/// Fields are packed from the least significant bit: mantissa, then exponent, then one sign bit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldLayout {
    /// Width of the biased exponent field.
    pub exponent_bits: u32,
    /// Width of the stored mantissa field.
    pub mantissa_bits: u32,
    /// Whether the leading significand bit is stored in the mantissa field (x87 extended), rather
    /// than implied by a non-zero exponent.
    pub explicit_leading_bit: bool,
}

/// The fields of a float, as stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Decomposed {
    /// Sign bit.
    pub negative: bool,
    /// Exponent field, including the bias.
    pub biased_exponent: u32,
    /// Mantissa field. For formats with an implicit leading bit, the leading bit is not included.
    pub mantissa: u128,
}

impl FieldLayout {
    /// Bit position of the sign.
    pub const fn sign_bit(&self) -> u32 {
        self.exponent_bits + self.mantissa_bits
    }

    /// Bit position of the lowest exponent bit.
    pub const fn exponent_shift(&self) -> u32 {
        self.mantissa_bits
    }

    /// Number of significand bits, including the leading bit.
    pub const fn digits(&self) -> u32 {
        if self.explicit_leading_bit {
            self.mantissa_bits
        } else {
            self.mantissa_bits + 1
        }
    }

    /// Exponent bias.
    pub const fn bias(&self) -> i32 {
        (1 << (self.exponent_bits - 1)) - 1
    }

    /// The all-ones exponent field, used by infinities and NaNs.
    pub const fn max_exponent(&self) -> u32 {
        (1 << self.exponent_bits) - 1
    }

    /// Unbiased exponent of the smallest normal value.
    pub const fn min_normal_exponent(&self) -> i32 {
        1 - self.bias()
    }

    /// The leading significand bit, at the top of a `digits()`-wide significand.
    pub const fn leading_bit(&self) -> u128 {
        1 << (self.digits() - 1)
    }

    /// The mantissa bit that marks a NaN as quiet.
    pub const fn quiet_bit(&self) -> u128 {
        1 << (self.digits() - 2)
    }

    /// The mantissa bits below the leading bit.
    pub const fn fraction_mask(&self) -> u128 {
        self.leading_bit() - 1
    }

    /// Splits a bit pattern into its fields.
    pub const fn decompose(&self, bits: u128) -> Decomposed {
        Decomposed {
            negative: (bits >> self.sign_bit()) & 1 != 0,
            biased_exponent: ((bits >> self.exponent_shift()) & self.max_exponent() as u128) as u32,
            mantissa: bits & ((1 << self.mantissa_bits) - 1),
        }
    }

    /// Packs fields into a bit pattern. Fields wider than the layout are truncated.
    pub const fn compose(&self, fields: &Decomposed) -> u128 {
        ((fields.negative as u128) << self.sign_bit())
            | ((fields.biased_exponent & self.max_exponent()) as u128) << self.exponent_shift()
            | (fields.mantissa & ((1 << self.mantissa_bits) - 1))
    }

    /// The full significand of a finite value and the unbiased exponent of its leading bit
    /// position, so that `value = significand * 2^(exponent - (digits - 1))`.
    pub(crate) const fn significand(&self, fields: &Decomposed) -> (i32, u128) {
        if fields.biased_exponent == 0 {
            (self.min_normal_exponent(), fields.mantissa)
        } else if self.explicit_leading_bit {
            (fields.biased_exponent as i32 - self.bias(), fields.mantissa)
        } else {
            (
                fields.biased_exponent as i32 - self.bias(),
                fields.mantissa | self.leading_bit(),
            )
        }
    }
}

/// A float format: its bit layout, its native value type, and the integer type its mantissa is
/// coded through.
pub trait FloatFormat {
    /// The value type, e.g. `f64`.
    type Value: Copy;

    /// Integer the reduced mantissa is coded through.
    type Mantissa: MantissaWord;

    /// Field layout.
    const LAYOUT: FieldLayout;

    /// Length of the longest encoding of a value of this format.
    const MAX_LEN: usize = 2 * <Self::Mantissa as VarInt>::MAX_LEN;

    /// The bit pattern of `value`.
    fn to_bits(value: Self::Value) -> u128;

    /// The value with bit pattern `bits`.
    fn from_bits(bits: u128) -> Self::Value;
}

/// IEEE-754 binary32, `f32`.
#[derive(Clone, Copy, Debug)]
pub struct Single;

/// IEEE-754 binary64, `f64`.
#[derive(Clone, Copy, Debug)]
pub struct Double;

/// x87 80-bit extended precision, [`Extended80`].
#[derive(Clone, Copy, Debug)]
pub struct Extended;

impl FloatFormat for Single {
    type Value = f32;
    type Mantissa = Word;

    const LAYOUT: FieldLayout = FieldLayout {
        exponent_bits: 8,
        mantissa_bits: 23,
        explicit_leading_bit: false,
    };

    fn to_bits(value: f32) -> u128 {
        value.to_bits() as u128
    }

    fn from_bits(bits: u128) -> f32 {
        f32::from_bits(bits as u32)
    }
}

impl FloatFormat for Double {
    type Value = f64;

    #[cfg(all(target_pointer_width = "64", not(feature = "word32")))]
    type Mantissa = Word;
    #[cfg(any(
        target_pointer_width = "32",
        all(target_pointer_width = "64", feature = "word32")
    ))]
    type Mantissa = DoubleWord;

    const LAYOUT: FieldLayout = FieldLayout {
        exponent_bits: 11,
        mantissa_bits: 52,
        explicit_leading_bit: false,
    };

    fn to_bits(value: f64) -> u128 {
        value.to_bits() as u128
    }

    fn from_bits(bits: u128) -> f64 {
        f64::from_bits(bits as u64)
    }
}

impl FloatFormat for Extended {
    type Value = Extended80;

    // A 64-bit significand and a sign bit do not fit a 32-bit double word.
    #[cfg(all(target_pointer_width = "64", not(feature = "word32")))]
    type Mantissa = DoubleWord;
    #[cfg(any(
        target_pointer_width = "32",
        all(target_pointer_width = "64", feature = "word32")
    ))]
    type Mantissa = i128;

    const LAYOUT: FieldLayout = FieldLayout {
        exponent_bits: 15,
        mantissa_bits: 64,
        explicit_leading_bit: true,
    };

    fn to_bits(value: Extended80) -> u128 {
        value.to_bits()
    }

    fn from_bits(bits: u128) -> Extended80 {
        Extended80::from_bits(bits)
    }
}

// Each mantissa type must hold the format's full significand plus a sign bit.
const _: () = {
    assert!(Single::LAYOUT.digits() < <<Single as FloatFormat>::Mantissa as VarInt>::BITS);
    assert!(Double::LAYOUT.digits() < <<Double as FloatFormat>::Mantissa as VarInt>::BITS);
    assert!(Extended::LAYOUT.digits() < <<Extended as FloatFormat>::Mantissa as VarInt>::BITS);
};

/// An x87 80-bit extended precision value, stored as its 10-byte little-endian image.
///
/// Rust has no native 80-bit float type, so this type only carries the bits. It converts exactly
/// from `f32` and `f64`.
///
/// The encoding keeps the value, not the bits. Patterns whose explicit leading bit disagrees with
/// the exponent are written as the canonical pattern for the same value, and decode to it:
///
/// * unnormals (exponent non-zero, leading bit clear) decode as the normal or denormal of equal
///   value, and unnormal zeros as a zero of the same sign;
/// * pseudo-denormals (exponent zero, leading bit set) decode with exponent 1;
/// * pseudo-infinities and pseudo-NaNs (exponent all ones, leading bit clear) decode with the
///   leading bit set.
///
/// Every other value round-trips bit for bit, except for the NaN cases described on
/// [`encode_float`](crate::encode_float).
#[derive(
    Clone, Copy, Eq, PartialEq, Hash, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned,
)]
#[repr(C)]
pub struct Extended80 {
    significand: U64<LE>,
    sign_exponent: U16<LE>,
}

impl Extended80 {
    const EXPONENT_MASK: u16 = 0x7fff;
    const SIGN: u16 = 0x8000;

    /// Builds a value from its sign, 15-bit biased exponent, and 64-bit significand (which
    /// includes the explicit leading bit).
    pub fn from_parts(negative: bool, biased_exponent: u16, significand: u64) -> Self {
        let sign = if negative { Self::SIGN } else { 0 };
        Self {
            significand: U64::new(significand),
            sign_exponent: U16::new(sign | (biased_exponent & Self::EXPONENT_MASK)),
        }
    }

    /// Reads the 10-byte little-endian memory image.
    pub fn from_le_bytes(bytes: [u8; 10]) -> Self {
        zerocopy::transmute!(bytes)
    }

    /// The 10-byte little-endian memory image.
    pub fn to_le_bytes(self) -> [u8; 10] {
        zerocopy::transmute!(self)
    }

    /// Builds a value from the low 80 bits of `bits`.
    pub fn from_bits(bits: u128) -> Self {
        Self {
            significand: U64::new(bits as u64),
            sign_exponent: U16::new((bits >> 64) as u16),
        }
    }

    /// The 80-bit pattern, in the low bits of a `u128`.
    pub fn to_bits(self) -> u128 {
        ((self.sign_exponent.get() as u128) << 64) | self.significand.get() as u128
    }

    /// The sign bit.
    pub fn is_sign_negative(self) -> bool {
        self.sign_exponent.get() & Self::SIGN != 0
    }

    /// The biased exponent field.
    pub fn biased_exponent(self) -> u16 {
        self.sign_exponent.get() & Self::EXPONENT_MASK
    }

    /// The significand field, including the explicit leading bit.
    pub fn significand(self) -> u64 {
        self.significand.get()
    }

    /// Whether this is a NaN.
    pub fn is_nan(self) -> bool {
        self.biased_exponent() == Self::EXPONENT_MASK && self.significand() << 1 != 0
    }

    /// Widens a value of a narrower binary format. Every value, NaN payloads included, is
    /// represented exactly.
    fn widen(layout: &FieldLayout, bits: u128) -> Self {
        const LEADING: u64 = 1 << 63;
        let fields = layout.decompose(bits);
        let fraction_shift = u64::BITS - layout.digits();
        let rebias = |unbiased: i32| (unbiased + Extended::LAYOUT.bias()) as u16;

        let (biased_exponent, significand) = if fields.biased_exponent == layout.max_exponent() {
            (
                Self::EXPONENT_MASK,
                LEADING | (fields.mantissa as u64) << fraction_shift,
            )
        } else if fields.biased_exponent == 0 && fields.mantissa == 0 {
            (0, 0)
        } else if fields.biased_exponent == 0 {
            // Subnormal in the narrow format, normal here.
            let m = fields.mantissa as u64;
            let lz = m.leading_zeros();
            let top = (u64::BITS - 1 - lz) as i32;
            let scale = layout.min_normal_exponent() - (layout.digits() as i32 - 1);
            (rebias(top + scale), m << lz)
        } else {
            (
                rebias(fields.biased_exponent as i32 - layout.bias()),
                LEADING | (fields.mantissa as u64) << fraction_shift,
            )
        };

        Self::from_parts(fields.negative, biased_exponent, significand)
    }
}

impl From<f32> for Extended80 {
    fn from(value: f32) -> Self {
        Self::widen(&Single::LAYOUT, Single::to_bits(value))
    }
}

impl From<f64> for Extended80 {
    fn from(value: f64) -> Self {
        Self::widen(&Double::LAYOUT, Double::to_bits(value))
    }
}

impl fmt::Debug for Extended80 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Extended80 {{ sign: {}, exponent: 0x{:04x}, significand: 0x{:016x} }}",
            self.is_sign_negative() as u8,
            self.biased_exponent(),
            self.significand()
        )
    }
}
