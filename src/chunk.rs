use crate::reader::{DecodeError, Result};
use core::fmt;
use core::ops::Deref;

/// Bit indicating there are more chunks after this one.
pub(crate) const MORE: u8 = 0x80;

/// The 7 value bits of a chunk.
pub(crate) const MASK: u8 = 0x7f;

/// Top value bit of a chunk. In the first chunk of a signed integer, this is the sign.
pub(crate) const SIGN: u8 = 0x40;

/// Capacity of [`Encoded`]. This is enough for any single integer, and for any float, which is
/// two integers.
pub const MAX_ENCODED_LEN: usize = 2 * max_len(u128::BITS);

/// Number of chunks needed for the widest value of a `bits`-wide integer.
pub(crate) const fn max_len(bits: u32) -> usize {
    bits.div_ceil(7) as usize
}

/// The encoding of one value, held inline.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Encoded {
    buf: [u8; MAX_ENCODED_LEN],
    len: u8,
}

impl Encoded {
    pub(crate) const fn new() -> Self {
        Self {
            buf: [0; MAX_ENCODED_LEN],
            len: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn push(&mut self, b: u8) {
        self.buf[self.len as usize] = b;
        self.len += 1;
    }

    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

impl Deref for Encoded {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Encoded {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Encoded[")?;
        for (i, b) in self.as_bytes().iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b:02x}")?;
        }
        f.write_str("]")
    }
}

mod sealed {
    pub trait Sealed {}
}

/// An integer type that has a chunk encoding.
///
/// Implemented for `i32`, `u32`, `i64`, `u64`, `i128` and `u128`. A value has the same encoding
/// in every type that can hold it, so a value can be written as one type and read back as
/// another. Reading a value that does not fit the target type fails with
/// [`DecodeError::Overflow`].
pub trait VarInt: Copy + Eq + Ord + fmt::Debug + sealed::Sealed {
    /// Width of the type, in bits.
    const BITS: u32;

    /// Length of the longest encoding of a value of this type.
    const MAX_LEN: usize;

    /// Appends the encoding of `self` to `out`.
    fn encode_into(self, out: &mut Encoded);

    /// Decodes one value from the start of `data`. Returns the value and the number of bytes
    /// consumed.
    ///
    /// # Errors
    /// * [`DecodeError::Truncated`] if `data` ends before a byte without the continuation bit.
    /// * [`DecodeError::Overflow`] if the value has more chunks than this type can hold, or its
    ///   magnitude does not fit this type.
    /// * [`DecodeError::Malformed`] if the encoding is not minimal.
    fn decode(data: &[u8]) -> Result<(Self, usize)>;

    /// Encodes `self`.
    fn encode(self) -> Encoded {
        let mut out = Encoded::new();
        self.encode_into(&mut out);
        out
    }
}

/// Finds the extent of the chunk sequence at the start of `data`.
fn frame(data: &[u8], max_len: usize) -> Result<&[u8]> {
    let Some(last) = data.iter().position(|&b| b & MORE == 0) else {
        return Err(DecodeError::Truncated);
    };
    if last >= max_len {
        return Err(DecodeError::Overflow);
    }
    Ok(&data[..=last])
}

macro_rules! push_chunks {
    ($value:expr, $shift:expr, $out:expr) => {{
        let mut shift: u32 = $shift;
        loop {
            let chunk = ($value >> shift) as u8 & MASK;
            if shift == 0 {
                $out.push(chunk);
                break;
            }
            $out.push(chunk | MORE);
            shift -= 7;
        }
    }};
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl VarInt for $t {
            const BITS: u32 = <$t>::BITS;
            const MAX_LEN: usize = max_len(<$t>::BITS);

            fn encode_into(self, out: &mut Encoded) {
                // 0 for non-negative values, -1 for negative values
                let fill = self >> (Self::BITS - 1);

                // Skip chunks that only repeat the sign.
                let mut shift = (Self::MAX_LEN as u32 - 1) * 7;
                while shift > 0 && (self >> shift) == fill {
                    shift -= 7;
                }

                // The first chunk must carry the sign in its top value bit. If it does not, lead
                // with a chunk of pure sign.
                let lead = (self >> shift) as u8 & MASK;
                if (lead & SIGN != 0) != (fill != 0) {
                    out.push((fill as u8 & MASK) | MORE);
                }

                push_chunks!(self, shift, out);
            }

            fn decode(data: &[u8]) -> Result<(Self, usize)> {
                let frame = frame(data, Self::MAX_LEN)?;
                let negative = frame[0] & SIGN != 0;
                let fill: $t = if negative { -1 } else { 0 };

                // A leading chunk of pure sign is only allowed when the next chunk needs it.
                if let [first, second, ..] = frame {
                    if first & MASK == fill as u8 & MASK && (second & SIGN != 0) == negative {
                        return Err(DecodeError::Malformed);
                    }
                }

                let mut n = fill;
                for &b in frame {
                    // The bits shifted out, and the new sign bit, must all match the sign.
                    if n >> (Self::BITS - 8) != fill {
                        return Err(DecodeError::Overflow);
                    }
                    n = (n << 7) | (b & MASK) as $t;
                }

                Ok((n, frame.len()))
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl VarInt for $t {
            const BITS: u32 = <$t>::BITS;
            const MAX_LEN: usize = max_len(<$t>::BITS);

            fn encode_into(self, out: &mut Encoded) {
                let mut shift = (Self::MAX_LEN as u32 - 1) * 7;
                while shift > 0 && (self >> shift) == 0 {
                    shift -= 7;
                }

                push_chunks!(self, shift, out);
            }

            fn decode(data: &[u8]) -> Result<(Self, usize)> {
                let frame = frame(data, Self::MAX_LEN)?;

                // Leading zero chunks are never written.
                if frame.len() > 1 && frame[0] & MASK == 0 {
                    return Err(DecodeError::Malformed);
                }

                let mut n: $t = 0;
                for &b in frame {
                    if n >> (Self::BITS - 7) != 0 {
                        return Err(DecodeError::Overflow);
                    }
                    n = (n << 7) | (b & MASK) as $t;
                }

                Ok((n, frame.len()))
            }
        }
    )*};
}

impl_signed!(i32, i64, i128);
impl_unsigned!(u32, u64, u128);
