//! Compact, self-delimiting, canonical byte encodings for integers and IEEE-754 floats.
//!
//! Integers are written as a sequence of chunks, most-significant chunk first. Each chunk is one
//! byte carrying 7 value bits; the top bit of every byte except the last one is set. Signed
//! integers use a two's complement chunk sequence whose first chunk carries the sign in its top
//! value bit, so the sign can be read from the first byte alone.
//!
//! Floats are reduced to an `(exponent, mantissa)` pair with `value = mantissa * 2^exponent` and
//! an odd mantissa, then written as two signed integers. Infinities, NaNs, and negative zero use
//! pairs whose mantissa is zero, which the general path never produces.
//!
//! Every value has exactly one encoding, and decoding rejects anything else.
//!
//! ```
//! use chunkcode::{decode_float64, encode_float64};
//!
//! let mut buf = [0u8; 32];
//! let n = encode_float64(1.5, &mut buf).unwrap();
//! assert_eq!(&buf[..n], &[0x7f, 0x03]);
//! assert_eq!(decode_float64(&buf[..n]), Ok((1.5, 2)));
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod chunk;
mod codec;
mod float;
mod format;
mod order;
mod reader;
mod special;
mod word;
#[cfg(feature = "std")]
mod writer;


pub use chunk::{Encoded, VarInt, MAX_ENCODED_LEN};
pub use codec::{
    decode_float32, decode_float64, decode_float80, decode_signed_int, decode_unsigned_int,
    encode_float32, encode_float64, encode_float80, encode_signed_int, encode_unsigned_int,
    EncodeError,
};
pub use float::{decode_float, encode_float};
pub use format::{Decomposed, Double, Extended, Extended80, FieldLayout, FloatFormat, Single};
pub use order::{cmp_signed_encoded, cmp_unsigned_encoded, is_negative_encoded};
pub use reader::{DecodeError, ValueReader};
pub use word::{DoubleWord, MantissaWord, UDoubleWord, UWord, Word, WORD_BITS};
#[cfg(feature = "std")]
pub use writer::ValueWriter;
