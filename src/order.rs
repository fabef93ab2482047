//! Ordering of encoded integers.
//!
//! Comparing two encodings byte by byte agrees with comparing the values only when both have the
//! same length and the same sign: `16383` is `ff 7f` and `16384` is `81 80 00`. These functions
//! compare the length first, which gives the numeric order for all values.
//!
//! Each argument must be exactly one canonical encoding, as written by this crate.

use crate::chunk::SIGN;
use core::cmp::Ordering;

/// Whether a signed encoding is of a negative value. The sign is the top value bit of the first
/// byte.
pub fn is_negative_encoded(encoded: &[u8]) -> bool {
    encoded.first().is_some_and(|&b| b & SIGN != 0)
}

/// Compares two unsigned encodings. The result is the order of the values they encode.
pub fn cmp_unsigned_encoded(a: &[u8], b: &[u8]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compares two signed encodings. The result is the order of the values they encode.
///
/// Every negative value sorts before every non-negative value. Among non-negative values a
/// longer encoding is larger; among negative values a longer encoding is smaller. Encodings of
/// equal length and sign compare byte by byte.
pub fn cmp_signed_encoded(a: &[u8], b: &[u8]) -> Ordering {
    match (is_negative_encoded(a), is_negative_encoded(b)) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => cmp_unsigned_encoded(a, b),
        (true, true) => b.len().cmp(&a.len()).then_with(|| a.cmp(b)),
    }
}
