use crate::chunk::{Encoded, VarInt};
use crate::float::encode_float;
use crate::format::{Double, Extended, Extended80, FloatFormat, Single};
use crate::word::{UWord, Word};
use std::io::{Result, Write};

/// Writes encoded values to an output stream, one after another.
pub struct ValueWriter<T> {
    /// The output data.
    pub out: T,
}

impl<T: Write> ValueWriter<T> {
    /// Constructor
    pub fn wrap(out: T) -> Self {
        Self { out }
    }

    /// Extracts the inner buffer
    pub fn into_inner(self) -> T {
        self.out
    }

    /// Accesses the inner buffer
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.out
    }

    fn write_encoded(&mut self, encoded: Encoded) -> Result<()> {
        self.out.write_all(&encoded)
    }

    /// Writes an integer of any [`VarInt`] type.
    pub fn write_varint<V: VarInt>(&mut self, value: V) -> Result<()> {
        self.write_encoded(value.encode())
    }

    /// Writes a signed [`Word`].
    pub fn write_word(&mut self, value: Word) -> Result<()> {
        self.write_varint(value)
    }

    /// Writes an unsigned [`UWord`].
    pub fn write_uword(&mut self, value: UWord) -> Result<()> {
        self.write_varint(value)
    }

    /// Writes an `i32`.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_varint(value)
    }

    /// Writes a `u32`.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_varint(value)
    }

    /// Writes an `i64`.
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_varint(value)
    }

    /// Writes a `u64`.
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_varint(value)
    }

    /// Writes an `i128`.
    pub fn write_i128(&mut self, value: i128) -> Result<()> {
        self.write_varint(value)
    }

    /// Writes a `u128`.
    pub fn write_u128(&mut self, value: u128) -> Result<()> {
        self.write_varint(value)
    }

    /// Writes a float of format `F`.
    pub fn write_float<F: FloatFormat>(&mut self, value: F::Value) -> Result<()> {
        self.write_encoded(encode_float::<F>(value))
    }

    /// Writes an `f32`.
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_float::<Single>(value)
    }

    /// Writes an `f64`.
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_float::<Double>(value)
    }

    /// Writes an x87 extended precision value. See [`Extended80`] for how non-canonical bit
    /// patterns are written.
    pub fn write_f80(&mut self, value: Extended80) -> Result<()> {
        self.write_float::<Extended>(value)
    }
}

impl Default for ValueWriter<Vec<u8>> {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueWriter<Vec<u8>> {
    /// Creates a new `ValueWriter` over a `Vec<u8>`. Writes to it do not fail.
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    /// Creates a new `ValueWriter` over a `Vec<u8>` with the given capacity.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            out: Vec::with_capacity(len),
        }
    }
}
