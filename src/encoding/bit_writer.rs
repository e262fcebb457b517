use crate::common::MAX_BITS_PER_CALL;
use crate::errors::{ArgumentError, Error};
use crate::io::{BufWriter, Write};

/// An interface for writing an arbitrary number of bits into a byte stream.
///
/// Only the current partial byte is kept here, whole bytes go straight to a
/// [`BufWriter`] around the sink.
pub struct BitWriter<W: Write> {
    drain: BufWriter<W>,
    /// Bits waiting for the rest of their byte, aligned to the most significant end.
    container: u8,
    /// How many of the high bits in `container` are occupied. Always below 8.
    bits_in_container: u8,
}

impl<W: Write> BitWriter<W> {
    /// Initialize a new writer. Write new bits with `write_bits`, and
    /// finish with `flush`.
    pub fn new(drain: W) -> Self {
        Self {
            drain: BufWriter::new(drain),
            container: 0,
            bits_in_container: 0,
        }
    }

    /// Write the low `num_bits` bits of `value` into the writer.
    ///
    /// The bits are written starting from the *most significant* of the selected
    /// bits, continuing to the least significant one. Higher bits of `value` are
    /// ignored.
    pub fn write_bits(&mut self, value: u64, num_bits: u32) -> Result<(), Error> {
        if num_bits > MAX_BITS_PER_CALL {
            return Err(ArgumentError::TooManyBits {
                requested: num_bits,
                limit: MAX_BITS_PER_CALL,
            }
            .into());
        }

        let mut remaining = num_bits;
        while remaining > 0 {
            let free_bits = 8 - u32::from(self.bits_in_container);
            let take = remaining.min(free_bits);
            // `remaining - take` is below 64 because take is at least one
            let chunk = (value >> (remaining - take)) & ((1 << take) - 1);
            self.container |= (chunk as u8) << (free_bits - take);
            self.bits_in_container += take as u8;
            remaining -= take;

            if self.bits_in_container == 8 {
                self.drain.write_all(&[self.container])?;
                self.container = 0;
                self.bits_in_container = 0;
            }
        }
        Ok(())
    }

    /// Write a whole byte, same as `write_bits(byte, 8)`.
    pub fn write_byte(&mut self, byte: u8) -> Result<(), Error> {
        if self.bits_in_container == 0 {
            self.drain.write_all(&[byte])?;
            return Ok(());
        }
        self.write_bits(u64::from(byte), 8)
    }

    /// Pad the partial byte with zeros, emit it and flush the underlying stream.
    ///
    /// Calling this again without writing more bits only flushes the sink.
    pub fn flush(&mut self) -> Result<(), Error> {
        if self.bits_in_container > 0 {
            self.drain.write_all(&[self.container])?;
            self.container = 0;
            self.bits_in_container = 0;
        }
        self.drain.flush()?;
        Ok(())
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(mut self) -> Result<W, Error> {
        self.flush()?;
        self.drain
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}
