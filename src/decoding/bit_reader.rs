use crate::common::MAX_BITS_PER_CALL;
use crate::errors::{ArgumentError, Error};
use crate::io::{BufRead, BufReader, ErrorKind, Read};

/// Reads values of arbitrary width from a byte stream, most significant bit first.
pub struct BitReader<R: Read> {
    source: BufReader<R>,
    /// The last byte taken from the source. Only the low `bits_in_container` bits are unread.
    container: u8,
    bits_in_container: u8,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        BitReader {
            source: BufReader::new(source),
            container: 0,
            bits_in_container: 0,
        }
    }

    /// Read the next `n` bits as an unsigned value, the first bit read ending up
    /// as the most significant one.
    ///
    /// Fails with [`Error::EndOfStream`] if the stream ends before `n` bits were
    /// read. The reader should not be used after any error.
    pub fn get_bits(&mut self, n: u32) -> Result<u64, Error> {
        if n > MAX_BITS_PER_CALL {
            return Err(ArgumentError::TooManyBits {
                requested: n,
                limit: MAX_BITS_PER_CALL,
            }
            .into());
        }

        let mut value: u64 = 0;
        let mut remaining = n;
        while remaining > 0 {
            if self.bits_in_container == 0 {
                if remaining >= 8 {
                    // aligned, whole bytes can skip the container
                    value = (value << 8) | u64::from(self.next_byte(remaining)?);
                    remaining -= 8;
                    continue;
                }
                self.container = self.next_byte(remaining)?;
                self.bits_in_container = 8;
            }

            let take = remaining.min(u32::from(self.bits_in_container));
            let shift = u32::from(self.bits_in_container) - take;
            let chunk = (u32::from(self.container) >> shift) & ((1 << take) - 1);
            // take is at most 8, so this never shifts a full 64 bits
            value = (value << take) | u64::from(chunk);
            self.bits_in_container -= take as u8;
            remaining -= take;
        }
        Ok(value)
    }

    pub fn get_bit(&mut self) -> Result<bool, Error> {
        Ok(self.get_bits(1)? == 1)
    }

    /// The bits left over in the current partial byte, right aligned, with their count.
    #[cfg(test)]
    pub(crate) fn pending_bits(&self) -> (u8, u8) {
        let mask = ((1u16 << self.bits_in_container) - 1) as u8;
        (self.container & mask, self.bits_in_container)
    }

    /// Check whether any whole byte is left in the source.
    ///
    /// Bits remaining in the current partial byte do not count.
    pub fn at_end(&mut self) -> Result<bool, Error> {
        loop {
            match self.source.fill_buf() {
                Ok(buf) => return Ok(buf.is_empty()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Consume the rest of the source, returning how many bytes it held.
    pub fn skip_to_end(&mut self) -> Result<u64, Error> {
        Ok(std::io::copy(&mut self.source, &mut std::io::sink())?)
    }

    fn next_byte(&mut self, requested_bits: u32) -> Result<u8, Error> {
        let mut byte = [0u8; 1];
        match self.source.read_exact(&mut byte) {
            Ok(()) => Ok(byte[0]),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                Err(Error::EndOfStream { requested_bits })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BitReader;
    use crate::errors::{ArgumentError, Error};

    #[test]
    fn reads_msb_first() {
        let mut br = BitReader::new(&[0b1011_0010, 0b0111_1111][..]);
        assert_eq!(br.get_bits(1).unwrap(), 0b1);
        assert_eq!(br.get_bits(3).unwrap(), 0b011);
        assert_eq!(br.get_bits(2).unwrap(), 0b00);
        // crosses into the second byte
        assert_eq!(br.get_bits(4).unwrap(), 0b1001);
        assert_eq!(br.get_bits(6).unwrap(), 0b11_1111);
        assert!(br.at_end().unwrap());
    }

    #[test]
    fn zero_bits() {
        let mut br = BitReader::new(&[][..]);
        assert_eq!(br.get_bits(0).unwrap(), 0);
    }

    #[test]
    fn whole_bytes_plus_remainder() {
        let mut br = BitReader::new(&[0xAB, 0xCD, 0xEF, 0x80][..]);
        assert_eq!(br.get_bits(4).unwrap(), 0xA);
        assert_eq!(br.get_bits(21).unwrap(), 0b1011_1100_1101_1110_1111_1);
        assert_eq!(br.pending_bits(), (0, 7));
    }

    #[test]
    fn full_64_bits() {
        let data = [0xFF, 1, 2, 3, 4, 5, 6, 7, 8];
        let mut br = BitReader::new(&data[..]);
        assert_eq!(br.get_bits(8).unwrap(), 0xFF);
        assert_eq!(br.get_bits(64).unwrap(), 0x0102_0304_0506_0708);

        let mut br = BitReader::new(&data[..]);
        assert_eq!(br.get_bits(4).unwrap(), 0xF);
        assert_eq!(br.get_bits(64).unwrap(), 0xF010_2030_4050_6070);
        assert_eq!(br.get_bits(4).unwrap(), 0x8);
    }

    #[test]
    fn end_of_stream() {
        let mut br = BitReader::new(&[0xFF][..]);
        assert_eq!(br.get_bits(5).unwrap(), 0b11111);
        match br.get_bits(4) {
            Err(Error::EndOfStream { requested_bits }) => assert_eq!(requested_bits, 1),
            other => panic!("Expected EndOfStream, got {:?}", other),
        }
    }

    #[test]
    fn end_of_stream_on_empty_source() {
        let mut br = BitReader::new(&[][..]);
        assert!(matches!(br.get_bit(), Err(Error::EndOfStream { .. })));
    }

    #[test]
    fn catches_too_many_bits() {
        let mut br = BitReader::new(&[0; 16][..]);
        assert!(matches!(
            br.get_bits(65),
            Err(Error::InvalidArgument(ArgumentError::TooManyBits { .. }))
        ));
    }

    #[test]
    fn trailing_bytes() {
        let mut br = BitReader::new(&[0xFF, 0, 0, 0][..]);
        br.get_bits(3).unwrap();
        assert!(!br.at_end().unwrap());
        assert_eq!(br.skip_to_end().unwrap(), 3);
        assert!(br.at_end().unwrap());
    }
}
