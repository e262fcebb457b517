//! Compressing a whole stream: header first, then one prefix code per input byte.

use super::bit_writer::BitWriter;
use super::code_table::EncodingTable;
use super::frequency::FrequencyTable;
use crate::errors::Error;
use crate::header::write_header;
use crate::io::{BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use crate::tree::HuffmanTree;

/// Compress everything `source` yields from its current position on, and write
/// the encoded stream to `target`.
///
/// The source is read twice. The first pass counts byte frequencies, then the
/// source is seeked back to where it started and the second pass emits the codes.
///
/// On error nothing more is written, and the bits of a partially filled final
/// byte are dropped.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// let mut encoded = Vec::new();
/// huffpack::encode(Cursor::new(b"abaca"), &mut encoded).unwrap();
/// // 41 bits of counts and terminator, 3 leaves of 9 bits, 2 internal nodes, 7 code bits
/// assert_eq!(encoded.len(), 10);
/// ```
pub fn encode<R: Read + Seek, W: Write>(mut source: R, target: W) -> Result<(), Error> {
    let start = source.stream_position()?;
    let frequencies = FrequencyTable::from_reader(&mut source)?;
    source.seek(SeekFrom::Start(start))?;

    let tree = HuffmanTree::from_frequencies(&frequencies);
    let mut writer = BitWriter::new(target);
    write_header(&mut writer, &frequencies, tree.as_ref())?;

    if let Some(tree) = tree {
        let table = EncodingTable::build(&tree);
        let encoded = encode_symbols(BufReader::new(source), &table, &mut writer)?;
        if encoded != u64::from(frequencies.total()) {
            return Err(Error::SourceChanged);
        }
    }

    writer.flush()
}

/// Emit the code of every byte in `source`, returning how many bytes were encoded.
fn encode_symbols<R: Read, W: Write>(
    mut source: BufReader<R>,
    table: &EncodingTable,
    writer: &mut BitWriter<W>,
) -> Result<u64, Error> {
    let mut buf = [0u8; 8 * 1024];
    let mut encoded: u64 = 0;
    loop {
        let read = match source.read(&mut buf) {
            Ok(0) => return Ok(encoded),
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for &byte in &buf[..read] {
            let code = table.get(byte).ok_or(Error::SourceChanged)?;
            writer.write_bits(code.bits, u32::from(code.len))?;
        }
        encoded += read as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::encode;
    use crate::errors::Error;
    use crate::io::{Cursor, Read, Seek, SeekFrom};

    #[test]
    fn abaca_stream() {
        let mut encoded = Vec::new();
        encode(Cursor::new(b"abaca"), &mut encoded).unwrap();
        // 70 header bits, then the codes 1 00 1 01 1 and one bit of padding
        assert_eq!(encoded.len(), 10);
        assert_eq!(&encoded[..5], &[0, 0, 0, 5, 3]);
        assert_eq!(encoded[8], 0b0001_0010);
        assert_eq!(encoded[9], 0b0101_1000);
    }

    #[test]
    fn encodes_from_current_position() {
        let mut source = Cursor::new(b"skipped:abaca".to_vec());
        source.seek(SeekFrom::Start(8)).unwrap();
        let mut from_middle = Vec::new();
        encode(&mut source, &mut from_middle).unwrap();

        let mut direct = Vec::new();
        encode(Cursor::new(b"abaca"), &mut direct).unwrap();
        assert_eq!(from_middle, direct);
    }

    #[test]
    fn empty_source_writes_header_only() {
        let mut encoded = Vec::new();
        encode(Cursor::new(b""), &mut encoded).unwrap();
        assert_eq!(encoded, vec![0; 6]);
    }

    /// Yields a different byte on every pass.
    struct Shifting {
        pass: u8,
        pos: u64,
    }

    impl Read for Shifting {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= 4 || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.pass;
            self.pos += 1;
            Ok(1)
        }
    }

    impl Seek for Shifting {
        fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
            if let SeekFrom::Start(0) = pos {
                self.pass += 1;
            }
            self.pos = 0;
            Ok(0)
        }

        fn stream_position(&mut self) -> std::io::Result<u64> {
            Ok(self.pos)
        }
    }

    #[test]
    fn detects_changed_source() {
        let mut encoded = Vec::new();
        let result = encode(Shifting { pass: 0, pos: 0 }, &mut encoded);
        assert!(matches!(result, Err(Error::SourceChanged)));
    }
}
