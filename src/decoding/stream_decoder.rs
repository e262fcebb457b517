use super::bit_reader::BitReader;
use crate::errors::Error;
use crate::header::read_header;
use crate::io::{BufWriter, Read, Write};
use crate::tree::{HuffmanTree, Node};

/// Decompress the stream read from `source` and write the original bytes to `target`.
///
/// Exactly as many symbols as the header declares are decoded. The stream must
/// end after them: only the zero padding of the last byte may follow, anything
/// more is reported as [`Error::CountMismatch`].
///
/// # Examples
/// ```
/// let encoded = huffpack::encode_to_vec(b"hello huffman").unwrap();
/// let mut decoded = Vec::new();
/// huffpack::decode(&encoded[..], &mut decoded).unwrap();
/// assert_eq!(&decoded[..], b"hello huffman");
/// ```
pub fn decode<R: Read, W: Write>(source: R, target: W) -> Result<(), Error> {
    let mut reader = BitReader::new(source);
    let header = read_header(&mut reader)?;
    let mut drain = BufWriter::new(target);

    if let Some(tree) = &header.tree {
        decode_symbols(&mut reader, tree, header.symbol_count, &mut drain)?;
    }

    if !reader.at_end()? {
        let trailing_bytes = reader.skip_to_end()?;
        return Err(Error::CountMismatch {
            declared: header.symbol_count,
            trailing_bytes,
        });
    }

    drain.flush()?;
    Ok(())
}

fn decode_symbols<R: Read, W: Write>(
    reader: &mut BitReader<R>,
    tree: &HuffmanTree,
    symbol_count: u32,
    drain: &mut W,
) -> Result<(), Error> {
    for decoded in 0..symbol_count {
        let symbol = next_symbol(reader, tree).map_err(|e| match e {
            Error::EndOfStream { .. } => Error::CorruptStream {
                decoded,
                declared: symbol_count,
            },
            other => other,
        })?;
        drain.write_all(&[symbol])?;
    }
    Ok(())
}

/// Walk from the root to a leaf, one bit per step.
fn next_symbol<R: Read>(reader: &mut BitReader<R>, tree: &HuffmanTree) -> Result<u8, Error> {
    if tree.is_single_leaf() {
        // the only symbol still got a one bit code
        reader.get_bit()?;
    }

    let mut node = tree.node(tree.root());
    loop {
        match node {
            Node::Leaf(symbol) => return Ok(symbol),
            Node::Internal { left, right } => {
                let next = if reader.get_bit()? { right } else { left };
                node = tree.node(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::decode;
    use crate::errors::Error;
    use crate::{decode_to_vec, encode_to_vec};

    #[test]
    fn abaca() {
        let encoded = encode_to_vec(b"abaca").unwrap();
        let mut decoded = Vec::new();
        decode(&encoded[..], &mut decoded).unwrap();
        assert_eq!(decoded, b"abaca");
    }

    #[test]
    fn empty_stream() {
        assert_eq!(decode_to_vec(&[0; 6]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn single_leaf_reads_one_bit_per_symbol() {
        let encoded = encode_to_vec(&[0x41; 16]).unwrap();
        // 41 bits of counts and terminator plus one leaf, then 16 code bits
        assert_eq!(encoded.len(), (41 + 9 + 16 + 7) / 8);
        assert_eq!(decode_to_vec(&encoded).unwrap(), vec![0x41; 16]);
    }

    #[test]
    fn truncated_single_leaf_stream() {
        let encoded = encode_to_vec(&[0x41; 16]).unwrap();
        // 50 header bits, so the first 8 bytes hold 14 of the 16 code bits
        match decode_to_vec(&encoded[..8]) {
            Err(Error::CorruptStream { decoded, declared }) => {
                assert_eq!(decoded, 14);
                assert_eq!(declared, 16);
            }
            other => panic!("Expected CorruptStream, got {:?}", other),
        }
    }

    #[test]
    fn truncated_code_stream() {
        let data = b"a reasonably long sentence, long enough to span several bytes of codes";
        let encoded = encode_to_vec(data).unwrap();
        let cut = &encoded[..encoded.len() - 3];
        match decode_to_vec(cut) {
            Err(Error::CorruptStream { decoded, declared }) => {
                assert_eq!(declared, data.len() as u32);
                assert!(decoded < declared);
            }
            other => panic!("Expected CorruptStream, got {:?}", other),
        }
    }

    #[test]
    fn trailing_data() {
        let mut encoded = encode_to_vec(b"abaca").unwrap();
        encoded.extend_from_slice(&[0xAA, 0xBB]);
        match decode_to_vec(&encoded) {
            Err(Error::CountMismatch {
                declared,
                trailing_bytes,
            }) => {
                assert_eq!(declared, 5);
                assert_eq!(trailing_bytes, 2);
            }
            other => panic!("Expected CountMismatch, got {:?}", other),
        }
    }

    #[test]
    fn trailing_data_after_empty_stream() {
        assert!(matches!(
            decode_to_vec(&[0, 0, 0, 0, 0, 0, 1]),
            Err(Error::CountMismatch { declared: 0, trailing_bytes: 1 })
        ));
    }
}
