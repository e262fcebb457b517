//! The stream header: how many symbols follow, and the tree needed to decode them.
//!
//! ```text
//! symbol count   32 bits
//! leaf count      8 bits   distinct byte values, 256 is stored as 0
//! tree            post-order, per leaf `1` + 8 bit value, per internal node `0`
//! terminator      `0`
//! ```
//!
//! While replaying the tree a `0` closes an internal node whenever two or more
//! subtrees are waiting, otherwise it is the terminator. The number of leaves
//! seen when the terminator arrives has to match the declared leaf count.
//!
//! A stream without symbols has no tree, so its leaf count is 0 and the tree
//! consists of the terminator alone. Every other stream has at least one leaf,
//! which is what makes a stored leaf count of 0 unambiguous for 256 leaves.

use crate::common::{
    ALPHABET_SIZE, INTERNAL_TAG, LEAF_COUNT_BITS, LEAF_TAG, SYMBOL_BITS, SYMBOL_COUNT_BITS,
};
use crate::decoding::bit_reader::BitReader;
use crate::encoding::bit_writer::BitWriter;
use crate::encoding::frequency::FrequencyTable;
use crate::errors::{Error, HeaderError};
use crate::io::{Read, Write};
use crate::tree::{HuffmanTree, Node, NodeArena};

/// The decoded header of a stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// Number of symbols in the code stream following the header.
    pub symbol_count: u32,
    /// `None` exactly when `symbol_count` is 0.
    pub tree: Option<HuffmanTree>,
}

impl Header {
    pub fn leaf_count(&self) -> usize {
        self.tree.as_ref().map_or(0, HuffmanTree::leaf_count)
    }
}

/// Write the header describing `tree`, built from `frequencies`.
pub fn write_header<W: Write>(
    writer: &mut BitWriter<W>,
    frequencies: &FrequencyTable,
    tree: Option<&HuffmanTree>,
) -> Result<(), Error> {
    writer.write_bits(u64::from(frequencies.total()), SYMBOL_COUNT_BITS)?;
    // 256 wraps to 0
    let stored_leaf_count = frequencies.distinct() % ALPHABET_SIZE;
    writer.write_bits(stored_leaf_count as u64, LEAF_COUNT_BITS)?;

    if let Some(tree) = tree {
        for node in tree.post_order() {
            match node {
                Node::Leaf(symbol) => {
                    writer.write_bits(LEAF_TAG, 1)?;
                    writer.write_byte(symbol)?;
                }
                Node::Internal { .. } => writer.write_bits(INTERNAL_TAG, 1)?,
            }
        }
    }
    writer.write_bits(INTERNAL_TAG, 1)
}

/// Read a header and rebuild its tree.
pub fn read_header<R: Read>(reader: &mut BitReader<R>) -> Result<Header, Error> {
    let symbol_count = reader.get_bits(SYMBOL_COUNT_BITS)? as u32;
    let stored_leaf_count = reader.get_bits(LEAF_COUNT_BITS)? as u16;
    let leaf_count = match (symbol_count, stored_leaf_count) {
        (0, 0) => 0,
        (0, declared) => return Err(HeaderError::LeavesWithoutSymbols { declared }.into()),
        (_, 0) => ALPHABET_SIZE as u16,
        (_, declared) => declared,
    };
    if symbol_count < u32::from(leaf_count) {
        return Err(HeaderError::FewerSymbolsThanLeaves {
            symbols: symbol_count,
            leaves: leaf_count,
        }
        .into());
    }

    let tree = read_tree(reader, leaf_count)?;
    Ok(Header { symbol_count, tree })
}

fn read_tree<R: Read>(
    reader: &mut BitReader<R>,
    leaf_count: u16,
) -> Result<Option<HuffmanTree>, Error> {
    let mut arena = NodeArena::with_capacity(2 * usize::from(leaf_count));
    let mut pending: Vec<usize> = Vec::with_capacity(usize::from(leaf_count));
    let mut seen = [false; ALPHABET_SIZE];
    let mut leaves_found: u16 = 0;

    loop {
        if reader.get_bits(1)? == LEAF_TAG {
            if leaves_found == leaf_count {
                return Err(HeaderError::TooManyLeaves {
                    declared: leaf_count,
                }
                .into());
            }
            let symbol = reader.get_bits(SYMBOL_BITS)? as u8;
            if seen[usize::from(symbol)] {
                return Err(HeaderError::DuplicateSymbol { symbol }.into());
            }
            seen[usize::from(symbol)] = true;
            leaves_found += 1;
            pending.push(arena.push_leaf(symbol));
        } else if pending.len() >= 2 {
            // left was pushed first, right sits on top
            let right = pending[pending.len() - 1];
            let left = pending[pending.len() - 2];
            pending.truncate(pending.len() - 2);
            pending.push(arena.join(left, right));
        } else {
            break;
        }
    }

    if leaves_found != leaf_count {
        return Err(HeaderError::LeafCountMismatch {
            declared: leaf_count,
            found: leaves_found,
        }
        .into());
    }

    Ok(pending.pop().map(|root| arena.finish(root)))
}
