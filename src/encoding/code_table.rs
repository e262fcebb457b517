use crate::common::{ALPHABET_SIZE, MAX_BITS_PER_CALL};
use crate::tree::{HuffmanTree, Node};

/// A root to leaf path. Bit `len - 1` is the first step taken from the root,
/// 0 meaning left and 1 meaning right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Code {
    pub bits: u64,
    pub len: u8,
}

impl Code {
    fn left(self) -> Code {
        Code {
            bits: self.bits << 1,
            len: self.len + 1,
        }
    }

    fn right(self) -> Code {
        Code {
            bits: (self.bits << 1) | 1,
            len: self.len + 1,
        }
    }
}

pub struct EncodingTable {
    /// Index is the symbol. A code of length 0 marks a symbol that is not in the tree.
    codes: [Code; ALPHABET_SIZE],
}

impl EncodingTable {
    pub fn build(tree: &HuffmanTree) -> Self {
        let mut table = EncodingTable {
            codes: [Code::default(); ALPHABET_SIZE],
        };

        // A lone leaf still costs one bit per symbol, the decoder reads it back
        let root_code = if tree.is_single_leaf() {
            Code { bits: 0, len: 1 }
        } else {
            Code::default()
        };

        let mut stack = vec![(tree.root(), root_code)];
        while let Some((idx, code)) = stack.pop() {
            match tree.node(idx) {
                Node::Leaf(symbol) => table.codes[usize::from(symbol)] = code,
                Node::Internal { left, right } => {
                    // Symbol counts fit 32 bits, which bounds the depth well below this
                    debug_assert!(u32::from(code.len) < MAX_BITS_PER_CALL);
                    stack.push((right, code.right()));
                    stack.push((left, code.left()));
                }
            }
        }

        table
    }

    pub fn get(&self, symbol: u8) -> Option<Code> {
        let code = self.codes[usize::from(symbol)];
        if code.len == 0 {
            None
        } else {
            Some(code)
        }
    }

    /// Every symbol that has a code, in ascending byte order.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        (0..=u8::MAX).filter_map(move |symbol| self.get(symbol).map(|code| (symbol, code)))
    }
}

#[cfg(test)]
mod tests {
    use super::{Code, EncodingTable};
    use crate::encoding::frequency::FrequencyTable;
    use crate::tree::HuffmanTree;

    fn table_of(data: &[u8]) -> EncodingTable {
        let frequencies = FrequencyTable::from_reader(data).unwrap();
        EncodingTable::build(&HuffmanTree::from_frequencies(&frequencies).unwrap())
    }

    #[test]
    fn abaca_codes() {
        let table = table_of(b"abaca");
        assert_eq!(table.get(b'a'), Some(Code { bits: 0b1, len: 1 }));
        assert_eq!(table.get(b'b'), Some(Code { bits: 0b00, len: 2 }));
        assert_eq!(table.get(b'c'), Some(Code { bits: 0b01, len: 2 }));
        assert_eq!(table.get(b'd'), None);
        assert_eq!(table.iter().count(), 3);
    }

    #[test]
    fn single_leaf_gets_one_bit() {
        let table = table_of(&[0x41; 1000]);
        assert_eq!(table.get(0x41), Some(Code { bits: 0, len: 1 }));
        assert_eq!(table.iter().count(), 1);
    }

    #[test]
    fn uniform_alphabet_is_balanced() {
        let data: Vec<u8> = (0..=255).collect();
        let table = table_of(&data);
        assert!(table.iter().all(|(_, code)| code.len == 8));
    }

    #[test]
    fn prefix_free() {
        let table = table_of(b"it was the best of times, it was the worst of times");
        let codes: Vec<_> = table.iter().map(|(_, code)| code).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i == j || a.len > b.len {
                    continue;
                }
                let b_prefix = b.bits >> (b.len - a.len);
                assert_ne!(a.bits, b_prefix, "{:?} is a prefix of {:?}", a, b);
            }
        }
    }

    #[test]
    fn kraft_equality() {
        let table = table_of(b"mississippi river banks");
        let max_len = table.iter().map(|(_, code)| code.len).max().unwrap();
        let sum: u64 = table
            .iter()
            .map(|(_, code)| 1u64 << (max_len - code.len))
            .sum();
        assert_eq!(sum, 1u64 << max_len);
    }
}
