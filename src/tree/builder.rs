use super::{HuffmanTree, NodeArena};
use crate::encoding::frequency::FrequencyTable;
use core::cmp::Reverse;
use std::collections::BinaryHeap;

/// A subtree waiting to be merged.
///
/// Ordering is by weight first, ties go to whichever candidate was created
/// first. Leaves are created in ascending byte order, merged subtrees after
/// every leaf, so the resulting tree only depends on the frequencies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    weight: u64,
    sequence: u32,
    node: usize,
}

impl HuffmanTree {
    /// Build the prefix tree for `frequencies` by repeatedly merging the two
    /// lightest candidates. The first one taken becomes the left child.
    ///
    /// Returns `None` if no byte value occurs at all.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Option<Self> {
        if frequencies.is_empty() {
            return None;
        }
        let distinct = frequencies.distinct();
        let mut arena = NodeArena::with_capacity(2 * distinct);
        let mut candidates = BinaryHeap::with_capacity(distinct);
        let mut sequence = 0;

        for (symbol, weight) in frequencies.iter() {
            let node = arena.push_leaf(symbol);
            candidates.push(Reverse(Candidate {
                weight,
                sequence,
                node,
            }));
            sequence += 1;
        }

        loop {
            let Reverse(first) = candidates.pop()?;
            let second = match candidates.pop() {
                Some(Reverse(second)) => second,
                None => return Some(arena.finish(first.node)),
            };
            let node = arena.join(first.node, second.node);
            candidates.push(Reverse(Candidate {
                weight: first.weight + second.weight,
                sequence,
                node,
            }));
            sequence += 1;
        }
    }
}
