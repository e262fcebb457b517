//! The prefix tree shared by the encoder and the decoder.
//!
//! Nodes live in one arena and refer to their children by index. Children are
//! always pushed before their parent, so the tree can be assembled bottom up
//! both from a heap of candidates (see [`builder`]) and from a post-order
//! header (see [`crate::header`]).

mod builder;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf(u8),
    Internal { left: usize, right: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: usize,
}

impl HuffmanTree {
    pub fn root(&self) -> usize {
        self.root
    }

    /// # Panics
    /// If `idx` does not belong to this tree.
    pub fn node(&self, idx: usize) -> Node {
        self.nodes[idx]
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf(_)))
            .count()
    }

    /// A tree built from a single distinct byte value is just one leaf.
    pub fn is_single_leaf(&self) -> bool {
        matches!(self.nodes[self.root], Node::Leaf(_))
    }

    /// All nodes reachable from the root, children before their parent,
    /// left subtree before right subtree.
    pub fn post_order(&self) -> Vec<Node> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root, false)];
        while let Some((idx, children_visited)) = stack.pop() {
            match self.nodes[idx] {
                Node::Internal { left, right } if !children_visited => {
                    stack.push((idx, true));
                    stack.push((right, false));
                    stack.push((left, false));
                }
                node => order.push(node),
            }
        }
        order
    }
}

/// Bottom-up storage for a tree under construction.
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push_leaf(&mut self, symbol: u8) -> usize {
        self.nodes.push(Node::Leaf(symbol));
        self.nodes.len() - 1
    }

    pub(crate) fn join(&mut self, left: usize, right: usize) -> usize {
        debug_assert!(left < self.nodes.len() && right < self.nodes.len());
        self.nodes.push(Node::Internal { left, right });
        self.nodes.len() - 1
    }

    pub(crate) fn finish(self, root: usize) -> HuffmanTree {
        HuffmanTree {
            nodes: self.nodes,
            root,
        }
    }
}
