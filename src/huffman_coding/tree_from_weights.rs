//! Builds a Huffman tree from byte frequency counts.
//!
//! Every byte that occurs gets a leaf weighted by its count, and the end-of-stream marker gets a
//! leaf of weight 1 since it is written exactly once. The two lightest nodes are merged under a
//! new internal node until a single root remains.
//!
//! Ties are broken by an ordering key so the same counts always give the same tree: leaves use
//! their byte value, the end-of-stream leaf sorts after every byte, and merged nodes take keys in
//! the order they were created.
//!

use log::{debug, trace};

use super::tree::{HuffmanTree, Node, Symbol};
use crate::error::{HuffError, Result};

/// Ordering key of the end-of-stream leaf, just past the byte values.
const EOF_KEY: u32 = 256;

/// A node waiting to be merged, with its weight and tie-break key.
struct Weighted {
    weight: u64,
    key: u32,
    node: Node,
}

/// Build a tree from a slice of 256 byte counts (index = byte value).
pub fn tree_from_freqs(freqs: &[u64]) -> Result<HuffmanTree> {
    if freqs.len() != 256 {
        return Err(HuffError::InvalidTree(format!(
            "expected 256 byte counts, got {}",
            freqs.len()
        )));
    }

    // One leaf per byte that occurs, plus the end-of-stream leaf.
    let mut tree: Vec<Weighted> = freqs
        .iter()
        .enumerate()
        .filter(|(_, &f)| f > 0)
        .map(|(b, &f)| Weighted {
            weight: f,
            key: b as u32,
            node: Node::byte(b as u8),
        })
        .collect();
    tree.push(Weighted {
        weight: 1,
        key: EOF_KEY,
        node: Node::eof(),
    });
    debug!("Building tree from {} symbols", tree.len());

    // Merged nodes get keys after every leaf
    let mut next_key = EOF_KEY + 1;

    // ...then pare it down to one single node with child nodes
    while tree.len() > 1 {
        // Heaviest first, so the lightest nodes are popped from the back
        tree.sort_unstable_by(|a, b| b.weight.cmp(&a.weight).then(b.key.cmp(&a.key)));

        let (left, right) = match (tree.pop(), tree.pop()) {
            (Some(left), Some(right)) => (left, right),
            _ => unreachable!("loop runs only while two or more nodes remain"),
        };
        trace!(
            "Merging weights {} (key {}) and {} (key {})",
            left.weight,
            left.key,
            right.weight,
            right.key
        );
        tree.push(Weighted {
            weight: left.weight + right.weight,
            key: next_key,
            node: Node::internal(left.node, right.node),
        });
        next_key += 1;
    }

    let root = match tree.pop() {
        Some(root) => root.node,
        None => Node::Leaf(Symbol::Eof),
    };
    HuffmanTree::new(root)
}
