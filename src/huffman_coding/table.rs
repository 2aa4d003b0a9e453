use rustc_hash::FxHashMap;

use super::tree::{HuffmanTree, Node, Symbol};

/// Maps each symbol of a tree to its code: the path from the root, *false* for left and
/// *true* for right. Built once per tree and never changed afterwards.
#[derive(Debug, Clone)]
pub struct EncodingTable {
    codes: FxHashMap<Symbol, Vec<bool>>,
}

impl EncodingTable {
    /// Walk the whole tree and record the path to every leaf.
    pub fn new(tree: &HuffmanTree) -> Self {
        let mut codes = FxHashMap::default();
        codes.reserve(tree.leaf_count());
        let mut path = Vec::with_capacity(tree.depth());
        return_leaves(tree.root(), &mut path, &mut codes);
        EncodingTable { codes }
    }

    /// The code for a symbol, or None if the tree has no such leaf.
    pub fn get(&self, symbol: Symbol) -> Option<&[bool]> {
        self.codes.get(&symbol).map(|code| code.as_slice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// All (symbol, code) pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &[bool])> {
        self.codes.iter().map(|(s, code)| (*s, code.as_slice()))
    }
}

/// Recursively walk the tree, extending the path on the way down and trimming it on the way
/// back up. Each leaf gets a copy of the path that led to it.
fn return_leaves(node: &Node, path: &mut Vec<bool>, codes: &mut FxHashMap<Symbol, Vec<bool>>) {
    match node {
        Node::Internal(left, right) => {
            path.push(false);
            return_leaves(left, path, codes);
            path.pop();
            path.push(true);
            return_leaves(right, path, codes);
            path.pop();
        }
        Node::Leaf(symbol) => {
            codes.insert(*symbol, path.clone());
        }
    }
}
