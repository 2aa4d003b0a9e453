use std::fmt::{Display, Formatter};

use rustc_hash::FxHashSet;

use crate::error::{HuffError, Result};

/// Deepest a tree over 256 bytes plus the end-of-stream marker can legally be.
pub const MAX_DEPTH: usize = 256;

/// A value stored in a leaf: a real byte, or the end-of-stream marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Byte(u8),
    Eof,
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Byte(b) if b.is_ascii_graphic() => write!(f, "'{}'", *b as char),
            Symbol::Byte(b) => write!(f, "{:#04x}", b),
            Symbol::Eof => write!(f, "EOF"),
        }
    }
}

/// A node of the prefix tree. Internal nodes always own exactly two children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf(Symbol),
    Internal(Box<Node>, Box<Node>),
}

impl Node {
    /// Leaf holding a real byte
    pub fn byte(b: u8) -> Node {
        Node::Leaf(Symbol::Byte(b))
    }

    /// Leaf holding the end-of-stream marker
    pub fn eof() -> Node {
        Node::Leaf(Symbol::Eof)
    }

    /// Internal node; a 0 bit leads left, a 1 bit leads right.
    pub fn internal(left: Node, right: Node) -> Node {
        Node::Internal(Box::new(left), Box::new(right))
    }

    /// The child selected by one bit of a code, or None for a leaf.
    #[inline]
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Internal(left, right) => Some(if bit { &**right } else { &**left }),
            Node::Leaf(_) => None,
        }
    }
}

/// A prefix tree that has been checked: every symbol appears in at most one leaf and exactly
/// one leaf holds the end-of-stream marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
    leaves: usize,
    depth: usize,
}

impl HuffmanTree {
    /// Validate a node structure and wrap it as a tree.
    pub fn new(root: Node) -> Result<Self> {
        let mut seen: FxHashSet<Symbol> = FxHashSet::default();
        let mut depth = 0;

        // Walk with an explicit stack so a hand-built, lopsided tree can't blow the call stack
        let mut stack = vec![(&root, 0_usize)];
        while let Some((node, level)) = stack.pop() {
            match node {
                Node::Internal(left, right) => {
                    stack.push((&**right, level + 1));
                    stack.push((&**left, level + 1));
                }
                Node::Leaf(symbol) => {
                    if !seen.insert(*symbol) {
                        return Err(HuffError::InvalidTree(format!(
                            "symbol {} appears in more than one leaf",
                            symbol
                        )));
                    }
                    depth = depth.max(level);
                }
            }
        }
        if !seen.contains(&Symbol::Eof) {
            return Err(HuffError::InvalidTree(
                "no leaf holds the end-of-stream marker".to_string(),
            ));
        }

        Ok(HuffmanTree {
            root,
            leaves: seen.len(),
            depth,
        })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of leaves, which is also the number of codes.
    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[cfg(test)]
mod test {
    use super::{HuffmanTree, Node, Symbol};
    use crate::error::HuffError;

    #[test]
    fn valid_tree_test() {
        let tree = HuffmanTree::new(Node::internal(
            Node::byte(b'a'),
            Node::internal(Node::byte(b'b'), Node::eof()),
        ))
        .unwrap();
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn single_leaf_test() {
        let tree = HuffmanTree::new(Node::eof()).unwrap();
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.root().child(true), None);
    }

    #[test]
    fn duplicate_leaf_test() {
        let root = Node::internal(
            Node::byte(7),
            Node::internal(Node::byte(7), Node::eof()),
        );
        assert!(matches!(
            HuffmanTree::new(root),
            Err(HuffError::InvalidTree(_))
        ));
        let root = Node::internal(Node::eof(), Node::eof());
        assert!(matches!(
            HuffmanTree::new(root),
            Err(HuffError::InvalidTree(_))
        ));
    }

    #[test]
    fn missing_eof_test() {
        let root = Node::internal(Node::byte(1), Node::byte(2));
        assert!(matches!(
            HuffmanTree::new(root),
            Err(HuffError::InvalidTree(_))
        ));
        assert!(HuffmanTree::new(Node::byte(1)).is_err());
    }

    #[test]
    fn child_test() {
        let root = Node::internal(Node::byte(1), Node::eof());
        assert_eq!(root.child(false), Some(&Node::byte(1)));
        assert_eq!(root.child(true), Some(&Node::eof()));
    }

    #[test]
    fn symbol_display_test() {
        assert_eq!(Symbol::Byte(b'a').to_string(), "'a'");
        assert_eq!(Symbol::Byte(b'\n').to_string(), "0x0a");
        assert_eq!(Symbol::Eof.to_string(), "EOF");
    }
}
