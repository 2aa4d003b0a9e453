//! The huffman module holds the tree model used by both directions of the codec.
//!
//! - tree: symbols, nodes and the validated HuffmanTree.
//! - table: the symbol -> bit path EncodingTable derived from a tree.
//! - serialize: the self-delimiting bit format used to store a tree in front of the payload.
//! - tree_from_weights: builds an optimal tree from byte counts.
//!
//! A tree is immutable once built; compress and decompress only ever read it.
//!

pub mod serialize;
pub mod table;
pub mod tree;
pub mod tree_from_weights;
