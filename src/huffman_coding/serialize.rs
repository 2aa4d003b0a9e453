//! Bit-level storage format for a Huffman tree.
//!
//! The tree is written in pre-order. Each node starts with a tag bit:
//! - `1`: internal node, followed by the left subtree and then the right subtree.
//! - `0`: leaf, followed by one more bit. `1` marks the end-of-stream leaf; `0` is followed by
//!   the 8 bits of the byte value, most significant first.
//!
//! The format needs no length prefix: the reader knows it is done when the root is complete.
//! The writer then pads with zero bits to the next byte boundary and the reader skips the same
//! padding, so the coded payload always starts on a fresh byte.
//!

use std::io::{Read, Write};

use log::{debug, trace};

use super::tree::{HuffmanTree, Node, Symbol, MAX_DEPTH};
use crate::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
use crate::error::{HuffError, Result};

const INTERNAL: bool = true;
const EOF_LEAF: bool = true;

/// Write the tree to the bitstream and pad to a byte boundary.
pub fn write_tree<W: Write>(tree: &HuffmanTree, bw: &mut BitWriter<W>) -> Result<()> {
    write_node(tree.root(), bw)?;
    bw.align();
    debug!(
        "Wrote tree with {} leaves, ending at {}",
        tree.leaf_count(),
        bw.loc()
    );
    Ok(())
}

fn write_node<W: Write>(node: &Node, bw: &mut BitWriter<W>) -> Result<()> {
    match node {
        Node::Internal(left, right) => {
            bw.out_bit(INTERNAL)?;
            write_node(left, bw)?;
            write_node(right, bw)
        }
        Node::Leaf(Symbol::Eof) => {
            bw.out_bit(!INTERNAL)?;
            bw.out_bit(EOF_LEAF)
        }
        Node::Leaf(Symbol::Byte(b)) => {
            bw.out_bit(!INTERNAL)?;
            bw.out_bit(!EOF_LEAF)?;
            bw.out8(*b)
        }
    }
}

/// Read a tree from the bitstream and leave the reader at the first bit of the payload.
/// Any structural problem with the stored tree is reported as MalformedStream.
pub fn read_tree<R: Read>(br: &mut BitReader<R>) -> Result<HuffmanTree> {
    let root = read_node(br, 0)?;
    br.align();
    let tree = HuffmanTree::new(root).map_err(|e| match e {
        HuffError::InvalidTree(msg) => HuffError::MalformedStream(msg),
        other => other,
    })?;
    debug!(
        "Read tree with {} leaves (longest code {} bits), payload starts at {}",
        tree.leaf_count(),
        tree.depth(),
        br.loc()
    );
    Ok(tree)
}

fn read_node<R: Read>(br: &mut BitReader<R>, depth: usize) -> Result<Node> {
    if depth > MAX_DEPTH {
        return Err(HuffError::MalformedStream(format!(
            "tree is deeper than {} levels",
            MAX_DEPTH
        )));
    }
    if br.bool_bit().map_err(truncated)? == INTERNAL {
        let left = read_node(br, depth + 1)?;
        let right = read_node(br, depth + 1)?;
        return Ok(Node::internal(left, right));
    }
    if br.bool_bit().map_err(truncated)? == EOF_LEAF {
        trace!("EOF leaf at depth {}", depth);
        return Ok(Node::eof());
    }
    let byte = br.byte().map_err(truncated)?;
    Ok(Node::byte(byte))
}

/// Running out of bits in the middle of the tree means the stream was cut short.
fn truncated(e: HuffError) -> HuffError {
    match e {
        HuffError::EndOfInput => HuffError::MalformedStream("truncated tree".to_string()),
        other => other,
    }
}
