use std::io::{Read, Write};

use log::{debug, error};

use crate::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
use crate::error::{HuffError, Result};
use crate::huffman_coding::serialize::read_tree;
use crate::huffman_coding::tree::{HuffmanTree, Node, Symbol};

/// Walk the tree from the root, one bit per step, until a leaf is reached.
///
/// Returns the leaf's symbol (which may be the end-of-stream marker), or None if the bit source
/// ran dry first. A tree that is a single leaf returns its symbol without reading any bits.
pub fn decode_byte<R: Read>(tree: &HuffmanTree, br: &mut BitReader<R>) -> Result<Option<Symbol>> {
    let mut node = tree.root();
    loop {
        match node {
            Node::Leaf(symbol) => return Ok(Some(*symbol)),
            Node::Internal(left, right) => {
                let bit = match br.bool_bit() {
                    Ok(bit) => bit,
                    Err(HuffError::EndOfInput) => return Ok(None),
                    Err(e) => return Err(e),
                };
                node = if bit { &**right } else { &**left };
            }
        }
    }
}

/// Read a tree from source, then decode the rest of source into sink until the end-of-stream
/// code is found. Returns the number of bytes written to sink.
///
/// Anything after the end-of-stream code is ignored. Running out of data before it is found
/// means the stream was truncated (or the tree does not belong to it) and is an error.
pub fn decompress<R: Read, W: Write>(source: R, sink: W) -> Result<u64> {
    let mut br = BitReader::new(source);
    let tree = read_tree(&mut br)?;

    let mut bw = BitWriter::new(sink);
    loop {
        match decode_byte(&tree, &mut br)? {
            Some(Symbol::Byte(byte)) => bw.out8(byte)?,
            Some(Symbol::Eof) => break,
            None => {
                error!(
                    "Compressed data ended at {} before the end-of-stream code",
                    br.loc()
                );
                return Err(HuffError::MalformedStream(
                    "data ended before the end-of-stream code".to_string(),
                ));
            }
        }
    }

    bw.flush()?;
    debug!("Decompressed {} bytes", bw.bytes_written());
    Ok(bw.bytes_written())
}

#[cfg(test)]
mod test {
    use super::{decode_byte, decompress};
    use crate::bitstream::bitreader::BitReader;
    use crate::error::HuffError;
    use crate::huffman_coding::tree::{HuffmanTree, Node, Symbol};

    fn scenario_tree() -> HuffmanTree {
        HuffmanTree::new(Node::internal(
            Node::byte(b'a'),
            Node::internal(Node::byte(b'b'), Node::eof()),
        ))
        .unwrap()
    }

    #[test]
    fn decode_byte_test() {
        let tree = scenario_tree();
        // a, b, EOF, then the padding decodes as 'a's until the data runs out
        let data = [0b0101_1000_u8];
        let mut br = BitReader::new(data.as_slice());
        assert_eq!(decode_byte(&tree, &mut br).unwrap(), Some(Symbol::Byte(b'a')));
        assert_eq!(decode_byte(&tree, &mut br).unwrap(), Some(Symbol::Byte(b'b')));
        assert_eq!(decode_byte(&tree, &mut br).unwrap(), Some(Symbol::Eof));
        for _ in 0..3 {
            assert_eq!(decode_byte(&tree, &mut br).unwrap(), Some(Symbol::Byte(b'a')));
        }
        assert_eq!(decode_byte(&tree, &mut br).unwrap(), None);
    }

    #[test]
    fn decode_partial_code_test() {
        // A lone 1 bit is half of 'b' or EOF
        let tree = scenario_tree();
        let mut br = BitReader::new(&[0b0000_0001_u8][..]);
        for _ in 0..7 {
            assert_eq!(decode_byte(&tree, &mut br).unwrap(), Some(Symbol::Byte(b'a')));
        }
        assert_eq!(decode_byte(&tree, &mut br).unwrap(), None);
    }

    #[test]
    fn decode_single_leaf_test() {
        let tree = HuffmanTree::new(Node::eof()).unwrap();
        let mut br = BitReader::new(&[0_u8; 0][..]);
        assert_eq!(decode_byte(&tree, &mut br).unwrap(), Some(Symbol::Eof));
    }

    #[test]
    fn scenario_test() {
        let data = [0x8c, 0x31, 0x89, 0b0101_1000];
        let mut out = Vec::new();
        assert_eq!(decompress(data.as_slice(), &mut out).unwrap(), 2);
        assert_eq!(out, b"ab");
    }

    #[test]
    fn trailing_data_ignored_test() {
        let data = [0x8c, 0x31, 0x89, 0b0101_1000, 0xff, 0xff];
        let mut out = Vec::new();
        decompress(data.as_slice(), &mut out).unwrap();
        assert_eq!(out, b"ab");
    }

    #[test]
    fn truncated_payload_test() {
        // Eight 'a's then the EOF code in its own byte; drop that byte
        let data = [0x8c, 0x31, 0x89, 0x00];
        let mut out = Vec::new();
        assert!(matches!(
            decompress(data.as_slice(), &mut out),
            Err(HuffError::MalformedStream(_))
        ));
        // Tree only, no payload at all
        assert!(matches!(
            decompress(&data[..3], &mut Vec::new()),
            Err(HuffError::MalformedStream(_))
        ));
    }

    #[test]
    fn truncated_tree_test() {
        let mut out = Vec::new();
        assert!(matches!(
            decompress(&[0x8c_u8][..], &mut out),
            Err(HuffError::MalformedStream(_))
        ));
        assert!(out.is_empty());
    }
}
