//! Byte-oriented Huffman compression.
//!
//! A compressed stream is a serialized prefix-code tree over the 256 byte values plus an
//! end-of-stream marker, followed by the code of every input byte and finally the code of the
//! end-of-stream marker, packed MSB-first and zero padded to a whole byte.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> huffzip test.txt`
//!
//! This will compress the file and create the file test.txt.huf.
//! The input file will be deleted unless `-k` is given.
//!
//! From code, build a tree and run the codec over any `Read`/`Write` pair:
//!
//! ```
//! use huffzip::compression::{compress::compress, decompress::decompress};
//! use huffzip::huffman_coding::tree_from_weights::tree_from_freqs;
//! use huffzip::tools::freq_count::freqs;
//!
//! let data = b"mississippi";
//! let tree = tree_from_freqs(&freqs(data)).unwrap();
//! let mut packed = Vec::new();
//! compress(&tree, &data[..], &mut packed).unwrap();
//! let mut unpacked = Vec::new();
//! decompress(packed.as_slice(), &mut unpacked).unwrap();
//! assert_eq!(unpacked, data);
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use error::{HuffError, Result};
