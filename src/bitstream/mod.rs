//! The bitstream module forms the I/O subsystem of the codec.
//!
//! Huffman codes are variable length, so both directions of the codec work one bit at a time.
//! The reader and writer agree on bit order (most significant bit of each byte first) and on
//! padding (a partial final byte is filled with zero bits).
//!
pub mod bitreader;
pub mod bitwriter;
