//! The compression module runs the codec over whole streams.
//!
//! Compression:
//! - Write the tree in front of the payload.
//! - Build the symbol -> code table from the tree.
//! - Read the input a byte at a time and write each byte's code, then the end-of-stream code.
//! - Pad the last byte with zeros.
//!
//! Decompression reverses it: read the tree, then walk it one bit at a time from the root for
//! each symbol until the end-of-stream leaf turns up. Running out of data before that leaf is an
//! error, never a normal end.
//!
//! Both directions are single threaded and read the tree without changing it.
//!

pub mod compress;
pub mod decompress;
pub mod files;
