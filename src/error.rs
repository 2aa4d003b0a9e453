//! Error type shared by every module of the Huffman codec.
//!
//! `EndOfInput` is the only variant that is part of normal operation: bit readers raise it when the
//! source runs dry, and the codec loops translate it into "no symbol" (decoder) or "emit the
//! end-of-stream path" (encoder). Everything else is reported to the caller.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, HuffError>;

#[derive(Debug, Error)]
pub enum HuffError {
    /// The bit or byte source has no more data.
    #[error("end of input")]
    EndOfInput,

    /// The compressed data is truncated, or the stored tree is structurally broken.
    #[error("malformed compressed stream: {0}")]
    MalformedStream(String),

    /// A byte was read during compression that the supplied tree cannot encode.
    #[error("byte {0:#04x} has no code in the supplied tree")]
    UnknownSymbol(u8),

    /// A tree was assembled that breaks the prefix-code invariants.
    #[error("invalid huffman tree: {0}")]
    InvalidTree(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HuffError {
    /// True only for the recoverable end-of-input signal.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, HuffError::EndOfInput)
    }
}
