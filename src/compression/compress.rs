use std::io::{Read, Write};

use log::{debug, log_enabled, trace, Level};

use crate::bitstream::{bitreader::BitReader, bitwriter::BitWriter};
use crate::error::{HuffError, Result};
use crate::huffman_coding::serialize::write_tree;
use crate::huffman_coding::table::EncodingTable;
use crate::huffman_coding::tree::{HuffmanTree, Symbol};

/*
    The compressed stream is the serialized tree, then the code of every input byte, then the
    code of the end-of-stream marker, packed back to back and zero padded to a whole byte.
    Nothing else is written: no magic, no length. The tree is self-delimiting and the
    end-of-stream code tells the decoder where the payload stops.
*/

/// Compress everything readable from source into sink using the given tree. Returns the number
/// of bytes written to sink.
///
/// Every byte of the input must have a leaf in the tree. A byte without one means the tree was
/// built for different data, and is reported as UnknownSymbol.
pub fn compress<R: Read, W: Write>(tree: &HuffmanTree, source: R, sink: W) -> Result<u64> {
    let mut bw = BitWriter::new(sink);

    // The tree goes first so the decoder can rebuild it
    write_tree(tree, &mut bw)?;
    let tree_bytes = bw.bytes_written();

    let table = EncodingTable::new(tree);
    if log_enabled!(Level::Trace) {
        let mut codes: Vec<_> = table.iter().collect();
        codes.sort_unstable_by_key(|(symbol, _)| *symbol);
        for (symbol, code) in codes {
            trace!("{} -> {}", symbol, code_string(code));
        }
    }

    // Re-read the input 8 bits at a time and emit each byte's code
    let mut br = BitReader::new(source);
    let mut bytes_in: u64 = 0;
    loop {
        let byte = match br.byte() {
            Ok(byte) => byte,
            Err(HuffError::EndOfInput) => break,
            Err(e) => return Err(e),
        };
        let code = table
            .get(Symbol::Byte(byte))
            .ok_or(HuffError::UnknownSymbol(byte))?;
        out_code(&mut bw, code)?;
        bytes_in += 1;
    }

    // Input is exhausted: mark the end of the stream once
    let eof = table.get(Symbol::Eof).ok_or_else(|| {
        HuffError::InvalidTree("tree has no end-of-stream code".to_string())
    })?;
    out_code(&mut bw, eof)?;

    bw.flush()?;
    let bytes_out = bw.bytes_written();
    debug!(
        "Compressed {} bytes into {} bytes ({} bytes of tree)",
        bytes_in, bytes_out, tree_bytes
    );
    Ok(bytes_out)
}

/// Write one code, a bit at a time.
#[inline]
fn out_code<W: Write>(bw: &mut BitWriter<W>, code: &[bool]) -> Result<()> {
    for &bit in code {
        bw.out_bit(bit)?;
    }
    Ok(())
}

/// Render a code as 0s and 1s for trace output.
fn code_string(code: &[bool]) -> String {
    code.iter().map(|&bit| if bit { '1' } else { '0' }).collect()
}
