//! BitReader: reads a packed, MSB-first bitstream from any I/O source that supports read().
//!
//! The same reader is used for the serialized tree and for the coded payload that follows it,
//! so nothing is lost between the two: the reader's buffer simply carries on where the tree ended.
//!

use std::io::{ErrorKind, Read};

use crate::error::{HuffError, Result};

const BUFFER_SIZE: usize = 64 * 1024;
const BIT_MASK: u8 = 0xff;

/// Reads bits, bit groups and bytes from a buffered source.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    /// Number of valid bytes in the buffer
    filled: usize,
    cursor: usize,
    bit_index: usize,
    /// Bytes consumed by earlier buffer loads, for position reporting
    base: u64,
    source: R,
}

impl<R: Read> BitReader<R> {
    /// Creates a new BitReader with a 64k buffer.
    pub fn new(source: R) -> Self {
        Self::with_capacity(source, BUFFER_SIZE)
    }

    /// Creates a new BitReader with a buffer of the given size (at least one byte).
    pub fn with_capacity(source: R, size: usize) -> Self {
        Self {
            buffer: vec![0; size.max(1)],
            filled: 0,
            cursor: 0,
            bit_index: 0,
            base: 0,
            source,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if the source is exhausted.
    fn have_data(&mut self) -> Result<bool> {
        // Only go back to the source once every byte in the buffer has been used
        if self.cursor == self.filled {
            loop {
                match self.source.read(&mut self.buffer) {
                    Ok(0) => return Ok(false),
                    Ok(size) => {
                        self.base += self.filled as u64;
                        self.filled = size;
                        self.cursor = 0;
                        self.bit_index = 0;
                        break;
                    }
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Ok(true)
    }

    /// Move past the current bit, stepping to the next byte when all 8 bits are used.
    #[inline]
    fn advance(&mut self, bits: usize) {
        self.bit_index += bits;
        if self.bit_index == 8 {
            self.bit_index = 0;
            self.cursor += 1;
        }
    }

    /// Return the next bit (1 or 0), or EndOfInput if there is no more data to read.
    pub fn bit(&mut self) -> Result<u8> {
        if !self.have_data()? {
            return Err(HuffError::EndOfInput);
        }
        let bit = (self.buffer[self.cursor] >> (7 - self.bit_index)) & 1;
        self.advance(1);
        Ok(bit)
    }

    /// Return *true* if the next bit is 1, *false* if 0, consuming the bit.
    pub fn bool_bit(&mut self) -> Result<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Return the next n bits (n <= 32) as an unsigned integer, first bit most significant.
    /// Fails with EndOfInput if fewer than n bits remain. The bits read so far are consumed.
    pub fn bint(&mut self, mut n: usize) -> Result<u32> {
        debug_assert!(n <= 32, "bint reads at most 32 bits");
        let mut result = 0_u64;

        // Take as many bits as we can from each byte in turn
        while n > 0 {
            if !self.have_data()? {
                return Err(HuffError::EndOfInput);
            }
            let available = 8 - self.bit_index;
            let needed = n.min(available);

            // Unread bits of the current byte, then drop the ones we don't need yet
            let bits = (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) as u64;
            result = result << needed | bits >> (available - needed);

            self.advance(needed);
            n -= needed;
        }
        Ok(result as u32)
    }

    /// Returns the next 8 bits as a byte. Fast path when we are on a byte boundary.
    pub fn byte(&mut self) -> Result<u8> {
        if self.bit_index == 0 {
            if !self.have_data()? {
                return Err(HuffError::EndOfInput);
            }
            let byte = self.buffer[self.cursor];
            self.cursor += 1;
            return Ok(byte);
        }
        self.bint(8).map(|byte| byte as u8)
    }

    /// Skip the unread bits of a partially consumed byte. No-op on a byte boundary.
    pub fn align(&mut self) {
        if self.bit_index > 0 {
            self.bit_index = 0;
            self.cursor += 1;
        }
    }

    /// Debugging function. Report current position in the stream as [bytes.bits].
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.base + self.cursor as u64, self.bit_index)
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;
    use crate::error::HuffError;

    #[test]
    fn basic_test() {
        let x = [0b10000001_u8].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bit().unwrap(), 1);
        for _ in 0..6 {
            assert_eq!(br.bit().unwrap(), 0);
        }
        assert_eq!(br.bit().unwrap(), 1);
        assert!(matches!(br.bit(), Err(HuffError::EndOfInput)));
    }

    #[test]
    fn bint_test() {
        let x = [0b00011011].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bint(5).unwrap(), 3);
        assert_eq!(br.bint(1).unwrap(), 0);
        assert_eq!(br.bint(2).unwrap(), 3);
    }

    #[test]
    fn bint_across_bytes_test() {
        let x = [0b1010_1100, 0b0011_0101, 0xff].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bint(3).unwrap(), 0b101);
        assert_eq!(br.bint(12).unwrap(), 0b0_1100_0011_010);
        assert_eq!(br.bint(9).unwrap(), 0b1_1111_1111);
        assert!(matches!(br.bint(1), Err(HuffError::EndOfInput)));
    }

    #[test]
    fn bint_short_test() {
        let x = [0xab].as_slice();
        let mut br = BitReader::new(x);
        assert!(matches!(br.bint(9), Err(HuffError::EndOfInput)));
    }

    #[test]
    fn byte_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        assert_eq!(br.byte().unwrap(), b'H');
        assert_eq!(br.byte().unwrap(), b'e');
        assert_eq!(br.byte().unwrap(), b'l');
        assert_eq!(br.byte().unwrap(), b'l');
    }

    #[test]
    fn unaligned_byte_test() {
        let x = [0b1011_0011, 0b1000_0000].as_slice();
        let mut br = BitReader::new(x);
        assert!(br.bool_bit().unwrap());
        assert_eq!(br.byte().unwrap(), 0b0110_0111);
    }

    #[test]
    fn small_buffer_test() {
        // Force a refill on every byte
        let x = "Hello".as_bytes();
        let mut br = BitReader::with_capacity(x, 1);
        let mut out = vec![];
        while let Ok(byte) = br.byte() {
            out.push(byte);
        }
        assert_eq!(out, b"Hello");
        assert_eq!(br.loc(), "[5.0]");
    }

    #[test]
    fn align_test() {
        let x = [0b1110_0000, 0x5a].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bint(3).unwrap(), 0b111);
        br.align();
        assert_eq!(br.loc(), "[1.0]");
        br.align();
        assert_eq!(br.byte().unwrap(), 0x5a);
    }

    #[test]
    fn loc_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        for _ in 0..5 {
            br.byte().unwrap();
        }
        br.bit().unwrap();
        assert_eq!(br.loc(), "[5.1]");
    }

    #[test]
    fn bool_bit_test() {
        let x = [0b01010000].as_slice();
        let mut br = BitReader::new(x);
        let bits: Vec<bool> = (0..8).map(|_| br.bool_bit().unwrap()).collect();
        assert_eq!(
            bits,
            vec![false, true, false, true, false, false, false, false]
        );
        assert!(br.bool_bit().unwrap_err().is_end_of_input());
    }
}
