use std::io::Write;

use log::trace;

use crate::error::Result;

/// Drain the output buffer to the sink once it holds this many bytes.
const DRAIN_THRESHOLD: usize = 64 * 1024;

/// Writes an MSB-first bitstream to any sink that supports write(). Bits are collected in a
/// 64 bit queue, packed into bytes in an output buffer, and the buffer is written to the sink
/// whenever it grows past the drain threshold and on flush().
pub struct BitWriter<W: Write> {
    /// Output buffer of packed bytes waiting for the sink.
    output: Vec<u8>,
    /// Private queue to hold bits that are waiting to be put as bytes into the output buffer.
    queue: u64,
    /// Count of valid bits in the queue.
    q_bits: u8,
    /// Bytes already handed to the sink.
    written: u64,
    /// Handle to the output stream
    writer: W,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter over the given sink.
    pub fn new(writer: W) -> Self {
        Self {
            output: Vec::with_capacity(DRAIN_THRESHOLD),
            queue: 0,
            q_bits: 0,
            written: 0,
            writer,
        }
    }

    /// Move all full bytes from the queue into the output buffer.
    fn push_queue(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Hand the output buffer to the sink if it is getting large.
    fn maybe_drain(&mut self) -> Result<()> {
        if self.output.len() >= DRAIN_THRESHOLD {
            self.drain()?;
        }
        Ok(())
    }

    /// Write the whole output buffer to the sink.
    fn drain(&mut self) -> Result<()> {
        self.writer.write_all(&self.output)?;
        self.written += self.output.len() as u64;
        self.output.clear();
        Ok(())
    }

    /// Put a single bit on the stream: 1 for *true*, 0 for *false*.
    pub fn out_bit(&mut self, bit: bool) -> Result<()> {
        self.queue = self.queue << 1 | bit as u64;
        self.q_bits += 1;
        if self.q_bits > 7 {
            self.push_queue();
            self.maybe_drain()?;
        }
        Ok(())
    }

    /// Put the low n bits (n <= 32) of data on the stream, most significant first.
    pub fn out_bits(&mut self, data: u32, n: u8) -> Result<()> {
        debug_assert!(n <= 32, "out_bits writes at most 32 bits");
        if n == 0 {
            return Ok(());
        }
        self.queue <<= n; //shift queue by bit length
        self.queue |= data as u64 & (u64::MAX >> (64 - n)); //add data portion to queue
        self.q_bits += n; //update depth of queue bits
        self.push_queue();
        self.maybe_drain()
    }

    /// Put a byte on the stream.
    pub fn out8(&mut self, data: u8) -> Result<()> {
        self.out_bits(data as u32, 8)
    }

    /// Pad the current partial byte (if any) with 0s in the least significant bits, without
    /// touching the sink.
    pub fn align(&mut self) {
        if self.q_bits > 0 {
            let pad = 8 - self.q_bits;
            self.queue <<= pad;
            self.q_bits += pad;
            self.push_queue();
        }
    }

    /// Pads the remaining bits (1-7) with 0s, writes everything buffered to the sink and
    /// flushes it. Flush MUST be called before the sink is used or data may be left behind.
    pub fn flush(&mut self) -> Result<()> {
        self.align();
        self.drain()?;
        self.writer.flush()?;
        trace!("BitWriter flushed, {} bytes written", self.written);
        Ok(())
    }

    /// Number of whole bytes produced so far (handed to the sink or still buffered).
    pub fn bytes_written(&self) -> u64 {
        self.written + self.output.len() as u64
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.bytes_written(), self.q_bits)
    }

    /// Give back the sink. Call flush() first.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod test {
    use super::BitWriter;

    #[test]
    fn out8_test() {
        let mut bw = BitWriter::new(Vec::new());
        bw.out8(b'x').unwrap();
        bw.flush().unwrap();
        assert_eq!(bw.into_inner(), "x".as_bytes());
    }

    #[test]
    fn last_bits_test() {
        let mut bw = BitWriter::new(Vec::new());
        bw.out8(255).unwrap();
        bw.out8(1).unwrap();
        bw.out8(128).unwrap();
        bw.out_bits(0b111, 3).unwrap();
        bw.flush().unwrap();
        assert_eq!(bw.into_inner(), vec![255, 1, 128, 224]);
    }

    #[test]
    fn out_bit_test() {
        let mut bw = BitWriter::new(Vec::new());
        for bit in [false, true, false, true, true] {
            bw.out_bit(bit).unwrap();
        }
        assert_eq!(bw.loc(), "[0.5]");
        bw.flush().unwrap();
        assert_eq!(bw.into_inner(), vec![0b0101_1000]);
    }

    #[test]
    fn out_bits_masks_high_bits_test() {
        let mut bw = BitWriter::new(Vec::new());
        // Only the low 4 bits may reach the stream
        bw.out_bits(0xfff5, 4).unwrap();
        bw.out_bits(0, 0).unwrap();
        bw.out_bits(0xa, 4).unwrap();
        bw.out_bits(0xdead_beef, 32).unwrap();
        bw.flush().unwrap();
        assert_eq!(bw.into_inner(), vec![0x5a, 0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn align_test() {
        let mut bw = BitWriter::new(Vec::new());
        bw.out_bit(true).unwrap();
        bw.align();
        assert_eq!(bw.loc(), "[1.0]");
        bw.align();
        bw.out8(0x0f).unwrap();
        bw.flush().unwrap();
        assert_eq!(bw.into_inner(), vec![0x80, 0x0f]);
    }

    #[test]
    fn large_output_test() {
        // Crosses the drain threshold several times
        let mut bw = BitWriter::new(Vec::new());
        for i in 0..200_000_u32 {
            bw.out8(i as u8).unwrap();
        }
        assert_eq!(bw.bytes_written(), 200_000);
        bw.flush().unwrap();
        let out = bw.into_inner();
        assert_eq!(out.len(), 200_000);
        assert_eq!(out[65_537], 1);
    }
}
