use std::io::Write;

/// Packs codes most significant bit first.
///
/// Bits are accumulated at the top of a `u32`, and every complete byte is written out
/// as soon as it is available.
pub(crate) struct BitWriter<W>
where
    W: Write,
{
    write: W,
    cursor: u8,
    byte_buffer: u32,
    bytes_written: u64,
}

impl<W> BitWriter<W>
where
    W: Write,
{
    pub fn new(write: W) -> Self {
        let cursor = 0;
        let byte_buffer = 0;
        let bytes_written = 0;
        Self {
            write,
            cursor,
            byte_buffer,
            bytes_written,
        }
    }

    /// Appends the `amount` low bits of `data`. `amount` is at most 16.
    #[inline]
    pub fn write(&mut self, data: u16, amount: u8) -> Result<(), std::io::Error> {
        let mask = (1 << amount) - 1;
        let shift = 32 - amount - self.cursor;
        self.byte_buffer |= (data as u32 & mask) << shift;
        self.cursor += amount;

        while self.cursor >= 8 {
            let byte = (self.byte_buffer >> 24) as u8;
            self.byte_buffer <<= 8;
            self.cursor -= 8;

            self.write.write_all(&[byte])?;
            self.bytes_written += 1;
        }

        Ok(())
    }

    /// Writes the pending bits, if any, as one last byte padded with zeros.
    #[inline]
    pub fn fill(&mut self) -> Result<(), std::io::Error> {
        if self.cursor > 0 {
            self.write.write_all(&[(self.byte_buffer >> 24) as u8])?;
            self.bytes_written += 1;
            self.byte_buffer = 0;
            self.cursor = 0;
        }

        Ok(())
    }

    #[inline]
    pub fn flush(&mut self) -> Result<(), std::io::Error> {
        self.write.flush()
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}
