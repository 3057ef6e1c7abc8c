//! Fixed code size LZW encoder.
//!
//! This crate provides an encoder that compresses any [std::io::Read] into any [std::io::Write]
//! using LZW with a fixed code width (12 bits by default). Codes are packed most significant
//! bit first, the stream ends with a reserved end of stream code, and the last byte is padded
//! with zeros.
//!
//! The string table is an open addressing hash table of fixed capacity. Once every code is
//! assigned, the table stops learning and the encoder keeps going with what it knows.
//!
//! # Examples
//!
//! ```
//! use hashlzw::{encoder::FixedEncoder, Config};
//!
//! let data = b"AAAA";
//!
//! let encoder = FixedEncoder::new(Config::default()).unwrap();
//! let compressed = encoder.encode_to_vec(&data[..]).unwrap();
//!
//! // 0x041 'A', 0x100 "AA", 0x041 'A', 0xFFF end of stream.
//! assert_eq!(compressed, [0x04, 0x11, 0x00, 0x04, 0x1F, 0xFF]);
//! ```

mod dictionary;
pub mod encoder;
mod io;

use encoder::EncodingError;

/// Parameters of an encoding session.
///
/// The defaults are a 12 bit code size, a table of 5021 slots, 256 root entries and
/// a hash shift of 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Width of every code written, in bits. Between 2 and 16 included.
    pub code_size: u8,
    /// Number of slots in the string table. Must be prime, and large enough that a hashed
    /// `(prefix, byte)` pair always lands inside the table.
    pub table_size: usize,
    /// Number of single byte entries the table starts with. Input bytes must be lower than this.
    pub root_count: u16,
    /// Left shift applied to the appended byte when hashing.
    pub hash_shift: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            code_size: 12,
            table_size: 5021,
            root_count: 256,
            hash_shift: 4,
        }
    }
}

impl Config {
    /// The default configuration, restricted to 7 bit input.
    pub const fn ascii() -> Self {
        Self {
            code_size: 12,
            table_size: 5021,
            root_count: 128,
            hash_shift: 4,
        }
    }

    /// The code written once at the very end of the stream. Never assigned to a string.
    pub const fn end_of_stream(&self) -> u16 {
        ((1u32 << self.code_size) - 1) as u16
    }

    /// The highest code the string table may assign.
    pub const fn max_code(&self) -> u16 {
        self.end_of_stream() - 1
    }

    /// Checks that the configuration describes a usable table.
    ///
    /// # Errors
    ///
    /// Returns the first [EncodingError] variant describing what is out of bounds.
    pub fn validate(&self) -> Result<(), EncodingError> {
        if !(2..=16).contains(&self.code_size) {
            return Err(EncodingError::CodeSize(self.code_size));
        }

        if self.hash_shift > 16 {
            return Err(EncodingError::HashShift(self.hash_shift));
        }

        // The end of stream code can't double as a root.
        if self.root_count == 0 || self.root_count > 256 || self.root_count > self.max_code() + 1
        {
            return Err(EncodingError::RootCount {
                root_count: self.root_count,
                code_size: self.code_size,
            });
        }

        let required = 1usize << self.code_size.max(8 + self.hash_shift);
        if self.table_size < required {
            return Err(EncodingError::TableSize {
                table_size: self.table_size,
                required,
            });
        }

        if !is_prime(self.table_size) {
            return Err(EncodingError::TableSizeNotPrime(self.table_size));
        }

        Ok(())
    }
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    let mut divisor = 2;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}
