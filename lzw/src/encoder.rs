//! Contains the fixed code size encoder.

use std::{
    fmt::Display,
    io::{Read, Write},
};

use crate::{
    dictionary::{Dictionary, Probe},
    io::BitWriter,
    Config,
};

/// The error type for encoding operations.
///
/// Encapsulate [std::io::Error] and expose configuration or unexpected data issues.
#[derive(Debug)]
pub enum EncodingError {
    /// An I/O error happened when reading or writing data.
    Io(std::io::Error),
    /// Code size out of bounds. It should be between 2 and 16 included.
    CodeSize(u8),
    /// Hash shift out of bounds. It should be at most 16.
    HashShift(u8),
    /// There should be between 1 and 256 roots, and fewer roots than codes,
    /// as the last code is reserved for the end of stream.
    RootCount { root_count: u16, code_size: u8 },
    /// The table is too small for the hash to always land inside it.
    TableSize { table_size: usize, required: usize },
    /// The table size must be prime for collisions to be resolved.
    TableSizeNotPrime(usize),
    /// An unexpected byte was read.
    ///
    /// With 128 roots for example, only bytes between 0 and 127 have a code.
    /// Reading 200 would not be correct and we return this unexpected code error.
    UnexpectedCode { code: u8, root_count: u16 },
}

impl Display for EncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingError::Io(error) => std::fmt::Display::fmt(&error, f),
            EncodingError::CodeSize(code_size) => f.write_fmt(format_args!(
                "Code size must be between 2 and 16, was {code_size}.",
            )),
            EncodingError::HashShift(hash_shift) => f.write_fmt(format_args!(
                "Hash shift must be at most 16, was {hash_shift}.",
            )),
            EncodingError::RootCount {
                root_count,
                code_size,
            } => f.write_fmt(format_args!(
                "Root count {root_count} invalid. For code size {code_size}, it should be between 1 and {}.",
                ((1u32 << code_size) - 1).min(256)
            )),
            EncodingError::TableSize {
                table_size,
                required,
            } => f.write_fmt(format_args!(
                "Table size {table_size} is too small, it should be at least {required}.",
            )),
            EncodingError::TableSizeNotPrime(table_size) => f.write_fmt(format_args!(
                "Table size must be a prime number, was {table_size}.",
            )),
            EncodingError::UnexpectedCode { code, root_count } => f.write_fmt(format_args!(
                "Unexpected code {code}. With {root_count} roots, data should be < {root_count}.",
            )),
        }
    }
}

impl std::error::Error for EncodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodingError::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EncodingError {
    fn from(error: std::io::Error) -> Self {
        EncodingError::Io(error)
    }
}

/// What an encoding session did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Bytes consumed from the input.
    pub bytes_read: u64,
    /// Bytes written to the output, padding included.
    pub bytes_written: u64,
    /// Codes written to the output, end of stream included.
    pub codes_written: u64,
    /// Strings known by the table at the end, roots included.
    pub dictionary_len: usize,
}

/// LZW encoder writing fixed size codes.
///
/// Each call to [FixedEncoder::encode] starts from a fresh string table. As soon as the table
/// is full, it stops growing and the encoder keeps matching against what it holds.
///
/// The stream is terminated by the end of stream code, `2.pow(code_size) - 1`, then padded
/// with zeros up to the next byte.
#[derive(Debug, Clone)]
pub struct FixedEncoder {
    config: Config,
}

impl Default for FixedEncoder {
    fn default() -> Self {
        Self {
            config: Config::default(),
        }
    }
}

impl FixedEncoder {
    /// Creates an encoder for the given configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is not valid, see [Config::validate].
    pub fn new(config: Config) -> Result<Self, EncodingError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compress data with LZW outputting fixed size codes.
    ///
    /// For really small amount of data, the compressed output might take more space than
    /// the original data.
    ///
    /// # Arguments
    ///
    /// * `data` - The source data to be compressed. Read byte per byte, so wrap files
    ///   in a [std::io::BufReader].
    /// * `into` - The output where compressed data should be written.
    ///
    /// # Errors
    ///
    /// This function can fail on an [std::io::Error], or on a byte without a root entry.
    /// Whatever was written before the failure stays in `into`.
    ///
    /// # Examples
    /// ```
    /// use hashlzw::encoder::{EncodingError, FixedEncoder};
    ///
    /// fn main() -> Result<(), EncodingError> {
    ///     let data = [0, 0, 1, 3];
    ///     let mut output = vec![];
    ///
    ///     let summary = FixedEncoder::default().encode(&data[..], &mut output)?;
    ///
    ///     assert_eq!(output, [0x0, 0x0, 0x0, 0x0, 0x10, 0x3, 0xff, 0xf0]);
    ///     assert_eq!(summary.codes_written, 5);
    ///     Ok(())
    /// }
    /// ```
    pub fn encode<R: Read, W: Write>(&self, data: R, into: W) -> Result<Summary, EncodingError> {
        let code_size = self.config.code_size;
        let root_count = self.config.root_count;
        let end_of_stream = self.config.end_of_stream();

        let mut bit_writer = BitWriter::new(into);
        let mut dictionary = Dictionary::new(&self.config)?;
        let mut summary = Summary::default();

        let mut bytes = data.bytes();
        let k = match bytes.next() {
            Some(k) => k?,
            None => {
                // Well, it's an empty stream! Only the end of stream code is left to write.
                bit_writer.write(end_of_stream, code_size)?;
                bit_writer.fill()?;
                bit_writer.flush()?;

                summary.bytes_written = bit_writer.bytes_written();
                summary.codes_written = 1;
                summary.dictionary_len = dictionary.len();

                return Ok(summary);
            }
        };
        check_root(k, root_count)?;
        summary.bytes_read += 1;

        let mut current_prefix = k as u16;

        for k in bytes {
            let k = k?;
            check_root(k, root_count)?;
            summary.bytes_read += 1;

            match dictionary.lookup(current_prefix, k) {
                Probe::Found(word) => current_prefix = word,
                Probe::Vacant(slot) => {
                    bit_writer.write(current_prefix, code_size)?;
                    summary.codes_written += 1;
                    dictionary.register(slot, current_prefix, k);
                    current_prefix = k as u16;
                }
            }
        }

        bit_writer.write(current_prefix, code_size)?;
        bit_writer.write(end_of_stream, code_size)?;
        summary.codes_written += 2;

        bit_writer.fill()?;
        bit_writer.flush()?;

        summary.bytes_written = bit_writer.bytes_written();
        summary.dictionary_len = dictionary.len();

        log::debug!(
            "Encoded {} bytes into {} bytes, {} codes of {} bits, {}/{} strings known",
            summary.bytes_read,
            summary.bytes_written,
            summary.codes_written,
            code_size,
            summary.dictionary_len,
            dictionary.capacity()
        );

        Ok(summary)
    }

    /// Compress data with LZW outputting fixed size codes.
    /// Convenient wrapper that creates a [Vec<u8>] under the hood.
    ///
    /// # Errors
    ///
    /// This function can fail on an [std::io::Error], or on a byte without a root entry.
    ///
    /// # Examples
    /// ```
    /// use hashlzw::{encoder::{EncodingError, FixedEncoder}, Config};
    ///
    /// fn main() -> Result<(), EncodingError> {
    ///     let encoder = FixedEncoder::new(Config::ascii())?;
    ///     let output = encoder.encode_to_vec(&b"0101"[..])?;
    ///
    ///     assert_eq!(output, [0x03, 0x00, 0x31, 0x08, 0x0f, 0xff]);
    ///     Ok(())
    /// }
    /// ```
    pub fn encode_to_vec<R: Read>(&self, data: R) -> Result<Vec<u8>, EncodingError> {
        let mut output = vec![];
        self.encode(data, &mut output)?;
        Ok(output)
    }
}

#[inline(always)]
fn check_root(k: u8, root_count: u16) -> Result<(), EncodingError> {
    if u16::from(k) >= root_count {
        Err(EncodingError::UnexpectedCode {
            code: k,
            root_count,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_empty() -> Result<(), EncodingError> {
        let data: [u8; 0] = [];

        let mut compressed = vec![];
        let summary = FixedEncoder::default().encode(&data[..], &mut compressed)?;

        assert_eq!(compressed, [0xff, 0xf0]);
        assert_eq!(
            summary,
            Summary {
                bytes_read: 0,
                bytes_written: 2,
                codes_written: 1,
                dictionary_len: 256,
            }
        );

        Ok(())
    }

    #[test]
    fn encode_single_byte() -> Result<(), EncodingError> {
        let compressed = FixedEncoder::default().encode_to_vec(&[0x41][..])?;

        assert_eq!(compressed, [0x04, 0x1f, 0xff]);

        Ok(())
    }

    #[test]
    fn encode_four_a() -> Result<(), EncodingError> {
        let data = b"AAAA";

        let mut compressed = vec![];
        let summary = FixedEncoder::new(Config::ascii())?.encode(&data[..], &mut compressed)?;

        // 0x041 'A', 0x080 "AA", 0x041 'A', then end of stream.
        assert_eq!(compressed, [0x04, 0x10, 0x80, 0x04, 0x1f, 0xff]);
        assert_eq!(summary.codes_written, 4);
        assert_eq!(summary.dictionary_len, 130);

        Ok(())
    }

    #[test]
    fn encode_few_bytes() -> Result<(), EncodingError> {
        let data = [0, 0, 1, 3];

        let compressed = FixedEncoder::default().encode_to_vec(&data[..])?;

        // 0, 0, 1, 3, end of stream: 60 bits, padded with 4 zeros.
        assert_eq!(compressed, [0x0, 0x0, 0x0, 0x0, 0x10, 0x3, 0xff, 0xf0]);

        Ok(())
    }

    #[test]
    fn encode_multiple_with_same_encoder() -> Result<(), EncodingError> {
        let data = [
            1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 2, 2, 2, 2,
            2, 1, 1, 1, 0, 0, 0, 0, 2, 2, 2,
        ];
        let encoder = FixedEncoder::default();

        let compression1 = encoder.encode_to_vec(&data[..])?;
        let compression2 = encoder.encode_to_vec(&data[..])?;

        assert_eq!(compression1, compression2);

        Ok(())
    }

    #[test]
    fn wrong_data_for_root_count() {
        let data = b"ab\xc3\xa9";

        let result = FixedEncoder::new(Config::ascii())
            .and_then(|encoder| encoder.encode_to_vec(&data[..]))
            .err()
            .unwrap();
        let expected = EncodingError::UnexpectedCode {
            code: 0xc3,
            root_count: 128,
        };

        assert_eq!(expected.to_string(), result.to_string());
    }

    #[test]
    fn unsupported_code_size() {
        let config = Config {
            code_size: 1,
            ..Config::default()
        };

        let result = FixedEncoder::new(config).err().unwrap();

        assert_eq!(result.to_string(), "Code size must be between 2 and 16, was 1.");
    }

    #[test]
    fn io_errors_are_propagated() {
        struct BrokenPipe;

        impl Write for BrokenPipe {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::ErrorKind::BrokenPipe.into())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let result = FixedEncoder::default().encode(&b"some data"[..], BrokenPipe);

        assert!(matches!(
            result,
            Err(EncodingError::Io(error)) if error.kind() == std::io::ErrorKind::BrokenPipe
        ));
    }
}
