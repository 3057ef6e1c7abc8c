//! Compression runs over waveform samples.
//!
//! Each sample's raw bytes are spelled out as a text of '0' and '1' characters, which is then
//! compressed with the fixed 12 bit LZW encoder of [hashlzw]. Sizes, entropy and compression
//! ratio of every run are appended to a CSV log.

pub mod batch;
pub mod bits;
pub mod entropy;
pub mod report;
