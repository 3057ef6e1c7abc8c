use anyhow::Result;
use hashlzw::{encoder::FixedEncoder, Config};

const TOBE: &[u8] = b"TOBEORNOTTOBEORTOBEORNOTTOBEORNOTTOBEORTOBEORNOT";

fn main() -> Result<()> {
    let encoder = FixedEncoder::new(Config::ascii())?;

    let mut compressed = vec![];
    let summary = encoder.encode(TOBE, &mut compressed)?;

    println!(
        "{} bytes in, {} bytes out, {} codes of {} bits",
        summary.bytes_read,
        summary.bytes_written,
        summary.codes_written,
        encoder.config().code_size
    );
    println!("{compressed:#04X?}");

    assert_eq!(compressed.len() as u64, summary.bytes_written);

    Ok(())
}
