use bitstream_io::{BigEndian, BitRead, BitReader};
use hashlzw::Config;

/// Reads codes up to and including the end of stream code, then checks that only zero
/// padding up to the next byte is left.
pub fn unpack(compressed: &[u8], config: &Config) -> Vec<u16> {
    let code_size = config.code_size as u32;
    let end_of_stream = config.end_of_stream();
    let mut reader = BitReader::endian(compressed, BigEndian);
    let mut codes = vec![];

    loop {
        let code: u16 = reader
            .read(code_size)
            .expect("Stream ended before the end of stream code");
        codes.push(code);
        if code == end_of_stream {
            break;
        }
    }

    let used_bits = codes.len() as u32 * code_size;
    let padding = (8 - used_bits % 8) % 8;
    if padding > 0 {
        let rest: u8 = reader.read(padding).expect("Missing padding");
        assert_eq!(rest, 0, "Padding should be zeros");
    }
    assert_eq!(
        compressed.len() as u32 * 8,
        used_bits + padding,
        "Unexpected bytes after the end of stream code"
    );

    codes
}

/// Plain LZW decoding of a code stream, growing its table the same way the encoder does.
pub fn decode(codes: &[u16], config: &Config) -> Vec<u8> {
    let end_of_stream = config.end_of_stream();
    let mut table: Vec<Vec<u8>> = (0..config.root_count).map(|byte| vec![byte as u8]).collect();
    let mut output = vec![];

    let mut codes = codes.iter().copied().take_while(|&code| code != end_of_stream);
    let mut previous = match codes.next() {
        Some(code) => table[code as usize].clone(),
        None => return output,
    };
    output.extend_from_slice(&previous);

    for code in codes {
        let entry = if (code as usize) < table.len() {
            table[code as usize].clone()
        } else {
            assert_eq!(code as usize, table.len(), "Code {code} came out of nowhere");
            let mut entry = previous.clone();
            entry.push(previous[0]);
            entry
        };
        output.extend_from_slice(&entry);

        if table.len() <= config.max_code() as usize {
            let mut word = previous;
            word.push(entry[0]);
            table.push(word);
        }
        previous = entry;
    }

    output
}
