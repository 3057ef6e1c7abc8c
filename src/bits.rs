/// Spells out every byte as eight '0' or '1' characters, most significant bit first.
pub fn to_bit_text(data: &[u8]) -> String {
    let mut text = String::with_capacity(data.len() * 8);
    for byte in data {
        for bit in (0..8).rev() {
            text.push(if (byte >> bit) & 1 == 1 { '1' } else { '0' });
        }
    }
    text
}
