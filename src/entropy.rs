/// Shannon entropy of a text of '0' and '1', in bits per character.
///
/// Anything that is not a '1' counts as a '0'. An empty text has an entropy of 0.
pub fn binary_entropy(bits: &str) -> f64 {
    let total = bits.len();
    if total == 0 {
        return 0.0;
    }

    let ones = bits.bytes().filter(|&bit| bit == b'1').count();

    [ones, total - ones]
        .into_iter()
        .filter(|&count| count > 0)
        .map(|count| {
            let p = count as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}
