/// Uppercase, then lowercase, then digits.
const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Return the chain label for the replica at global enumeration `index`.
///
/// The first 62 replicas get a single symbol. After that the alphabet is reused with the
/// number of completed passes appended, so index 62 is `A1`, 63 is `B1`, and 124 is `A2`.
/// Distinct indices always give distinct labels.
pub fn chain_id(index: usize) -> String {
    let n = ALPHABET.len();
    let base = ALPHABET[index % n] as char;
    if index < n {
        base.to_string()
    } else {
        format!("{base}{}", index / n)
    }
}
