//! Cache key derivation.
//!
//! Request text is reduced to a short key with a 32-bit rolling hash
//! (`h = h * 31 + unit` over UTF-16 code units, wrapping). Not collision
//! resistant: two inputs may share a key.

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Derives the cache key for a free-text request. Surrounding whitespace is ignored.
pub fn hash_key(text: &str) -> String {
    let mut hash: i32 = 0;
    for unit in text.trim().encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    to_base36(hash.unsigned_abs())
}

/// Key for a token count of `code` rendered as `format`.
pub fn token_count_key(format: &str, code: &str) -> String {
    format!("{}:{}", format, hash_key(code))
}

fn to_base36(mut value: u32) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(hash_key(""), "0");
        assert_eq!(hash_key("a"), "2p");
        assert_eq!(hash_key("ab"), "2e9");
        assert_eq!(hash_key("hello world"), "to5x38");
        assert_eq!(hash_key("A list of 100 users with names and emails"), "mrrlhh");
    }

    #[test]
    fn test_hashes_utf16_units() {
        // Surrogate pair contributes two units
        assert_eq!(hash_key("😀"), "11zz7");
    }

    #[test]
    fn test_trims_input() {
        assert_eq!(hash_key("  hello world\n"), hash_key("hello world"));
    }

    #[test]
    fn test_order_sensitive() {
        assert_ne!(hash_key("ab"), hash_key("ba"));
    }

    #[test]
    fn test_base36_extremes() {
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(2_147_483_648), "zik0zk");
    }

    #[test]
    fn test_token_count_key() {
        assert_eq!(token_count_key("json", "a"), "json:2p");
    }
}
