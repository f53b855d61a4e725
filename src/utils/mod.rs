pub mod url_validator;

pub use url_validator::validate_url;

/// 短码字符集
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub const MIN_CODE_LENGTH: usize = 6;
pub const MAX_CODE_LENGTH: usize = 8;

/// Generate a code of `length` characters drawn uniformly from [`CODE_ALPHABET`].
///
/// Uses the thread-local generator; codes are not meant to be unguessable.
pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// `[A-Za-z0-9]{6,8}`
#[inline]
pub fn is_valid_short_code(code: &str) -> bool {
    (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
