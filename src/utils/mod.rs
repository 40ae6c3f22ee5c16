pub mod ip;
pub mod password;
pub mod short_path;
pub mod url_validator;

pub use short_path::{lookup_key, normalize_short_path, short_link};

/// Random alphanumeric string (JWT secret fallback, token ids)
pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_random_code() {
        let code = generate_random_code(32);
        assert_eq!(code.len(), 32);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
