//! Input validators
//!
//! Pure predicate functions over untrusted strings. Every state-mutating
//! operation in the registry and the presence router gates on one of these;
//! callers must not proceed on `false`.
//!
//! Length ranges are counted in characters, which for the hex and alphanumeric
//! classes coincides with bytes.

fn is_lower_hex(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='f')
}

/// Validate a user ID: exactly 16 lowercase-hex characters.
pub fn valid_uid(uid: &str) -> bool {
    uid.len() == 16 && uid.chars().all(is_lower_hex)
}

/// Validate a username: 4-32 ASCII alphanumeric characters.
pub fn valid_username(username: &str) -> bool {
    (4..=32).contains(&username.len()) && username.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Validate a password: 8-64 ASCII characters, format only.
pub fn valid_password(password: &str) -> bool {
    (8..=64).contains(&password.len()) && password.is_ascii()
}

/// Validate a stream key: exactly 64 lowercase-hex characters.
pub fn valid_stream_key(stream_key: &str) -> bool {
    stream_key.len() == 64 && stream_key.chars().all(is_lower_hex)
}

/// Validate a chat message: 1-512 characters, any content.
pub fn valid_message(message: &str) -> bool {
    let chars = message.chars().count();
    (1..=512).contains(&chars)
}
