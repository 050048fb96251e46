/// API key generation and format checks
///
/// Keys are issued once at registration and sent back verbatim in the
/// `Authorization` header on every request.
///
/// # Key Format
///
/// 32 lowercase hex characters encoding 128 bits read from the operating
/// system CSPRNG. Any stored key of that shape is accepted, however it was
/// produced.
///
/// # Example
///
/// ```
/// use todoquote_shared::auth::api_key::{generate_api_key, validate_api_key_format, API_KEY_LENGTH};
///
/// let key = generate_api_key();
/// assert_eq!(key.len(), API_KEY_LENGTH);
/// assert!(validate_api_key_format(&key));
/// assert!(!validate_api_key_format("Bearer something"));
/// ```

use rand::{rngs::OsRng, RngCore};

/// Number of random bytes in a key
const KEY_BYTES: usize = 16;

/// Length of an encoded API key
pub const API_KEY_LENGTH: usize = KEY_BYTES * 2;

/// Generates a new API key.
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Checks that a presented key could have been issued by [`generate_api_key`].
///
/// Used to reject garbage before it reaches the database.
pub fn validate_api_key_format(key: &str) -> bool {
    key.len() == API_KEY_LENGTH
        && key
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
