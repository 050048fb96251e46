/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`api_key`]: API key generation and format checks
/// - [`middleware`]: Resolving an `Authorization` header to a user identity
///
/// # Example
///
/// ```
/// use todoquote_shared::auth::api_key::{generate_api_key, validate_api_key_format};
/// use todoquote_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("p")?;
/// assert!(verify_password("p", &hash)?);
///
/// let key = generate_api_key();
/// assert!(validate_api_key_format(&key));
/// # Ok(())
/// # }
/// ```

pub mod api_key;
pub mod middleware;
pub mod password;
