use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};

use crate::errors::AppError;

/// Hash a plaintext password into an Argon2id PHC-format string with a
/// freshly generated salt.
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AppError::Internal(format!("Password hashing failed: {err}")))
}
