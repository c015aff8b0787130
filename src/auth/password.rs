use anyhow::anyhow;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::{error, warn};

use crate::error::AppError;

pub const MIN_PASSWORD_LEN: usize = 6;

fn hasher() -> Argon2<'static> {
    Argon2::default()
}

/// Argon2id with a fresh random salt, encoded as a PHC string.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()
        .hash_password(plain.as_bytes(), &salt)
        .map(|phc| phc.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hash failed");
            anyhow!("hash password: {e}")
        })
}

/// Constant-time check of `plain` against a stored PHC string. A stored value
/// that does not parse is an error, not a mismatch.
pub fn verify_password(plain: &str, stored: &str) -> anyhow::Result<bool> {
    let phc = PasswordHash::new(stored).map_err(|e| {
        error!(error = %e, "stored password hash is malformed");
        anyhow!("parse stored hash: {e}")
    })?;
    Ok(hasher().verify_password(plain.as_bytes(), &phc).is_ok())
}

/// Length is counted in characters, not bytes.
pub fn check_strength(plain: &str) -> Result<(), AppError> {
    if plain.chars().count() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::validation(format!(
            "password too short (minimum {MIN_PASSWORD_LEN} characters)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_hash_accepts_only_the_original() {
        let stored = hash_password("pw123456").unwrap();
        assert!(stored.starts_with("$argon2"));
        assert!(verify_password("pw123456", &stored).unwrap());
        assert!(!verify_password("pw1234567", &stored).unwrap());
        assert!(!verify_password("", &stored).unwrap());
    }

    #[test]
    fn every_hash_gets_its_own_salt() {
        let a = hash_password("pw123456").unwrap();
        let b = hash_password("pw123456").unwrap();
        assert_ne!(a, b);
        assert!(!a.contains("pw123456"));
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(verify_password("anything", "plaintext-in-db").is_err());
    }

    #[test]
    fn strength_counts_characters() {
        assert!(check_strength("12345").is_err());
        assert!(check_strength("123456").is_ok());
        assert!(check_strength("çãõéáí").is_ok());
    }
}
