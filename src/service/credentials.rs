use crate::error::app_error::AppError;
use argon2::Argon2;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use std::sync::LazyLock;
use tracing::warn;

/// A real Argon2 hash generated once at startup, used as a timing decoy
/// so that login requests for unknown emails cost the same as a wrong password.
static DUMMY_HASH: LazyLock<String> = LazyLock::new(|| match hash_password("dummy-never-matches") {
    Ok(hash) => hash,
    Err(e) => {
        warn!(error = %e, "decoy password hash could not be built; unknown-email logins will answer faster");
        String::new()
    }
});

/// Salted Argon2id hash in PHC string form. Every call draws a fresh salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Returns whether `password` matches `hash`. A stored hash that cannot be
/// parsed counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(e) => {
            warn!(error = %e, "stored password hash could not be parsed");
            false
        }
    }
}

pub fn dummy_verify(password: &str) {
    match PasswordHash::new(&DUMMY_HASH) {
        Ok(hash) => {
            let _ = Argon2::default().verify_password(password.as_bytes(), &hash);
        }
        Err(e) => warn!(error = %e, "decoy password hash unavailable; skipped timing verification"),
    }
}
