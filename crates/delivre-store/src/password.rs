//! Argon2 password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
#[cfg(test)]
use argon2::{Algorithm, Params, Version};
use delivre_core::error::DelivreError;
use std::sync::OnceLock;

/// Production parameters outside tests, cheap ones inside.
fn argon2_instance() -> Argon2<'static> {
    #[cfg(test)]
    {
        match Params::new(1024, 1, 1, None) {
            Ok(params) => Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            Err(_) => Argon2::default(),
        }
    }

    #[cfg(not(test))]
    {
        Argon2::default()
    }
}

pub(crate) fn hash_password(password: &str) -> Result<String, DelivreError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2_instance()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DelivreError::Auth(format!("failed to hash password: {e}")))
}

pub(crate) fn verify_password(password: &str, hash: &str) -> Result<bool, DelivreError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| DelivreError::Auth(format!("invalid password hash: {e}")))?;
    Ok(argon2_instance()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Throwaway hash, created once with the current parameters.
fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("delivre-unknown-account").ok())
        .as_deref()
}

/// Verify against the throwaway hash so an unknown account costs the same
/// as a wrong password. Always false.
pub(crate) fn verify_unknown_account(password: &str) -> bool {
    if let Some(hash) = dummy_hash() {
        let _ = verify_password(password, hash);
    }
    false
}
