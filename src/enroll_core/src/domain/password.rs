use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 8;

// Argon2id cost parameters: memory in KiB, iterations, lanes.
const ARGON2_MEMORY_COST: u32 = 15000;
const ARGON2_TIME_COST: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password must be at least {} characters long", MIN_PASSWORD_LENGTH)]
    TooShort,
    #[error(
        "Password must contain at least one uppercase letter, one number, and one special character"
    )]
    WeakComposition,
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),
}

/// A hashed password.
///
/// Only the PHC-encoded Argon2id hash is kept; the plaintext used to build it
/// is dropped (and zeroized by `secrecy`) as soon as hashing completes.
#[derive(Clone)]
pub struct Password(Secret<String>);

impl Password {
    /// Validate and hash a plaintext password.
    ///
    /// This is CPU and memory bound; async callers should run it on the
    /// blocking pool.
    pub fn from_plain(plain: Secret<String>) -> Result<Self, PasswordError> {
        check_strength(plain.expose_secret())?;

        let salt = SaltString::generate(&mut rand_core::OsRng);
        let hash = hasher()?
            .hash_password(plain.expose_secret().as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(Self(Secret::from(hash.to_string())))
    }

    /// Wrap a hash previously produced by [`Password::from_plain`], e.g. one
    /// loaded from storage. The value is trusted and not re-hashed.
    pub fn from_hash(hash: Secret<String>) -> Self {
        Self(hash)
    }

    /// Check a candidate plaintext against the stored hash.
    ///
    /// A mismatch and an unparseable stored hash both yield `false`.
    pub fn verify(&self, candidate: &Secret<String>) -> bool {
        let Ok(expected) = PasswordHash::new(self.0.expose_secret()) else {
            return false;
        };
        let Ok(hasher) = hasher() else {
            return false;
        };

        hasher
            .verify_password(candidate.expose_secret().as_bytes(), &expected)
            .is_ok()
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Password {}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Password").field(&"[REDACTED]").finish()
    }
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(
        ARGON2_MEMORY_COST,
        ARGON2_TIME_COST,
        ARGON2_PARALLELISM,
        None,
    )
    .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Length first, then the composition rules as a single check. The password
/// must be a single line of text.
fn check_strength(plain: &str) -> Result<(), PasswordError> {
    if plain.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }

    let has_uppercase = plain.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = plain.chars().any(|c| c.is_ascii_digit());
    let has_symbol = plain.chars().any(|c| !c.is_ascii_alphanumeric());

    let single_line = !plain.chars().any(char::is_control);

    if !(has_uppercase && has_digit && has_symbol && single_line) {
        return Err(PasswordError::WeakComposition);
    }

    Ok(())
}
