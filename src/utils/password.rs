//! Password credential hashing and verification.
//!
//! Credentials are stored in the `pbkdf2_sha256$<iterations>$<salt>$<hash>`
//! format: PBKDF2-HMAC-SHA256 with a random alphanumeric salt and a
//! standard-base64 encoded 32-byte derived key.
//!
//! Hashing is CPU-bound; async callers should run it on the blocking pool
//! (see [`PasswordHasher::hash_blocking`]).

use base64::Engine as _;
use hmac::Hmac;
use rand::Rng;
use rand::distr::Alphanumeric;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::AppError;
use serde_json::json;

const ALGORITHM: &str = "pbkdf2_sha256";
const SALT_LENGTH: usize = 22;
const HASH_LENGTH: usize = 32;

/// Default PBKDF2 iteration count for new credentials.
pub const DEFAULT_ITERATIONS: u32 = 600_000;

/// Lowest iteration count accepted from configuration.
pub const MIN_ITERATIONS: u32 = 1_000;

/// Hashes and verifies password credentials.
///
/// The iteration count only applies to new hashes. Verification always uses
/// the count recorded in the stored credential, so raising it does not lock
/// out existing users.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    iterations: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.max(1),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Hashes a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> String {
        let salt: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(SALT_LENGTH)
            .map(char::from)
            .collect();

        self.hash_with_salt(password, &salt)
    }

    fn hash_with_salt(&self, password: &str, salt: &str) -> String {
        let derived = derive(password, salt, self.iterations);
        format!(
            "{ALGORITHM}${}${salt}${}",
            self.iterations,
            base64::engine::general_purpose::STANDARD.encode(derived)
        )
    }

    /// Checks a password against a stored credential.
    ///
    /// Returns `false` for malformed credentials or unknown algorithms.
    pub fn verify(&self, password: &str, encoded: &str) -> bool {
        let mut parts = encoded.splitn(4, '$');
        let (Some(algorithm), Some(iterations), Some(salt), Some(expected)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        if algorithm != ALGORITHM {
            return false;
        }

        let Ok(iterations) = iterations.parse::<u32>() else {
            return false;
        };
        if iterations == 0 {
            return false;
        }

        let Ok(expected) = base64::engine::general_purpose::STANDARD.decode(expected) else {
            return false;
        };

        let derived = derive(password, salt, iterations);
        derived.as_slice().ct_eq(expected.as_slice()).into()
    }

    /// [`Self::hash`] on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the blocking task panics.
    pub async fn hash_blocking(&self, password: String) -> Result<String, AppError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal("Password hashing failed", json!({"reason": e.to_string()})))
    }

    /// [`Self::verify`] on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the blocking task panics.
    pub async fn verify_blocking(&self, password: String, encoded: String) -> Result<bool, AppError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.verify(&password, &encoded))
            .await
            .map_err(|e| {
                AppError::internal("Password verification failed", json!({"reason": e.to_string()}))
            })
    }
}

fn derive(password: &str, salt: &str, iterations: u32) -> [u8; HASH_LENGTH] {
    let mut out = [0u8; HASH_LENGTH];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt.as_bytes(), iterations, &mut out)
        .expect("HMAC accepts any key length");
    out
}
