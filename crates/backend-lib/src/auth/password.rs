// ============================
// board-backend-lib/src/auth/password.rs
// ============================
//! Tagged password hashing and verification.
//!
//! Stored hashes carry an algorithm tag prefix (`{scrypt}$scrypt$...`) so
//! several algorithms can coexist in the store and the default can be
//! rotated without invalidating existing accounts. The default algorithm is
//! scrypt at its recommended cost: hashing is deliberately slow and salted
//! so stolen hashes resist offline brute force. That CPU cost is a feature,
//! not an accident.
use argon2::Argon2;
use scrypt::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Scrypt,
};
use std::collections::HashMap;
use zeroize::Zeroize;

use crate::error::AppError;

/// Tag of the algorithm used for newly created hashes.
pub const DEFAULT_TAG: &str = "scrypt";

type VerifyFn = fn(plain: &str, phc: &str) -> bool;

/// Multi-algorithm password hasher.
///
/// `matches` dispatches on the hash's tag through a registry of verifier
/// functions; untagged or unknown-tag hashes fail closed.
pub struct DelegatingHasher {
    verifiers: HashMap<&'static str, VerifyFn>,
}

impl Default for DelegatingHasher {
    fn default() -> Self {
        let mut verifiers: HashMap<&'static str, VerifyFn> = HashMap::new();
        verifiers.insert("scrypt", verify_scrypt);
        verifiers.insert("argon2", verify_argon2);
        Self { verifiers }
    }
}

impl DelegatingHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a cleartext password with the default algorithm and a fresh
    /// random salt. Two calls with the same input produce different outputs.
    pub fn hash(&self, plain: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| AppError::Hash(e.to_string()))?
            .to_string();
        Ok(format!("{{{DEFAULT_TAG}}}{hash}"))
    }

    /// Hash a cleartext password and zeroize the original.
    pub fn hash_secure(&self, plain: &mut String) -> Result<String, AppError> {
        let hash = self.hash(plain);
        plain.zeroize();
        hash
    }

    /// Verify a cleartext password against a tagged hash.
    pub fn matches(&self, plain: &str, tagged: &str) -> bool {
        let Some((tag, phc)) = split_tag(tagged) else {
            return false;
        };
        match self.verifiers.get(tag) {
            Some(verify) => verify(plain, phc),
            None => false,
        }
    }
}

/// Split `{tag}rest` into `(tag, rest)`. Returns `None` for untagged input.
fn split_tag(tagged: &str) -> Option<(&str, &str)> {
    let rest = tagged.strip_prefix('{')?;
    let end = rest.find('}')?;
    let tag = &rest[..end];
    if tag.is_empty() {
        return None;
    }
    Some((tag, &rest[end + 1..]))
}

fn verify_scrypt(plain: &str, phc: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(phc) else {
        return false;
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed).is_ok()
}

fn verify_argon2(plain: &str, phc: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(phc) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}
