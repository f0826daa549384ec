//! Password Hashing and Policy
//!
//! - Argon2id hashing (PHC strings) with an optional pepper
//! - Zeroization of clear text on drop
//! - The account password policy: minimum length, not entirely numeric,
//!   not a common password, not too similar to the account's attributes

use std::collections::HashMap;
use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Similarity ratio at or above which a password is rejected
pub const MAX_SIMILARITY: f64 = 0.7;

const COMMON_PASSWORDS: &[&str] = &[
    "123456",
    "12345678",
    "123456789",
    "1234567890",
    "password",
    "password1",
    "password123",
    "passw0rd",
    "qwerty",
    "qwertyuiop",
    "qwerty123",
    "azerty",
    "azertyuiop",
    "abc123",
    "abcdefgh",
    "letmein",
    "welcome",
    "welcome1",
    "admin",
    "admin123",
    "administrator",
    "iloveyou",
    "sunshine",
    "princess",
    "football",
    "baseball",
    "monkey",
    "shadow",
    "master",
    "dragon",
    "michael",
    "superman",
    "trustno1",
    "starwars",
    "whatever",
    "changeme",
    "1q2w3e4r",
    "1qaz2wsx",
    "zaq12wsx",
    "motdepasse",
];

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violations
///
/// Display strings are the user-facing form messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("This password is too short. It must contain at least {min} characters.")]
    TooShort { min: usize },

    #[error("This password is entirely numeric.")]
    EntirelyNumeric,

    #[error("This password is too common.")]
    TooCommon,

    #[error("The password is too similar to the {attribute}.")]
    TooSimilar { attribute: &'static str },
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, erased from memory when dropped.
///
/// Not `Clone`; Debug output is redacted. Input is NFKC-normalized so the
/// same password typed on different keyboards hashes identically.
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("correct horse battery");
/// assert_eq!(password.char_count(), 21);
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().nfkc().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.0.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash with Argon2id (default OWASP parameters) and a random salt
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut bytes = self.peppered(pepper);
        let salt = SaltString::generate(&mut OsRng);

        let result = Argon2::default()
            .hash_password(&bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        bytes.zeroize();
        result
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Parse a stored PHC string
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Constant-time verification; `pepper` must match the one used to hash.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        let mut bytes = password.peppered(pepper);
        let ok = Argon2::default()
            .verify_password(&bytes, &parsed_hash)
            .is_ok();
        bytes.zeroize();
        ok
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Policy
// ============================================================================

/// Account attributes a password must not resemble
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAttributes<'a> {
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
}

impl<'a> UserAttributes<'a> {
    fn labelled(&self) -> [(&'static str, &'a str); 4] {
        [
            ("username", self.username),
            ("first name", self.first_name),
            ("last name", self.last_name),
            ("email address", self.email),
        ]
    }
}

/// Run every policy rule and report all violations (empty = acceptable).
pub fn validate_password(
    password: &ClearTextPassword,
    attributes: &UserAttributes<'_>,
) -> Vec<PasswordPolicyError> {
    let mut errors = Vec::new();
    let raw = password.as_str();

    if let Some(attribute) = too_similar_to(raw, attributes) {
        errors.push(PasswordPolicyError::TooSimilar { attribute });
    }

    if password.char_count() < MIN_PASSWORD_LENGTH {
        errors.push(PasswordPolicyError::TooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }

    if is_common(raw) {
        errors.push(PasswordPolicyError::TooCommon);
    }

    if !raw.is_empty() && raw.chars().all(|c| c.is_numeric()) {
        errors.push(PasswordPolicyError::EntirelyNumeric);
    }

    errors
}

fn is_common(password: &str) -> bool {
    let lower = password.trim().to_lowercase();
    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// First attribute (or word of an attribute) the password resembles
fn too_similar_to(password: &str, attributes: &UserAttributes<'_>) -> Option<&'static str> {
    let password = password.to_lowercase();
    let password_len = password.chars().count();

    for (label, value) in attributes.labelled() {
        let value = value.trim().to_lowercase();
        if value.is_empty() {
            continue;
        }

        let parts = value
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .chain(std::iter::once(value.as_str()));

        for part in parts.filter(|p| !p.is_empty()) {
            let part_len = part.chars().count();
            // Short attributes cannot meaningfully match very long passwords.
            let length_bound = MAX_SIMILARITY / 2.0 * password_len as f64;
            if password_len >= 10 * part_len && (part_len as f64) < length_bound {
                continue;
            }
            if quick_ratio(&password, part) >= MAX_SIMILARITY {
                return Some(label);
            }
        }
    }

    None
}

/// Upper bound on sequence similarity: 2·|common chars| / (|a| + |b|)
fn quick_ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }

    let mut available: HashMap<char, usize> = HashMap::new();
    for c in b.chars() {
        *available.entry(c).or_default() += 1;
    }

    let mut matches = 0usize;
    for c in a.chars() {
        if let Some(n) = available.get_mut(&c).filter(|n| **n > 0) {
            *n -= 1;
            matches += 1;
        }
    }

    2.0 * matches as f64 / total as f64
}

// ============================================================================
// Tests
// ============================================================================
