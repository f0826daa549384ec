//! Username Value Object
//!
//! The public handle used to sign in.
//!
//! - NFKC-normalized, surrounding whitespace trimmed
//! - 1 to 150 characters
//! - letters, digits and `@ . + - _` only
//! - uniqueness is case-insensitive: `canonical` is the lowercase form

use derive_more::Display;
use serde::{Serialize, Serializer};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const USERNAME_MAX_LENGTH: usize = 150;

const ALLOWED_SPECIAL_CHARS: &[char] = &['@', '.', '+', '-', '_'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("This field is required.")]
    Empty,

    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
    )]
    InvalidCharacters,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{original}")]
pub struct Username {
    original: String,
    canonical: String,
}

impl Username {
    pub fn new(input: &str) -> Result<Self, UsernameError> {
        let normalized: String = input.nfkc().collect();
        let normalized = normalized.trim();

        if normalized.is_empty() {
            return Err(UsernameError::Empty);
        }

        let actual = normalized.chars().count();
        if actual > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: USERNAME_MAX_LENGTH,
                actual,
            });
        }

        if !normalized
            .chars()
            .all(|c| c.is_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c))
        {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(Self::from_db(normalized))
    }

    /// Rebuild from a stored value (already validated)
    pub fn from_db(original: &str) -> Self {
        Self {
            original: original.to_string(),
            canonical: original.to_lowercase(),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercase form used as the uniqueness key
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl Serialize for Username {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}
