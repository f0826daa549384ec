//! SIRET: French company registration number, exactly 14 ASCII digits.

use derive_more::Display;
use serde::{Serialize, Serializer};
use thiserror::Error;

pub const SIRET_LENGTH: usize = 14;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiretError {
    /// Absent, or only whitespace
    #[error("This field is required.")]
    Empty,

    #[error("SIRET must contain exactly 14 digits.")]
    InvalidFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct Siret(String);

impl Siret {
    pub fn new(input: &str) -> Result<Self, SiretError> {
        let value = input.trim();
        if value.is_empty() {
            return Err(SiretError::Empty);
        }
        if value.len() != SIRET_LENGTH || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SiretError::InvalidFormat);
        }
        Ok(Self(value.to_string()))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for Siret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
