use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role, fixed when the profile is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum Role {
    #[default]
    Applicant = 0,
    Company = 1,
}

impl Role {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::Applicant => "applicant",
            Role::Company => "company",
        }
    }

    #[inline]
    pub const fn is_company(&self) -> bool {
        matches!(self, Role::Company)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Role::Applicant),
            1 => Some(Role::Company),
            _ => None,
        }
    }

    /// Parse a submitted role code (case-insensitive, trimmed)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "applicant" => Some(Role::Applicant),
            "company" => Some(Role::Company),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_id() {
        assert_eq!(Role::from_id(0), Some(Role::Applicant));
        assert_eq!(Role::from_id(1), Some(Role::Company));
        assert_eq!(Role::from_id(7), None);
    }

    #[test]
    fn test_role_from_code() {
        assert_eq!(Role::from_code("applicant"), Some(Role::Applicant));
        assert_eq!(Role::from_code(" Company "), Some(Role::Company));
        assert_eq!(Role::from_code("admin"), None);
        assert_eq!(Role::from_code(""), None);
    }

    #[test]
    fn test_role_display_and_serde() {
        assert_eq!(Role::Company.to_string(), "company");
        assert_eq!(serde_json::to_string(&Role::Applicant).unwrap(), "\"applicant\"");
    }
}
