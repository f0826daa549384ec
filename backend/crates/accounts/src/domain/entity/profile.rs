//! Profile Entity
//!
//! One per account. Carries the role and the role-specific fields.

use kernel::id::AccountId;
use serde::Serialize;

use crate::domain::value_object::{Role, Siret};

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub account_id: AccountId,
    pub role: Role,
    pub address: String,
    pub image_ref: Option<String>,
    /// Present iff role = company (for validated profiles)
    pub siret: Option<Siret>,
    /// Applicants only
    pub cv_ref: Option<String>,
}

impl Profile {
    pub fn applicant(
        account_id: AccountId,
        address: impl Into<String>,
        image_ref: Option<String>,
        cv_ref: Option<String>,
    ) -> Self {
        Self {
            account_id,
            role: Role::Applicant,
            address: address.into(),
            image_ref,
            siret: None,
            cv_ref,
        }
    }

    pub fn company(
        account_id: AccountId,
        address: impl Into<String>,
        image_ref: Option<String>,
        siret: Siret,
    ) -> Self {
        Self {
            account_id,
            role: Role::Company,
            address: address.into(),
            image_ref,
            siret: Some(siret),
            cv_ref: None,
        }
    }

    /// Profile created on first access for accounts registered without one
    pub fn placeholder(account_id: AccountId) -> Self {
        Self::applicant(account_id, "", None, None)
    }

    pub fn is_company(&self) -> bool {
        self.role.is_company()
    }
}
