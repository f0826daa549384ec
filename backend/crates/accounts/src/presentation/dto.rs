//! API DTOs (Data Transfer Objects)
//!
//! Requests are form-encoded; missing fields deserialize as empty.

use kernel::id::AccountId;
use kernel::notice::Notice;
use serde::{Deserialize, Serialize};

use crate::application::forms::{ProfileForm, RegistrationForm};
use crate::application::profile::ProfileView;
use crate::domain::entity::{account::Account, profile::Profile};

// ============================================================================
// Register
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub password1: String,
    pub password2: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub address: String,
    pub siret: String,
    #[serde(alias = "image")]
    pub image_ref: String,
    #[serde(alias = "cv")]
    pub cv_ref: String,
}

impl From<RegisterRequest> for RegistrationForm {
    fn from(req: RegisterRequest) -> Self {
        RegistrationForm {
            username: req.username,
            password1: req.password1,
            password2: req.password2,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            role: req.role,
            address: req.address,
            siret: req.siret,
            image_ref: req.image_ref,
            cv_ref: req.cv_ref,
        }
    }
}

/// Choices offered by the registration form
#[derive(Debug, Clone, Serialize)]
pub struct RegisterPageResponse {
    pub roles: Vec<&'static str>,
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Post-login target; falls back to the `next` query parameter
    pub next: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginPageResponse {
    pub next: Option<String>,
}

// ============================================================================
// Home / Profile
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HomeResponse {
    pub authenticated: bool,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub siret: String,
    #[serde(alias = "image")]
    pub image_ref: String,
    #[serde(alias = "cv")]
    pub cv_ref: String,
}

impl From<ProfileRequest> for ProfileForm {
    fn from(req: ProfileRequest) -> Self {
        ProfileForm {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            address: req.address,
            siret: req.siret,
            image_ref: req.image_ref,
            cv_ref: req.cv_ref,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub account_id: AccountId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.account_id,
            username: account.username.original().to_string(),
            email: account.email.as_str().to_string(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            is_staff: account.is_staff,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub account: AccountResponse,
    pub profile: Profile,
}

impl From<ProfileView> for ProfileResponse {
    fn from(view: ProfileView) -> Self {
        Self {
            account: AccountResponse::from(&view.account),
            profile: view.profile,
        }
    }
}

// ============================================================================
// Notices
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NoticesResponse {
    pub notices: Vec<Notice>,
}
