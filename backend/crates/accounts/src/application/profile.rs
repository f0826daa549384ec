//! Profile Use Cases
//!
//! Read and update the caller's account and profile. Accounts created
//! without a profile get a placeholder one on first access.

use std::sync::Arc;

use chrono::Utc;

use crate::application::forms::{ProfileForm, validate_profile_update};
use crate::domain::entity::{account::Account, profile::Profile};
use crate::domain::identity::Identity;
use crate::domain::repository::{AccountRepository, ProfileRepository};
use crate::error::{AccountsError, AccountsResult};

pub struct ProfileView {
    pub account: Account,
    pub profile: Profile,
}

// ============================================================================
// Show
// ============================================================================

pub struct ShowProfileUseCase<A, P>
where
    A: AccountRepository,
    P: ProfileRepository,
{
    account_repo: Arc<A>,
    profile_repo: Arc<P>,
}

impl<A, P> ShowProfileUseCase<A, P>
where
    A: AccountRepository,
    P: ProfileRepository,
{
    pub fn new(account_repo: Arc<A>, profile_repo: Arc<P>) -> Self {
        Self {
            account_repo,
            profile_repo,
        }
    }

    pub async fn execute(&self, identity: &Identity) -> AccountsResult<ProfileView> {
        let account_id = identity.require_account()?;

        let account = self
            .account_repo
            .find_by_id(&account_id)
            .await?
            .ok_or(AccountsError::AccountNotFound)?;
        let profile = self.profile_repo.get_or_create(&account_id).await?;

        Ok(ProfileView { account, profile })
    }
}

// ============================================================================
// Update
// ============================================================================

pub struct UpdateProfileUseCase<A, P>
where
    A: AccountRepository,
    P: ProfileRepository,
{
    account_repo: Arc<A>,
    profile_repo: Arc<P>,
}

impl<A, P> UpdateProfileUseCase<A, P>
where
    A: AccountRepository,
    P: ProfileRepository,
{
    pub fn new(account_repo: Arc<A>, profile_repo: Arc<P>) -> Self {
        Self {
            account_repo,
            profile_repo,
        }
    }

    /// Validates against the stored role; the role itself never changes.
    pub async fn execute(&self, identity: &Identity, form: ProfileForm) -> AccountsResult<ProfileView> {
        let account_id = identity.require_account()?;

        let mut account = self
            .account_repo
            .find_by_id(&account_id)
            .await?
            .ok_or(AccountsError::AccountNotFound)?;
        let mut profile = self.profile_repo.get_or_create(&account_id).await?;

        let changes = validate_profile_update(&form, profile.role)?;

        account.email = changes.email;
        account.first_name = changes.first_name;
        account.last_name = changes.last_name;
        account.updated_at = Utc::now();

        profile.address = changes.address;
        profile.siret = changes.siret;
        if let Some(image_ref) = changes.image_ref {
            profile.image_ref = Some(image_ref);
        }
        if profile.is_company() {
            profile.cv_ref = None;
        } else if let Some(cv_ref) = changes.cv_ref {
            profile.cv_ref = Some(cv_ref);
        }

        self.account_repo
            .update_with_profile(&account, &profile)
            .await?;

        tracing::info!(account_id = %account_id, "Profile updated");

        Ok(ProfileView { account, profile })
    }
}
