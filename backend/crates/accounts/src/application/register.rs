//! Register Use Case
//!
//! Creates an account and its profile in one step, then signs the new
//! account in.

use std::sync::Arc;

use kernel::validation::FieldErrors;
use platform::client::ClientFingerprint;

use crate::application::config::AccountsConfig;
use crate::application::forms::{RegistrationForm, validate_registration};
use crate::application::sign_in::open_session;
use crate::domain::entity::{account::Account, profile::Profile};
use crate::domain::repository::{AccountRepository, AuthSessionRepository};
use crate::domain::value_object::Role;
use crate::error::{AccountsError, AccountsResult};

pub const USERNAME_TAKEN_MESSAGE: &str = "A user with that username already exists.";

pub struct RegisterOutput {
    pub account: Account,
    pub profile: Profile,
    pub session_token: String,
}

pub struct RegisterUseCase<A, S>
where
    A: AccountRepository,
    S: AuthSessionRepository,
{
    account_repo: Arc<A>,
    session_repo: Arc<S>,
    config: Arc<AccountsConfig>,
}

impl<A, S> RegisterUseCase<A, S>
where
    A: AccountRepository,
    S: AuthSessionRepository,
{
    pub fn new(account_repo: Arc<A>, session_repo: Arc<S>, config: Arc<AccountsConfig>) -> Self {
        Self {
            account_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        form: RegistrationForm,
        fingerprint: &ClientFingerprint,
    ) -> AccountsResult<RegisterOutput> {
        let registration = validate_registration(&form)?;

        if self
            .account_repo
            .exists_by_username(&registration.username)
            .await?
        {
            return Err(username_taken());
        }

        let password_hash = registration.password.hash(self.config.pepper())?;

        let account = Account::new(
            registration.username,
            password_hash,
            registration.email,
            registration.first_name,
            registration.last_name,
        );

        let profile = match (registration.role, registration.siret) {
            (Role::Company, Some(siret)) => Profile::company(
                account.account_id,
                registration.address,
                registration.image_ref,
                siret,
            ),
            (Role::Company, None) => {
                return Err(AccountsError::Internal(
                    "validated company registration without SIRET".to_string(),
                ));
            }
            (Role::Applicant, _) => Profile::applicant(
                account.account_id,
                registration.address,
                registration.image_ref,
                registration.cv_ref,
            ),
        };

        // Lost a race against a concurrent registration of the same name.
        match self.account_repo.create_with_profile(&account, &profile).await {
            Err(AccountsError::UsernameTaken) => return Err(username_taken()),
            other => other?,
        }

        tracing::info!(
            account_id = %account.account_id,
            role = profile.role.code(),
            "Account registered"
        );

        let session_token =
            open_session(self.session_repo.as_ref(), &self.config, &account, fingerprint).await?;

        Ok(RegisterOutput {
            account,
            profile,
            session_token,
        })
    }
}

fn username_taken() -> AccountsError {
    AccountsError::Validation(FieldErrors::single("username", USERNAME_TAKEN_MESSAGE))
}
