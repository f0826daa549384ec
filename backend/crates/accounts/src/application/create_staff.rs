//! Create Staff Use Case
//!
//! Creates an administrator account from the command line. Staff accounts
//! have no profile until they first open their profile page.

use std::sync::Arc;

use kernel::validation::FieldErrors;
use platform::password::UserAttributes;

use crate::application::config::AccountsConfig;
use crate::application::forms::{REQUIRED_MESSAGE, check_new_password};
use crate::application::register::USERNAME_TAKEN_MESSAGE;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{Email, Username};
use crate::error::AccountsResult;

pub struct CreateStaffInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub superuser: bool,
}

pub struct CreateStaffUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    config: Arc<AccountsConfig>,
}

impl<A> CreateStaffUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AccountsConfig>) -> Self {
        Self {
            account_repo,
            config,
        }
    }

    pub async fn execute(&self, input: CreateStaffInput) -> AccountsResult<Account> {
        let mut errors = FieldErrors::new();

        let username = Username::new(&input.username)
            .map_err(|e| errors.add("username", e.to_string()))
            .ok();
        let email = Email::new(&input.email)
            .map_err(|e| errors.add("email", e.to_string()))
            .ok();
        let attributes = UserAttributes {
            username: input.username.trim(),
            email: input.email.trim(),
            ..Default::default()
        };
        let password = check_new_password(&input.password, &attributes)
            .map_err(|e| errors.merge(e))
            .ok();

        let (Some(username), Some(email), Some(password)) = (username, email, password) else {
            if errors.is_empty() {
                errors.add("username", REQUIRED_MESSAGE);
            }
            return Err(errors.into());
        };

        if self.account_repo.exists_by_username(&username).await? {
            return Err(FieldErrors::single("username", USERNAME_TAKEN_MESSAGE).into());
        }

        let hash = password.hash(self.config.pepper())?;
        let account = Account::new(username, hash, email, "", "").staff(input.superuser);
        self.account_repo.create(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            superuser = input.superuser,
            "Staff account created"
        );

        Ok(account)
    }
}
