//! Sign Out Use Case
//!
//! Invalidates the current session.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::session_token;
use crate::domain::repository::AuthSessionRepository;
use crate::error::{AccountsError, AccountsResult};

pub struct SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AccountsConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AccountsConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, token: &str) -> AccountsResult<()> {
        let session_id = session_token::verify(&self.config.session_secret, token)
            .ok_or(AccountsError::SessionInvalid)?;
        self.session_repo.delete_session(session_id).await?;

        tracing::info!(session_id = %session_id, "Session closed");
        Ok(())
    }
}
