//! Check Session Use Case
//!
//! Resolves a session cookie token into the request `Identity`.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::session_token;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::identity::Identity;
use crate::domain::repository::AuthSessionRepository;
use crate::error::{AccountsError, AccountsResult};

pub struct CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AccountsConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AccountsConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Identity for a valid token, anonymous for anything else
    pub async fn identity(&self, token: Option<&str>, fingerprint_hash: &[u8]) -> Identity {
        let Some(token) = token else {
            return Identity::anonymous();
        };

        match self.get_session(token, fingerprint_hash).await {
            Ok(session) => session.identity(),
            Err(e) => {
                e.log();
                Identity::anonymous()
            }
        }
    }

    /// Live session and background activity update
    pub async fn get_session(
        &self,
        token: &str,
        fingerprint_hash: &[u8],
    ) -> AccountsResult<AuthSession> {
        let session_id = session_token::verify(&self.config.session_secret, token)
            .ok_or(AccountsError::SessionInvalid)?;

        let mut session = self
            .session_repo
            .find_session(session_id, fingerprint_hash)
            .await?
            .ok_or(AccountsError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete_session(session_id).await?;
            return Err(AccountsError::SessionInvalid);
        }

        session.touch();

        let session_clone = session.clone();
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.touch_session(&session_clone).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(session)
    }
}
