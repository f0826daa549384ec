//! Sign In Use Case
//!
//! Authenticates an account by username and password and opens a session.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AccountsConfig;
use crate::application::session_token;
use crate::domain::entity::{account::Account, auth_session::AuthSession};
use crate::domain::repository::{AccountRepository, AuthSessionRepository};
use crate::domain::value_object::Username;
use crate::error::{AccountsError, AccountsResult};

pub use platform::client::ClientFingerprint;

/// Sign in input
pub struct SignInInput {
    pub username: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Session token for the cookie
    pub session_token: String,
    pub account: Account,
}

pub struct SignInUseCase<A, S>
where
    A: AccountRepository,
    S: AuthSessionRepository,
{
    account_repo: Arc<A>,
    session_repo: Arc<S>,
    config: Arc<AccountsConfig>,
}

impl<A, S> SignInUseCase<A, S>
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

    /// Every failure path yields the same `InvalidCredentials`.
    pub async fn execute(
        &self,
        input: SignInInput,
        fingerprint: &ClientFingerprint,
    ) -> AccountsResult<SignInOutput> {
        let username =
            Username::new(&input.username).map_err(|_| AccountsError::InvalidCredentials)?;
        let password = ClearTextPassword::new(&input.password);

        let mut account = self
            .account_repo
            .find_by_username(&username)
            .await?
            .ok_or(AccountsError::InvalidCredentials)?;

        if !account.can_login() || !account.password_hash.verify(&password, self.config.pepper()) {
            return Err(AccountsError::InvalidCredentials);
        }

        account.record_login();
        self.account_repo.update(&account).await?;

        let session_token =
            open_session(self.session_repo.as_ref(), &self.config, &account, fingerprint).await?;

        tracing::info!(account_id = %account.account_id, "Account signed in");

        Ok(SignInOutput {
            session_token,
            account,
        })
    }
}

/// Store a new session for `account` and return its signed cookie token
pub(crate) async fn open_session<S>(
    session_repo: &S,
    config: &AccountsConfig,
    account: &Account,
    fingerprint: &ClientFingerprint,
) -> AccountsResult<String>
where
    S: AuthSessionRepository,
{
    let session = AuthSession::new(
        account,
        fingerprint.hash_vec(),
        fingerprint.ip_string(),
        Some(fingerprint.user_agent.clone()),
        config.session_ttl_chrono(),
    );
    session_repo.create_session(&session).await?;

    tracing::debug!(
        account_id = %account.account_id,
        session_id = %session.session_id,
        "Session opened"
    );

    Ok(session_token::issue(&config.session_secret, session.session_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::Email;
    use crate::infra::memory::InMemoryAccountsRepository;

    const PASSWORD: &str = "Blue-Harbor-Lantern-19";

    type Repo = InMemoryAccountsRepository;

    async fn setup() -> (Arc<Repo>, SignInUseCase<Repo, Repo>, Arc<AccountsConfig>) {
        let repo = Arc::new(Repo::new());
        let config = Arc::new(AccountsConfig::development());

        let hash = ClearTextPassword::new(PASSWORD).hash(config.pepper()).unwrap();
        let account = Account::new(
            Username::new("Jeanne").unwrap(),
            hash,
            Email::new("jeanne@example.com").unwrap(),
            "Jeanne",
            "Martin",
        );
        repo.create(&account).await.unwrap();

        let use_case = SignInUseCase::new(repo.clone(), repo.clone(), config.clone());
        (repo, use_case, config)
    }

    fn fingerprint() -> ClientFingerprint {
        ClientFingerprint::from_user_agent("test-agent/1.0", None)
    }

    fn input(username: &str, password: &str) -> SignInInput {
        SignInInput {
            username: username.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_opens_session() {
        let (repo, use_case, config) = setup().await;

        let output = use_case
            .execute(input("jeanne", PASSWORD), &fingerprint())
            .await
            .unwrap();
        assert!(output.account.last_login_at.is_some());

        let session_id = session_token::verify(&config.session_secret, &output.session_token).unwrap();
        let session = repo
            .find_session(session_id, &fingerprint().hash_vec())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.account_id, output.account.account_id);
    }

    #[tokio::test]
    async fn test_failures_are_indistinguishable() {
        let (_, use_case, _) = setup().await;

        for (username, password) in [
            ("jeanne", "wrong-password"),
            ("nobody", PASSWORD),
            ("", ""),
            ("bad name!", PASSWORD),
        ] {
            let err = use_case
                .execute(input(username, password), &fingerprint())
                .await
                .err()
                .unwrap();
            assert!(matches!(err, AccountsError::InvalidCredentials), "{username}");
        }
    }

    #[tokio::test]
    async fn test_inactive_account_rejected() {
        let (repo, use_case, _) = setup().await;
        let mut account = repo
            .find_by_username(&Username::new("jeanne").unwrap())
            .await
            .unwrap()
            .unwrap();
        account.is_active = false;
        repo.update(&account).await.unwrap();

        let err = use_case
            .execute(input("jeanne", PASSWORD), &fingerprint())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AccountsError::InvalidCredentials));
    }
}
