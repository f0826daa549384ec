//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use kernel::id::AccountId;
use uuid::Uuid;

use crate::domain::entity::{Account, AuthSession, Profile};
use crate::domain::value_object::Username;
use crate::error::AccountsResult;

#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert an account without a profile (administrators)
    ///
    /// Fails with `UsernameTaken` on a case-insensitive collision.
    async fn create(&self, account: &Account) -> AccountsResult<()>;

    /// Insert an account and its profile atomically
    ///
    /// Either both rows exist afterwards or neither does. Fails with
    /// `UsernameTaken` on a case-insensitive collision.
    async fn create_with_profile(&self, account: &Account, profile: &Profile)
    -> AccountsResult<()>;

    async fn find_by_id(&self, account_id: &AccountId) -> AccountsResult<Option<Account>>;

    /// Case-insensitive lookup
    async fn find_by_username(&self, username: &Username) -> AccountsResult<Option<Account>>;

    async fn exists_by_username(&self, username: &Username) -> AccountsResult<bool>;

    async fn update(&self, account: &Account) -> AccountsResult<()>;

    /// Update an account and upsert its profile atomically
    async fn update_with_profile(&self, account: &Account, profile: &Profile)
    -> AccountsResult<()>;
}

#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    async fn find_by_account(&self, account_id: &AccountId) -> AccountsResult<Option<Profile>>;

    /// Existing profile, or a freshly stored placeholder (applicant, empty address)
    async fn get_or_create(&self, account_id: &AccountId) -> AccountsResult<Profile>;
}

#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create_session(&self, session: &AuthSession) -> AccountsResult<()>;

    /// Session by ID, expired or not; errors on fingerprint mismatch
    async fn find_session(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AccountsResult<Option<AuthSession>>;

    /// Persist last activity
    async fn touch_session(&self, session: &AuthSession) -> AccountsResult<()>;

    async fn delete_session(&self, session_id: Uuid) -> AccountsResult<()>;

    async fn cleanup_expired_sessions(&self) -> AccountsResult<u64>;
}


/// A single store backing every accounts repository
pub trait AccountsStore:
    AccountRepository + ProfileRepository + AuthSessionRepository + Clone + Send + Sync + 'static
{
}

impl<T> AccountsStore for T where
    T: AccountRepository + ProfileRepository + AuthSessionRepository + Clone + Send + Sync + 'static
{
}
