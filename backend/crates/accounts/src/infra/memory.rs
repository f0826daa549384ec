//! In-memory repository
//!
//! Backs tests and `serve --in-memory`. All state lives behind one lock so
//! that multi-record writes are atomic, as they are in the SQL store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use kernel::id::AccountId;
use uuid::Uuid;

use crate::domain::entity::{account::Account, auth_session::AuthSession, profile::Profile};
use crate::domain::repository::{AccountRepository, AuthSessionRepository, ProfileRepository};
use crate::domain::value_object::Username;
use crate::error::{AccountsError, AccountsResult};

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<AccountId, Account>,
    profiles: HashMap<AccountId, Profile>,
    sessions: HashMap<Uuid, AuthSession>,
}

impl State {
    fn username_taken(&self, username: &Username) -> bool {
        self.accounts
            .values()
            .any(|a| a.username.canonical() == username.canonical())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountsRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryAccountsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AccountsResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| AccountsError::Internal("lock poisoned".to_string()))
    }

    fn write(&self) -> AccountsResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| AccountsError::Internal("lock poisoned".to_string()))
    }
}

impl AccountRepository for InMemoryAccountsRepository {
    async fn create(&self, account: &Account) -> AccountsResult<()> {
        let mut state = self.write()?;
        if state.username_taken(&account.username) {
            return Err(AccountsError::UsernameTaken);
        }
        state.accounts.insert(account.account_id, account.clone());
        Ok(())
    }

    async fn create_with_profile(&self, account: &Account, profile: &Profile) -> AccountsResult<()> {
        let mut state = self.write()?;
        if state.username_taken(&account.username) {
            return Err(AccountsError::UsernameTaken);
        }
        state.accounts.insert(account.account_id, account.clone());
        state.profiles.insert(account.account_id, profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AccountsResult<Option<Account>> {
        Ok(self.read()?.accounts.get(account_id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> AccountsResult<Option<Account>> {
        Ok(self
            .read()?
            .accounts
            .values()
            .find(|a| a.username.canonical() == username.canonical())
            .cloned())
    }

    async fn exists_by_username(&self, username: &Username) -> AccountsResult<bool> {
        Ok(self.read()?.username_taken(username))
    }

    async fn update(&self, account: &Account) -> AccountsResult<()> {
        let mut state = self.write()?;
        let stored = state
            .accounts
            .get_mut(&account.account_id)
            .ok_or(AccountsError::AccountNotFound)?;
        *stored = account.clone();
        Ok(())
    }

    async fn update_with_profile(&self, account: &Account, profile: &Profile) -> AccountsResult<()> {
        let mut state = self.write()?;
        let stored = state
            .accounts
            .get_mut(&account.account_id)
            .ok_or(AccountsError::AccountNotFound)?;
        *stored = account.clone();

        // Role is fixed once the profile exists.
        let mut profile = profile.clone();
        if let Some(existing) = state.profiles.get(&account.account_id) {
            profile.role = existing.role;
        }
        state.profiles.insert(account.account_id, profile);
        Ok(())
    }
}

impl ProfileRepository for InMemoryAccountsRepository {
    async fn find_by_account(&self, account_id: &AccountId) -> AccountsResult<Option<Profile>> {
        Ok(self.read()?.profiles.get(account_id).cloned())
    }

    async fn get_or_create(&self, account_id: &AccountId) -> AccountsResult<Profile> {
        let mut state = self.write()?;
        if !state.accounts.contains_key(account_id) {
            return Err(AccountsError::AccountNotFound);
        }
        let profile = state
            .profiles
            .entry(*account_id)
            .or_insert_with(|| Profile::placeholder(*account_id));
        Ok(profile.clone())
    }
}

impl AuthSessionRepository for InMemoryAccountsRepository {
    async fn create_session(&self, session: &AuthSession) -> AccountsResult<()> {
        self.write()?
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_session(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AccountsResult<Option<AuthSession>> {
        match self.read()?.sessions.get(&session_id) {
            Some(session) if session.client_fingerprint_hash != fingerprint_hash => {
                Err(AccountsError::SessionFingerprintMismatch)
            }
            found => Ok(found.cloned()),
        }
    }

    async fn touch_session(&self, session: &AuthSession) -> AccountsResult<()> {
        if let Some(stored) = self.write()?.sessions.get_mut(&session.session_id) {
            stored.last_activity_at = session.last_activity_at;
        }
        Ok(())
    }

    async fn delete_session(&self, session_id: Uuid) -> AccountsResult<()> {
        self.write()?.sessions.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired_sessions(&self) -> AccountsResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut state = self.write()?;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.expires_at_ms >= now_ms);
        Ok((before - state.sessions.len()) as u64)
    }
}
