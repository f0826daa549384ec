//! Auth Session Entity
//!
//! Server-side session referenced by a signed cookie token.

use chrono::{DateTime, Duration, Utc};
use kernel::id::AccountId;
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::identity::Identity;

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: Uuid,
    pub account_id: AccountId,
    /// Privileges captured when the session was opened
    pub is_staff: bool,
    pub is_superuser: bool,
    /// Unix timestamp, milliseconds
    pub expires_at_ms: i64,
    /// SHA-256 of the User-Agent that opened the session
    pub client_fingerprint_hash: Vec<u8>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn new(
        account: &Account,
        fingerprint_hash: Vec<u8>,
        client_ip: Option<String>,
        user_agent: Option<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            account_id: account.account_id,
            is_staff: account.is_staff,
            is_superuser: account.is_superuser,
            expires_at_ms: (now + ttl).timestamp_millis(),
            client_fingerprint_hash: fingerprint_hash,
            client_ip,
            user_agent,
            created_at: now,
            last_activity_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    pub fn identity(&self) -> Identity {
        Identity::authenticated(self.account_id, self.is_staff, self.is_superuser)
    }
}
