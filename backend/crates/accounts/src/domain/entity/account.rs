//! Account Entity
//!
//! Login credentials plus the personal fields collected at registration.
//! Whether an account is currently *authenticated* is a property of the
//! request session, never of this record.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;

use crate::domain::value_object::{Email, Username};

#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    pub username: Username,
    pub password_hash: HashedPassword,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    /// May use the admin listing
    pub is_staff: bool,
    /// Admin listing covers every account's offers
    pub is_superuser: bool,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        username: Username,
        password_hash: HashedPassword,
        email: Email,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            username,
            password_hash,
            email,
            first_name: first_name.into(),
            last_name: last_name.into(),
            is_staff: false,
            is_superuser: false,
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Administrator account; superusers are always staff.
    pub fn staff(mut self, superuser: bool) -> Self {
        self.is_staff = true;
        self.is_superuser = superuser;
        self
    }

    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// First name when set, otherwise the username
    pub fn display_name(&self) -> &str {
        let first = self.first_name.trim();
        if first.is_empty() {
            self.username.original()
        } else {
            first
        }
    }
}
