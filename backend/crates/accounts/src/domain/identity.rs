//! Identity
//!
//! Who is making the current request. Resolved once per request from the
//! session cookie and passed explicitly to guards and use cases.

use kernel::id::AccountId;

use crate::error::AccountsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Identity {
    /// `None` for anonymous callers
    pub account_id: Option<AccountId>,
    /// Staff: may use the admin listing
    pub is_admin: bool,
    pub is_superuser: bool,
}

impl Identity {
    pub const fn anonymous() -> Self {
        Self {
            account_id: None,
            is_admin: false,
            is_superuser: false,
        }
    }

    pub fn authenticated(account_id: AccountId, is_admin: bool, is_superuser: bool) -> Self {
        Self {
            account_id: Some(account_id),
            is_admin: is_admin || is_superuser,
            is_superuser,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.account_id.is_some()
    }

    /// Authenticated staff member
    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.is_admin
    }

    pub fn require_account(&self) -> Result<AccountId, AccountsError> {
        self.account_id.ok_or(AccountsError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous() {
        let identity = Identity::anonymous();
        assert!(!identity.is_authenticated());
        assert!(!identity.is_admin());
        assert!(matches!(
            identity.require_account(),
            Err(AccountsError::Unauthenticated)
        ));
    }

    #[test]
    fn test_authenticated() {
        let id = AccountId::new();
        let identity = Identity::authenticated(id, false, false);
        assert!(identity.is_authenticated());
        assert!(!identity.is_admin());
        assert_eq!(identity.require_account().unwrap(), id);
    }

    #[test]
    fn test_superuser_implies_admin() {
        let identity = Identity::authenticated(AccountId::new(), false, true);
        assert!(identity.is_admin());
    }

    #[test]
    fn test_admin_flag_without_account_is_not_admin() {
        let identity = Identity {
            account_id: None,
            is_admin: true,
            is_superuser: false,
        };
        assert!(!identity.is_admin());
    }
}
