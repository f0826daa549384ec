//! Authorization guards
//!
//! A guard decides, before an operation runs, whether the caller may invoke
//! it. A rejection is a redirect plus a notice; the operation is then not
//! invoked at all.

use kernel::notice::Notice;
use url::form_urlencoded;

use crate::domain::identity::Identity;

pub const LOGIN_REQUIRED_MESSAGE: &str = "You must be logged in to access this page.";
pub const ALREADY_LOGGED_IN_MESSAGE: &str = "You are already logged in.";
pub const PERMISSION_DENIED_MESSAGE: &str = "You do not have the required permissions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Anonymous callers go to the login page, with `next` set
    RequireAuthenticated,
    /// Signed-in callers go to the board
    RequireAnonymous,
    /// Non-staff callers go home
    RequireAdmin,
}

/// Redirect targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPaths {
    pub login: String,
    pub board: String,
    pub home: String,
}

impl Default for GuardPaths {
    fn default() -> Self {
        Self {
            login: "/login/".to_string(),
            board: "/board/".to_string(),
            home: "/".to_string(),
        }
    }
}

/// Outcome of a rejected guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardRedirect {
    pub location: String,
    pub notice: Notice,
}

impl Guard {
    /// `target` is the path the caller asked for.
    pub fn check(
        &self,
        identity: &Identity,
        target: &str,
        paths: &GuardPaths,
    ) -> Result<(), GuardRedirect> {
        match self {
            Guard::RequireAuthenticated if !identity.is_authenticated() => Err(GuardRedirect {
                location: login_with_next(&paths.login, target),
                notice: Notice::warning(LOGIN_REQUIRED_MESSAGE),
            }),
            Guard::RequireAnonymous if identity.is_authenticated() => Err(GuardRedirect {
                location: paths.board.clone(),
                notice: Notice::info(ALREADY_LOGGED_IN_MESSAGE),
            }),
            Guard::RequireAdmin if !identity.is_admin() => Err(GuardRedirect {
                location: paths.home.clone(),
                notice: Notice::error(PERMISSION_DENIED_MESSAGE),
            }),
            _ => Ok(()),
        }
    }

    /// Invoke `op` exactly once if the guard passes, never otherwise.
    pub fn run<T>(
        &self,
        identity: &Identity,
        target: &str,
        paths: &GuardPaths,
        op: impl FnOnce() -> T,
    ) -> Result<T, GuardRedirect> {
        self.check(identity, target, paths)?;
        Ok(op())
    }
}

fn login_with_next(login: &str, target: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("next", target)
        .finish();
    let separator = if login.contains('?') { '&' } else { '?' };
    format!("{login}{separator}{query}")
}

/// A post-login redirect target that stays on this site
pub fn is_safe_redirect(next: &str) -> bool {
    next.starts_with('/')
        && !next.starts_with("//")
        && !next.contains('\\')
        && !next.chars().any(char::is_control)
}
