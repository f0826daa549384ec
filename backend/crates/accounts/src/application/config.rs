//! Application Configuration
//!
//! Configuration for the accounts application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
pub use platform::cookie::SameSite;

use crate::application::guard::GuardPaths;

#[derive(Debug, Clone)]
pub struct AccountsConfig {
    pub session_cookie_name: String,
    /// Cookie carrying pending notices between requests
    pub flash_cookie_name: String,
    /// HMAC key for session tokens (32 bytes)
    pub session_secret: [u8; 32],
    pub session_ttl: Duration,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Application-wide secret appended before hashing
    pub password_pepper: Option<Vec<u8>>,
    /// Redirect targets used by the guards
    pub paths: GuardPaths,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "sessionid".to_string(),
            flash_cookie_name: "notices".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(14 * 24 * 3600), // 2 weeks
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            paths: GuardPaths::default(),
        }
    }
}

impl AccountsConfig {
    /// Random session secret; sessions do not survive a restart
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&platform::crypto::random_bytes(32));
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Random secret and insecure cookies, for local runs and tests
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl).unwrap_or(chrono::Duration::days(14))
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig::named(&self.session_cookie_name)
            .with_secure(self.cookie_secure)
            .with_same_site(self.cookie_same_site)
            .with_max_age(self.session_ttl.as_secs() as i64)
    }

    /// Session-scoped (no Max-Age); readable only by the server
    pub fn flash_cookie(&self) -> CookieConfig {
        CookieConfig::named(&self.flash_cookie_name)
            .with_secure(self.cookie_secure)
            .with_same_site(self.cookie_same_site)
    }
}
