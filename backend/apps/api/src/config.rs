//! Server configuration from the environment

use std::env;
use std::net::SocketAddr;

use accounts::AccountsConfig;
use anyhow::Context;
use axum::http::HeaderValue;
use platform::crypto::from_base64;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Required unless serving from memory
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub database_max_connections: u32,
    pub frontend_origins: Vec<HeaderValue>,
    pub accounts: AccountsConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `debug` relaxes the session secret and cookie defaults.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        debug: bool,
    ) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let database_max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        let mut accounts = match var("SESSION_SECRET") {
            Some(secret) => AccountsConfig {
                session_secret: decode_secret(&secret)?,
                ..AccountsConfig::default()
            },
            None if debug => {
                tracing::warn!("SESSION_SECRET not set; sessions will not survive a restart");
                AccountsConfig::with_random_secret()
            }
            None => anyhow::bail!("SESSION_SECRET must be set in production"),
        };

        accounts.cookie_secure = match var("COOKIE_SECURE") {
            Some(value) => parse_bool(&value).context("COOKIE_SECURE must be true or false")?,
            None => !debug,
        };
        accounts.password_pepper = var("PASSWORD_PEPPER").map(String::into_bytes);

        Ok(Self {
            database_url: var("DATABASE_URL"),
            bind_addr,
            database_max_connections,
            frontend_origins,
            accounts,
        })
    }

    pub fn database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set in environment")
    }
}

fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = from_base64(encoded.trim()).context("SESSION_SECRET must be base64")?;
    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes, got {}", bytes.len()))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
