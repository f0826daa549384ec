//! Accounts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, identity, repository traits
//! - `application/` - Use cases, forms, guards, session tokens
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration as applicant or company (account and profile created together)
//! - Sign in / sign out with server-side sessions and cookie tokens
//! - Profile view and update, re-validated against the stored role
//! - Guards: authenticated only, anonymous only, admin only
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, checked against a baseline policy
//! - Session tokens signed with HMAC-SHA256
//! - Sessions bound to client fingerprint (User-Agent)
//! - Identical response for every failed sign-in

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountsConfig;
pub use application::guard::{Guard, GuardPaths, GuardRedirect};
pub use domain::identity::Identity;
pub use error::{AccountsError, AccountsResult};
pub use infra::{InMemoryAccountsRepository, PgAccountsRepository};
pub use presentation::router::{accounts_router, accounts_router_generic};

pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
