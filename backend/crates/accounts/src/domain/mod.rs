//! Domain Layer
//!
//! Contains entities, value objects, the request identity and repository
//! traits.

pub mod entity;
pub mod identity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Account, AuthSession, Profile};
pub use identity::Identity;
pub use repository::{AccountRepository, AccountsStore, AuthSessionRepository, ProfileRepository};
pub use value_object::Role;
