//! Value Object Module

pub mod email;
pub mod role;
pub mod siret;
pub mod username;

pub use email::Email;
pub use role::Role;
pub use siret::Siret;
pub use username::Username;
