pub mod account;
pub mod auth_session;
pub mod profile;

pub use account::Account;
pub use auth_session::AuthSession;
pub use profile::Profile;
