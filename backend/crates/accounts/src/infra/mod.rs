//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryAccountsRepository;
pub use postgres::PgAccountsRepository;
