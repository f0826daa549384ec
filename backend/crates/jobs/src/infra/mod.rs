//! Infrastructure Layer
//!
//! Database implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryJobsRepository;
pub use postgres::PgJobsRepository;
