//! Jobs Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Offer entity, skill parsing, repository traits
//! - `application/` - Offer form and use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Rules
//! - Only accounts with a company profile publish offers
//! - Only the owner deletes an offer
//! - The board lists active offers, newest first
//! - Staff list offers regardless of `active`; superusers see every owner

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use domain::offer::Offer;
pub use error::{JobsError, JobsResult};
pub use infra::{InMemoryJobsRepository, PgJobsRepository};
pub use presentation::{JobsState, jobs_router, jobs_router_generic};
