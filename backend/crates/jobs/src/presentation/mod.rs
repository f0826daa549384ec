//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::JobsState;
pub use router::{jobs_router, jobs_router_generic};
