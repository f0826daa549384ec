//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, middleware and notice redirects.

pub mod dto;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use flash::NoticeRedirect;
pub use handlers::AccountsState;
pub use middleware::{ClientIp, guarded, resolve_identity, with_identity};
pub use router::{accounts_router, accounts_router_generic};
