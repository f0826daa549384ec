//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary shared by the `accounts` and `jobs`
//! contexts:
//! - Common error types and result aliases
//! - Typed identifiers for accounts and offers
//! - Field-keyed validation errors produced by form validators
//! - Notices (flash messages) shown to the user after a request
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod notice;
pub mod validation;
