//! Domain Layer
//!
//! Offer entity, skill parsing and repository traits.

pub mod offer;
pub mod repository;
pub mod skills;

pub use offer::{NewOffer, Offer};
pub use repository::{OfferFilter, OfferRepository, OfferStore};
pub use skills::parse_skills;
