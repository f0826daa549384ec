//! Application Layer
//!
//! Offer form validation and use cases.

pub mod create_offer;
pub mod delete_offer;
pub mod form;
pub mod list_offers;

#[cfg(test)]
pub(crate) mod fixtures;

pub use create_offer::CreateOfferUseCase;
pub use delete_offer::DeleteOfferUseCase;
pub use form::{OfferDraft, OfferForm, validate_offer};
pub use list_offers::{AdminListInput, AdminListOffersUseCase, ListActiveOffersUseCase};
