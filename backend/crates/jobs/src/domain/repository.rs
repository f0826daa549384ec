//! Repository Traits

use kernel::id::{AccountId, OfferId};

use crate::domain::offer::{NewOffer, Offer};
use crate::error::JobsResult;

/// Admin listing criteria
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferFilter {
    /// Restrict to one owner; `None` lists every owner
    pub owner_id: Option<AccountId>,
    pub active: Option<bool>,
    /// Case-insensitive substring of title or description
    pub search: Option<String>,
}

#[trait_variant::make(OfferRepository: Send)]
pub trait LocalOfferRepository {
    /// Store a new offer; the store assigns `created_at`
    async fn insert(&self, offer: NewOffer) -> JobsResult<Offer>;

    async fn find_by_id(&self, offer_id: &OfferId) -> JobsResult<Option<Offer>>;

    /// Active offers, newest first
    async fn list_active(&self) -> JobsResult<Vec<Offer>>;

    /// Offers matching `filter`, newest first
    async fn list_filtered(&self, filter: &OfferFilter) -> JobsResult<Vec<Offer>>;

    /// Delete the offer only if `owner_id` owns it
    ///
    /// Returns the deleted offer, or `None` when no such offer is owned by
    /// `owner_id` at the time of the delete.
    async fn delete_owned(&self, offer_id: &OfferId, owner_id: &AccountId)
    -> JobsResult<Option<Offer>>;
}

/// Store handed to the HTTP layer
pub trait OfferStore: OfferRepository + Clone + Send + Sync + 'static {}

impl<T> OfferStore for T where T: OfferRepository + Clone + Send + Sync + 'static {}
