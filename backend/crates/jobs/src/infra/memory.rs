//! In-memory offer store

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use kernel::id::{AccountId, OfferId};

use crate::domain::offer::{NewOffer, Offer};
use crate::domain::repository::{OfferFilter, OfferRepository};
use crate::error::{JobsError, JobsResult};

#[derive(Debug, Clone, Default)]
pub struct InMemoryJobsRepository {
    offers: Arc<RwLock<HashMap<OfferId, Offer>>>,
}

impl InMemoryJobsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> JobsResult<RwLockReadGuard<'_, HashMap<OfferId, Offer>>> {
        self.offers
            .read()
            .map_err(|_| JobsError::Internal("lock poisoned".to_string()))
    }

    fn write(&self) -> JobsResult<RwLockWriteGuard<'_, HashMap<OfferId, Offer>>> {
        self.offers
            .write()
            .map_err(|_| JobsError::Internal("lock poisoned".to_string()))
    }

    fn newest_first(mut offers: Vec<Offer>) -> Vec<Offer> {
        offers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        offers
    }
}

fn matches(offer: &Offer, filter: &OfferFilter) -> bool {
    let owner_ok = filter.owner_id.is_none_or(|owner| offer.owner_id == owner);
    let active_ok = filter.active.is_none_or(|active| offer.active == active);
    let search_ok = filter.search.as_deref().is_none_or(|needle| {
        let needle = needle.to_lowercase();
        offer.title.to_lowercase().contains(&needle)
            || offer.description.to_lowercase().contains(&needle)
    });
    owner_ok && active_ok && search_ok
}

impl OfferRepository for InMemoryJobsRepository {
    async fn insert(&self, offer: NewOffer) -> JobsResult<Offer> {
        let offer = offer.into_offer(Utc::now());
        self.write()?.insert(offer.offer_id, offer.clone());
        Ok(offer)
    }

    async fn find_by_id(&self, offer_id: &OfferId) -> JobsResult<Option<Offer>> {
        Ok(self.read()?.get(offer_id).cloned())
    }

    async fn list_active(&self) -> JobsResult<Vec<Offer>> {
        let offers = self.read()?.values().filter(|o| o.active).cloned().collect();
        Ok(Self::newest_first(offers))
    }

    async fn list_filtered(&self, filter: &OfferFilter) -> JobsResult<Vec<Offer>> {
        let offers = self
            .read()?
            .values()
            .filter(|o| matches(o, filter))
            .cloned()
            .collect();
        Ok(Self::newest_first(offers))
    }

    async fn delete_owned(&self, offer_id: &OfferId, owner_id: &AccountId) -> JobsResult<Option<Offer>> {
        let mut offers = self.write()?;
        let owned = offers
            .get(offer_id)
            .is_some_and(|offer| offer.is_owned_by(owner_id));
        Ok(if owned { offers.remove(offer_id) } else { None })
    }
}
