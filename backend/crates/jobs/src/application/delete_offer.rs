//! Delete Offer Use Case
//!
//! Only the owner may delete an offer. The store-level delete is itself
//! conditional on the owner, so an offer can never be removed on behalf of
//! another account.

use std::sync::Arc;

use accounts::Identity;
use kernel::id::OfferId;

use crate::domain::repository::OfferRepository;
use crate::error::{JobsError, JobsResult};

pub struct DeleteOfferUseCase<O>
where
    O: OfferRepository,
{
    offer_repo: Arc<O>,
}

impl<O> DeleteOfferUseCase<O>
where
    O: OfferRepository,
{
    pub fn new(offer_repo: Arc<O>) -> Self {
        Self { offer_repo }
    }

    /// Returns the deleted offer's title
    pub async fn execute(&self, identity: &Identity, offer_id: &OfferId) -> JobsResult<String> {
        let account_id = identity.require_account()?;

        let offer = self
            .offer_repo
            .find_by_id(offer_id)
            .await?
            .ok_or(JobsError::NotFound)?;

        if !offer.is_owned_by(&account_id) {
            tracing::warn!(
                offer_id = %offer_id,
                account_id = %account_id,
                "Refused to delete offer owned by another account"
            );
            return Err(JobsError::ForbiddenOwner);
        }

        // Removed concurrently between the lookup and the delete.
        let deleted = self
            .offer_repo
            .delete_owned(offer_id, &account_id)
            .await?
            .ok_or(JobsError::NotFound)?;

        tracing::info!(offer_id = %offer_id, account_id = %account_id, "Offer deleted");

        Ok(deleted.title)
    }
}
