//! Create Offer Use Case
//!
//! Companies publish offers; every other caller is refused before the form
//! is looked at.

use std::sync::Arc;

use accounts::Identity;
use accounts::domain::repository::ProfileRepository;
use kernel::id::OfferId;

use crate::application::form::{OfferForm, validate_offer};
use crate::domain::offer::{NewOffer, Offer};
use crate::domain::repository::OfferRepository;
use crate::error::{JobsError, JobsResult};

pub struct CreateOfferUseCase<O, P>
where
    O: OfferRepository,
    P: ProfileRepository,
{
    offer_repo: Arc<O>,
    profile_repo: Arc<P>,
}

impl<O, P> CreateOfferUseCase<O, P>
where
    O: OfferRepository,
    P: ProfileRepository,
{
    pub fn new(offer_repo: Arc<O>, profile_repo: Arc<P>) -> Self {
        Self {
            offer_repo,
            profile_repo,
        }
    }

    pub async fn execute(&self, identity: &Identity, form: OfferForm) -> JobsResult<Offer> {
        let owner_id = identity.require_account()?;

        let is_company = self
            .profile_repo
            .find_by_account(&owner_id)
            .await?
            .is_some_and(|profile| profile.is_company());
        if !is_company {
            return Err(JobsError::ForbiddenRole);
        }

        let draft = validate_offer(&form)?;

        let offer = self
            .offer_repo
            .insert(NewOffer {
                offer_id: OfferId::new(),
                owner_id,
                title: draft.title,
                description: draft.description,
                salary: draft.salary,
                skills: draft.skills,
                active: draft.active,
            })
            .await?;

        tracing::info!(
            offer_id = %offer.offer_id,
            owner_id = %owner_id,
            "Offer published"
        );

        Ok(offer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fixtures::{applicant, company, offer_form};
    use crate::infra::memory::InMemoryJobsRepository;
    use accounts::InMemoryAccountsRepository;

    fn use_case(
        accounts: &Arc<InMemoryAccountsRepository>,
    ) -> (
        Arc<InMemoryJobsRepository>,
        CreateOfferUseCase<InMemoryJobsRepository, InMemoryAccountsRepository>,
    ) {
        let offers = Arc::new(InMemoryJobsRepository::new());
        let use_case = CreateOfferUseCase::new(offers.clone(), accounts.clone());
        (offers, use_case)
    }

    #[tokio::test]
    async fn test_company_publishes() {
        let accounts = Arc::new(InMemoryAccountsRepository::new());
        let identity = company(&accounts, "acme").await;
        let (offers, use_case) = use_case(&accounts);

        let offer = use_case.execute(&identity, offer_form("Dev")).await.unwrap();

        assert_eq!(Some(offer.owner_id), identity.account_id);
        assert_eq!(offer.skills, ["Python", "Django"]);
        assert!(offer.active);
        assert_eq!(offers.list_active().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_applicant_refused() {
        let accounts = Arc::new(InMemoryAccountsRepository::new());
        let identity = applicant(&accounts, "xavier").await;
        let (offers, use_case) = use_case(&accounts);

        let err = use_case.execute(&identity, offer_form("Dev")).await.unwrap_err();

        assert!(matches!(err, JobsError::ForbiddenRole));
        assert!(offers.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_role_checked_before_form() {
        let accounts = Arc::new(InMemoryAccountsRepository::new());
        let identity = applicant(&accounts, "xavier").await;
        let (_, use_case) = use_case(&accounts);

        let err = use_case
            .execute(&identity, OfferForm::default())
            .await
            .unwrap_err();

        assert!(matches!(err, JobsError::ForbiddenRole));
    }

    #[tokio::test]
    async fn test_missing_profile_refused() {
        let accounts = Arc::new(InMemoryAccountsRepository::new());
        let (_, use_case) = use_case(&accounts);
        let identity = Identity::authenticated(kernel::id::AccountId::new(), true, true);

        let err = use_case.execute(&identity, offer_form("Dev")).await.unwrap_err();

        assert!(matches!(err, JobsError::ForbiddenRole));
    }

    #[tokio::test]
    async fn test_anonymous_refused() {
        let accounts = Arc::new(InMemoryAccountsRepository::new());
        let (_, use_case) = use_case(&accounts);

        let err = use_case
            .execute(&Identity::anonymous(), offer_form("Dev"))
            .await
            .unwrap_err();

        assert!(matches!(err, JobsError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_invalid_form() {
        let accounts = Arc::new(InMemoryAccountsRepository::new());
        let identity = company(&accounts, "acme").await;
        let (offers, use_case) = use_case(&accounts);

        let err = use_case
            .execute(
                &identity,
                OfferForm {
                    salary: "lots".into(),
                    ..offer_form("Dev")
                },
            )
            .await
            .unwrap_err();

        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get("salary").unwrap(), ["Enter a number."]);
        assert!(offers.list_active().await.unwrap().is_empty());
    }
}
