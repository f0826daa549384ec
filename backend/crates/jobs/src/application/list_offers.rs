//! Offer listings

use std::sync::Arc;

use accounts::Identity;

use crate::domain::offer::Offer;
use crate::domain::repository::{OfferFilter, OfferRepository};
use crate::error::{JobsError, JobsResult};

/// Active offers for the board, newest first
pub struct ListActiveOffersUseCase<O>
where
    O: OfferRepository,
{
    offer_repo: Arc<O>,
}

impl<O> ListActiveOffersUseCase<O>
where
    O: OfferRepository,
{
    pub fn new(offer_repo: Arc<O>) -> Self {
        Self { offer_repo }
    }

    pub async fn execute(&self) -> JobsResult<Vec<Offer>> {
        self.offer_repo.list_active().await
    }
}

/// Admin criteria as submitted
#[derive(Debug, Clone, Default)]
pub struct AdminListInput {
    pub active: Option<bool>,
    pub search: Option<String>,
}

/// Staff listing regardless of `active`
///
/// Superusers see every offer; other staff only their own.
pub struct AdminListOffersUseCase<O>
where
    O: OfferRepository,
{
    offer_repo: Arc<O>,
}

impl<O> AdminListOffersUseCase<O>
where
    O: OfferRepository,
{
    pub fn new(offer_repo: Arc<O>) -> Self {
        Self { offer_repo }
    }

    pub async fn execute(&self, identity: &Identity, input: AdminListInput) -> JobsResult<Vec<Offer>> {
        let account_id = identity.require_account()?;
        if !identity.is_admin() {
            return Err(JobsError::AdminRequired);
        }

        let filter = OfferFilter {
            owner_id: (!identity.is_superuser).then_some(account_id),
            active: input.active,
            search: input
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };

        self.offer_repo.list_filtered(&filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::create_offer::CreateOfferUseCase;
    use crate::application::fixtures::{company, offer_form};
    use crate::application::form::OfferForm;
    use crate::infra::memory::InMemoryJobsRepository;
    use accounts::InMemoryAccountsRepository;
    use kernel::id::AccountId;

    struct Board {
        offers: Arc<InMemoryJobsRepository>,
        acme: Identity,
        globex: Identity,
    }

    /// acme: "Rust developer" (active), "Designer" (inactive); globex: "Rust trainer"
    async fn board() -> Board {
        let accounts = Arc::new(InMemoryAccountsRepository::new());
        let offers = Arc::new(InMemoryJobsRepository::new());
        let acme = company(&accounts, "acme").await;
        let globex = company(&accounts, "globex").await;
        let create = CreateOfferUseCase::new(offers.clone(), accounts.clone());

        create.execute(&acme, offer_form("Rust developer")).await.unwrap();
        create
            .execute(
                &acme,
                OfferForm {
                    active: Some("off".into()),
                    ..offer_form("Designer")
                },
            )
            .await
            .unwrap();
        create.execute(&globex, offer_form("Rust trainer")).await.unwrap();

        Board { offers, acme, globex }
    }

    fn titles(offers: Vec<Offer>) -> Vec<String> {
        let mut titles: Vec<_> = offers.into_iter().map(|o| o.title).collect();
        titles.sort();
        titles
    }

    #[tokio::test]
    async fn test_board_hides_inactive() {
        let board = board().await;
        let offers = ListActiveOffersUseCase::new(board.offers.clone())
            .execute()
            .await
            .unwrap();
        assert_eq!(titles(offers), ["Rust developer", "Rust trainer"]);
    }

    #[tokio::test]
    async fn test_superuser_sees_everything() {
        let board = board().await;
        let admin = Identity::authenticated(AccountId::new(), true, true);
        let offers = AdminListOffersUseCase::new(board.offers.clone())
            .execute(&admin, AdminListInput::default())
            .await
            .unwrap();
        assert_eq!(offers.len(), 3);
    }

    #[tokio::test]
    async fn test_staff_sees_own_offers() {
        let board = board().await;
        let staff = Identity::authenticated(board.acme.account_id.unwrap(), true, false);
        let use_case = AdminListOffersUseCase::new(board.offers.clone());

        let offers = use_case
            .execute(&staff, AdminListInput::default())
            .await
            .unwrap();
        assert_eq!(titles(offers), ["Designer", "Rust developer"]);

        let offers = use_case
            .execute(
                &staff,
                AdminListInput {
                    active: Some(false),
                    search: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(titles(offers), ["Designer"]);
    }

    #[tokio::test]
    async fn test_search_is_trimmed() {
        let board = board().await;
        let admin = Identity::authenticated(AccountId::new(), true, true);
        let use_case = AdminListOffersUseCase::new(board.offers.clone());

        let offers = use_case
            .execute(
                &admin,
                AdminListInput {
                    active: None,
                    search: Some("  rust ".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(titles(offers), ["Rust developer", "Rust trainer"]);

        let offers = use_case
            .execute(
                &admin,
                AdminListInput {
                    active: None,
                    search: Some("   ".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(offers.len(), 3);
    }

    #[tokio::test]
    async fn test_non_staff_refused() {
        let board = board().await;
        let use_case = AdminListOffersUseCase::new(board.offers.clone());

        let err = use_case
            .execute(&board.globex, AdminListInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, JobsError::AdminRequired));

        let err = use_case
            .execute(&Identity::anonymous(), AdminListInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, JobsError::Unauthenticated));
    }
}
