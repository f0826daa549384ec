//! HTTP Handlers

use std::sync::Arc;

use accounts::application::config::AccountsConfig;
use accounts::domain::repository::ProfileRepository;
use accounts::presentation::flash::NoticeRedirect;
use accounts::Identity;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::{Form, Json};
use kernel::id::OfferId;
use kernel::notice::Notice;

use crate::application::{
    AdminListInput, AdminListOffersUseCase, CreateOfferUseCase, DeleteOfferUseCase,
    ListActiveOffersUseCase,
};
use crate::domain::repository::OfferStore;
use crate::error::{JobsError, JobsResult};
use crate::presentation::dto::{AdminOffersQuery, OfferRequest, OffersResponse};

/// Shared state for offer handlers
#[derive(Clone)]
pub struct JobsState<O, P>
where
    O: OfferStore,
    P: ProfileRepository + Clone + Send + Sync + 'static,
{
    pub offers: Arc<O>,
    pub profiles: Arc<P>,
    /// Redirect targets and the flash cookie
    pub config: Arc<AccountsConfig>,
}

impl<O, P> JobsState<O, P>
where
    O: OfferStore,
    P: ProfileRepository + Clone + Send + Sync + 'static,
{
    pub fn new(offers: O, profiles: Arc<P>, config: Arc<AccountsConfig>) -> Self {
        Self {
            offers: Arc::new(offers),
            profiles,
            config,
        }
    }

    fn redirect_to_board(&self, notice: Notice, headers: &HeaderMap) -> Response {
        NoticeRedirect::to(&self.config.paths.board)
            .with_notice(notice)
            .respond(&self.config.flash_cookie(), headers)
    }
}

// ============================================================================
// Board
// ============================================================================

/// GET /board/
pub async fn board<O, P>(State(state): State<JobsState<O, P>>) -> JobsResult<Json<OffersResponse>>
where
    O: OfferStore,
    P: ProfileRepository + Clone + Send + Sync + 'static,
{
    let offers = ListActiveOffersUseCase::new(state.offers.clone()).execute().await?;
    Ok(Json(OffersResponse { offers }))
}

/// POST /board/create/
pub async fn create_offer<O, P>(
    State(state): State<JobsState<O, P>>,
    identity: Identity,
    headers: HeaderMap,
    Form(req): Form<OfferRequest>,
) -> JobsResult<Response>
where
    O: OfferStore,
    P: ProfileRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateOfferUseCase::new(state.offers.clone(), state.profiles.clone());

    match use_case.execute(&identity, req.into()).await {
        Ok(offer) => Ok(state.redirect_to_board(
            Notice::success(format!("Offer '{}' published!", offer.title)),
            &headers,
        )),
        Err(e @ JobsError::ForbiddenRole) => {
            tracing::warn!(account_id = ?identity.account_id, "Non-company account tried to publish an offer");
            Ok(state.redirect_to_board(Notice::error(e.to_string()), &headers))
        }
        Err(e) => Err(e),
    }
}

/// POST /board/{offer_id}/delete/
pub async fn delete_offer<O, P>(
    State(state): State<JobsState<O, P>>,
    identity: Identity,
    Path(offer_id): Path<String>,
    headers: HeaderMap,
) -> JobsResult<Response>
where
    O: OfferStore,
    P: ProfileRepository + Clone + Send + Sync + 'static,
{
    let offer_id: OfferId = offer_id.parse().map_err(|_| JobsError::NotFound)?;
    let use_case = DeleteOfferUseCase::new(state.offers.clone());

    match use_case.execute(&identity, &offer_id).await {
        Ok(title) => Ok(state.redirect_to_board(
            Notice::success(format!("Offer '{title}' deleted!")),
            &headers,
        )),
        Err(e @ JobsError::ForbiddenOwner) => {
            Ok(state.redirect_to_board(Notice::error(e.to_string()), &headers))
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// Admin
// ============================================================================

/// GET /admin/offers/
pub async fn admin_offers<O, P>(
    State(state): State<JobsState<O, P>>,
    identity: Identity,
    Query(query): Query<AdminOffersQuery>,
) -> JobsResult<Json<OffersResponse>>
where
    O: OfferStore,
    P: ProfileRepository + Clone + Send + Sync + 'static,
{
    let input = AdminListInput {
        active: query.active_filter(),
        search: query.q,
    };
    let offers = AdminListOffersUseCase::new(state.offers.clone())
        .execute(&identity, input)
        .await?;
    Ok(Json(OffersResponse { offers }))
}
