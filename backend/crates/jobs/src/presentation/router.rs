//! Jobs Router

use accounts::domain::repository::ProfileRepository;
use accounts::{Guard, PgAccountsRepository};
use accounts::presentation::middleware::guarded;
use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::OfferStore;
use crate::infra::postgres::PgJobsRepository;
use crate::presentation::handlers::{self, JobsState};

/// Create the jobs router with the PostgreSQL repositories
pub fn jobs_router(state: JobsState<PgJobsRepository, PgAccountsRepository>) -> Router {
    jobs_router_generic(state)
}

/// Create a jobs router for any stores
///
/// Expects `accounts::presentation::resolve_identity` around the final app.
pub fn jobs_router_generic<O, P>(state: JobsState<O, P>) -> Router
where
    O: OfferStore,
    P: ProfileRepository + Clone + Send + Sync + 'static,
{
    let config = state.config.clone();

    let members = Router::new()
        .route("/board/", get(handlers::board::<O, P>))
        .route("/board/create/", post(handlers::create_offer::<O, P>))
        .route(
            "/board/{offer_id}/delete/",
            post(handlers::delete_offer::<O, P>),
        );

    let admin = Router::new().route("/admin/offers/", get(handlers::admin_offers::<O, P>));

    guarded(members, Guard::RequireAuthenticated, config.clone())
        .merge(guarded(admin, Guard::RequireAdmin, config))
        .with_state(state)
}
