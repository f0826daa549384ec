//! Accounts Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::guard::Guard;
use crate::domain::repository::AccountsStore;
use crate::infra::postgres::PgAccountsRepository;
use crate::presentation::handlers::{self, AccountsState};
use crate::presentation::middleware::guarded;

/// Create the accounts router with the PostgreSQL repository
pub fn accounts_router(state: AccountsState<PgAccountsRepository>) -> Router {
    accounts_router_generic(state)
}

/// Create an accounts router for any store
///
/// Expects `resolve_identity` to be layered around the final app.
pub fn accounts_router_generic<R>(state: AccountsState<R>) -> Router
where
    R: AccountsStore,
{
    let config = state.config.clone();

    let public = Router::new()
        .route("/", get(handlers::home::<R>))
        .route("/notices/", get(handlers::notices::<R>));

    let anonymous_only = Router::new()
        .route(
            "/register/",
            get(handlers::register_page).post(handlers::register::<R>),
        )
        .route(
            "/login/",
            get(handlers::login_page).post(handlers::login::<R>),
        );

    let members = Router::new()
        .route("/logout/", post(handlers::logout::<R>))
        .route(
            handlers::PROFILE_PATH,
            get(handlers::profile::<R>).post(handlers::update_profile::<R>),
        );

    public
        .merge(guarded(anonymous_only, Guard::RequireAnonymous, config.clone()))
        .merge(guarded(members, Guard::RequireAuthenticated, config))
        .with_state(state)
}
