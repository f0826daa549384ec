//! Identity Middleware
//!
//! `resolve_identity` turns the session cookie into an [`Identity`] request
//! extension; `guarded` puts a [`Guard`] in front of a group of routes.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::{ConnectInfo, FromRequestParts, OriginalUri, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::{self, Next};
use axum::response::Response;
use platform::client::{extract_client_ip, extract_fingerprint};
use platform::cookie::extract_cookie;

use crate::application::CheckSessionUseCase;
use crate::application::config::AccountsConfig;
use crate::application::guard::Guard;
use crate::domain::identity::Identity;
use crate::domain::repository::AccountsStore;
use crate::presentation::flash::NoticeRedirect;
use crate::presentation::handlers::AccountsState;

/// Resolve the caller's identity once per request
///
/// No cookie, a bad token, an expired session or a session opened from
/// another User-Agent all resolve to anonymous.
pub async fn resolve_identity<R>(
    State(state): State<AccountsState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: AccountsStore,
{
    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());
    let client_ip = extract_client_ip(req.headers(), direct_ip);
    let fingerprint = extract_fingerprint(req.headers(), client_ip).ok();
    let token = extract_cookie(req.headers(), &state.config.session_cookie_name);

    let identity = match fingerprint {
        Some(fingerprint) => {
            CheckSessionUseCase::new(state.repo.clone(), state.config.clone())
                .identity(token.as_deref(), &fingerprint.hash)
                .await
        }
        None => Identity::anonymous(),
    };

    req.extensions_mut().insert(identity);
    next.run(req).await
}

/// Layer `router` with `resolve_identity`
pub fn with_identity<R>(router: Router, state: AccountsState<R>) -> Router
where
    R: AccountsStore,
{
    router.layer(middleware::from_fn_with_state(state, resolve_identity::<R>))
}

/// Apply `guard` to every route currently in `router`
pub fn guarded<S>(router: Router<S>, guard: Guard, config: Arc<AccountsConfig>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
        let config = config.clone();
        async move { enforce(guard, &config, req, next).await }
    }))
}

async fn enforce(guard: Guard, config: &AccountsConfig, req: Request<Body>, next: Next) -> Response {
    let identity = req
        .extensions()
        .get::<Identity>()
        .copied()
        .unwrap_or_default();

    let target = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| &uri.0)
        .unwrap_or(req.uri())
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    match guard.check(&identity, &target, &config.paths) {
        Ok(()) => next.run(req).await,
        Err(redirect) => {
            tracing::debug!(?guard, target = %target, location = %redirect.location, "Guard rejected request");
            NoticeRedirect::from(redirect).respond(&config.flash_cookie(), req.headers())
        }
    }
}

// ============================================================================
// Extractors
// ============================================================================

/// Anonymous when `resolve_identity` did not run
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Identity>().copied().unwrap_or_default())
    }
}

/// Client address, honouring `X-Forwarded-For`
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientIp(pub Option<IpAddr>);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());
        Ok(ClientIp(extract_client_ip(&parts.headers, direct)))
    }
}
