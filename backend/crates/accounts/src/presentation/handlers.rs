//! HTTP Handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use kernel::notice::Notice;
use platform::client::extract_fingerprint;
use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};

use crate::application::config::AccountsConfig;
use crate::application::guard::is_safe_redirect;
use crate::application::{
    RegisterUseCase, ShowProfileUseCase, SignInInput, SignInUseCase, SignOutUseCase,
    UpdateProfileUseCase,
};
use crate::domain::identity::Identity;
use crate::domain::repository::AccountsStore;
use crate::error::AccountsResult;
use crate::presentation::dto::{
    HomeResponse, LoginPageResponse, LoginRequest, NextQuery, NoticesResponse, ProfileRequest,
    ProfileResponse, RegisterPageResponse, RegisterRequest,
};
use crate::presentation::flash::{NoticeRedirect, clear_notices, pending_notices};
use crate::presentation::middleware::ClientIp;

pub const PROFILE_PATH: &str = "/profile/";

pub const LOGOUT_MESSAGE: &str = "You have been logged out.";
pub const PROFILE_UPDATED_MESSAGE: &str = "Your profile has been updated.";

/// Shared state for accounts handlers
#[derive(Clone)]
pub struct AccountsState<R>
where
    R: AccountsStore,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountsConfig>,
}

impl<R> AccountsState<R>
where
    R: AccountsStore,
{
    pub fn new(repo: R, config: AccountsConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Home
// ============================================================================

/// GET /
pub async fn home<R>(
    State(state): State<AccountsState<R>>,
    identity: Identity,
) -> AccountsResult<Json<HomeResponse>>
where
    R: AccountsStore,
{
    let account = match identity.account_id {
        Some(account_id) => state.repo.find_by_id(&account_id).await?,
        None => None,
    };

    Ok(Json(HomeResponse {
        authenticated: account.is_some(),
        username: account.map(|a| a.username.original().to_string()),
    }))
}

// ============================================================================
// Register
// ============================================================================

/// GET /register/
pub async fn register_page() -> Json<RegisterPageResponse> {
    Json(RegisterPageResponse {
        roles: vec!["applicant", "company"],
    })
}

/// POST /register/
pub async fn register<R>(
    State(state): State<AccountsState<R>>,
    ClientIp(client_ip): ClientIp,
    headers: HeaderMap,
    Form(req): Form<RegisterRequest>,
) -> AccountsResult<Response>
where
    R: AccountsStore,
{
    let fingerprint = extract_fingerprint(&headers, client_ip)?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let output = use_case.execute(req.into(), &fingerprint).await?;

    let welcome = format!(
        "Welcome {}! Your account has been created.",
        output.account.display_name()
    );

    Ok(NoticeRedirect::to(&state.config.paths.board)
        .with_notice(Notice::success(welcome))
        .with_cookie(set_cookie_header(
            &state.config.session_cookie(),
            &output.session_token,
        ))
        .respond(&state.config.flash_cookie(), &headers))
}

// ============================================================================
// Login / Logout
// ============================================================================

/// GET /login/
pub async fn login_page(Query(query): Query<NextQuery>) -> Json<LoginPageResponse> {
    Json(LoginPageResponse {
        next: query.next.filter(|next| is_safe_redirect(next)),
    })
}

/// POST /login/
pub async fn login<R>(
    State(state): State<AccountsState<R>>,
    ClientIp(client_ip): ClientIp,
    Query(query): Query<NextQuery>,
    headers: HeaderMap,
    Form(req): Form<LoginRequest>,
) -> AccountsResult<Response>
where
    R: AccountsStore,
{
    let fingerprint = extract_fingerprint(&headers, client_ip)?;

    let next = req
        .next
        .filter(|next| !next.is_empty())
        .or(query.next)
        .filter(|next| is_safe_redirect(next))
        .unwrap_or_else(|| state.config.paths.board.clone());

    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let input = SignInInput {
        username: req.username,
        password: req.password,
    };
    let output = use_case.execute(input, &fingerprint).await?;

    Ok(NoticeRedirect::to(next)
        .with_notice(Notice::success(format!(
            "Welcome {}!",
            output.account.display_name()
        )))
        .with_cookie(set_cookie_header(
            &state.config.session_cookie(),
            &output.session_token,
        ))
        .respond(&state.config.flash_cookie(), &headers))
}

/// POST /logout/
pub async fn logout<R>(State(state): State<AccountsState<R>>, headers: HeaderMap) -> Response
where
    R: AccountsStore,
{
    if let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // The cookie is cleared either way.
        if let Err(e) = use_case.execute(&token).await {
            tracing::debug!(error = %e, "Sign out without a live session");
        }
    }

    NoticeRedirect::to(&state.config.paths.home)
        .with_notice(Notice::success(LOGOUT_MESSAGE))
        .with_cookie(delete_cookie_header(&state.config.session_cookie()))
        .respond(&state.config.flash_cookie(), &headers)
}

// ============================================================================
// Profile
// ============================================================================

/// GET /profile/
pub async fn profile<R>(
    State(state): State<AccountsState<R>>,
    identity: Identity,
) -> AccountsResult<Json<ProfileResponse>>
where
    R: AccountsStore,
{
    let use_case = ShowProfileUseCase::new(state.repo.clone(), state.repo.clone());
    let view = use_case.execute(&identity).await?;
    Ok(Json(view.into()))
}

/// POST /profile/
pub async fn update_profile<R>(
    State(state): State<AccountsState<R>>,
    identity: Identity,
    headers: HeaderMap,
    Form(req): Form<ProfileRequest>,
) -> AccountsResult<Response>
where
    R: AccountsStore,
{
    let use_case = UpdateProfileUseCase::new(state.repo.clone(), state.repo.clone());
    use_case.execute(&identity, req.into()).await?;

    Ok(NoticeRedirect::to(PROFILE_PATH)
        .with_notice(Notice::success(PROFILE_UPDATED_MESSAGE))
        .respond(&state.config.flash_cookie(), &headers))
}

// ============================================================================
// Notices
// ============================================================================

/// GET /notices/
///
/// Returns the queued notices and clears them.
pub async fn notices<R>(State(state): State<AccountsState<R>>, headers: HeaderMap) -> impl IntoResponse
where
    R: AccountsStore,
{
    let flash_cookie = state.config.flash_cookie();
    let notices = pending_notices(&headers, &flash_cookie);

    (
        [(header::SET_COOKIE, clear_notices(&flash_cookie))],
        Json(NoticesResponse { notices }),
    )
}
