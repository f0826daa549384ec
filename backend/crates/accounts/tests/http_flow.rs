//! Sign-in, sign-out, profile and notice endpoints over the in-memory store

use accounts::application::guard::{ALREADY_LOGGED_IN_MESSAGE, LOGIN_REQUIRED_MESSAGE};
use accounts::error::INVALID_CREDENTIALS_MESSAGE;
use accounts::presentation::handlers::LOGOUT_MESSAGE;
use accounts::presentation::{AccountsState, with_identity};
use accounts::{AccountsConfig, InMemoryAccountsRepository, accounts_router_generic};
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode, header};
use kernel::notice::{Notice, NoticeLevel};
use platform::flash;
use serde_json::{Value, json};
use tower::ServiceExt;

const USER_AGENT: &str = "accounts-flow-test/1.0";
const PASSWORD: &str = "Blue-Harbor-Lantern-19";

fn app() -> Router {
    let state = AccountsState::new(InMemoryAccountsRepository::new(), AccountsConfig::development());
    with_identity(accounts_router_generic(state.clone()), state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    form: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::USER_AGENT, USER_AGENT);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match form {
        Some(form) => {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };

    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Full `Set-Cookie` line for `name`
fn set_cookie_line(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|cookie| cookie.starts_with(&prefix))
        .map(str::to_string)
}

fn set_cookie(response: &Response<Body>, name: &str) -> Option<String> {
    let line = set_cookie_line(response, name)?;
    let value = line.strip_prefix(&format!("{name}="))?;
    value.split(';').next().map(str::to_string)
}

fn notices(response: &Response<Body>) -> Vec<Notice> {
    set_cookie(response, "notices")
        .map(|token| flash::decode(&token))
        .unwrap_or_default()
}

fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn session(token: &str) -> String {
    format!("sessionid={token}")
}

async fn register_company(app: &Router) -> String {
    let form = format!(
        "username=acme&password1={PASSWORD}&password2={PASSWORD}&email=jobs%40acme.example\
         &last_name=Acme&role=company&address=1+rue+de+la+Paix&siret=12345678901234"
    );
    let response = send(app, Method::POST, "/register/", None, Some(&form)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    set_cookie(&response, "sessionid").unwrap()
}

async fn login(app: &Router, uri: &str, next: Option<&str>) -> Response<Body> {
    let mut form = format!("username=acme&password={PASSWORD}");
    if let Some(next) = next {
        form.push_str(&format!("&next={next}"));
    }
    send(app, Method::POST, uri, None, Some(&form)).await
}

#[tokio::test]
async fn test_login_next_from_form_wins_over_query() {
    let app = app();
    register_company(&app).await;

    let response = login(&app, "/login/?next=%2Fboard%2F", Some("%2Fprofile%2F%3Ftab%3Dcv")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/profile/?tab=cv");
    assert!(set_cookie(&response, "sessionid").is_some_and(|token| !token.is_empty()));
    assert_eq!(notices(&response)[0].level, NoticeLevel::Success);
}

#[tokio::test]
async fn test_login_next_falls_back_to_query() {
    let app = app();
    register_company(&app).await;

    let response = login(&app, "/login/?next=%2Fprofile%2F", Some("")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/profile/");

    let response = login(&app, "/login/?next=%2Fprofile%2F", None).await;
    assert_eq!(location(&response), "/profile/");
}

#[tokio::test]
async fn test_login_unsafe_next_goes_to_board() {
    let app = app();
    register_company(&app).await;

    let response = login(&app, "/login/", Some("https%3A%2F%2Fevil.example%2F")).await;
    assert_eq!(location(&response), "/board/");

    let response = login(&app, "/login/?next=%2F%2Fevil.example%2F", None).await;
    assert_eq!(location(&response), "/board/");
}

#[tokio::test]
async fn test_login_bad_credentials() {
    let app = app();
    register_company(&app).await;

    let form = "username=acme&password=not-the-password";
    let response = send(&app, Method::POST, "/login/", None, Some(form)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response, "sessionid").is_none());

    let body = json_body(response).await;
    assert_eq!(
        body["notices"],
        json!([{ "level": "error", "text": INVALID_CREDENTIALS_MESSAGE }])
    );

    // Unknown usernames get the same answer.
    let form = format!("username=nobody&password={PASSWORD}");
    let response = send(&app, Method::POST, "/login/", None, Some(&form)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signed_in_users_are_sent_away_from_register_and_login() {
    let app = app();
    let acme = session(&register_company(&app).await);

    for uri in ["/register/", "/login/"] {
        let response = send(&app, Method::GET, uri, Some(&acme), None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/board/");
        assert_eq!(notices(&response), [Notice::info(ALREADY_LOGGED_IN_MESSAGE)]);
    }

    let form = format!("username=acme&password={PASSWORD}");
    let response = send(&app, Method::POST, "/login/", Some(&acme), Some(&form)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/board/");
    assert!(set_cookie(&response, "sessionid").is_none());
}

#[tokio::test]
async fn test_logout_clears_session_cookie() {
    let app = app();
    let acme = session(&register_company(&app).await);

    let response = send(&app, Method::POST, "/logout/", Some(&acme), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(notices(&response), [Notice::success(LOGOUT_MESSAGE)]);

    let cleared = set_cookie_line(&response, "sessionid").unwrap();
    assert!(cleared.starts_with("sessionid=;"));
    assert!(cleared.contains("Max-Age=0"));

    // The old token no longer signs anyone in.
    let response = send(&app, Method::GET, "/profile/", Some(&acme), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login/?next=%2Fprofile%2F");
    assert_eq!(notices(&response), [Notice::warning(LOGIN_REQUIRED_MESSAGE)]);
}

#[tokio::test]
async fn test_company_profile_requires_siret() {
    let app = app();
    let acme = session(&register_company(&app).await);

    let form = "email=jobs%40acme.example&last_name=Acme&address=1+rue+de+la+Paix&siret=";
    let response = send(&app, Method::POST, "/profile/", Some(&acme), Some(form)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    assert_eq!(body["fields"]["siret"], json!(["This field is required."]));
    assert_eq!(
        body["notices"],
        json!([{ "level": "error", "text": "siret: This field is required." }])
    );

    let response = send(&app, Method::GET, "/profile/", Some(&acme), None).await;
    let body = json_body(response).await;
    assert_eq!(body["profile"]["siret"], "12345678901234");
}

#[tokio::test]
async fn test_notices_endpoint_drains_cookie() {
    let app = app();
    let acme = session(&register_company(&app).await);

    let response = send(&app, Method::POST, "/logout/", Some(&acme), None).await;
    let pending = set_cookie(&response, "notices").unwrap();

    let cookie = format!("notices={pending}");
    let response = send(&app, Method::GET, "/notices/", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cleared = set_cookie_line(&response, "notices").unwrap();
    assert!(cleared.starts_with("notices=;"));
    assert!(cleared.contains("Max-Age=0"));

    let body = json_body(response).await;
    assert_eq!(
        body["notices"],
        json!([{ "level": "success", "text": LOGOUT_MESSAGE }])
    );

    let response = send(&app, Method::GET, "/notices/", None, None).await;
    assert_eq!(json_body(response).await["notices"], json!([]));
}
