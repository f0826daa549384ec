//! End-to-end board flow over the in-memory stores
//!
//! Company "acme" publishes and deletes; applicant "xavier" is refused both.

use accounts::presentation::{AccountsState, with_identity};
use accounts::{AccountsConfig, InMemoryAccountsRepository, accounts_router_generic};
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode, header};
use jobs::error::{FORBIDDEN_OWNER_MESSAGE, FORBIDDEN_ROLE_MESSAGE};
use jobs::{InMemoryJobsRepository, JobsState, jobs_router_generic};
use kernel::notice::{Notice, NoticeLevel};
use platform::flash::{self, MAX_TOKEN_BYTES};
use serde_json::Value;
use tower::ServiceExt;

const USER_AGENT: &str = "board-flow-test/1.0";
const PASSWORD: &str = "Blue-Harbor-Lantern-19";

fn app() -> Router {
    let accounts_state =
        AccountsState::new(InMemoryAccountsRepository::new(), AccountsConfig::development());
    let jobs_state = JobsState::new(
        InMemoryJobsRepository::new(),
        accounts_state.repo.clone(),
        accounts_state.config.clone(),
    );

    let router = accounts_router_generic(accounts_state.clone()).merge(jobs_router_generic(jobs_state));
    with_identity(router, accounts_state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    session: Option<&str>,
    form: Option<&str>,
) -> Response<Body> {
    send_with_flash(app, method, uri, session, None, form).await
}

/// `flash` is the pending `notices` cookie carried over from a previous response.
async fn send_with_flash(
    app: &Router,
    method: Method,
    uri: &str,
    session: Option<&str>,
    flash: Option<&str>,
    form: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::USER_AGENT, USER_AGENT);
    let cookies: Vec<String> = session
        .map(|token| format!("sessionid={token}"))
        .into_iter()
        .chain(flash.map(|token| format!("notices={token}")))
        .collect();
    if !cookies.is_empty() {
        builder = builder.header(header::COOKIE, cookies.join("; "));
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

fn set_cookie(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let rest = cookie.strip_prefix(&prefix)?;
            rest.split(';').next().map(str::to_string)
        })
}

fn notices(response: &Response<Body>) -> Vec<Notice> {
    set_cookie(response, "notices")
        .map(|token| flash::decode(&token))
        .unwrap_or_default()
}

fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register_company(app: &Router) -> String {
    let form = format!(
        "username=acme&password1={PASSWORD}&password2={PASSWORD}&email=jobs%40acme.example\
         &last_name=Acme&role=company&address=1+rue+de+la+Paix&siret=12345678901234"
    );
    let response = send(app, Method::POST, "/register/", None, Some(&form)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/board/");
    set_cookie(&response, "sessionid").unwrap()
}

async fn register_applicant(app: &Router) -> String {
    let form = format!(
        "username=xavier&password1={PASSWORD}&password2={PASSWORD}&email=x%40example.com\
         &first_name=Xavier&last_name=Martin&role=applicant&address=2+rue+Oberkampf"
    );
    let response = send(app, Method::POST, "/register/", None, Some(&form)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        notices(&response),
        [Notice::success("Welcome Xavier! Your account has been created.")]
    );
    set_cookie(&response, "sessionid").unwrap()
}

async fn board(app: &Router, session: &str) -> Vec<Value> {
    let response = send(app, Method::GET, "/board/", Some(session), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    json(response).await["offers"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_company_publishes_and_deletes() {
    let app = app();
    let acme = register_company(&app).await;

    let form = "title=Dev&description=Build+things&salary=50000&skills_input=Python%2C+Django";
    let response = send(&app, Method::POST, "/board/create/", Some(&acme), Some(form)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/board/");
    assert_eq!(notices(&response), [Notice::success("Offer 'Dev' published!")]);

    let offers = board(&app, &acme).await;
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0]["title"], "Dev");
    assert_eq!(offers[0]["skills"], serde_json::json!(["Python", "Django"]));
    assert_eq!(offers[0]["active"], true);

    let offer_id = offers[0]["offer_id"].as_str().unwrap().to_string();
    let uri = format!("/board/{offer_id}/delete/");
    let response = send(&app, Method::POST, &uri, Some(&acme), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(notices(&response), [Notice::success("Offer 'Dev' deleted!")]);
    assert!(board(&app, &acme).await.is_empty());

    let response = send(&app, Method::POST, &uri, Some(&acme), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_applicant_cannot_publish_or_delete() {
    let app = app();
    let acme = register_company(&app).await;
    let xavier = register_applicant(&app).await;

    let form = "title=Dev&description=Build+things";
    let response = send(&app, Method::POST, "/board/create/", Some(&xavier), Some(form)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/board/");
    assert_eq!(notices(&response), [Notice::error(FORBIDDEN_ROLE_MESSAGE)]);
    assert!(board(&app, &xavier).await.is_empty());

    send(&app, Method::POST, "/board/create/", Some(&acme), Some(form)).await;
    let offers = board(&app, &xavier).await;
    let offer_id = offers[0]["offer_id"].as_str().unwrap();

    let uri = format!("/board/{offer_id}/delete/");
    let response = send(&app, Method::POST, &uri, Some(&xavier), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let notices = notices(&response);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].text, FORBIDDEN_OWNER_MESSAGE);
    assert_eq!(board(&app, &acme).await.len(), 1);
}

#[tokio::test]
async fn test_invalid_offer_is_unprocessable() {
    let app = app();
    let acme = register_company(&app).await;

    let form = "title=&description=Build+things&salary=-5";
    let response = send(&app, Method::POST, "/board/create/", Some(&acme), Some(form)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json(response).await;
    assert_eq!(body["fields"]["title"][0], "This field is required.");
    assert!(body["fields"]["salary"].is_array());
    assert!(board(&app, &acme).await.is_empty());
}

#[tokio::test]
async fn test_anonymous_redirected_to_login() {
    let app = app();

    let response = send(&app, Method::POST, "/board/create/", None, Some("title=Dev")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login/?next="));

    let response = send(&app, Method::GET, "/board/", None, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_malformed_offer_id_not_found() {
    let app = app();
    let acme = register_company(&app).await;

    let response = send(&app, Method::POST, "/board/not-a-uuid/delete/", Some(&acme), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_listing_requires_staff() {
    let app = app();
    let acme = register_company(&app).await;

    let response = send(&app, Method::GET, "/admin/offers/", Some(&acme), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_unread_notices_stay_within_cookie_size() {
    let app = app();
    let acme = register_company(&app).await;
    let title = "%C3%A9".repeat(255);

    let mut pending: Option<String> = None;
    for i in 0..16 {
        let form = format!("title={title}&description=Offer+{i}");
        let response = send_with_flash(
            &app,
            Method::POST,
            "/board/create/",
            Some(&acme),
            pending.as_deref(),
            Some(&form),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let token = set_cookie(&response, "notices").unwrap();
        assert!(token.len() <= MAX_TOKEN_BYTES, "offer {i}: {}", token.len());
        pending = Some(token);
    }

    let notices = flash::decode(pending.as_deref().unwrap());
    let expected = format!("Offer '{}' published!", "é".repeat(255));
    assert_eq!(notices.last(), Some(&Notice::success(expected)));
    assert_eq!(board(&app, &acme).await.len(), 16);
}
