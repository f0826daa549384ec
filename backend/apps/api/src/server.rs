//! HTTP server

use std::sync::Arc;

use accounts::domain::repository::{AccountsStore, AuthSessionRepository};
use accounts::presentation::{AccountsState, with_identity};
use accounts::{InMemoryAccountsRepository, PgAccountsRepository, accounts_router_generic};
use axum::Router;
use axum::http::{Method, header};
use jobs::domain::repository::OfferStore;
use jobs::{InMemoryJobsRepository, JobsState, PgJobsRepository, jobs_router_generic};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::cli::ServeArgs;
use crate::config::ServerConfig;

/// Connect and run pending migrations
pub(crate) async fn connect(config: &ServerConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(config.database_url()?)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    Ok(pool)
}

pub(crate) async fn run(args: ServeArgs, config: ServerConfig) -> anyhow::Result<()> {
    let addr = args.bind.unwrap_or(config.bind_addr);
    let cors = cors(&config);

    let app = if args.in_memory {
        tracing::warn!("Serving from memory; data is lost on shutdown");
        app(
            InMemoryAccountsRepository::new(),
            InMemoryJobsRepository::new(),
            config,
        )
    } else {
        let pool = connect(&config).await?;
        let accounts_repo = PgAccountsRepository::new(pool.clone());

        // Startup cleanup: errors here should not prevent server startup
        if let Err(e) = accounts_repo.cleanup_expired_sessions().await {
            tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
        }

        app(accounts_repo, PgJobsRepository::new(pool), config)
    };

    let app = app.layer(TraceLayer::new_for_http()).layer(cors);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Accounts and board routes behind identity resolution
fn app<R, O>(accounts_repo: R, offers: O, config: ServerConfig) -> Router
where
    R: AccountsStore,
    O: OfferStore,
{
    let accounts_state = AccountsState::new(accounts_repo, config.accounts);
    let jobs_state = JobsState::new(
        offers,
        accounts_state.repo.clone(),
        Arc::clone(&accounts_state.config),
    );

    let router = accounts_router_generic(accounts_state.clone()).merge(jobs_router_generic(jobs_state));
    with_identity(router, accounts_state)
}

fn cors(config: &ServerConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.frontend_origins.clone())
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
