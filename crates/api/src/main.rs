use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitedesk_api::config::ServerConfig;
use sitedesk_api::{mail, routes, state};
use sitedesk_db::repositories::SessionRepo;

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Configuration loaded");

    let pool = prepare_database().await;

    // Contact form delivery is optional; without SMTP settings the rest of
    // the API still runs.
    let mailer = mail::EmailConfig::from_env().map(|cfg| Arc::new(mail::ContactMailer::new(cfg)));
    if mailer.is_none() {
        tracing::warn!("SMTP not configured; contact form delivery is disabled");
    }

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer,
    };
    let app = build_app(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST is not a valid bind address"),
        config.port,
    );
    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Could not bind the listener");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server exited with an error");

    tracing::info!("Shutdown complete");
}

/// Tracing subscriber driven by `RUST_LOG`, defaulting to debug output for
/// this crate and tower-http.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitedesk_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify, migrate, and prune before accepting traffic. Any
/// failure aborts startup.
async fn prepare_database() -> PgPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL is required");

    let pool = sitedesk_db::create_pool(&database_url)
        .await
        .expect("Could not open a database pool");

    sitedesk_db::health_check(&pool)
        .await
        .expect("Database is unreachable");

    sitedesk_db::run_migrations(&pool)
        .await
        .expect("Migrations failed to apply");

    // Startup is the session table's only prune point.
    let pruned = SessionRepo::cleanup_expired(&pool)
        .await
        .expect("Session prune failed");
    tracing::info!(pruned, "Database ready; stale sessions pruned");

    pool
}

/// Route tree plus the shared middleware stack. Listed innermost first:
/// panic recovery, timeout, request-id propagation, tracing, request-id
/// stamping, CORS.
fn build_app(state: AppState, config: &ServerConfig) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// Resolves when the process receives SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Ctrl-C handler could not be installed");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler could not be installed")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

/// CORS policy from `CORS_ORIGINS`.
///
/// No configured origins leaves the API open to any origin without
/// credentials, the way the public site forms have always posted to it.
/// Explicit origins narrow it and turn credential support on. An invalid
/// configured origin panics at startup.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    if config.cors_origins.is_empty() {
        // Any-origin mode cannot also allow credentials.
        return base.allow_origin(Any);
    }

    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|o| {
            o.parse()
                .unwrap_or_else(|e| panic!("CORS origin {o:?} does not parse: {e}"))
        })
        .collect();

    base.allow_origin(origins).allow_credentials(true)
}
