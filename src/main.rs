//! CourseHub membership service binary.
//!
//! Wires configuration, the PostgreSQL adapters, and the Axum router
//! together and serves the membership API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use coursehub_memberships::adapters::http::membership::{membership_routes, MembershipAppState};
use coursehub_memberships::adapters::postgres::{
    PostgresCategoryCatalog, PostgresCourseCatalog, PostgresEnrollmentReader,
    PostgresMembershipRepository, PostgresStudentDirectory,
};
use coursehub_memberships::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let state = MembershipAppState {
        repository: Arc::new(PostgresMembershipRepository::new(pool.clone())),
        students: Arc::new(PostgresStudentDirectory::new(pool.clone())),
        categories: Arc::new(PostgresCategoryCatalog::new(pool.clone())),
        courses: Arc::new(PostgresCourseCatalog::new(pool.clone())),
        enrollments: Arc::new(PostgresEnrollmentReader::new(pool)),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/api/memberships", membership_routes())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config))
        .with_state(state);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "Membership service listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}
