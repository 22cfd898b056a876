//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are rendered by
//! the survey crate through `kernel::error::AppError`.

mod settings;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use survey::domain::repository::{AnswerRepository, SessionRepository};
use survey::{
    CityBoundary, MemorySurveyRepository, PgSurveyRepository, SessionStore, SessionSweeper,
    load_city_boundary, survey_router_generic,
};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,survey=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    // A broken boundary file must stop the process before it binds
    let boundary = Arc::new(load_city_boundary(&settings.city_boundary_path).await?);

    match settings.database_url.clone() {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            serve(settings, PgSurveyRepository::new(pool), boundary).await
        }
        None => {
            tracing::warn!("DATABASE_URL not set, sessions and answers are kept in memory only");
            serve(settings, MemorySurveyRepository::new(), boundary).await
        }
    }
}

async fn serve<R>(settings: Settings, repo: R, boundary: Arc<CityBoundary>) -> anyhow::Result<()>
where
    R: SessionRepository + AnswerRepository + Clone + Send + Sync + 'static,
{
    let store = SessionStore::new(Arc::new(repo.clone()), Arc::new(settings.survey.clone()));

    // Startup cleanup: leftovers from a previous run
    // Errors here should not prevent server startup
    if let Err(e) = store.sweep_expired().await {
        tracing::warn!(error = %e, "Startup session sweep failed, continuing anyway");
    }

    let sweeper = SessionSweeper::spawn(store, settings.survey.sweep_interval);

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = settings
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]));

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .nest(
            "/api/survey",
            survey_router_generic(repo, settings.survey.clone(), boundary),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    sweeper.shutdown().await;
    served?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }

        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }

        tracing::info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
