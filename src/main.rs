//! Case Sherpa server binary.
//!
//! Loads configuration, wires the adapters into the application handlers,
//! and serves the intake API over HTTP.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, routing::get, Json, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use case_sherpa::adapters::ai::{OpenAIConfig, OpenAIProvider};
use case_sherpa::adapters::http::{intake_routes, IntakeHandlers};
use case_sherpa::adapters::storage::PostgresSessionStore;
use case_sherpa::application::handlers::intake::{
    GetIntakeStatusHandler, StartIntakeHandler, SubmitAnswersHandler,
};
use case_sherpa::application::SessionLocks;
use case_sherpa::config::AppConfig;
use case_sherpa::domain::intake::IntakeOrchestrator;
use case_sherpa::ports::{SessionStore, TextGenerator};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("database migrations applied");
    }

    let api_key = config
        .ai
        .api_key
        .clone()
        .unwrap_or_default();
    let generator: Arc<dyn TextGenerator> = Arc::new(OpenAIProvider::new(
        OpenAIConfig::new(api_key)
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout())
            .with_max_retries(config.ai.max_retries),
    ));
    info!(
        model = %config.ai.model,
        base_url = %config.ai.base_url,
        "text generator configured"
    );

    let store: Arc<dyn SessionStore> = Arc::new(PostgresSessionStore::new(pool));
    let orchestrator = Arc::new(IntakeOrchestrator::new(
        Arc::clone(&generator),
        config.intake.max_rounds,
        config.ai.temperature,
    ));
    let locks = Arc::new(SessionLocks::new());

    let handlers = IntakeHandlers::new(
        Arc::new(StartIntakeHandler::new(
            Arc::clone(&store),
            Arc::clone(&orchestrator),
        )),
        Arc::new(SubmitAnswersHandler::new(
            Arc::clone(&store),
            Arc::clone(&orchestrator),
            locks,
        )),
        Arc::new(GetIntakeStatusHandler::new(store)),
    );

    let cors = {
        let origins = config.server.cors_origins_list();
        if origins.is_empty() {
            CorsLayer::permissive()
        } else {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .map(|o| o.parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any)
        }
    };

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/intake", intake_routes(handlers))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    info!(%addr, "case-sherpa listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
