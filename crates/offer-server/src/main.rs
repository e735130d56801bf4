mod db;
mod dto;
mod error;
mod handlers;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use offer_config::AppConfig;
use offer_core::{AgentError, LlmBackend};
use offer_llm::backend_from_config;

use crate::error::AppError;

const SESSIONS_DB: &str = "data/sessions.db";

pub struct ServerState {
    pub config: AppConfig,
    /// Absent when no credential is configured; runs then fail with a
    /// configuration error while status and session routes keep working.
    pub backend: Option<Box<dyn LlmBackend>>,
    pub db: Mutex<rusqlite::Connection>,
}

impl ServerState {
    pub fn db_lock(&self) -> Result<MutexGuard<'_, rusqlite::Connection>, AppError> {
        self.db
            .lock()
            .map_err(|e| AppError::Internal(format!("Database lock poisoned: {e}")))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .compact()
        .init();

    let state = Arc::new(init_server_state()?);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/runs", post(handlers::run::run))
        .route("/sessions", get(handlers::sessions::list))
        .route("/sessions/{id}", get(handlers::sessions::get))
        .route("/sessions/{id}/rerun", post(handlers::sessions::rerun))
        .route("/data/status", get(handlers::data::status))
        .route("/data/generate", post(handlers::data::generate))
        .layer(trace_layer);

    let app = Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state);

    let addr = "0.0.0.0:8000";
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_server_state() -> Result<ServerState> {
    let config = AppConfig::from_env();

    let backend = match backend_from_config(&config) {
        Ok(b) => Some(b),
        Err(AgentError::MissingApiKey) => {
            warn!("GEMINI_API_KEY not set; pipeline runs will be rejected until it is");
            None
        }
        Err(e) => return Err(e.into()),
    };

    if !offer_data::data_available(&config.data_dir) {
        warn!(
            "Datasets missing in {}; POST /data/generate to create them",
            config.data_dir.display()
        );
    }

    let conn = db::init_db(SESSIONS_DB)?;
    let sessions = db::list_sessions(&conn);
    info!("Loaded {} saved sessions", sessions.len());

    Ok(ServerState {
        config,
        backend,
        db: Mutex::new(conn),
    })
}
