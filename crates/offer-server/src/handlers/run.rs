//! Pipeline execution handler.

use std::sync::Arc;

use axum::{extract::State, Json};
use uuid::Uuid;

use offer_core::AgentError;
use offer_pipeline::{extract, run_pipeline};

use crate::db;
use crate::dto::{RunRequest, StoredSession};
use crate::error::AppError;
use crate::handlers::LogObserver;
use crate::ServerState;

/// Runs the four-stage pipeline for a query and persists the result.
pub async fn run(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<RunRequest>,
) -> Result<Json<StoredSession>, AppError> {
    let query = req.query.trim().to_string();
    if query.is_empty() {
        return Err(AppError::BadRequest("Query must not be empty".into()));
    }

    let session_id = req
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let session = run_and_save(&state, &session_id, &query).await?;
    Ok(Json(session))
}

/// Shared run path for fresh runs and re-runs of a stored query.
pub async fn run_and_save(
    state: &ServerState,
    session_id: &str,
    query: &str,
) -> Result<StoredSession, AppError> {
    let backend = state
        .backend
        .as_deref()
        .ok_or(AgentError::MissingApiKey)?;

    let scope = extract(query);
    let steps = run_pipeline(
        backend,
        &state.config.data_dir,
        query,
        Some(&scope),
        Some(&LogObserver),
    )
    .await?;

    {
        let conn = state.db_lock()?;
        db::save_session(&conn, session_id, query, &steps)
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }

    Ok(StoredSession {
        session_id: session_id.to_string(),
        query: query.to_string(),
        steps,
    })
}
