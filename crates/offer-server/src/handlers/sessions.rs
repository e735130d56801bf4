//! Session retrieval and re-run handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::db;
use crate::dto::{SessionListResponse, StoredSession};
use crate::error::AppError;
use crate::handlers::run::run_and_save;
use crate::ServerState;

/// Lists stored session ids, most recently updated first.
pub async fn list(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<SessionListResponse>, AppError> {
    let conn = state.db_lock()?;
    Ok(Json(SessionListResponse {
        sessions: db::list_sessions(&conn),
    }))
}

/// Returns one stored session with its full step records.
pub async fn get(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<StoredSession>, AppError> {
    let conn = state.db_lock()?;
    let session = db::load_session(&conn, &id)
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("Session not found: {id}")))?;
    Ok(Json(session))
}

/// Re-runs the stored query of a session and overwrites its steps.
pub async fn rerun(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<StoredSession>, AppError> {
    let query = {
        let conn = state.db_lock()?;
        db::load_session(&conn, &id)
            .map_err(|e| AppError::Internal(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("Session not found: {id}")))?
            .query
    };

    let session = run_and_save(&state, &id, &query).await?;
    Ok(Json(session))
}
