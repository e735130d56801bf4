//! Dataset status and generation handlers.

use std::path::Path;
use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use crate::dto::{FileStatus, StatusResponse};
use crate::error::AppError;
use crate::ServerState;

/// Reports whether the pipeline's preconditions hold: dataset presence
/// (with row counts) and credential configuration.
pub async fn status(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    Json(build_status(&state))
}

/// Generates the four synthetic datasets, then reports the fresh status.
pub async fn generate(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<StatusResponse>, AppError> {
    let dir = state.config.data_dir.clone();
    info!("Generating synthetic datasets in {}", dir.display());

    tokio::task::spawn_blocking(move || offer_datagen::generate_all(&dir))
        .await
        .map_err(|e| AppError::Internal(format!("Generation task failed: {e}")))?
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(build_status(&state)))
}

fn build_status(state: &ServerState) -> StatusResponse {
    let dir = &state.config.data_dir;
    let files = offer_data::DATASET_FILES
        .iter()
        .map(|&file| {
            let present = dir.join(file).exists();
            FileStatus {
                file: file.to_string(),
                present,
                rows: if present { row_count(dir, file) } else { None },
            }
        })
        .collect();

    StatusResponse {
        data_available: offer_data::data_available(dir),
        api_key_configured: state.config.has_api_key(),
        files,
    }
}

/// Row count via the typed loaders, so a malformed file reads as unreadable
/// (`None`) rather than a bogus count.
fn row_count(dir: &Path, file: &str) -> Option<usize> {
    match file {
        offer_data::MARKET_TRENDS_FILE => {
            offer_data::load_market_trends(dir).ok().map(|r| r.len())
        }
        offer_data::CUSTOMER_TRANSACTIONS_FILE => offer_data::load_customer_transactions(dir)
            .ok()
            .map(|r| r.len()),
        offer_data::CUSTOMER_FEEDBACK_FILE => {
            offer_data::load_customer_feedback(dir).ok().map(|r| r.len())
        }
        offer_data::COMPETITOR_INTEL_FILE => {
            offer_data::load_competitor_intel(dir).ok().map(|r| r.len())
        }
        _ => None,
    }
}
