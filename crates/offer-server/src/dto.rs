//! Request/response shapes for the HTTP API.

use serde::{Deserialize, Serialize};

use offer_core::StepRecord;

/// Request to run the pipeline.
#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub query: String,
    /// Session to save the run under; a fresh id is assigned when absent.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// A completed run, as persisted and as returned to the UI.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredSession {
    pub session_id: String,
    pub query: String,
    pub steps: Vec<StepRecord>,
}

/// Session identifiers, most recently updated first.
#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<String>,
}

/// Presence and size of one dataset file.
#[derive(Debug, Serialize)]
pub struct FileStatus {
    pub file: String,
    pub present: bool,
    pub rows: Option<usize>,
}

/// Whether the pipeline's preconditions hold.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub data_available: bool,
    pub api_key_configured: bool,
    pub files: Vec<FileStatus>,
}
