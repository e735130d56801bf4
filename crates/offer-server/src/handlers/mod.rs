//! HTTP route handlers for the offer pipeline server.

pub mod data;
pub mod run;
pub mod sessions;

use offer_core::StageObserver;
use tracing::info;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Stage observer that logs progress instead of driving a UI.
pub struct LogObserver;

impl StageObserver for LogObserver {
    fn on_stage_start(&self, agent: &str, status: &str) {
        info!("[{}] {}", agent, status);
    }
}
