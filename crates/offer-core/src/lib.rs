//! Core domain types, error definitions, and boundary traits.
//!
//! This crate defines the fundamental types shared across the offer pipeline:
//! errors, the LLM call boundary, the per-stage trace record, and the
//! best-effort stage notification hook.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while running the offer pipeline.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("GEMINI_API_KEY not set. Add it to .env or the environment.")]
    MissingApiKey,

    #[error("Data not found: {path}. Run the data generator first.")]
    DataNotFound { path: String },

    #[error("Failed to load dataset {path}: {message}")]
    DataLoad { path: String, message: String },

    #[error("LLM request failed: {0}")]
    Llm(String),
}

impl AgentError {
    /// Creates a data-load error with path context.
    pub fn data_load(path: impl Into<String>, message: impl ToString) -> Self {
        Self::DataLoad {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Exact stage names, used as keys/labels across the UI and persistence
/// boundaries.
pub mod stages {
    pub const MARKET_RESEARCH: &str = "Market Trends & Deep Research";
    pub const CUSTOMER_INSIGHTS: &str = "Customer Insights";
    pub const COMPETITOR_INTEL: &str = "Competitor Intelligence";
    pub const OFFER_DESIGN: &str = "Offer Design";

    /// All four stages in pipeline order.
    pub const ALL: [&str; 4] = [
        MARKET_RESEARCH,
        CUSTOMER_INSIGHTS,
        COMPETITOR_INTEL,
        OFFER_DESIGN,
    ];
}

/// What one agent invocation actually produced and sent.
///
/// `system_prompt` and `user_content` are the exact strings that reached the
/// model, so the UI and tests can audit every call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReply {
    pub output: String,
    pub system_prompt: String,
    pub user_content: String,
}

/// A display-safe row of a dataset: column name to rendered cell text.
pub type DisplayRow = BTreeMap<String, String>;

/// The orchestrator's trace entry for one pipeline stage.
///
/// A successful run yields exactly four of these, in fixed stage order. The
/// full list plus the original query is the payload the session store
/// persists, so every field must survive a serde round-trip unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// Stage name, one of [`stages::ALL`].
    pub agent: String,
    /// The user's original query, without the scope annotation.
    pub user_query: String,
    /// Up to 5 rows of the backing dataset(s), rendered as strings.
    pub input_data_sample: Vec<DisplayRow>,
    /// Bounded preview of what was sent to the model.
    pub input_summary: String,
    pub system_prompt: String,
    pub user_content: String,
    /// Raw model output, unmodified.
    pub output: String,
    /// Human-readable note describing what this stage passed downstream.
    pub hand_off: String,
}

/// The LLM call boundary.
///
/// One fixed backend is selected at construction time (see `offer-llm`);
/// the orchestrator and agents only ever see this trait. Implementations
/// fail when no credential is configured or the model returns an empty or
/// error response. No retries happen behind this boundary.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn call(&self, system_prompt: &str, user_content: &str) -> Result<String, AgentError>;
}

/// Best-effort notification hook, called before each stage runs.
///
/// This is telemetry only: the orchestrator catches and discards panics from
/// the observer, so a UI glitch can never abort a run.
pub trait StageObserver: Send + Sync {
    fn on_stage_start(&self, agent: &str, status: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_missing_resource() {
        let err = AgentError::DataNotFound {
            path: "data/market_trends.csv".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("data/market_trends.csv"));
        assert!(msg.contains("Run the data generator first"));
    }

    #[test]
    fn step_record_round_trips_through_json() {
        let mut row = DisplayRow::new();
        row.insert("brand".into(), "McDonald's".into());
        row.insert("offer_mechanic".into(), "BOGO".into());

        let record = StepRecord {
            agent: stages::OFFER_DESIGN.into(),
            user_query: "Develop 3 offers".into(),
            input_data_sample: vec![row],
            input_summary: "User query: Develop 3 offers".into(),
            system_prompt: "You are the Offer Design Agent.".into(),
            user_content: "User request: Develop 3 offers".into(),
            output: "1. Streak Week".into(),
            hand_off: "Top 3 offer concepts delivered.".into(),
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: StepRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.agent, record.agent);
        assert_eq!(back.user_query, record.user_query);
        assert_eq!(back.input_data_sample, record.input_data_sample);
        assert_eq!(back.input_summary, record.input_summary);
        assert_eq!(back.system_prompt, record.system_prompt);
        assert_eq!(back.user_content, record.user_content);
        assert_eq!(back.output, record.output);
        assert_eq!(back.hand_off, record.hand_off);
    }

    #[test]
    fn stage_order_is_fixed() {
        assert_eq!(stages::ALL[0], "Market Trends & Deep Research");
        assert_eq!(stages::ALL[3], "Offer Design");
    }
}
