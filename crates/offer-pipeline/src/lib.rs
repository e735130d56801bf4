//! Sequential agent orchestration for offer innovation.
//!
//! This crate holds the only real control flow in the system: the
//! [`scope`] heuristic that annotates the user's request, and the
//! [`orchestrator`] that chains the four prompt agents over the summarized
//! datasets and assembles the per-stage trace.

pub mod orchestrator;
pub mod scope;

pub use orchestrator::run_pipeline;
pub use scope::{annotate, extract, Daypart, Scope};
