//! The sequential four-stage pipeline.
//!
//! Runs Market Research -> Customer Insights -> Competitor Intelligence ->
//! Offer Design, threading each stage's output into the next stage's input,
//! and assembles one [`StepRecord`] per stage. All four datasets are loaded
//! before the first LLM call, so a missing or malformed file aborts the run
//! with zero records and zero model invocations.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use tracing::info;

use offer_agents::{
    run_competitor_intel, run_customer_insights, run_market_research, run_offer_design,
};
use offer_core::{stages, AgentError, LlmBackend, StageObserver, StepRecord};
use offer_data::{
    load_competitor_intel, load_customer_feedback, load_customer_transactions,
    load_market_trends, sample_rows, summarize_for_llm,
};

use crate::scope::{annotate, Scope};

/// Rows shown per stage in the UI trace.
const DISPLAY_SAMPLE_ROWS: usize = 5;

/// Bound on the per-stage input preview stored in the trace.
const INPUT_SUMMARY_CHARS: usize = 1500;

/// Runs the full pipeline and returns the four step records in stage order.
///
/// `scope`, when present, is appended to the query as an annotation that
/// every agent sees. `observer` is notified before each stage; panics from it
/// are swallowed, so it can never affect the run's outcome.
pub async fn run_pipeline(
    backend: &dyn LlmBackend,
    data_dir: &Path,
    user_query: &str,
    scope: Option<&Scope>,
    observer: Option<&dyn StageObserver>,
) -> Result<Vec<StepRecord>, AgentError> {
    let effective_query = match scope {
        Some(scope) => annotate(user_query, scope),
        None => user_query.to_string(),
    };

    let notify = |agent: &str, status: &str| {
        if let Some(obs) = observer {
            let _ = catch_unwind(AssertUnwindSafe(|| obs.on_stage_start(agent, status)));
        }
    };

    // Fail fast: every dataset loads before any model call happens.
    let market = load_market_trends(data_dir)?;
    let transactions = load_customer_transactions(data_dir)?;
    let feedback = load_customer_feedback(data_dir)?;
    let competitors = load_competitor_intel(data_dir)?;

    let market_text = summarize_for_llm(&market);
    let transactions_text = summarize_for_llm(&transactions);
    let feedback_text = summarize_for_llm(&feedback);
    let competitor_text = summarize_for_llm(&competitors);

    let mut steps = Vec::with_capacity(4);

    // 1. Market Research
    notify(stages::MARKET_RESEARCH, "Detecting trends and themes...");
    info!("PIPELINE: stage 1/4 {}", stages::MARKET_RESEARCH);
    let step1_input = format!(
        "User query: {effective_query}\n\nMarket trends data (sample): {}...",
        clip(&market_text, 4000)
    );
    let res1 = run_market_research(backend, &market_text, &effective_query).await?;
    steps.push(StepRecord {
        agent: stages::MARKET_RESEARCH.to_string(),
        user_query: user_query.to_string(),
        input_data_sample: sample_rows(&market, DISPLAY_SAMPLE_ROWS),
        input_summary: preview(&step1_input, INPUT_SUMMARY_CHARS),
        system_prompt: res1.system_prompt,
        user_content: res1.user_content,
        output: res1.output.clone(),
        hand_off: "Trend briefs passed to Customer Insights and Offer Design.".to_string(),
    });

    // 2. Customer Insights
    notify(
        stages::CUSTOMER_INSIGHTS,
        "Profiling segments and preferences...",
    );
    info!("PIPELINE: stage 2/4 {}", stages::CUSTOMER_INSIGHTS);
    let step2_input = format!(
        "User query: {effective_query}\n\nTransactions + feedback (sample): {}... {}...",
        clip(&transactions_text, 2000),
        clip(&feedback_text, 2000)
    );
    let res2 =
        run_customer_insights(backend, &transactions_text, &feedback_text, &effective_query)
            .await?;
    // One combined display sample: transaction rows first, feedback rows after,
    // sliced to the first 5 total.
    let mut combined_sample = sample_rows(&transactions, DISPLAY_SAMPLE_ROWS);
    combined_sample.extend(sample_rows(&feedback, DISPLAY_SAMPLE_ROWS));
    combined_sample.truncate(DISPLAY_SAMPLE_ROWS);
    steps.push(StepRecord {
        agent: stages::CUSTOMER_INSIGHTS.to_string(),
        user_query: user_query.to_string(),
        input_data_sample: combined_sample,
        input_summary: preview(&step2_input, INPUT_SUMMARY_CHARS),
        system_prompt: res2.system_prompt,
        user_content: res2.user_content,
        output: res2.output.clone(),
        hand_off: "Customer segment insights passed to Offer Design.".to_string(),
    });

    // 3. Competitor Intelligence
    notify(
        stages::COMPETITOR_INTEL,
        "Mapping landscape and whitespace...",
    );
    info!("PIPELINE: stage 3/4 {}", stages::COMPETITOR_INTEL);
    let step3_input = format!(
        "User query: {effective_query}\n\nCompetitor data (sample): {}...",
        clip(&competitor_text, 4000)
    );
    let res3 = run_competitor_intel(backend, &competitor_text, &effective_query).await?;
    steps.push(StepRecord {
        agent: stages::COMPETITOR_INTEL.to_string(),
        user_query: user_query.to_string(),
        input_data_sample: sample_rows(&competitors, DISPLAY_SAMPLE_ROWS),
        input_summary: preview(&step3_input, INPUT_SUMMARY_CHARS),
        system_prompt: res3.system_prompt,
        user_content: res3.user_content,
        output: res3.output.clone(),
        hand_off: "Competitive landscape and whitespace opportunities passed to Offer Design."
            .to_string(),
    });

    // 4. Offer Design
    notify(stages::OFFER_DESIGN, "Synthesizing top 3 offers...");
    info!("PIPELINE: stage 4/4 {}", stages::OFFER_DESIGN);
    let step4_input = format!(
        "User query: {effective_query}\n\nInputs from agents:\n- Trend briefs: {}...\n- Customer insights: {}...\n- Competitor intel: {}...",
        clip(&steps[0].output, 2000),
        clip(&steps[1].output, 2000),
        clip(&steps[2].output, 2000)
    );
    // The competitor output goes in twice, as landscape and as whitespace;
    // stage 3 emits both in a single text blob.
    let res4 = run_offer_design(
        backend,
        &steps[0].output,
        &steps[1].output,
        &steps[2].output,
        &steps[2].output,
        &effective_query,
    )
    .await?;
    steps.push(StepRecord {
        agent: stages::OFFER_DESIGN.to_string(),
        user_query: user_query.to_string(),
        // No raw table; inputs are prior agent outputs.
        input_data_sample: Vec::new(),
        input_summary: preview(&step4_input, INPUT_SUMMARY_CHARS),
        system_prompt: res4.system_prompt,
        user_content: res4.user_content,
        output: res4.output,
        hand_off: "Top 3 offer concepts delivered.".to_string(),
    });

    Ok(steps)
}

/// First `max` characters, no marker.
fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// First `max` characters, with an ellipsis when anything was cut.
fn preview(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut p = clip(s, max);
        p.push_str("...");
        p
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_only_marks_when_cut() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("0123456789", 10), "0123456789");
        assert_eq!(preview("0123456789x", 10), "0123456789...");
    }

    #[test]
    fn clip_counts_characters_not_bytes() {
        assert_eq!(clip("äöüß", 2), "äö");
    }
}
