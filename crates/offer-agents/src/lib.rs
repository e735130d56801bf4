//! The four prompt agents of the offer pipeline.
//!
//! Each agent owns one fixed system instruction and one assembly rule for the
//! user-facing content. The section labels in the assembled content are part
//! of the contract, so regenerated prompts stay diff-stable. Agents return
//! the model's raw output together with the exact strings sent, and propagate
//! LLM failures unchanged; an agent never fabricates output when a call fails.

pub mod prompts;

use tracing::info;

use offer_core::{stages, AgentError, AgentReply, LlmBackend};

use crate::prompts::{
    COMPETITOR_INTEL_PROMPT, CUSTOMER_INSIGHTS_PROMPT, MARKET_RESEARCH_PROMPT, OFFER_DESIGN_PROMPT,
};

async fn invoke(
    backend: &dyn LlmBackend,
    agent: &str,
    system_prompt: &str,
    user_content: String,
) -> Result<AgentReply, AgentError> {
    info!("AGENT: {} invoking model", agent);
    let output = backend.call(system_prompt, &user_content).await?;
    Ok(AgentReply {
        output,
        system_prompt: system_prompt.to_string(),
        user_content,
    })
}

/// Market Trends & Deep Research: trend briefs from the market dataset.
pub async fn run_market_research(
    backend: &dyn LlmBackend,
    market_trends_text: &str,
    user_query: &str,
) -> Result<AgentReply, AgentError> {
    let user_content = format!(
        "User request: {user_query}\n\n\
         Market trends data (sample/summary):\n{market_trends_text}\n\n\
         Analyze the above data and produce your trend_briefs. Focus on themes, velocity, and recommended directions."
    );
    invoke(
        backend,
        stages::MARKET_RESEARCH,
        MARKET_RESEARCH_PROMPT,
        user_content,
    )
    .await
}

/// Customer Insights: segment profiles from transactions and feedback.
pub async fn run_customer_insights(
    backend: &dyn LlmBackend,
    transactions_text: &str,
    feedback_text: &str,
    user_query: &str,
) -> Result<AgentReply, AgentError> {
    let user_content = format!(
        "User request: {user_query}\n\n\
         Customer transactions (sample/summary):\n{transactions_text}\n\n\
         Customer feedback (sample/summary):\n{feedback_text}\n\n\
         Analyze the above and produce your customer_insights segment profiles."
    );
    invoke(
        backend,
        stages::CUSTOMER_INSIGHTS,
        CUSTOMER_INSIGHTS_PROMPT,
        user_content,
    )
    .await
}

/// Competitor Intelligence: landscape and whitespace from competitor data.
pub async fn run_competitor_intel(
    backend: &dyn LlmBackend,
    competitor_intel_text: &str,
    user_query: &str,
) -> Result<AgentReply, AgentError> {
    let user_content = format!(
        "User request: {user_query}\n\n\
         Competitor intelligence data (sample/summary):\n{competitor_intel_text}\n\n\
         Analyze the above and produce competitive_landscape and whitespace_opportunities."
    );
    invoke(
        backend,
        stages::COMPETITOR_INTEL,
        COMPETITOR_INTEL_PROMPT,
        user_content,
    )
    .await
}

/// Offer Design: synthesizes all prior agent outputs into the top 3 offers.
///
/// The competitor output arrives twice, once as landscape and once as
/// whitespace, because the Competitor Intelligence stage emits both in one
/// text blob.
pub async fn run_offer_design(
    backend: &dyn LlmBackend,
    trend_briefs: &str,
    customer_insights: &str,
    competitive_landscape: &str,
    whitespace_opportunities: &str,
    user_query: &str,
) -> Result<AgentReply, AgentError> {
    let user_content = format!(
        "User request: {user_query}\n\n\
         Inputs from other agents:\n\n\
         --- Market Trends (trend_briefs) ---\n{trend_briefs}\n\n\
         --- Customer Insights ---\n{customer_insights}\n\n\
         --- Competitor Intelligence (competitive_landscape + whitespace_opportunities) ---\n\
         {competitive_landscape}\n\n{whitespace_opportunities}\n\n---\n\n\
         Synthesize the above and output your TOP 3 offer concepts with name, mechanic, channel, duration, target, evidence map, rationale, feasibility, and impact.\n\n\
         At the end, add a \"TOP 3 SUMMARY TABLE\" as markdown with columns: Offer name | Channel | Target segment | Duration | Evidence (bullet: Market Trends, Customer Insights, Competitor). One row per offer."
    );
    invoke(
        backend,
        stages::OFFER_DESIGN,
        OFFER_DESIGN_PROMPT,
        user_content,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Backend stub that records what it was sent.
    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl LlmBackend for RecordingBackend {
        async fn call(
            &self,
            system_prompt: &str,
            user_content: &str,
        ) -> Result<String, AgentError> {
            if self.fail {
                return Err(AgentError::Llm("boom".into()));
            }
            self.calls
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), user_content.to_string()));
            Ok("stub output".to_string())
        }
    }

    #[tokio::test]
    async fn market_research_embeds_query_and_labeled_data() {
        let backend = RecordingBackend::default();
        let reply = run_market_research(&backend, "TREND DATA", "more breakfast traffic")
            .await
            .unwrap();

        assert_eq!(reply.output, "stub output");
        assert!(reply.user_content.starts_with("User request: more breakfast traffic"));
        assert!(reply
            .user_content
            .contains("Market trends data (sample/summary):\nTREND DATA"));
        assert_eq!(reply.system_prompt, MARKET_RESEARCH_PROMPT);

        // The reply reports exactly what was sent.
        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, reply.user_content);
    }

    #[tokio::test]
    async fn customer_insights_labels_both_datasets() {
        let backend = RecordingBackend::default();
        let reply = run_customer_insights(&backend, "TXN", "FEEDBACK", "q")
            .await
            .unwrap();

        assert!(reply
            .user_content
            .contains("Customer transactions (sample/summary):\nTXN"));
        assert!(reply
            .user_content
            .contains("Customer feedback (sample/summary):\nFEEDBACK"));
    }

    #[tokio::test]
    async fn offer_design_sections_all_prior_outputs() {
        let backend = RecordingBackend::default();
        let reply = run_offer_design(&backend, "T1", "C2", "L3", "W3", "q")
            .await
            .unwrap();

        assert!(reply.user_content.contains("--- Market Trends (trend_briefs) ---\nT1"));
        assert!(reply.user_content.contains("--- Customer Insights ---\nC2"));
        assert!(reply.user_content.contains("L3\n\nW3"));
        assert!(reply.user_content.contains("TOP 3 SUMMARY TABLE"));
    }

    #[tokio::test]
    async fn llm_failure_propagates_unchanged() {
        let backend = RecordingBackend {
            fail: true,
            ..Default::default()
        };
        let err = run_competitor_intel(&backend, "COMP", "q").await.unwrap_err();
        assert!(matches!(err, AgentError::Llm(ref msg) if msg == "boom"));
    }
}
