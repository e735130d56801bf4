//! Dataset provider: typed CSV loading and bounded summarization.
//!
//! Supplies the four tabular datasets the pipeline runs on. Loading fails
//! fast with an error naming the missing file; a malformed file never loads
//! partially. Summarization is deterministic given the fixed sampling seed.

mod records;
mod summary;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use offer_core::AgentError;

pub use records::{
    sample_rows, CompetitorObservation, Feedback, MarketTrend, Tabular, Transaction,
};
pub use summary::{
    summarize, summarize_for_llm, MAX_CELL_WIDTH, MAX_SAMPLE_ROWS, MAX_SUMMARY_CHARS,
    TRUNCATION_MARKER,
};

pub const MARKET_TRENDS_FILE: &str = "market_trends.csv";
pub const CUSTOMER_TRANSACTIONS_FILE: &str = "customer_transactions.csv";
pub const CUSTOMER_FEEDBACK_FILE: &str = "customer_feedback.csv";
pub const COMPETITOR_INTEL_FILE: &str = "competitor_intel.csv";

/// The four expected dataset files, in pipeline order.
pub const DATASET_FILES: [&str; 4] = [
    MARKET_TRENDS_FILE,
    CUSTOMER_TRANSACTIONS_FILE,
    CUSTOMER_FEEDBACK_FILE,
    COMPETITOR_INTEL_FILE,
];

/// True iff all four dataset files exist under `data_dir`.
///
/// This is a pipeline precondition checked by callers; the individual
/// loaders still fail with their own errors when a file is absent.
pub fn data_available(data_dir: &Path) -> bool {
    DATASET_FILES.iter().all(|f| data_dir.join(f).exists())
}

pub fn load_market_trends(data_dir: &Path) -> Result<Vec<MarketTrend>, AgentError> {
    load_csv(data_dir.join(MARKET_TRENDS_FILE))
}

pub fn load_customer_transactions(data_dir: &Path) -> Result<Vec<Transaction>, AgentError> {
    load_csv(data_dir.join(CUSTOMER_TRANSACTIONS_FILE))
}

pub fn load_customer_feedback(data_dir: &Path) -> Result<Vec<Feedback>, AgentError> {
    load_csv(data_dir.join(CUSTOMER_FEEDBACK_FILE))
}

pub fn load_competitor_intel(data_dir: &Path) -> Result<Vec<CompetitorObservation>, AgentError> {
    load_csv(data_dir.join(COMPETITOR_INTEL_FILE))
}

fn load_csv<T: DeserializeOwned>(path: PathBuf) -> Result<Vec<T>, AgentError> {
    let path_str = path.display().to_string();
    if !path.exists() {
        return Err(AgentError::DataNotFound { path: path_str });
    }

    let mut reader =
        csv::Reader::from_path(&path).map_err(|e| AgentError::data_load(&path_str, e))?;
    let rows: Vec<T> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .map_err(|e| AgentError::data_load(&path_str, e))?;

    debug!("Loaded {} rows from {}", rows.len(), path_str);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_competitor_csv(dir: &Path) {
        let mut writer = csv::Writer::from_path(dir.join(COMPETITOR_INTEL_FILE)).unwrap();
        writer
            .serialize(CompetitorObservation {
                observation_id: "obs-1".into(),
                brand: "Taco Bell".into(),
                offer_mechanic: "Meal Deal".into(),
                duration_days: 14,
                channel: "all-channels".into(),
                observed_date: "2025-05-20".into(),
            })
            .unwrap();
        writer.flush().unwrap();
    }

    #[test]
    fn available_flips_when_any_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        for f in DATASET_FILES {
            fs::write(dir.path().join(f), "header\n").unwrap();
        }
        assert!(data_available(dir.path()));

        fs::remove_file(dir.path().join(CUSTOMER_FEEDBACK_FILE)).unwrap();
        assert!(!data_available(dir.path()));
    }

    #[test]
    fn missing_file_yields_not_found_with_path_and_hint() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_market_trends(dir.path()).unwrap_err();
        match err {
            AgentError::DataNotFound { ref path } => {
                assert!(path.contains(MARKET_TRENDS_FILE));
            }
            other => panic!("expected DataNotFound, got {other:?}"),
        }
        assert!(err.to_string().contains("Run the data generator first"));
    }

    #[test]
    fn malformed_file_propagates_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(COMPETITOR_INTEL_FILE),
            "observation_id,brand,offer_mechanic,duration_days,channel,observed_date\n\
             obs-1,Taco Bell,BOGO,not-a-number,app-exclusive,2025-05-20\n",
        )
        .unwrap();

        let err = load_competitor_intel(dir.path()).unwrap_err();
        assert!(matches!(err, AgentError::DataLoad { .. }));
    }

    #[test]
    fn load_round_trips_written_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_competitor_csv(dir.path());

        let rows = load_competitor_intel(dir.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].brand, "Taco Bell");
        assert_eq!(rows[0].duration_days, 14);
    }

    #[test]
    fn sample_rows_is_bounded_and_display_safe() {
        let dir = tempfile::tempdir().unwrap();
        write_competitor_csv(dir.path());
        let rows = load_competitor_intel(dir.path()).unwrap();

        let sample = sample_rows(&rows, 5);
        assert_eq!(sample.len(), 1);
        assert_eq!(sample[0]["brand"], "Taco Bell");
        assert_eq!(sample[0]["duration_days"], "14");
    }
}
