//! Typed records for the four tabular datasets.
//!
//! The schemas are fixed; the generator writes them and the loaders read them
//! back. Dates are kept as rendered strings so rows stay display-safe and
//! round-trip the CSV files without reinterpretation.

use serde::{Deserialize, Serialize};

use offer_core::DisplayRow;

/// A record set with a fixed column schema, renderable as text.
pub trait Tabular {
    /// Column names in schema order.
    const COLUMNS: &'static [&'static str];

    /// Cell values as display-safe strings, in schema order.
    fn cells(&self) -> Vec<String>;
}

/// One scraped mention of an offer-related trend (social post, blog, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketTrend {
    pub source_id: String,
    pub source_type: String,
    pub text_content: String,
    pub publication_date: String,
    pub trend_theme: String,
    pub velocity_score: f64,
}

impl Tabular for MarketTrend {
    const COLUMNS: &'static [&'static str] = &[
        "source_id",
        "source_type",
        "text_content",
        "publication_date",
        "trend_theme",
        "velocity_score",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.source_id.clone(),
            self.source_type.clone(),
            self.text_content.clone(),
            self.publication_date.clone(),
            self.trend_theme.clone(),
            format!("{:.2}", self.velocity_score),
        ]
    }
}

/// One customer visit, with the offer redeemed if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub customer_id: String,
    pub visit_date: String,
    pub total_spend: f64,
    pub redeemed_offer: Option<String>,
    pub channel: String,
}

impl Tabular for Transaction {
    const COLUMNS: &'static [&'static str] = &[
        "transaction_id",
        "customer_id",
        "visit_date",
        "total_spend",
        "redeemed_offer",
        "channel",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.transaction_id.clone(),
            self.customer_id.clone(),
            self.visit_date.clone(),
            format!("{:.2}", self.total_spend),
            self.redeemed_offer.clone().unwrap_or_default(),
            self.channel.clone(),
        ]
    }
}

/// One piece of free-text customer feedback with a star rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub feedback_id: String,
    pub customer_id: String,
    pub feedback_date: String,
    pub rating: u8,
    pub feedback_text: String,
}

impl Tabular for Feedback {
    const COLUMNS: &'static [&'static str] = &[
        "feedback_id",
        "customer_id",
        "feedback_date",
        "rating",
        "feedback_text",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.feedback_id.clone(),
            self.customer_id.clone(),
            self.feedback_date.clone(),
            self.rating.to_string(),
            self.feedback_text.clone(),
        ]
    }
}

/// One observed competitor promotion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorObservation {
    pub observation_id: String,
    pub brand: String,
    pub offer_mechanic: String,
    pub duration_days: u32,
    pub channel: String,
    pub observed_date: String,
}

impl Tabular for CompetitorObservation {
    const COLUMNS: &'static [&'static str] = &[
        "observation_id",
        "brand",
        "offer_mechanic",
        "duration_days",
        "channel",
        "observed_date",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.observation_id.clone(),
            self.brand.clone(),
            self.offer_mechanic.clone(),
            self.duration_days.to_string(),
            self.channel.clone(),
            self.observed_date.clone(),
        ]
    }
}

/// First `n` rows as display-safe column/value maps for the UI trace.
pub fn sample_rows<T: Tabular>(rows: &[T], n: usize) -> Vec<DisplayRow> {
    rows.iter()
        .take(n)
        .map(|row| {
            T::COLUMNS
                .iter()
                .map(|c| c.to_string())
                .zip(row.cells())
                .collect()
        })
        .collect()
}
