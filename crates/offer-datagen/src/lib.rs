//! Synthetic dataset generation for the offer pipeline.
//!
//! Produces the four CSV datasets with fixed schemas and row counts:
//! themed market-trend mentions, customer transactions, customer feedback,
//! and competitor promotion observations. Content is randomized per run;
//! the shapes are deterministic.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use offer_data::{
    CompetitorObservation, Feedback, MarketTrend, Transaction, COMPETITOR_INTEL_FILE,
    CUSTOMER_FEEDBACK_FILE, CUSTOMER_TRANSACTIONS_FILE, MARKET_TRENDS_FILE,
};

pub const MARKET_TRENDS_ROWS: usize = 1500;
pub const CUSTOMER_TRANSACTIONS_ROWS: usize = 2000;
pub const CUSTOMER_FEEDBACK_ROWS: usize = 1000;
pub const COMPETITOR_INTEL_ROWS: usize = 1000;

/// Trend themes with representative social/blog mention texts.
const TREND_TEMPLATES: &[(&str, &[&str])] = &[
    (
        "Gamification",
        &[
            "Just hit a 5-day streak on a burger app and got a free dessert. Why doesn't every chain have something like this? It's way more engaging.",
            "I wish my go-to burger app had weekly challenges or a spin-the-wheel game for random rewards. It would make me open it more often.",
            "Gamified loyalty programs are the future for fast food. Earning badges and completing missions for a free double sounds awesome.",
        ],
    ),
    (
        "Subscriptions",
        &[
            "I'd totally pay $5 a month for a daily free coffee or small shake. Burger King has a coffee subscription, it's a no-brainer.",
            "Heard Panera's 'Sip Club' is a huge success. A 'Fry Club' subscription for unlimited fries? I'd sign up instantly.",
            "A monthly subscription that gives you free delivery and one free premium item a week would be a game-changer for my family.",
        ],
    ),
    (
        "Personalization & Surprise",
        &[
            "The best promos are the ones you don't expect. Got a random 'Free Shake Friday' offer in my app today. Made my day!",
            "My local Chick-fil-A knows I always order spicy chicken, and I get personalized offers for it. Most apps feel so generic in comparison.",
            "It's my birthday month and the Starbucks app loaded a free drink for me. Most burger apps do nothing for birthdays. Missed opportunity.",
        ],
    ),
    (
        "App-Exclusive Value",
        &[
            "PRO TIP: Don't order fast food without checking the app first. The app-exclusive BOGO on the double bacon burger is the only way to go.",
            "It's crazy how much more expensive it is to order in-store versus using a mobile coupon. The 20% off digital orders is a huge incentive.",
            "Chains need to put more of their killer deals in the app. I want a reason to use it every time, not just occasionally.",
        ],
    ),
    (
        "Daypart Offers",
        &[
            "I wish there were better breakfast deals. McDonald's has the 2 for $3 breakfast sandwiches which is perfect for my morning commute.",
            "That late-night 'After 8pm' deal at Taco Bell is genius. A half-price shake or chili deal for late-night cravings would crush it.",
            "The lunch rush is real. A mobile-order-only 'Lunch Box' deal for like $6 would be perfect for grabbing on a short break.",
        ],
    ),
    (
        "Tiered Loyalty",
        &[
            "I'm a 'platinum' member at some coffee shops and get better rewards. It makes me want to go there more often than places where everyone gets the same offers.",
            "A tiered loyalty system would be great. The more you spend, you could unlock exclusive offers like getting to try new items early.",
        ],
    ),
];

const SOURCE_TYPES: &[&str] = &["Reddit", "FoodBlog", "X (Twitter)"];

const OFFERS: &[Option<&str>] = &[
    Some("BOGO Signature Single"),
    Some("Free Small Shake"),
    Some("20% Off Mobile Order"),
    Some("4 for $4"),
    None,
];

const TRANSACTION_CHANNELS: &[&str] = &["in-store", "drive-thru", "app"];

const COMPETITORS: &[&str] = &["McDonald's", "Burger King", "Taco Bell", "Chick-fil-A"];

const MECHANICS: &[&str] = &[
    "BOGO",
    "Discount %",
    "Meal Deal",
    "Gamified App Challenge",
    "Loyalty Points Multiplier",
];

const COMPETITOR_CHANNELS: &[&str] = &["app-exclusive", "all-channels", "in-store"];

const FEEDBACK_SNIPPETS: &[&str] = &[
    "Food was fresh and the line moved fast.",
    "The app crashed twice before I could redeem my coupon.",
    "Fries were cold but the staff replaced them right away.",
    "Great value with the meal deal, will come back.",
    "Drive-thru took almost twenty minutes at lunch.",
    "Love the spicy sandwich, wish it was on more offers.",
    "The mobile order was ready exactly on time.",
    "Prices keep creeping up, deals are the only reason I visit.",
    "Clean dining room and friendly cashier.",
    "My order was missing the drink again.",
];

pub fn generate_market_trends(rng: &mut impl Rng) -> Vec<MarketTrend> {
    (0..MARKET_TRENDS_ROWS)
        .map(|_| {
            let (theme, texts) = TREND_TEMPLATES.choose(rng).unwrap();
            MarketTrend {
                source_id: Uuid::new_v4().to_string(),
                source_type: SOURCE_TYPES.choose(rng).unwrap().to_string(),
                text_content: texts.choose(rng).unwrap().to_string(),
                publication_date: datetime_within_days(rng, 365),
                trend_theme: theme.to_string(),
                velocity_score: round2(rng.random_range(1.0..5.0)),
            }
        })
        .collect()
}

pub fn generate_customer_transactions(rng: &mut impl Rng) -> Vec<Transaction> {
    (0..CUSTOMER_TRANSACTIONS_ROWS)
        .map(|_| Transaction {
            transaction_id: Uuid::new_v4().to_string(),
            customer_id: format!("cust_{}", rng.random_range(100..=500)),
            visit_date: datetime_within_days(rng, 180),
            total_spend: round2(rng.random_range(5.50..25.00)),
            redeemed_offer: OFFERS.choose(rng).unwrap().map(String::from),
            channel: TRANSACTION_CHANNELS.choose(rng).unwrap().to_string(),
        })
        .collect()
}

pub fn generate_customer_feedback(rng: &mut impl Rng) -> Vec<Feedback> {
    (0..CUSTOMER_FEEDBACK_ROWS)
        .map(|_| {
            let text: Vec<&str> = (0..3)
                .map(|_| *FEEDBACK_SNIPPETS.choose(rng).unwrap())
                .collect();
            Feedback {
                feedback_id: Uuid::new_v4().to_string(),
                customer_id: format!("cust_{}", rng.random_range(100..=500)),
                feedback_date: datetime_within_days(rng, 180),
                rating: rng.random_range(1..=5),
                feedback_text: text.join(" "),
            }
        })
        .collect()
}

pub fn generate_competitor_intel(rng: &mut impl Rng) -> Vec<CompetitorObservation> {
    (0..COMPETITOR_INTEL_ROWS)
        .map(|_| CompetitorObservation {
            observation_id: Uuid::new_v4().to_string(),
            brand: COMPETITORS.choose(rng).unwrap().to_string(),
            offer_mechanic: MECHANICS.choose(rng).unwrap().to_string(),
            duration_days: rng.random_range(7..=30),
            channel: COMPETITOR_CHANNELS.choose(rng).unwrap().to_string(),
            observed_date: date_within_days(rng, 365),
        })
        .collect()
}

/// Generates all four datasets and writes them as CSVs under `out_dir`.
pub fn generate_all(out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut rng = rand::rng();

    let trends = generate_market_trends(&mut rng);
    write_csv(&out_dir.join(MARKET_TRENDS_FILE), &trends)?;
    info!("  {} records -> {}", trends.len(), MARKET_TRENDS_FILE);

    let transactions = generate_customer_transactions(&mut rng);
    write_csv(&out_dir.join(CUSTOMER_TRANSACTIONS_FILE), &transactions)?;
    info!(
        "  {} records -> {}",
        transactions.len(),
        CUSTOMER_TRANSACTIONS_FILE
    );

    let feedback = generate_customer_feedback(&mut rng);
    write_csv(&out_dir.join(CUSTOMER_FEEDBACK_FILE), &feedback)?;
    info!("  {} records -> {}", feedback.len(), CUSTOMER_FEEDBACK_FILE);

    let intel = generate_competitor_intel(&mut rng);
    write_csv(&out_dir.join(COMPETITOR_INTEL_FILE), &intel)?;
    info!("  {} records -> {}", intel.len(), COMPETITOR_INTEL_FILE);

    Ok(())
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

fn datetime_within_days(rng: &mut impl Rng, days: i64) -> String {
    let at = Utc::now()
        - Duration::days(rng.random_range(0..days))
        - Duration::minutes(rng.random_range(0..1440));
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn date_within_days(rng: &mut impl Rng, days: i64) -> String {
    let at = Utc::now() - Duration::days(rng.random_range(0..days));
    at.format("%Y-%m-%d").to_string()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use offer_data::{data_available, load_customer_transactions, load_market_trends};

    #[test]
    fn generated_datasets_have_fixed_row_counts() {
        let mut rng = rand::rng();
        assert_eq!(generate_market_trends(&mut rng).len(), MARKET_TRENDS_ROWS);
        assert_eq!(
            generate_customer_transactions(&mut rng).len(),
            CUSTOMER_TRANSACTIONS_ROWS
        );
        assert_eq!(
            generate_customer_feedback(&mut rng).len(),
            CUSTOMER_FEEDBACK_ROWS
        );
        assert_eq!(
            generate_competitor_intel(&mut rng).len(),
            COMPETITOR_INTEL_ROWS
        );
    }

    #[test]
    fn generate_all_writes_loadable_files() {
        let dir = tempfile::tempdir().unwrap();
        generate_all(dir.path()).unwrap();
        assert!(data_available(dir.path()));

        let trends = load_market_trends(dir.path()).unwrap();
        assert_eq!(trends.len(), MARKET_TRENDS_ROWS);
        assert!(trends.iter().all(|t| (1.0..=5.0).contains(&t.velocity_score)));

        let transactions = load_customer_transactions(dir.path()).unwrap();
        assert_eq!(transactions.len(), CUSTOMER_TRANSACTIONS_ROWS);
        assert!(transactions.iter().any(|t| t.redeemed_offer.is_none()));
        assert!(transactions.iter().any(|t| t.redeemed_offer.is_some()));
    }

    #[test]
    fn ratings_stay_in_range() {
        let mut rng = rand::rng();
        let feedback = generate_customer_feedback(&mut rng);
        assert!(feedback.iter().all(|f| (1..=5).contains(&f.rating)));
    }
}
