//! Scope extraction: pulls an optional daypart and time horizon out of a
//! free-text request.
//!
//! Extraction is total: every input yields a [`Scope`], possibly with both
//! fields unset, never an error. The scope is derived once from the raw
//! request and never re-derived mid-pipeline.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static QUARTER_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(q[1-4])\b").unwrap());
static WEEKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*weeks?").unwrap());

/// A daypart mentioned in the user's request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Daypart {
    Breakfast,
    Lunch,
    LateNight,
}

impl Daypart {
    pub fn as_str(&self) -> &'static str {
        match self {
            Daypart::Breakfast => "breakfast",
            Daypart::Lunch => "lunch",
            Daypart::LateNight => "late-night",
        }
    }
}

/// Optional daypart/time-horizon hint parsed from the raw user query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    pub daypart: Option<Daypart>,
    pub time_horizon: Option<String>,
}

impl Scope {
    pub fn is_empty(&self) -> bool {
        self.daypart.is_none() && self.time_horizon.is_none()
    }
}

/// Case-insensitive keyword match against the fixed scope vocabulary.
/// First matching rule wins per field.
pub fn extract(raw_query: &str) -> Scope {
    let q = raw_query.to_lowercase();

    let daypart = if q.contains("breakfast") || q.contains("morning") {
        Some(Daypart::Breakfast)
    } else if q.contains("lunch") || q.contains("midday") {
        Some(Daypart::Lunch)
    } else if q.contains("late-night")
        || q.contains("late night")
        || q.contains("dinner")
        || q.contains("evening")
    {
        Some(Daypart::LateNight)
    } else {
        None
    };

    let time_horizon = if let Some(caps) = QUARTER_TOKEN.captures(&q) {
        Some(caps[1].to_uppercase())
    } else if q.contains("quarter") {
        Some("quarter".to_string())
    } else {
        WEEKS
            .captures(&q)
            .map(|caps| format!("{} weeks", &caps[1]))
    };

    Scope {
        daypart,
        time_horizon,
    }
}

/// Appends the parsed scope to the query so agents explicitly see it.
///
/// An empty scope returns the query unchanged. Otherwise a single bracketed
/// clause lists the non-null fields as `key=value` pairs, daypart first.
pub fn annotate(query: &str, scope: &Scope) -> String {
    if scope.is_empty() {
        return query.to_string();
    }

    let mut parts = Vec::new();
    if let Some(daypart) = scope.daypart {
        parts.push(format!("daypart={}", daypart.as_str()));
    }
    if let Some(ref horizon) = scope.time_horizon {
        parts.push(format!("time_horizon={horizon}"));
    }

    format!(
        "{query}\n\n[Parsed scope from your request: {}]",
        parts.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_is_total() {
        for q in ["", "anything at all", "!!!", "週末のオファー"] {
            let scope = extract(q);
            assert!(scope.daypart.is_none());
            assert!(scope.time_horizon.is_none());
        }
    }

    #[test]
    fn dayparts_match_case_insensitively() {
        assert_eq!(extract("Breakfast deals").daypart, Some(Daypart::Breakfast));
        assert_eq!(extract("morning commute").daypart, Some(Daypart::Breakfast));
        assert_eq!(extract("MIDDAY rush").daypart, Some(Daypart::Lunch));
        assert_eq!(extract("late night cravings").daypart, Some(Daypart::LateNight));
        assert_eq!(extract("dinner crowd").daypart, Some(Daypart::LateNight));
        assert_eq!(extract("all day").daypart, None);
    }

    #[test]
    fn first_daypart_rule_wins() {
        // Both breakfast and lunch keywords present; breakfast is checked first.
        assert_eq!(
            extract("breakfast and lunch offers").daypart,
            Some(Daypart::Breakfast)
        );
    }

    #[test]
    fn quarter_tokens_need_word_boundaries() {
        assert_eq!(extract("launch in q3").time_horizon, Some("Q3".into()));
        assert_eq!(extract("for Q1 please").time_horizon, Some("Q1".into()));
        // "q1" embedded in a word does not count.
        assert_eq!(extract("bbq1 special").time_horizon, None);
    }

    #[test]
    fn quarter_keyword_and_weeks_fall_back() {
        assert_eq!(extract("next quarter").time_horizon, Some("quarter".into()));
        assert_eq!(extract("this quarter").time_horizon, Some("quarter".into()));
        assert_eq!(extract("a 6 week push").time_horizon, Some("6 weeks".into()));
        assert_eq!(extract("12 weeks campaign").time_horizon, Some("12 weeks".into()));
    }

    #[test]
    fn quarter_token_beats_weeks() {
        assert_eq!(
            extract("q2 campaign over 8 weeks").time_horizon,
            Some("Q2".into())
        );
    }

    #[test]
    fn annotate_empty_scope_is_identity() {
        let scope = Scope::default();
        assert_eq!(annotate("plain query", &scope), "plain query");
    }

    #[test]
    fn annotate_lists_only_non_null_fields() {
        let scope = Scope {
            daypart: Some(Daypart::Breakfast),
            time_horizon: None,
        };
        let annotated = annotate("q", &scope);
        assert!(annotated.contains("daypart=breakfast"));
        assert!(!annotated.contains("time_horizon"));

        let scope = Scope {
            daypart: Some(Daypart::LateNight),
            time_horizon: Some("Q4".into()),
        };
        let annotated = annotate("q", &scope);
        assert!(annotated.contains("daypart=late-night, time_horizon=Q4"));
        assert!(annotated.starts_with("q\n\n[Parsed scope from your request:"));
    }

    #[test]
    fn combined_daypart_and_horizon_query() {
        let scope = extract("Develop 3 offers for discount hunters, breakfast only, next quarter");
        assert_eq!(scope.daypart, Some(Daypart::Breakfast));
        assert_eq!(scope.time_horizon, Some("quarter".into()));
    }
}
