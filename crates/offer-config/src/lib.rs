//! Application configuration, resolved once at process start.
//!
//! All credential and endpoint resolution happens here, up front. The rest of
//! the system receives an [`AppConfig`] by reference and performs no hidden
//! environment lookups of its own.

use std::env;
use std::path::PathBuf;

/// Default directory for the generated CSV datasets.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Configuration for the offer pipeline and its collaborators.
///
/// - `api_key`: `GEMINI_API_KEY`. Required before any LLM call; a missing key
///   is surfaced as a configuration error before a run starts.
/// - `base_url`: `GEMINI_BASE_URL`. When set, the OpenAI-compatible gateway
///   backend is used; otherwise the direct Gemini backend.
/// - `model`: `GEMINI_MODEL`. Optional; each backend has its own default.
/// - `data_dir`: `OFFERPILOT_DATA_DIR`, defaulting to `data/`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Loads `.env` (if present) and resolves all settings from the
    /// environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_key: non_empty(env::var("GEMINI_API_KEY").ok()),
            base_url: non_empty(env::var("GEMINI_BASE_URL").ok())
                .map(|u| u.trim_end_matches('/').to_string()),
            model: non_empty(env::var("GEMINI_MODEL").ok()),
            data_dir: non_empty(env::var("OFFERPILOT_DATA_DIR").ok())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        }
    }

    /// True if a credential is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

/// Treats empty and whitespace-only values as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_unset() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("".into())), None);
        assert_eq!(non_empty(Some("   ".into())), None);
        assert_eq!(non_empty(Some(" key ".into())), Some("key".into()));
    }

    #[test]
    fn default_config_has_no_credential() {
        let cfg = AppConfig::default();
        assert!(!cfg.has_api_key());
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
    }
}
