use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for the Gemini summarizer
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Missing keys are tolerated here; the first summarize call reports them.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub gemini: GeminiConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        let mut gemini = GeminiConfig {
            api_key: non_empty_var("GEMINI_API_KEY"),
            ..GeminiConfig::default()
        };

        if let Some(model) = non_empty_var("GEMINI_MODEL") {
            gemini.model = model;
        }
        if let Some(base_url) = non_empty_var("GEMINI_BASE_URL") {
            gemini.base_url = base_url;
        }
        if let Some(timeout) = non_empty_var("GEMINI_TIMEOUT_SECS") {
            let secs: u64 = timeout
                .parse()
                .with_context(|| format!("GEMINI_TIMEOUT_SECS is not a number: {}", timeout))?;
            gemini.timeout = Duration::from_secs(secs);
        }

        Ok(Self { gemini })
    }

    fn try_load_dotenv() {
        // 1. Current directory
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/news-digest/.env
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("news-digest").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gemini_config() {
        let cfg = GeminiConfig::default();
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.model, "gemini-2.5-flash");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_non_empty_var_ignores_blank_values() {
        env::set_var("NEWS_DIGEST_TEST_BLANK", "   ");
        assert!(non_empty_var("NEWS_DIGEST_TEST_BLANK").is_none());
        env::set_var("NEWS_DIGEST_TEST_SET", " value ");
        assert_eq!(
            non_empty_var("NEWS_DIGEST_TEST_SET").as_deref(),
            Some("value")
        );
        assert!(non_empty_var("NEWS_DIGEST_TEST_UNSET").is_none());
    }
}
