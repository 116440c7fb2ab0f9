use anyhow::{ensure, Context, Result};

use crate::matching::fuzzy::DEFAULT_THRESHOLD;

/// Application configuration loaded from environment variables.
/// Every value has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Unset disables narrative summaries.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// Fuzzy threshold used when a request does not supply one.
    pub match_threshold: f64,
    /// Default for the experience-weighted policy's clamp flag.
    pub clamp_experience_weight: bool,
    pub max_upload_bytes: usize,
    pub summary_concurrency: usize,
    pub summary_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            port: 8080,
            rust_log: "info".to_string(),
            match_threshold: DEFAULT_THRESHOLD,
            clamp_experience_weight: false,
            max_upload_bytes: 10 * 1024 * 1024,
            summary_concurrency: 4,
            summary_timeout_secs: 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let config = Config {
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            match_threshold: parse_or(&lookup, "MATCH_THRESHOLD", defaults.match_threshold)?,
            clamp_experience_weight: parse_or(
                &lookup,
                "CLAMP_EXPERIENCE_WEIGHT",
                defaults.clamp_experience_weight,
            )?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            summary_concurrency: parse_or(
                &lookup,
                "SUMMARY_CONCURRENCY",
                defaults.summary_concurrency,
            )?,
            summary_timeout_secs: parse_or(
                &lookup,
                "SUMMARY_TIMEOUT_SECS",
                defaults.summary_timeout_secs,
            )?,
        };

        ensure!(
            config.match_threshold > 0.0 && config.match_threshold <= 1.0,
            "MATCH_THRESHOLD must be in (0, 1], got {}",
            config.match_threshold
        );
        ensure!(
            config.summary_concurrency > 0,
            "SUMMARY_CONCURRENCY must be at least 1"
        );

        Ok(config)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
