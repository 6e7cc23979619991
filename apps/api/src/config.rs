use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::extraction::{ExtractionPolicy, FieldRequirement, Verdict};

const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    /// Per-HTTP-request timeout for the model endpoint.
    pub llm_timeout: Duration,
    /// Upper bound on a whole analysis, retries included.
    pub analysis_deadline: Duration,
    pub prompt_template_path: Option<PathBuf>,
    pub extraction_policy: ExtractionPolicy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            llm_api_key: require("GROQ_API_KEY")?,
            llm_api_url: or_default("LLM_API_URL", DEFAULT_API_URL),
            llm_model: or_default("LLM_MODEL", DEFAULT_MODEL),
            llm_timeout: Duration::from_secs(
                parse_var(&lookup, "LLM_TIMEOUT_SECS", 30)
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            analysis_deadline: Duration::from_secs(
                parse_var(&lookup, "ANALYSIS_DEADLINE_SECS", 75)
                    .context("ANALYSIS_DEADLINE_SECS must be a whole number of seconds")?,
            ),
            prompt_template_path: lookup("PROMPT_TEMPLATE_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            extraction_policy: ExtractionPolicy {
                requirement: lookup("EXTRACTION_REQUIREMENT")
                    .map(|v| FieldRequirement::from_str(&v))
                    .transpose()
                    .map_err(anyhow::Error::msg)?
                    .unwrap_or_default(),
                missing_verdict: parse_missing_verdict(lookup("MISSING_VERDICT"))?,
            },
            port: parse_var(&lookup, "PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => Ok(raw.trim().parse::<T>()?),
        None => Ok(default),
    }
}

fn parse_missing_verdict(raw: Option<String>) -> Result<Verdict> {
    let Some(raw) = raw else {
        return Ok(Verdict::Unrecognized);
    };
    match raw.parse::<Verdict>() {
        Ok(v @ (Verdict::Unrecognized | Verdict::NotAvailable)) => Ok(v),
        _ => bail!("MISSING_VERDICT must be 'unrecognized' or 'n/a', got '{raw}'"),
    }
}
