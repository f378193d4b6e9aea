//! Client configuration from the environment

use crate::answer::{AnswerOptions, DEFAULT_KEYWORD_LATENCY};
use crate::gateway::DEFAULT_DEADLINE;
use reqwest::Url;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {value:?} ({reason})")]
    InvalidUrl {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("ASSISTANT_STRATEGY must be `http` or `keyword`, got {0:?}")]
    UnknownStrategy(String),
}

/// Which answering strategy backs the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Remote document-grounded query service
    Http,
    /// Offline canned keyword responder
    Keyword,
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Strategy::Http),
            "keyword" => Ok(Strategy::Keyword),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the answer and report services, always ending in `/`
    pub api_url: Url,
    pub deadline: Duration,
    /// Simulated reply delay range of the keyword responder
    pub keyword_latency: (Duration, Duration),
    pub temperature: f32,
    pub document: Option<String>,
    pub strategy: Strategy,
    /// Prefix for report filenames
    pub brand: String,
    /// Base for shareable context links; none means answers carry no link
    pub share_url: Option<Url>,
    pub report_dir: PathBuf,
    /// Startup locator possibly carrying a context payload
    pub locator: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = var("ASSISTANT_API_URL").unwrap_or_else(|| "http://localhost:8000".to_string());
        let api_url = parse_url("ASSISTANT_API_URL", &with_trailing_slash(&api_url))?;

        let millis = |key: &'static str, default: Duration| match var(key) {
            Some(v) => v
                .trim()
                .parse()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidNumber { var: key, value: v }),
            None => Ok(default),
        };
        let deadline = millis("ASSISTANT_DEADLINE_MS", DEFAULT_DEADLINE)?;
        let keyword_latency = (
            millis("ASSISTANT_KEYWORD_MIN_MS", DEFAULT_KEYWORD_LATENCY.0)?,
            millis("ASSISTANT_KEYWORD_MAX_MS", DEFAULT_KEYWORD_LATENCY.1)?,
        );

        let temperature = match var("ASSISTANT_TEMPERATURE") {
            Some(v) => v
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|t| t.is_finite())
                .ok_or(ConfigError::InvalidNumber {
                    var: "ASSISTANT_TEMPERATURE",
                    value: v.clone(),
                })?,
            None => AnswerOptions::default().temperature,
        };

        let strategy = match var("ASSISTANT_STRATEGY") {
            Some(v) => v.parse()?,
            None => Strategy::Http,
        };

        let share_url = var("ASSISTANT_SHARE_URL")
            .map(|v| parse_url("ASSISTANT_SHARE_URL", &v))
            .transpose()?;

        Ok(Self {
            api_url,
            deadline,
            keyword_latency,
            temperature: temperature.clamp(0.0, 1.0),
            document: var("ASSISTANT_DOCUMENT"),
            strategy,
            brand: var("ASSISTANT_BRAND").unwrap_or_else(|| "Assistant".to_string()),
            share_url,
            report_dir: var("ASSISTANT_REPORT_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from),
            locator: var("ASSISTANT_LOCATOR"),
        })
    }

    pub fn answer_options(&self) -> AnswerOptions {
        AnswerOptions::new(self.document.clone(), self.temperature)
    }
}

fn with_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}

fn parse_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|e| ConfigError::InvalidUrl {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
