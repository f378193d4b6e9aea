//! Context sources

use super::{BootstrapError, ContextSource};
use reqwest::Url;

/// A locator URL held in memory
#[derive(Debug, Clone)]
pub struct UrlContextSource {
    url: Url,
}

impl UrlContextSource {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn parse(locator: &str) -> Result<Self, BootstrapError> {
        let url = Url::parse(locator).map_err(|e| BootstrapError::InvalidLocator {
            locator: locator.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(url))
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Raw `key=value` segments of the query, in order
    fn segments(&self) -> impl Iterator<Item = (&str, &str)> {
        self.url
            .query()
            .unwrap_or_default()
            .split('&')
            .filter(|s| !s.is_empty())
            .map(|s| s.split_once('=').unwrap_or((s, "")))
    }
}

impl ContextSource for UrlContextSource {
    fn raw_param(&self, param: &str) -> Option<String> {
        self.segments()
            .find(|(key, _)| *key == param)
            .map(|(_, value)| value.to_string())
    }

    fn remove_param(&mut self, param: &str) {
        if self.raw_param(param).is_none() {
            return;
        }
        // Rebuild from raw segments so the remaining params keep their exact encoding
        let kept: Vec<String> = self
            .url
            .query()
            .unwrap_or_default()
            .split('&')
            .filter(|s| !s.is_empty() && s.split_once('=').map_or(*s, |(k, _)| k) != param)
            .map(str::to_string)
            .collect();

        if kept.is_empty() {
            self.url.set_query(None);
        } else {
            self.url.set_query(Some(&kept.join("&")));
        }
    }
}
