//! Report generator backed by the report service

use super::{ConversationExport, ReportError, ReportGenerator};
use async_trait::async_trait;
use reqwest::{Client, Url};

/// Talks to `POST {base}/generate-report`
pub struct HttpReportGenerator {
    client: Client,
    url: Url,
}

impl HttpReportGenerator {
    pub fn new(client: Client, base_url: &Url) -> Result<Self, ReportError> {
        let url = base_url
            .join("generate-report")
            .map_err(|e| ReportError::Network(format!("Invalid API URL {base_url}: {e}")))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl ReportGenerator for HttpReportGenerator {
    async fn generate(&self, export: &ConversationExport) -> Result<Vec<u8>, ReportError> {
        tracing::debug!(url = %self.url, messages = export.messages.len(), "Requesting report");

        let response = self.client.post(self.url.clone()).json(export).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}
