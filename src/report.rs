//! Conversation report export
//!
//! A report is rendered remotely from a point-in-time snapshot of the settled
//! transcript and saved locally under a brand-prefixed, path-safe filename.

mod filename;
mod http;

pub use filename::report_filename;
pub use http::HttpReportGenerator;

use crate::session::{Message, SessionState};
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report service returned HTTP {0}")]
    Status(u16),
    #[error("report request failed: {0}")]
    Network(String),
    #[error("failed to write report to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for ReportError {
    fn from(e: reqwest::Error) -> Self {
        ReportError::Network(e.to_string())
    }
}

/// Payload sent to the report service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationExport {
    /// Settled messages only; the typing placeholder is never exported
    pub messages: Vec<Message>,
    pub generated_at: DateTime<Utc>,
}

impl ConversationExport {
    pub fn from_state(state: &SessionState, generated_at: DateTime<Utc>) -> Self {
        Self {
            messages: state.settled_messages().cloned().collect(),
            generated_at,
        }
    }
}

/// Renders an export into a document
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    async fn generate(&self, export: &ConversationExport) -> Result<Vec<u8>, ReportError>;
}

/// Render `export` and write it into `dir`, returning the written path
pub async fn save_report(
    generator: &dyn ReportGenerator,
    export: &ConversationExport,
    brand: &str,
    dir: &Path,
) -> Result<PathBuf, ReportError> {
    let bytes = generator.generate(export).await?;
    let path = dir.join(report_filename(brand, &export.generated_at.with_timezone(&Local)));

    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|source| ReportError::Io {
            path: path.clone(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        messages = export.messages.len(),
        "Report saved"
    );
    Ok(path)
}
