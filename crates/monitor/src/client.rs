//! REST client for the pipeline's health, activity, and trigger endpoints.

use std::collections::BTreeMap;
use std::time::Duration;

use feedwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// Per-request timeout. Probes run on a short interval, so a hung
/// pipeline must not stall the poll loop.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall pipeline health as self-reported by `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
    /// Also used by callers when the probe itself fails.
    #[serde(other)]
    Unknown,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineHealth {
    pub status: HealthState,
    /// Named boolean subchecks (database, disk space, ...).
    #[serde(default)]
    pub checks: Option<BTreeMap<String, bool>>,
    /// Human-readable descriptions of whatever is currently wrong.
    #[serde(default)]
    pub issues: Option<Vec<String>>,
}

/// One entry of `GET /api/activity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: DbId,
    pub event_type: String,
    pub message: String,
    #[serde(default)]
    pub source_name: Option<String>,
    pub created_at: Timestamp,
}

/// Envelope of `GET /api/activity`.
#[derive(Debug, Deserialize)]
struct ActivityResponse {
    activity: Vec<ActivityEntry>,
}

/// Errors from the pipeline monitor client.
///
/// [`MonitorError::Api`] carries the pipeline's own response and is kept
/// distinct from transport failures so the force-check handler can report
/// "the trigger failed" rather than a generic network error.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// The HTTP request itself failed (network, DNS, timeout).
    #[error("Pipeline request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The pipeline returned a non-2xx status.
    #[error("Pipeline API error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// HTTP client for a single pipeline instance.
pub struct MonitorClient {
    client: reqwest::Client,
    base_url: String,
}

impl MonitorClient {
    /// Create a client for the pipeline at `base_url`
    /// (e.g. `http://localhost:8001`).
    pub fn new(base_url: impl Into<String>) -> Self {
        // Construction happens once at startup; a failure here is a
        // misconfigured TLS backend and should fail fast.
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe `GET /health`.
    pub async fn health(&self) -> Result<PipelineHealth, MonitorError> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::check_status(response).await?.json().await.map_err(Into::into)
    }

    /// Fetch the most recent pipeline activity entries.
    pub async fn activity(&self, limit: u32) -> Result<Vec<ActivityEntry>, MonitorError> {
        let url = format!("{}/api/activity?limit={limit}", self.base_url);
        let response = self.client.get(&url).send().await?;
        let envelope: ActivityResponse = Self::check_status(response).await?.json().await?;
        Ok(envelope.activity)
    }

    /// Ask the pipeline to check a source immediately, out of band of its
    /// normal schedule. Success only acknowledges the trigger; new items
    /// arrive later through the store.
    pub async fn force_check(&self, source_id: DbId) -> Result<(), MonitorError> {
        let url = format!("{}/api/sources/{source_id}/check", self.base_url);
        let response = self.client.post(&url).send().await?;
        Self::check_status(response).await?;

        tracing::info!(source_id, "Force check triggered");
        Ok(())
    }

    /// Turn a non-2xx response into [`MonitorError::Api`] with the body
    /// preserved for diagnostics.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, MonitorError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(MonitorError::Api {
            status: status.as_u16(),
            body,
        })
    }
}
