//! Polls the pipeline process for health status.
//!
//! Probe failures are never surfaced as errors to handlers. Before the first
//! successful probe the state is `Unknown` (the pipeline may simply not be
//! up yet); after at least one success, a failed probe means `Unhealthy`.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use feedwatch_core::types::Timestamp;
use feedwatch_monitor::{HealthState, MonitorClient};

/// How often the pipeline is probed.
const PROBE_INTERVAL: Duration = Duration::from_secs(30);

/// Point-in-time view of pipeline health.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSnapshot {
    /// Overall state as reported by the pipeline, or derived from probe
    /// failures.
    pub state: HealthState,
    /// Per-component check results, when the pipeline reports them.
    pub checks: Option<std::collections::BTreeMap<String, bool>>,
    /// Human-readable issue list, when the pipeline reports one.
    pub issues: Option<Vec<String>>,
    /// When the pipeline last answered a probe. `None` until the first
    /// successful probe.
    pub probed_at: Option<Timestamp>,
}

impl Default for PipelineSnapshot {
    fn default() -> Self {
        Self {
            state: HealthState::Unknown,
            checks: None,
            issues: None,
            probed_at: None,
        }
    }
}

/// Spawn the pipeline health poll task.
pub fn spawn(
    monitor: Arc<MonitorClient>,
    cancel: CancellationToken,
) -> (
    watch::Receiver<PipelineSnapshot>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, rx) = watch::channel(PipelineSnapshot::default());
    let handle = tokio::spawn(run(monitor, tx, cancel));
    (rx, handle)
}

async fn run(
    monitor: Arc<MonitorClient>,
    tx: watch::Sender<PipelineSnapshot>,
    cancel: CancellationToken,
) {
    tracing::info!(
        interval_secs = PROBE_INTERVAL.as_secs(),
        "Pipeline health poll started"
    );

    let mut interval = tokio::time::interval(PROBE_INTERVAL);
    let mut seen_success = false;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Pipeline health poll stopping");
                break;
            }
            _ = interval.tick() => {
                match monitor.health().await {
                    Ok(health) => {
                        seen_success = true;
                        tx.send_replace(PipelineSnapshot {
                            state: health.status,
                            checks: health.checks,
                            issues: health.issues,
                            probed_at: Some(chrono::Utc::now()),
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Pipeline health probe failed");
                        let state = if seen_success {
                            HealthState::Unhealthy
                        } else {
                            HealthState::Unknown
                        };
                        let probed_at = tx.borrow().probed_at;
                        tx.send_replace(PipelineSnapshot {
                            state,
                            checks: None,
                            issues: None,
                            probed_at,
                        });
                    }
                }
            }
        }
    }
}
