use std::sync::Arc;

use tokio::sync::watch;

use crate::background::pipeline_health::PipelineSnapshot;
use crate::background::queue_feed::QueueSnapshot;
use crate::config::ServerConfig;
use feedwatch_monitor::MonitorClient;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: feedwatch_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Client for the external pipeline process (force checks, activity).
    pub monitor: Arc<MonitorClient>,
    /// Latest queue snapshot maintained by the change-feed task.
    pub queue_feed: watch::Receiver<QueueSnapshot>,
    /// Latest pipeline health maintained by the poll task.
    pub pipeline_health: watch::Receiver<PipelineSnapshot>,
}
