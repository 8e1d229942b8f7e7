//! HTTP client for the external pipeline process.
//!
//! The pipeline exposes a health check, a recent-activity log, and a
//! force-check trigger. All three are polled/fired over plain REST; the
//! pipeline never pushes to us.

mod client;

pub use client::{
    ActivityEntry, HealthState, MonitorClient, MonitorError, PipelineHealth,
};
