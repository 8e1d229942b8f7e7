//! Background tasks and scheduled jobs.
//!
//! Each submodule provides a long-running async function intended to be
//! spawned via `tokio::spawn`. All tasks accept a [`CancellationToken`]
//! for graceful shutdown and publish their latest state on a
//! `tokio::sync::watch` channel so handlers never block on recomputation.

pub mod pipeline_health;
pub mod queue_feed;
