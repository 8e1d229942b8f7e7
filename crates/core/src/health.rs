//! Liveness and health classification for the pipeline worker and sources.
//!
//! Both classifiers are pure functions of their inputs plus an injected
//! `now`, so the bucket boundaries can be tested exactly.

use serde::Serialize;

use crate::types::Timestamp;

/// A heartbeat younger than this is considered actively online.
pub const ONLINE_WITHIN_MINUTES: i64 = 5;

/// A heartbeat younger than this (but older than the online window) is idle.
/// Anything older is offline.
pub const IDLE_WITHIN_MINUTES: i64 = 60;

/// Consecutive failure count at which a degraded source escalates to a
/// stronger visual tier.
pub const DEGRADED_ESCALATION_THRESHOLD: i32 = 2;

// ---------------------------------------------------------------------------
// Worker liveness
// ---------------------------------------------------------------------------

/// Derived liveness of the pipeline worker process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerState {
    Online,
    Idle,
    Offline,
    /// No heartbeat row exists, or the probe itself failed.
    Unknown,
}

impl WorkerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerState::Online => "online",
            WorkerState::Idle => "idle",
            WorkerState::Offline => "offline",
            WorkerState::Unknown => "unknown",
        }
    }
}

/// Classify the worker from its most recent heartbeat.
///
/// `None` means no heartbeat row was found at all. A heartbeat in the
/// future (clock skew) counts as age zero.
pub fn classify_heartbeat(last_heartbeat: Option<Timestamp>, now: Timestamp) -> WorkerState {
    let Some(beat) = last_heartbeat else {
        return WorkerState::Unknown;
    };

    let age_minutes = (now - beat).num_minutes().max(0);
    if age_minutes < ONLINE_WITHIN_MINUTES {
        WorkerState::Online
    } else if age_minutes < IDLE_WITHIN_MINUTES {
        WorkerState::Idle
    } else {
        WorkerState::Offline
    }
}

// ---------------------------------------------------------------------------
// Source health
// ---------------------------------------------------------------------------

/// Health state of a single source, derived from its failure-tracking fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceState {
    Healthy,
    Degraded,
    /// Scheduled checks are suspended until `circuit_breaker_until` passes.
    CircuitBroken,
}

/// The failure-tracking fields of a source that feed the classifier.
#[derive(Debug, Clone, Default)]
pub struct SourceSignals<'a> {
    pub circuit_breaker_until: Option<Timestamp>,
    pub consecutive_failures: i32,
    pub last_error: Option<&'a str>,
    pub last_error_at: Option<Timestamp>,
    pub last_success_at: Option<Timestamp>,
}

/// Classified health plus a human-readable detail line.
#[derive(Debug, Clone, Serialize)]
pub struct SourceHealth {
    pub state: SourceState,
    /// Degraded sources escalate once the failure streak reaches
    /// [`DEGRADED_ESCALATION_THRESHOLD`].
    pub escalated: bool,
    pub detail: String,
}

/// Classify a source. Circuit breaker takes precedence over the failure
/// streak, which takes precedence over the healthy default.
pub fn classify_source(signals: &SourceSignals<'_>, now: Timestamp) -> SourceHealth {
    if let Some(until) = signals.circuit_breaker_until {
        if until > now {
            let last_error = signals.last_error.unwrap_or("unknown");
            return SourceHealth {
                state: SourceState::CircuitBroken,
                escalated: true,
                detail: format!(
                    "Circuit breaker active until {}. Last error: {last_error}",
                    until.format("%Y-%m-%d %H:%M:%S UTC")
                ),
            };
        }
    }

    if signals.consecutive_failures > 0 {
        let mut detail = signals.last_error.unwrap_or("Unknown error").to_string();
        if let Some(at) = signals.last_error_at {
            detail = format!("{detail} (at {})", at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        return SourceHealth {
            state: SourceState::Degraded,
            escalated: signals.consecutive_failures >= DEGRADED_ESCALATION_THRESHOLD,
            detail,
        };
    }

    let detail = match signals.last_success_at {
        Some(at) => format!("Last success: {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => "No recent activity".to_string(),
    };
    SourceHealth {
        state: SourceState::Healthy,
        escalated: false,
        detail,
    }
}
