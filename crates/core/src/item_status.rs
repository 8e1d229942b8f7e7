//! Content item status state machine and display mapping.
//!
//! Items are stored with a text status so the dashboard tolerates values
//! written by newer pipeline versions; [`ItemStatus`] covers the canonical
//! set and [`style_for`] falls back to an explicit "unrecognized" tier
//! rather than failing on anything outside it.

use serde::{Deserialize, Serialize};

/// Canonical processing states for a content item.
///
/// Forward transitions on the processing path (`pending` through
/// `complete`) are executed by the external pipeline; the dashboard only
/// issues `skip` and `requeue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Archiving,
    Transcribing,
    Summarizing,
    Complete,
    Failed,
    Skipped,
}

/// Canonical display order for the queue histogram.
pub const DISPLAY_ORDER: [ItemStatus; 7] = [
    ItemStatus::Pending,
    ItemStatus::Archiving,
    ItemStatus::Transcribing,
    ItemStatus::Summarizing,
    ItemStatus::Complete,
    ItemStatus::Failed,
    ItemStatus::Skipped,
];

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Archiving => "archiving",
            ItemStatus::Transcribing => "transcribing",
            ItemStatus::Summarizing => "summarizing",
            ItemStatus::Complete => "complete",
            ItemStatus::Failed => "failed",
            ItemStatus::Skipped => "skipped",
        }
    }

    /// Parse a stored status string. Returns `None` for values outside the
    /// canonical set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ItemStatus::Pending),
            "archiving" => Some(ItemStatus::Archiving),
            "transcribing" => Some(ItemStatus::Transcribing),
            "summarizing" => Some(ItemStatus::Summarizing),
            "complete" => Some(ItemStatus::Complete),
            "failed" => Some(ItemStatus::Failed),
            "skipped" => Some(ItemStatus::Skipped),
            _ => None,
        }
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemStatus::parse(s).ok_or_else(|| format!("Unknown item status '{s}'"))
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requeue is offered only from the two terminal-with-exit states.
pub fn can_requeue(status: &str) -> bool {
    matches!(
        ItemStatus::parse(status),
        Some(ItemStatus::Failed) | Some(ItemStatus::Skipped)
    )
}

/// Skip is offered only before processing starts.
pub fn can_skip(status: &str) -> bool {
    matches!(ItemStatus::parse(status), Some(ItemStatus::Pending))
}

// ---------------------------------------------------------------------------
// Display descriptors
// ---------------------------------------------------------------------------

/// Display descriptor for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusStyle {
    pub label: &'static str,
    /// Color token understood by the frontend theme.
    pub color: &'static str,
}

/// Fallback tier for status values outside the canonical set.
pub const UNRECOGNIZED_STYLE: StatusStyle = StatusStyle {
    label: "unrecognized",
    color: "gray",
};

/// Map a stored status string to its display descriptor.
pub fn style_for(status: &str) -> StatusStyle {
    match ItemStatus::parse(status) {
        Some(ItemStatus::Pending) => StatusStyle {
            label: "pending",
            color: "yellow",
        },
        Some(ItemStatus::Archiving) => StatusStyle {
            label: "archiving",
            color: "blue",
        },
        Some(ItemStatus::Transcribing) => StatusStyle {
            label: "transcribing",
            color: "purple",
        },
        Some(ItemStatus::Summarizing) => StatusStyle {
            label: "summarizing",
            color: "indigo",
        },
        Some(ItemStatus::Complete) => StatusStyle {
            label: "complete",
            color: "green",
        },
        Some(ItemStatus::Failed) => StatusStyle {
            label: "failed",
            color: "red",
        },
        Some(ItemStatus::Skipped) => StatusStyle {
            label: "skipped",
            color: "gray",
        },
        None => UNRECOGNIZED_STYLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_canonical_set() {
        for status in DISPLAY_ORDER {
            assert_eq!(ItemStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(ItemStatus::parse("uploading"), None);
        assert_eq!(ItemStatus::parse(""), None);
        // Case-sensitive on purpose; the store writes lowercase.
        assert_eq!(ItemStatus::parse("Pending"), None);
    }

    #[test]
    fn test_requeue_only_from_failed_or_skipped() {
        assert!(can_requeue("failed"));
        assert!(can_requeue("skipped"));
        assert!(!can_requeue("pending"));
        assert!(!can_requeue("complete"));
        assert!(!can_requeue("archiving"));
        assert!(!can_requeue("nonsense"));
    }

    #[test]
    fn test_skip_only_from_pending() {
        assert!(can_skip("pending"));
        assert!(!can_skip("failed"));
        assert!(!can_skip("transcribing"));
        assert!(!can_skip("nonsense"));
    }

    #[test]
    fn test_unknown_status_gets_unrecognized_style() {
        assert_eq!(style_for("uploading"), UNRECOGNIZED_STYLE);
    }

    #[test]
    fn test_every_canonical_status_has_a_distinct_label() {
        for status in DISPLAY_ORDER {
            let style = style_for(status.as_str());
            assert_eq!(style.label, status.as_str());
            assert_ne!(style, UNRECOGNIZED_STYLE, "{status} must not fall back");
        }
    }
}
