//! Source types, toggleable flags, and the bulk-toggle policy.

use serde::{Deserialize, Serialize};

/// Kind of feed a source is monitored through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Rss,
    YoutubeChannel,
    Website,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Rss => "rss",
            SourceType::YoutubeChannel => "youtube_channel",
            SourceType::Website => "website",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rss" => Some(SourceType::Rss),
            "youtube_channel" => Some(SourceType::YoutubeChannel),
            "website" => Some(SourceType::Website),
            _ => None,
        }
    }
}

/// The boolean source columns the dashboard can toggle individually or
/// in bulk. The enum is the only path to a column name, which keeps the
/// dynamic `UPDATE` in the repository safe from injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFlag {
    Enabled,
    Aggregate,
    AutoArchive,
    AutoApprove,
}

impl SourceFlag {
    pub fn as_column(&self) -> &'static str {
        match self {
            SourceFlag::Enabled => "enabled",
            SourceFlag::Aggregate => "aggregate",
            SourceFlag::AutoArchive => "auto_archive",
            SourceFlag::AutoApprove => "auto_approve",
        }
    }
}

impl std::str::FromStr for SourceFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enabled" => Ok(SourceFlag::Enabled),
            "aggregate" => Ok(SourceFlag::Aggregate),
            "auto_archive" => Ok(SourceFlag::AutoArchive),
            "auto_approve" => Ok(SourceFlag::AutoApprove),
            _ => Err(format!("Unknown source flag '{s}'")),
        }
    }
}

/// Decide what a toggle-all should set the flag to: `true` unless every
/// source already has it on, in which case turn them all off.
///
/// An empty set vacuously counts as "all on" and yields `false`; the
/// subsequent update then affects zero rows.
pub fn bulk_toggle_target(values: impl IntoIterator<Item = bool>) -> bool {
    !values.into_iter().all(|v| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_flags_toggle_on() {
        assert!(bulk_toggle_target([true, true, false]));
    }

    #[test]
    fn test_all_on_toggles_off() {
        assert!(!bulk_toggle_target([true, true, true]));
    }

    #[test]
    fn test_all_off_toggles_on() {
        assert!(bulk_toggle_target([false, false]));
    }

    #[test]
    fn test_empty_set_toggles_off() {
        assert!(!bulk_toggle_target([]));
    }

    #[test]
    fn test_flag_column_names() {
        assert_eq!(SourceFlag::Enabled.as_column(), "enabled");
        assert_eq!(SourceFlag::AutoApprove.as_column(), "auto_approve");
        assert_eq!("auto_archive".parse::<SourceFlag>(), Ok(SourceFlag::AutoArchive));
        assert!("auto_transcribe".parse::<SourceFlag>().is_err());
    }

    #[test]
    fn test_source_type_parse() {
        assert_eq!(SourceType::parse("rss"), Some(SourceType::Rss));
        assert_eq!(
            SourceType::parse("youtube_channel"),
            Some(SourceType::YoutubeChannel)
        );
        assert_eq!(SourceType::parse("twitter"), None);
    }
}
