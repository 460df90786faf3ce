use std::fmt;

use serde::{Deserialize, Serialize};

/// Scheduling status of an entry or of an aggregated calendar item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Planned,
    Confirmed,
    Cancelled,
    /// Mixed statuses across a grouped item, or an unrecognized status.
    Processing,
}

impl EntryStatus {
    /// Parses a stored status string.
    ///
    /// Matching ignores case and surrounding whitespace. Absent or blank
    /// input is `Planned`; unrecognized text is `Processing`.
    pub fn parse(value: Option<&str>) -> Self {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return EntryStatus::Planned;
        };

        match value.to_lowercase().as_str() {
            "planned" => EntryStatus::Planned,
            "confirmed" => EntryStatus::Confirmed,
            "cancelled" => EntryStatus::Cancelled,
            _ => EntryStatus::Processing,
        }
    }

    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Planned => "planned",
            EntryStatus::Confirmed => "confirmed",
            EntryStatus::Cancelled => "cancelled",
            EntryStatus::Processing => "processing",
        }
    }

    /// Returns the badge style a calendar cell uses for this status.
    pub fn badge(&self) -> &'static str {
        match self {
            EntryStatus::Confirmed => "success",
            EntryStatus::Cancelled => "error",
            EntryStatus::Planned | EntryStatus::Processing => "processing",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combines the statuses of the entries behind one grouped item.
///
/// Identical statuses yield that status, any disagreement yields
/// `Processing`, and no statuses at all yields `Planned`.
pub fn aggregate_status<I>(statuses: I) -> EntryStatus
where
    I: IntoIterator<Item = EntryStatus>,
{
    let mut statuses = statuses.into_iter();
    let Some(first) = statuses.next() else {
        return EntryStatus::Planned;
    };

    if statuses.all(|status| status == first) {
        first
    } else {
        EntryStatus::Processing
    }
}
