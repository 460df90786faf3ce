use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::calendar::{normalize_timestamp, EntryDocument};

use super::DateRangeError;

/// Last representable millisecond of a day.
const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_milli_opt(23, 59, 59, 999) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// A date range with inclusive start and end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Creates a date range for an entire month.
    pub fn month(year: i32, month: u32) -> Result<Self, DateRangeError> {
        let start =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(DateRangeError::InvalidMonth {
                year,
                month,
            })?;

        // Last day of the month: first of next month minus a day.
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .and_then(|next| next.pred_opt())
        .ok_or(DateRangeError::InvalidMonth { year, month })?;

        Ok(Self { start, end })
    }

    /// Returns true if `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns every date in the range, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|day| *day <= self.end)
            .collect()
    }

    /// Expands the range to full-day instants in the given time zone.
    ///
    /// The window starts at local midnight of `start` and ends at the last
    /// millisecond of `end`.
    pub fn to_window(&self, tz: &Tz) -> TimeWindow {
        TimeWindow {
            start: local_start(tz, self.start.and_time(NaiveTime::MIN)),
            end: local_end(tz, self.end.and_time(END_OF_DAY)),
        }
    }

    /// Compact `YYYYMMDD` form of a single date, used in file names.
    pub fn compact(date: NaiveDate) -> String {
        format!("{:04}{:02}{:02}", date.year(), date.month(), date.day())
    }
}

/// Resolves a local wall-clock time to the earliest matching instant.
/// Times that fall in a DST gap move forward past the gap.
fn local_start(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + TimeDelta::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// Resolves a local wall-clock time to the latest matching instant.
/// Times that fall in a DST gap move backward before the gap.
fn local_end(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .latest()
        .or_else(|| tz.from_local_datetime(&(naive - TimeDelta::hours(1))).latest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// An inclusive window of instants, used for range queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Returns true if `instant` falls inside the window.
    ///
    /// Compared at millisecond precision, the resolution stored dates are
    /// indexed at, so sub-millisecond digits never decide membership.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let millis = instant.timestamp_millis();
        self.start.timestamp_millis() <= millis && millis <= self.end.timestamp_millis()
    }
}

/// The two date fields an entry can be scheduled by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateField {
    TargetDate,
    ImplementationDate,
}

impl DateField {
    /// Returns the document field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DateField::TargetDate => "targetDate",
            DateField::ImplementationDate => "implementationDate",
        }
    }
}

/// A document as held by the store: its store id plus its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub document: EntryDocument,
}

impl StoredDocument {
    /// Creates a stored document.
    pub fn new(id: impl Into<String>, document: EntryDocument) -> Self {
        Self {
            id: id.into(),
            document,
        }
    }

    /// Returns the normalized value of a date field, if usable.
    pub fn date(&self, field: DateField) -> Option<DateTime<Utc>> {
        let raw = match field {
            DateField::TargetDate => self.document.target_date.as_ref(),
            DateField::ImplementationDate => self.document.implementation_date.as_ref(),
        };
        normalize_timestamp(raw)
    }

    /// Returns the tenant key of the document.
    pub fn company_code(&self) -> Option<&str> {
        self.document.company_code.as_deref()
    }
}
