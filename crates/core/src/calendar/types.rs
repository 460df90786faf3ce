use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::document::EntryDocument;
use super::normalize::normalize_timestamp;
use super::status::EntryStatus;

/// Title used when an item has none.
pub const DEFAULT_TITLE: &str = "Intervention";

/// How an entry behaves during aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// One participant, never merged.
    #[default]
    Singular,
    /// One occurrence shared by several participants.
    Grouped,
}

impl EntryType {
    /// Parses a stored type. Anything other than `grouped` is singular.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("grouped") => EntryType::Grouped,
            _ => EntryType::Singular,
        }
    }

    /// Returns true for grouped entries.
    pub fn is_grouped(&self) -> bool {
        matches!(self, EntryType::Grouped)
    }
}

/// A normalized indicative calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub id: String,
    pub participant_id: String,
    pub beneficiary_name: Option<String>,
    pub intervention_id: String,
    pub intervention_title: Option<String>,
    pub area_of_support: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub target_date: Option<DateTime<Utc>>,
    pub implementation_date: Option<DateTime<Utc>>,
    pub is_recurring: bool,
    pub frequency: Option<String>,
    pub subtitle: Option<String>,
    pub coordinator_id: Option<String>,
    pub coordinator_name: Option<String>,
    pub company_code: Option<String>,
    pub status: EntryStatus,
}

impl CalendarEntry {
    /// Creates a singular entry with no dates.
    pub fn singular(
        id: impl Into<String>,
        participant_id: impl Into<String>,
        intervention_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            participant_id: participant_id.into(),
            beneficiary_name: None,
            intervention_id: intervention_id.into(),
            intervention_title: None,
            area_of_support: None,
            entry_type: EntryType::Singular,
            target_date: None,
            implementation_date: None,
            is_recurring: false,
            frequency: None,
            subtitle: None,
            coordinator_id: None,
            coordinator_name: None,
            company_code: None,
            status: EntryStatus::Planned,
        }
    }

    /// Creates a grouped entry with no dates.
    pub fn grouped(
        id: impl Into<String>,
        participant_id: impl Into<String>,
        intervention_id: impl Into<String>,
    ) -> Self {
        Self {
            entry_type: EntryType::Grouped,
            ..Self::singular(id, participant_id, intervention_id)
        }
    }

    /// Normalizes a stored document.
    ///
    /// `store_id` is used when the document body carries no `id` of its own.
    pub fn from_document(store_id: &str, document: &EntryDocument) -> Self {
        Self {
            id: document
                .id
                .clone()
                .unwrap_or_else(|| store_id.to_string()),
            participant_id: document.participant_id.clone().unwrap_or_default(),
            beneficiary_name: document.beneficiary_name.clone(),
            intervention_id: document.intervention_id.clone().unwrap_or_default(),
            intervention_title: document.intervention_title.clone(),
            area_of_support: document.area_of_support.clone(),
            entry_type: EntryType::parse(document.entry_type.as_deref()),
            target_date: normalize_timestamp(document.target_date.as_ref()),
            implementation_date: normalize_timestamp(document.implementation_date.as_ref()),
            is_recurring: document.is_recurring,
            frequency: document.frequency.clone(),
            subtitle: document.subtitle.clone(),
            coordinator_id: document.coordinator_id.clone(),
            coordinator_name: document.coordinator_name.clone(),
            company_code: document.company_code.clone(),
            status: EntryStatus::parse(document.status.as_deref()),
        }
    }

    /// The date used for scheduling: implementation date, else target date.
    pub fn effective_date(&self) -> Option<DateTime<Utc>> {
        self.implementation_date.or(self.target_date)
    }

    /// The calendar day of the effective date in `tz`.
    pub fn effective_day(&self, tz: &Tz) -> Option<NaiveDate> {
        self.effective_date()
            .map(|date| date.with_timezone(tz).date_naive())
    }

    /// The participant this entry is for.
    pub fn participant(&self) -> ParticipantRef {
        ParticipantRef {
            id: self.participant_id.clone(),
            name: self.beneficiary_name.clone(),
        }
    }

    pub fn with_beneficiary_name(mut self, name: impl Into<String>) -> Self {
        self.beneficiary_name = Some(name.into());
        self
    }

    pub fn with_intervention_title(mut self, title: impl Into<String>) -> Self {
        self.intervention_title = Some(title.into());
        self
    }

    pub fn with_area_of_support(mut self, area: impl Into<String>) -> Self {
        self.area_of_support = Some(area.into());
        self
    }

    pub fn with_target_date(mut self, date: DateTime<Utc>) -> Self {
        self.target_date = Some(date);
        self
    }

    pub fn with_implementation_date(mut self, date: DateTime<Utc>) -> Self {
        self.implementation_date = Some(date);
        self
    }

    /// Marks the entry as recurring with an optional frequency label.
    pub fn with_recurrence(mut self, frequency: Option<&str>) -> Self {
        self.is_recurring = true;
        self.frequency = frequency.map(str::to_string);
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Sets the coordinator id and, optionally, the display name.
    pub fn with_coordinator(mut self, id: impl Into<String>, name: Option<&str>) -> Self {
        self.coordinator_id = Some(id.into());
        self.coordinator_name = name.map(str::to_string);
        self
    }

    pub fn with_company_code(mut self, code: impl Into<String>) -> Self {
        self.company_code = Some(code.into());
        self
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }
}

/// A beneficiary attending an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRef {
    pub id: String,
    pub name: Option<String>,
}

/// Display fields shared by both item variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBase {
    pub intervention_id: String,
    pub intervention_title: Option<String>,
    pub area_of_support: Option<String>,
    pub subtitle: Option<String>,
    pub coordinator_id: Option<String>,
    pub coordinator_name: Option<String>,
    pub is_recurring: bool,
    pub frequency: Option<String>,
    pub status: EntryStatus,
}

impl ItemBase {
    /// Copies the display fields of an entry.
    pub fn from_entry(entry: &CalendarEntry) -> Self {
        Self {
            intervention_id: entry.intervention_id.clone(),
            intervention_title: entry.intervention_title.clone(),
            area_of_support: entry.area_of_support.clone(),
            subtitle: entry.subtitle.clone(),
            coordinator_id: entry.coordinator_id.clone(),
            coordinator_name: entry.coordinator_name.clone(),
            is_recurring: entry.is_recurring,
            frequency: entry.frequency.clone(),
            status: entry.status,
        }
    }
}

/// Several grouped entries merged into one occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedItem {
    pub key: String,
    /// Effective date of the first contributing entry.
    pub date: DateTime<Utc>,
    pub base: ItemBase,
    pub participants: Vec<ParticipantRef>,
    pub entries: Vec<CalendarEntry>,
}

/// A single entry shown on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleItem {
    pub key: String,
    pub date: DateTime<Utc>,
    pub base: ItemBase,
    pub participant: ParticipantRef,
    pub entry: CalendarEntry,
}

/// One tile in a calendar cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CalendarItem {
    Grouped(GroupedItem),
    Single(SingleItem),
}

impl CalendarItem {
    /// Returns the identity string of this item within one aggregation pass.
    pub fn key(&self) -> &str {
        match self {
            CalendarItem::Grouped(item) => &item.key,
            CalendarItem::Single(item) => &item.key,
        }
    }

    /// Returns the effective date this item is scheduled at.
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            CalendarItem::Grouped(item) => item.date,
            CalendarItem::Single(item) => item.date,
        }
    }

    pub fn base(&self) -> &ItemBase {
        match self {
            CalendarItem::Grouped(item) => &item.base,
            CalendarItem::Single(item) => &item.base,
        }
    }

    /// Returns the (aggregate) status of this item.
    pub fn status(&self) -> EntryStatus {
        self.base().status
    }

    /// Returns the intervention title, or an empty string.
    pub fn title(&self) -> &str {
        self.base().intervention_title.as_deref().unwrap_or("")
    }

    /// Returns the number of participants attending.
    pub fn participant_count(&self) -> usize {
        match self {
            CalendarItem::Grouped(item) => item.participants.len(),
            CalendarItem::Single(_) => 1,
        }
    }

    /// Returns true if this is a grouped item.
    pub fn is_grouped(&self) -> bool {
        matches!(self, CalendarItem::Grouped(_))
    }

    /// Returns the text shown on the calendar tile.
    ///
    /// Falls back from title to area of support to a generic label, then
    /// appends the subtitle and, for grouped items, the participant count.
    pub fn label(&self) -> String {
        let base = self.base();
        let mut label = base
            .intervention_title
            .as_deref()
            .or(base.area_of_support.as_deref())
            .unwrap_or(DEFAULT_TITLE)
            .to_string();

        if let Some(subtitle) = &base.subtitle {
            label.push_str(" — ");
            label.push_str(subtitle);
        }
        if let CalendarItem::Grouped(item) = self {
            label.push_str(&format!(" ({})", item.participants.len()));
        }

        label
    }
}
