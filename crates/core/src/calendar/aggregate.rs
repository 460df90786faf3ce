//! Builds calendar-cell items out of normalized entries.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Serialize;

use super::sorting::sort_items_within_day;
use super::status::aggregate_status;
use super::types::{CalendarEntry, CalendarItem, GroupedItem, ItemBase, SingleItem};

/// Calendar items indexed by the day they are shown on.
///
/// Days iterate in ascending order; items inside a day are already sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ItemsByDate(BTreeMap<NaiveDate, Vec<CalendarItem>>);

impl ItemsByDate {
    /// Returns the items shown on `day`.
    pub fn get(&self, day: NaiveDate) -> &[CalendarItem] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterates over days that have at least one item.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<CalendarItem>)> {
        self.0.iter()
    }

    /// Iterates over every item, day by day.
    pub fn items(&self) -> impl Iterator<Item = &CalendarItem> {
        self.0.values().flatten()
    }

    /// Number of days with items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Formats a day the way item keys and JSON maps spell it.
pub fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Groups entries into per-day calendar items.
///
/// Entries without an effective date are skipped. Grouped entries sharing
/// a day, intervention, subtitle and coordinator collapse into a single
/// item; every other entry becomes its own item.
pub fn build_items_by_date(entries: &[CalendarEntry], tz: &Tz) -> ItemsByDate {
    let mut days: BTreeMap<NaiveDate, Vec<CalendarItem>> = BTreeMap::new();
    // Merge key to position within its day. Keys embed the day.
    let mut merge_index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let Some(date) = entry.effective_date() else {
            continue;
        };
        let day = date.with_timezone(tz).date_naive();
        let day_items = days.entry(day).or_default();

        if !entry.entry_type.is_grouped() {
            day_items.push(CalendarItem::Single(SingleItem {
                key: format!("{}|S|{}", day_key(day), entry.id),
                date,
                base: ItemBase::from_entry(entry),
                participant: entry.participant(),
                entry: entry.clone(),
            }));
            continue;
        }

        let key = format!(
            "{}|G|{}|{}|{}",
            day_key(day),
            entry.intervention_id,
            entry.subtitle.as_deref().unwrap_or(""),
            entry.coordinator_id.as_deref().unwrap_or(""),
        );

        match merge_index.get(&key) {
            Some(&index) => {
                if let Some(CalendarItem::Grouped(item)) = day_items.get_mut(index) {
                    item.participants.push(entry.participant());
                    item.entries.push(entry.clone());
                    item.base.status = aggregate_status(item.entries.iter().map(|e| e.status));
                }
            }
            None => {
                merge_index.insert(key.clone(), day_items.len());
                day_items.push(CalendarItem::Grouped(GroupedItem {
                    key,
                    date,
                    base: ItemBase::from_entry(entry),
                    participants: vec![entry.participant()],
                    entries: vec![entry.clone()],
                }));
            }
        }
    }

    // Positions in merge_index are stale from here on.
    for items in days.values_mut() {
        sort_items_within_day(items);
    }

    ItemsByDate(days)
}
