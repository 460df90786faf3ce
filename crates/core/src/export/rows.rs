use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{ItemsByDate, DEFAULT_TITLE};

/// Placeholder for an absent cell or date bound.
pub const EMPTY_CELL: &str = "—";

/// Column headers, in output order.
pub const EXPORT_HEADERS: [&str; 4] = [
    "Intervention",
    "Area Of Support",
    "Number Of Participants",
    "Implementation Date",
];

/// One line of the exported table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub intervention_title: String,
    pub area_of_support: String,
    pub participant_count: usize,
    pub implementation_date: NaiveDate,
}

impl ExportRow {
    /// Returns the cells in [`EXPORT_HEADERS`] order.
    pub fn cells(&self) -> [String; 4] {
        [
            self.intervention_title.clone(),
            self.area_of_support.clone(),
            self.participant_count.to_string(),
            self.implementation_date.format("%Y-%m-%d").to_string(),
        ]
    }
}

/// Flattened rows plus the span of dates they cover.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportTable {
    pub rows: Vec<ExportRow>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

impl ExportTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Formats the lower date bound, or the placeholder when there are no rows.
    pub fn min_label(&self) -> String {
        format_bound(self.min_date)
    }

    /// Formats the upper date bound, or the placeholder when there are no rows.
    pub fn max_label(&self) -> String {
        format_bound(self.max_date)
    }
}

pub(crate) fn format_bound(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| EMPTY_CELL.to_string())
}

/// Flattens calendar items into table rows ordered by date, then title.
pub fn flatten_export_rows(items: &ItemsByDate) -> ExportTable {
    let mut table = ExportTable::default();

    for (day, day_items) in items.iter() {
        for item in day_items {
            let base = item.base();
            table.rows.push(ExportRow {
                intervention_title: base
                    .intervention_title
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                area_of_support: base
                    .area_of_support
                    .clone()
                    .unwrap_or_else(|| EMPTY_CELL.to_string()),
                participant_count: item.participant_count(),
                implementation_date: *day,
            });

            table.min_date = Some(table.min_date.map_or(*day, |min| min.min(*day)));
            table.max_date = Some(table.max_date.map_or(*day, |max| max.max(*day)));
        }
    }

    table.rows.sort_by(|a, b| {
        a.implementation_date
            .cmp(&b.implementation_date)
            .then_with(|| a.intervention_title.cmp(&b.intervention_title))
    });

    table
}
