use serde::Serialize;

use crate::calendar::{CalendarMonth, ItemsByDate};
use crate::storage::DateRange;

use super::rows::{flatten_export_rows, format_bound, ExportRow, EXPORT_HEADERS};

/// Program name used when none is configured.
pub const DEFAULT_PROGRAM_NAME: &str = "Program";

/// Which part of the calendar is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    Month(CalendarMonth),
    All,
}

impl ExportScope {
    /// Message shown instead of an export when there is nothing in scope.
    pub fn empty_message(&self) -> &'static str {
        match self {
            ExportScope::Month(_) => "No items to export for this month.",
            ExportScope::All => "No items to export.",
        }
    }
}

/// Everything a sink needs to lay out one export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub title_line: String,
    pub date_line: String,
    pub headers: [&'static str; 4],
    pub rows: Vec<ExportRow>,
    /// Download name for the paginated document.
    pub file_name: String,
}

/// Result of preparing an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Ready(ExportDocument),
    /// Nothing in scope. Informational, not a failure.
    Empty { message: &'static str },
}

/// Prepares the export of `items` for `scope`.
///
/// Month exports are headed with the month's first and last day. Exports
/// of everything are headed with the earliest and latest exported date.
pub fn build_export_document(
    scope: ExportScope,
    items: &ItemsByDate,
    program_name: &str,
) -> ExportOutcome {
    let table = flatten_export_rows(items);
    if table.is_empty() {
        return ExportOutcome::Empty {
            message: scope.empty_message(),
        };
    }

    let program = match program_name.trim() {
        "" => DEFAULT_PROGRAM_NAME,
        name => name,
    };

    let (min_label, max_label, suffix) = match scope {
        ExportScope::Month(month) => {
            let range = month.range();
            (
                format_bound(Some(range.start)),
                format_bound(Some(range.end)),
                month.compact(),
            )
        }
        ExportScope::All => {
            let suffix = match (table.min_date, table.max_date) {
                (Some(min), Some(max)) => {
                    format!("{}-{}", DateRange::compact(min), DateRange::compact(max))
                }
                _ => String::new(),
            };
            (table.min_label(), table.max_label(), suffix)
        }
    };

    ExportOutcome::Ready(ExportDocument {
        title_line: format!("{} INDICATIVE CALENDAR", program.to_uppercase()),
        date_line: format!("{min_label} - {max_label}"),
        headers: EXPORT_HEADERS,
        rows: table.rows,
        file_name: format!("{}-indicative-{suffix}.pdf", file_stem(program)),
    })
}

/// Lowercases the program name and joins its words with dashes.
fn file_stem(program: &str) -> String {
    program
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}
