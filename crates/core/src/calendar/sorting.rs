use std::cmp::Ordering;

use super::types::CalendarItem;

/// Maximum number of items a calendar cell shows before collapsing the rest.
pub const CELL_ITEM_LIMIT: usize = 3;

/// Orders a day's items by effective timestamp, then by title.
///
/// Titles compare case-sensitively, with an absent title sorting as the
/// empty string. The sort is stable, so fully tied items keep discovery
/// order.
pub fn sort_items_within_day(items: &mut [CalendarItem]) {
    items.sort_by(compare_items);
}

fn compare_items(a: &CalendarItem, b: &CalendarItem) -> Ordering {
    a.date()
        .cmp(&b.date())
        .then_with(|| a.title().cmp(b.title()))
}

/// What a calendar cell renders for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPreview<'a> {
    pub visible: &'a [CalendarItem],
    /// Items hidden behind a `+N more` marker.
    pub more: usize,
}

/// Splits a day's sorted items into the visible ones and the overflow count.
pub fn cell_preview(items: &[CalendarItem]) -> CellPreview<'_> {
    let shown = items.len().min(CELL_ITEM_LIMIT);
    CellPreview {
        visible: &items[..shown],
        more: items.len() - shown,
    }
}
