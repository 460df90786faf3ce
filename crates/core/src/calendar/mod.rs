mod aggregate;
mod document;
mod error;
mod fetch;
mod mock_data;
mod month;
mod normalize;
mod operations;
mod request;
mod sorting;
mod status;
mod types;
mod view;
mod viewer;

pub use aggregate::{build_items_by_date, day_key, ItemsByDate};
pub use document::EntryDocument;
pub use error::CalendarError;
pub use fetch::{fetch_all, fetch_window, FetchError, FetchOutcome};
pub use mock_data::generate_seed_documents;
pub use month::CalendarMonth;
pub use normalize::{deserialize_lenient_timestamp, normalize_timestamp, RawTimestamp};
pub use operations::{dedup_by_id, filter_by_tenant, normalize_documents};
pub use request::{RequestTicket, RequestTracker};
pub use sorting::{cell_preview, sort_items_within_day, CellPreview, CELL_ITEM_LIMIT};
pub use status::{aggregate_status, EntryStatus};
pub use types::{
    CalendarEntry, CalendarItem, EntryType, GroupedItem, ItemBase, ParticipantRef, SingleItem,
    DEFAULT_TITLE,
};
pub use view::{LoadStatus, MonthSnapshot, MonthView};
pub use viewer::{Role, Viewer};
