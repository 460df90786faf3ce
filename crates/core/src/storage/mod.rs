mod error;
mod http_mapping;
#[cfg(test)]
pub(crate) mod testing;
mod traits;
mod types;

pub use error::{DateRangeError, RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use traits::EntryRepository;
pub use types::{DateField, DateRange, StoredDocument, TimeWindow};
