use chrono_tz::Tz;
use serde::Serialize;
use thiserror::Error;

use crate::storage::{DateField, DateRange, EntryRepository, RepositoryError};

use super::operations::{dedup_by_id, filter_by_tenant, normalize_documents};
use super::types::CalendarEntry;
use super::viewer::Viewer;

/// Why a fetch produced no entries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Failed to load calendar entries: {0}")]
    Repository(#[from] RepositoryError),
}

/// Entries returned by a fetch, plus the failure that emptied them.
///
/// A failed fetch always carries an empty entry list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchOutcome {
    pub entries: Vec<CalendarEntry>,
    #[serde(serialize_with = "serialize_error")]
    pub error: Option<FetchError>,
}

impl FetchOutcome {
    fn ok(entries: Vec<CalendarEntry>) -> Self {
        Self {
            entries,
            error: None,
        }
    }

    fn failed(error: FetchError) -> Self {
        Self {
            entries: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }
}

fn serialize_error<S>(error: &Option<FetchError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match error {
        Some(error) => serializer.collect_str(error),
        None => serializer.serialize_none(),
    }
}

/// Fetches the entries scheduled inside `range` for `viewer`.
///
/// The range is widened to whole days in `tz`. Entries match when either
/// their target date or their implementation date falls inside it; both
/// queries run concurrently and the fetch fails if either does.
pub async fn fetch_window<R>(repo: &R, range: DateRange, tz: &Tz, viewer: &Viewer) -> FetchOutcome
where
    R: EntryRepository + ?Sized,
{
    let window = range.to_window(tz);

    let joined = tokio::try_join!(
        repo.query_range(DateField::TargetDate, window),
        repo.query_range(DateField::ImplementationDate, window),
    );

    match joined {
        Ok((by_target, by_implementation)) => {
            let entries = normalize_documents(&by_target)
                .into_iter()
                .chain(normalize_documents(&by_implementation));
            FetchOutcome::ok(filter_by_tenant(dedup_by_id(entries), viewer.tenant()))
        }
        Err(error) => FetchOutcome::failed(error.into()),
    }
}

/// Fetches the whole collection for `viewer`, with no date filter.
pub async fn fetch_all<R>(repo: &R, viewer: &Viewer) -> FetchOutcome
where
    R: EntryRepository + ?Sized,
{
    match repo.query_all().await {
        Ok(documents) => {
            let entries = dedup_by_id(normalize_documents(&documents));
            FetchOutcome::ok(filter_by_tenant(entries, viewer.tenant()))
        }
        Err(error) => FetchOutcome::failed(error.into()),
    }
}
