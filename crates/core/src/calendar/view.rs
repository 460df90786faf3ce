use std::sync::Arc;

use chrono_tz::Tz;
use tokio::sync::RwLock;

use crate::storage::EntryRepository;

use super::aggregate::{build_items_by_date, ItemsByDate};
use super::fetch::{fetch_window, FetchError};
use super::month::CalendarMonth;
use super::request::RequestTracker;
use super::types::CalendarEntry;
use super::viewer::Viewer;

/// Whether a finished load replaced the displayed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Applied,
    /// A newer load started before this one finished; its result was dropped.
    Stale,
}

/// The month currently on display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthSnapshot {
    pub month: Option<CalendarMonth>,
    pub entries: Vec<CalendarEntry>,
    pub items: ItemsByDate,
    pub error: Option<FetchError>,
}

/// A month calendar for one viewer.
///
/// Switching months quickly starts overlapping loads. Only the load started
/// last may update the snapshot.
pub struct MonthView {
    repo: Arc<dyn EntryRepository>,
    viewer: Viewer,
    tz: Tz,
    tracker: RequestTracker,
    snapshot: RwLock<MonthSnapshot>,
}

impl MonthView {
    pub fn new(repo: Arc<dyn EntryRepository>, viewer: Viewer, tz: Tz) -> Self {
        Self {
            repo,
            viewer,
            tz,
            tracker: RequestTracker::new(),
            snapshot: RwLock::new(MonthSnapshot::default()),
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Fetches and aggregates `month`, then shows it unless superseded.
    pub async fn load_month(&self, month: CalendarMonth) -> LoadStatus {
        let ticket = self.tracker.begin();

        let outcome = fetch_window(self.repo.as_ref(), month.range(), &self.tz, &self.viewer).await;
        // Entries matched on their target date may sit on a day outside the
        // month. Their buckets are kept.
        let items = build_items_by_date(&outcome.entries, &self.tz);

        let mut snapshot = self.snapshot.write().await;
        if !self.tracker.is_current(ticket) {
            return LoadStatus::Stale;
        }

        *snapshot = MonthSnapshot {
            month: Some(month),
            entries: outcome.entries,
            items,
            error: outcome.error,
        };
        LoadStatus::Applied
    }

    /// Returns a copy of what is on display.
    pub async fn snapshot(&self) -> MonthSnapshot {
        self.snapshot.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDate, Utc};
    use tokio::sync::{Notify, Semaphore};

    use super::*;
    use crate::calendar::{EntryDocument, RawTimestamp, Role};
    use crate::storage::testing::StaticRepository;
    use crate::storage::{DateField, Result, StoredDocument, TimeWindow};

    fn document(id: &str, day: &str) -> StoredDocument {
        StoredDocument::new(
            id,
            EntryDocument {
                participant_id: Some("P1".to_string()),
                intervention_id: Some("I1".to_string()),
                company_code: Some("RCM".to_string()),
                implementation_date: Some(RawTimestamp::Text(format!("{day}T09:00:00Z"))),
                ..EntryDocument::default()
            },
        )
    }

    fn month(s: &str) -> CalendarMonth {
        s.parse().unwrap()
    }

    fn viewer() -> Viewer {
        Viewer::new(Some("RCM".to_string()), Role::Operations)
    }

    /// Holds queries whose window starts at `gated_start` until released.
    struct GatedRepository {
        inner: StaticRepository,
        gated_start: DateTime<Utc>,
        entered: Notify,
        gate: Semaphore,
    }

    #[async_trait]
    impl EntryRepository for GatedRepository {
        async fn query_range(
            &self,
            field: DateField,
            window: TimeWindow,
        ) -> Result<Vec<StoredDocument>> {
            if window.start == self.gated_start {
                self.entered.notify_one();
                let _permit = self.gate.acquire().await.unwrap();
            }
            self.inner.query_range(field, window).await
        }

        async fn query_all(&self) -> Result<Vec<StoredDocument>> {
            self.inner.query_all().await
        }

        async fn put_document(&self, document: &StoredDocument) -> Result<()> {
            self.inner.put_document(document).await
        }
    }

    #[tokio::test]
    async fn test_load_month_applies_items() {
        let repo = Arc::new(StaticRepository::new(vec![
            document("a", "2024-03-05"),
            document("b", "2024-04-02"),
        ]));
        let view = MonthView::new(repo, viewer(), Tz::UTC);

        let status = view.load_month(month("2024-03")).await;
        let snapshot = view.snapshot().await;

        assert_eq!(status, LoadStatus::Applied);
        assert_eq!(snapshot.month, Some(month("2024-03")));
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(
            snapshot
                .items
                .get(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
                .len(),
            1
        );
        assert_eq!(snapshot.error, None);
    }

    #[tokio::test]
    async fn test_load_month_keeps_buckets_outside_month() {
        let mut rescheduled = document("moved", "2024-04-02");
        rescheduled.document.target_date =
            Some(RawTimestamp::Text("2024-03-10T09:00:00Z".to_string()));
        let repo = Arc::new(StaticRepository::new(vec![rescheduled]));
        let view = MonthView::new(repo, viewer(), Tz::UTC);

        view.load_month(month("2024-03")).await;
        let snapshot = view.snapshot().await;

        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(
            snapshot
                .items
                .get(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap())
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_load_month_failure_shows_empty_month_with_error() {
        let repo = Arc::new(
            StaticRepository::new(vec![document("a", "2024-03-05")])
                .failing_on(DateField::TargetDate),
        );
        let view = MonthView::new(repo, viewer(), Tz::UTC);

        let status = view.load_month(month("2024-03")).await;
        let snapshot = view.snapshot().await;

        assert_eq!(status, LoadStatus::Applied);
        assert!(snapshot.entries.is_empty());
        assert!(snapshot.items.is_empty());
        assert!(snapshot.error.is_some());
    }

    #[tokio::test]
    async fn test_superseded_load_is_discarded() {
        let march = month("2024-03");
        let repo = Arc::new(GatedRepository {
            inner: StaticRepository::new(vec![
                document("march", "2024-03-05"),
                document("april", "2024-04-05"),
            ]),
            gated_start: march.range().to_window(&Tz::UTC).start,
            entered: Notify::new(),
            gate: Semaphore::new(0),
        });
        let view = Arc::new(MonthView::new(repo.clone(), viewer(), Tz::UTC));

        let slow = tokio::spawn({
            let view = view.clone();
            async move { view.load_month(march).await }
        });
        repo.entered.notified().await;

        let fast = view.load_month(month("2024-04")).await;
        repo.gate.add_permits(2);
        let slow = slow.await.unwrap();

        assert_eq!(fast, LoadStatus::Applied);
        assert_eq!(slow, LoadStatus::Stale);

        let snapshot = view.snapshot().await;
        assert_eq!(snapshot.month, Some(month("2024-04")));
        assert_eq!(snapshot.entries[0].id, "april");
    }
}
