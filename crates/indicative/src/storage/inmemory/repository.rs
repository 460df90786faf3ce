//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use indicative_core::storage::{DateField, EntryRepository, Result, StoredDocument, TimeWindow};

/// In-memory document store.
///
/// Query results are ordered by store id so repeated reads agree.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    documents: Arc<RwLock<HashMap<String, StoredDocument>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut documents: Vec<StoredDocument>) -> Vec<StoredDocument> {
    documents.sort_by(|a, b| a.id.cmp(&b.id));
    documents
}

#[async_trait]
impl EntryRepository for InMemoryRepository {
    async fn query_range(
        &self,
        field: DateField,
        window: TimeWindow,
    ) -> Result<Vec<StoredDocument>> {
        let documents = self.documents.read().await;
        Ok(sorted(
            documents
                .values()
                .filter(|doc| doc.date(field).is_some_and(|date| window.contains(date)))
                .cloned()
                .collect(),
        ))
    }

    async fn query_all(&self) -> Result<Vec<StoredDocument>> {
        let documents = self.documents.read().await;
        Ok(sorted(documents.values().cloned().collect()))
    }

    async fn put_document(&self, document: &StoredDocument) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.insert(document.id.clone(), document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;
    use indicative_core::calendar::{EntryDocument, RawTimestamp};
    use indicative_core::storage::DateRange;

    fn document(id: &str, target: Option<&str>, implementation: Option<&str>) -> StoredDocument {
        StoredDocument::new(
            id,
            EntryDocument {
                target_date: target.map(|t| RawTimestamp::Text(t.to_string())),
                implementation_date: implementation.map(|t| RawTimestamp::Text(t.to_string())),
                ..EntryDocument::default()
            },
        )
    }

    fn march() -> TimeWindow {
        DateRange::month(2024, 3).unwrap().to_window(&Tz::UTC)
    }

    fn ids(documents: &[StoredDocument]) -> Vec<&str> {
        documents.iter().map(|d| d.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_put_and_query_all() {
        let repo = InMemoryRepository::new();

        repo.put_document(&document("b", None, None)).await.unwrap();
        repo.put_document(&document("a", None, None)).await.unwrap();

        let all = repo.query_all().await.unwrap();
        assert_eq!(ids(&all), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_put_replaces_by_id() {
        let repo = InMemoryRepository::new();

        repo.put_document(&document("a", Some("2024-03-01"), None))
            .await
            .unwrap();
        repo.put_document(&document("a", Some("2024-05-01"), None))
            .await
            .unwrap();

        assert_eq!(repo.query_all().await.unwrap().len(), 1);
        assert!(repo
            .query_range(DateField::TargetDate, march())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_query_range_by_field() {
        let repo = InMemoryRepository::new();
        repo.put_document(&document("target", Some("2024-03-10"), Some("2024-04-10")))
            .await
            .unwrap();
        repo.put_document(&document("impl", Some("2024-02-10"), Some("2024-03-10")))
            .await
            .unwrap();
        repo.put_document(&document("undated", None, None))
            .await
            .unwrap();

        let by_target = repo
            .query_range(DateField::TargetDate, march())
            .await
            .unwrap();
        let by_implementation = repo
            .query_range(DateField::ImplementationDate, march())
            .await
            .unwrap();

        assert_eq!(ids(&by_target), vec!["target"]);
        assert_eq!(ids(&by_implementation), vec!["impl"]);
    }

    #[tokio::test]
    async fn test_query_range_bounds_are_inclusive() {
        let repo = InMemoryRepository::new();
        repo.put_document(&document("first", Some("2024-03-01T00:00:00Z"), None))
            .await
            .unwrap();
        repo.put_document(&document("last", Some("2024-03-31T23:59:59.999Z"), None))
            .await
            .unwrap();
        repo.put_document(&document("after", Some("2024-04-01T00:00:00Z"), None))
            .await
            .unwrap();

        let found = repo
            .query_range(DateField::TargetDate, march())
            .await
            .unwrap();

        assert_eq!(ids(&found), vec!["first", "last"]);
    }

    #[tokio::test]
    async fn test_query_range_matches_at_millisecond_precision() {
        let repo = InMemoryRepository::new();
        repo.put_document(&document("edge", Some("2024-03-31T23:59:59.9995Z"), None))
            .await
            .unwrap();

        let found = repo
            .query_range(DateField::TargetDate, march())
            .await
            .unwrap();

        assert_eq!(ids(&found), vec!["edge"]);
    }
}
