//! Repository doubles shared by the core's unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{DateField, EntryRepository, RepositoryError, Result, StoredDocument, TimeWindow};

/// Holds documents in a vector and answers range queries by scanning it.
///
/// Queries on `fail_on` return a `QueryFailed` error instead.
#[derive(Default)]
pub struct StaticRepository {
    documents: Mutex<Vec<StoredDocument>>,
    fail_on: Option<DateField>,
    fail_all: bool,
}

impl StaticRepository {
    pub fn new(documents: Vec<StoredDocument>) -> Self {
        Self {
            documents: Mutex::new(documents),
            ..Self::default()
        }
    }

    pub fn failing_on(mut self, field: DateField) -> Self {
        self.fail_on = Some(field);
        self
    }

    pub fn failing_scan(mut self) -> Self {
        self.fail_all = true;
        self
    }
}

#[async_trait]
impl EntryRepository for StaticRepository {
    async fn query_range(&self, field: DateField, window: TimeWindow) -> Result<Vec<StoredDocument>> {
        if self.fail_on == Some(field) {
            return Err(RepositoryError::QueryFailed(format!(
                "{} index unavailable",
                field.as_str()
            )));
        }

        let documents = self.documents.lock().unwrap();
        Ok(documents
            .iter()
            .filter(|doc| doc.date(field).is_some_and(|date| window.contains(date)))
            .cloned()
            .collect())
    }

    async fn query_all(&self) -> Result<Vec<StoredDocument>> {
        if self.fail_all {
            return Err(RepositoryError::ConnectionFailed("store offline".to_string()));
        }
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn put_document(&self, document: &StoredDocument) -> Result<()> {
        let mut documents = self.documents.lock().unwrap();
        documents.retain(|doc| doc.id != document.id);
        documents.push(document.clone());
        Ok(())
    }
}
