//! SQLite repository implementation.
//!
//! Implements `EntryRepository` from `indicative_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use indicative_core::storage::{
    DateField, EntryRepository, RepositoryError, Result, StoredDocument, TimeWindow,
};

use super::conversions::{document_to_row, range_query, row_to_document};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based document store.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Runs a `SELECT id, document` query and collects the documents.
    async fn select(
        &self,
        sql: &'static str,
        params: Vec<i64>,
    ) -> Result<Vec<StoredDocument>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(rusqlite::params_from_iter(params), row_to_document)
                    .map_err(wrap_err)?;

                let mut documents = Vec::new();
                for row_result in rows {
                    documents.push(row_result.map_err(wrap_err)?);
                }
                Ok(documents)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}

#[async_trait]
impl EntryRepository for SqliteRepository {
    async fn query_range(
        &self,
        field: DateField,
        window: TimeWindow,
    ) -> Result<Vec<StoredDocument>> {
        self.select(
            range_query(field),
            vec![window.start.timestamp_millis(), window.end.timestamp_millis()],
        )
        .await
    }

    async fn query_all(&self) -> Result<Vec<StoredDocument>> {
        self.select(schema::SELECT_ALL_ENTRIES, Vec::new()).await
    }

    async fn put_document(&self, document: &StoredDocument) -> Result<()> {
        let row = document_to_row(document)?;

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::UPSERT_ENTRY,
                    rusqlite::params![
                        row.id,
                        row.document,
                        row.target_ms,
                        row.implementation_ms,
                        row.company_code
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
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
                intervention_id: Some("I1".to_string()),
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
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        repo.put_document(&document("b", None, None)).await.unwrap();
        repo.put_document(&document("a", Some("2024-03-05"), None))
            .await
            .unwrap();

        let all = repo.query_all().await.unwrap();

        assert_eq!(ids(&all), vec!["a", "b"]);
        assert_eq!(all[0].document.intervention_id.as_deref(), Some("I1"));
    }

    #[tokio::test]
    async fn test_put_replaces_existing_document() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();

        repo.put_document(&document("a", Some("2024-03-05"), None))
            .await
            .unwrap();
        repo.put_document(&document("a", Some("2024-06-05"), None))
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
        let repo = SqliteRepository::new_in_memory().await.unwrap();
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
        let repo = SqliteRepository::new_in_memory().await.unwrap();
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
        let repo = SqliteRepository::new_in_memory().await.unwrap();
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
