use async_trait::async_trait;

use super::{DateField, Result, StoredDocument, TimeWindow};

/// Read access to the indicative calendar collection.
///
/// The collection is owned by the wider application. The calendar only
/// reads from it; `put_document` exists so backends can be seeded.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Gets every document whose `field` falls inside `window` (inclusive
    /// on both ends). Documents without a usable value for `field` never
    /// match.
    async fn query_range(&self, field: DateField, window: TimeWindow)
        -> Result<Vec<StoredDocument>>;

    /// Gets the whole collection in one pass.
    async fn query_all(&self) -> Result<Vec<StoredDocument>>;

    /// Inserts or replaces a document by its store id.
    async fn put_document(&self, document: &StoredDocument) -> Result<()>;
}
