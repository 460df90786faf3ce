//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and stored documents.
//! These are testable in isolation without database access.

use indicative_core::calendar::EntryDocument;
use indicative_core::storage::{DateField, RepositoryError, StoredDocument};
use rusqlite::Row;

/// Column values written for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    pub id: String,
    pub document: String,
    pub target_ms: Option<i64>,
    pub implementation_ms: Option<i64>,
    pub company_code: Option<String>,
}

/// Convert a stored document to its column values.
///
/// Date columns hold the normalized instant, so documents whose dates
/// cannot be read never match a range query.
pub fn document_to_row(document: &StoredDocument) -> Result<EntryRow, RepositoryError> {
    let json = serde_json::to_string(&document.document)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    Ok(EntryRow {
        id: document.id.clone(),
        document: json,
        target_ms: document
            .date(DateField::TargetDate)
            .map(|date| date.timestamp_millis()),
        implementation_ms: document
            .date(DateField::ImplementationDate)
            .map(|date| date.timestamp_millis()),
        company_code: document.company_code().map(str::to_string),
    })
}

/// Convert a SQLite row to a StoredDocument.
///
/// Expected columns: id, document
pub fn row_to_document(row: &Row) -> rusqlite::Result<StoredDocument> {
    let id: String = row.get(0)?;
    let json: String = row.get(1)?;

    Ok(StoredDocument::new(id, parse_document(&json)?))
}

/// Parse a JSON document body.
fn parse_document(json: &str) -> rusqlite::Result<EntryDocument> {
    serde_json::from_str(json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Returns the range query filtering on `field`.
pub fn range_query(field: DateField) -> &'static str {
    match field {
        DateField::TargetDate => super::schema::SELECT_ENTRIES_BY_TARGET_RANGE,
        DateField::ImplementationDate => super::schema::SELECT_ENTRIES_BY_IMPLEMENTATION_RANGE,
    }
}
