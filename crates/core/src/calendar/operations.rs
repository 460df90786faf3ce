use std::collections::HashMap;

use crate::storage::StoredDocument;

use super::types::CalendarEntry;

/// Normalizes stored documents into entries.
pub fn normalize_documents(documents: &[StoredDocument]) -> Vec<CalendarEntry> {
    documents
        .iter()
        .map(|stored| CalendarEntry::from_document(&stored.id, &stored.document))
        .collect()
}

/// Unions entries by id.
///
/// An id keeps the position of its first occurrence and the value of its
/// last one.
pub fn dedup_by_id(entries: impl IntoIterator<Item = CalendarEntry>) -> Vec<CalendarEntry> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<CalendarEntry> = Vec::new();

    for entry in entries {
        match positions.get(&entry.id) {
            Some(&index) => unique[index] = entry,
            None => {
                positions.insert(entry.id.clone(), unique.len());
                unique.push(entry);
            }
        }
    }

    unique
}

/// Keeps only entries belonging to `tenant`.
///
/// With no tenant every entry is kept. With a tenant, entries carrying a
/// different code or no code at all are dropped.
pub fn filter_by_tenant(entries: Vec<CalendarEntry>, tenant: Option<&str>) -> Vec<CalendarEntry> {
    match tenant {
        None => entries,
        Some(tenant) => entries
            .into_iter()
            .filter(|entry| entry.company_code.as_deref() == Some(tenant))
            .collect(),
    }
}
