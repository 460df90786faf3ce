//! SQLite schema definitions and SQL query constants.
//!
//! Documents are kept as JSON. Both date fields are also stored as
//! normalized epoch milliseconds so range queries can use an index.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Indicative calendar documents
CREATE TABLE IF NOT EXISTS entries (
    id TEXT PRIMARY KEY,
    document TEXT NOT NULL,
    target_ms INTEGER,
    implementation_ms INTEGER,
    company_code TEXT
);

-- Indexes for range queries on either date field
CREATE INDEX IF NOT EXISTS idx_entries_target_ms ON entries(target_ms);
CREATE INDEX IF NOT EXISTS idx_entries_implementation_ms ON entries(implementation_ms);
CREATE INDEX IF NOT EXISTS idx_entries_company_code ON entries(company_code);
"#;

pub const UPSERT_ENTRY: &str = r#"
INSERT INTO entries (id, document, target_ms, implementation_ms, company_code)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT(id) DO UPDATE SET
    document = excluded.document,
    target_ms = excluded.target_ms,
    implementation_ms = excluded.implementation_ms,
    company_code = excluded.company_code
"#;

pub const SELECT_ENTRIES_BY_TARGET_RANGE: &str = r#"
SELECT id, document
FROM entries
WHERE target_ms >= ?1 AND target_ms <= ?2
ORDER BY id ASC
"#;

pub const SELECT_ENTRIES_BY_IMPLEMENTATION_RANGE: &str = r#"
SELECT id, document
FROM entries
WHERE implementation_ms >= ?1 AND implementation_ms <= ?2
ORDER BY id ASC
"#;

pub const SELECT_ALL_ENTRIES: &str = r#"
SELECT id, document
FROM entries
ORDER BY id ASC
"#;
