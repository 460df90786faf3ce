//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds the entry repository as a trait object and
//! the export sinks, and picks the storage backend via feature flags.

use std::sync::Arc;

use chrono::Utc;
use chrono_tz::Tz;

use indicative_core::calendar::generate_seed_documents;
use indicative_core::export::ExportSink;
use indicative_core::storage::EntryRepository;

use crate::config::Config;
use crate::export::{HtmlPrintSink, PdfTableSink};

/// Number of documents written by demo seeding.
const SEED_DOCUMENT_COUNT: u32 = 24;

/// Shared application state.
///
/// This is cloned for each request handler and contains shared resources
/// including the repository trait object for database access.
#[derive(Clone)]
pub struct AppState {
    /// Entry document store.
    pub entry_repo: Arc<dyn EntryRepository>,
    /// Zone calendar days are computed in.
    pub tz: Tz,
    /// Program name printed on exports.
    pub program_name: String,
    /// Paginated document generator, tried first. None leaves exports to
    /// the print sink.
    pub pdf_sink: Option<Arc<dyn ExportSink>>,
    /// Print-formatted markup, used whenever the primary sink can't run.
    pub print_sink: Arc<dyn ExportSink>,
}

impl AppState {
    /// Creates a new AppState around the given repository and configuration.
    fn build(entry_repo: Arc<dyn EntryRepository>, config: &Config) -> Self {
        Self {
            entry_repo,
            tz: config.display_timezone,
            program_name: config.program_name.clone(),
            pdf_sink: Some(Arc::new(PdfTableSink)),
            print_sink: Arc::new(HtmlPrintSink),
        }
    }

    /// Writes demo documents centred on today when seeding is enabled.
    async fn seed(self, config: &Config) -> Result<Self, anyhow::Error> {
        if !config.seed_demo_data {
            return Ok(self);
        }

        let today = Utc::now().with_timezone(&self.tz).date_naive();
        let documents = generate_seed_documents(today, &config.seed_tenant, SEED_DOCUMENT_COUNT);

        for document in &documents {
            self.entry_repo.put_document(document).await?;
        }

        tracing::info!(
            count = documents.len(),
            tenant = %config.seed_tenant,
            center = %today,
            "Seeded demo entries"
        );

        Ok(self)
    }
}

// ============================================================================
// Feature-specific constructors
// ============================================================================

#[cfg(feature = "sqlite")]
mod sqlite_backend {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);

            tracing::info!(path = %config.sqlite_path, "Opened SQLite entry store");

            Self::build(sqlite_repo, config).seed(config).await
        }
    }
}

#[cfg(feature = "inmemory")]
mod inmemory_backend {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        /// Useful for demos and testing without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_repo = Arc::new(InMemoryRepository::new());

            Self::build(inmemory_repo, config).seed(config).await
        }
    }
}

// ============================================================================
// Test support
// ============================================================================
