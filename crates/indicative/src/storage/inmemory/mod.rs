//! In-memory storage backend.
//!
//! Documents live in a `HashMap` wrapped in `Arc<RwLock<_>>`. Nothing is
//! persisted; this is the default backend for development and tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use indicative::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
