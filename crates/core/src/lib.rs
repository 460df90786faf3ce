//! Functional core of the indicative calendar.
//!
//! Everything here is pure data shaping except the [`storage::EntryRepository`]
//! seam, which the fetcher drives asynchronously.

pub mod calendar;
pub mod export;
pub mod serde;
pub mod storage;
