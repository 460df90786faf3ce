//! Flattening calendar items into a printable table and handing the result
//! to an export sink.

mod document;
mod rows;
mod sink;

pub use document::{
    build_export_document, ExportDocument, ExportOutcome, ExportScope, DEFAULT_PROGRAM_NAME,
};
pub use rows::{flatten_export_rows, ExportRow, ExportTable, EMPTY_CELL, EXPORT_HEADERS};
pub use sink::{export_with_fallback, ExportArtifact, ExportError, ExportSink};
