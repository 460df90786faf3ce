use thiserror::Error;

use super::document::ExportDocument;

/// Errors a sink can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// The sink cannot run here. Callers may try another one.
    #[error("Export generator unavailable: {0}")]
    Unavailable(String),
    /// The sink refused to hand the artifact over.
    #[error("Export blocked: {0}")]
    Blocked(String),
    #[error("Failed to generate export: {0}")]
    Render(String),
}

/// A rendered export, ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Turns an [`ExportDocument`] into a downloadable artifact.
pub trait ExportSink: Send + Sync {
    fn render(&self, document: &ExportDocument) -> Result<ExportArtifact, ExportError>;
}

/// Renders with `primary` when it is present and available, else with
/// `fallback`.
///
/// Only [`ExportError::Unavailable`] from the primary sink triggers the
/// fallback. Any error from the fallback is returned as is.
pub fn export_with_fallback(
    primary: Option<&dyn ExportSink>,
    fallback: &dyn ExportSink,
    document: &ExportDocument,
) -> Result<ExportArtifact, ExportError> {
    if let Some(primary) = primary {
        match primary.render(document) {
            Err(ExportError::Unavailable(_)) => {}
            result => return result,
        }
    }
    fallback.render(document)
}
