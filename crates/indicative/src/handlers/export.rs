//! Calendar export handler.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use indicative_core::calendar::{
    build_items_by_date, fetch_all, fetch_window, FetchError, FetchOutcome,
};
use indicative_core::export::{
    build_export_document, export_with_fallback, ExportOutcome, ExportScope,
};

use super::calendar::{resolve_month, ViewerQuery};
use crate::{handlers::AppError, state::AppState};

/// Which part of the calendar to export.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScopeParam {
    #[default]
    Month,
    All,
}

/// Query parameters for exports.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub scope: ScopeParam,
    /// Month to export when `scope=month` (YYYY-MM, default: current month)
    pub month: Option<String>,
    #[serde(flatten)]
    pub viewer: ViewerQuery,
}

/// Export the calendar as a document (GET /api/calendar/export).
///
/// Responds with the artifact as an attachment, or with `{"message": ...}`
/// when there is nothing in scope.
pub async fn export_calendar(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let viewer = query.viewer.viewer()?;

    let (scope, outcome) = match query.scope {
        ScopeParam::Month => {
            let month = resolve_month(&state, query.month.as_deref())?;
            let outcome =
                fetch_window(state.entry_repo.as_ref(), month.range(), &state.tz, &viewer).await;
            (ExportScope::Month(month), outcome)
        }
        ScopeParam::All => (
            ExportScope::All,
            fetch_all(state.entry_repo.as_ref(), &viewer).await,
        ),
    };

    let FetchOutcome { entries, error } = outcome;
    if let Some(FetchError::Repository(error)) = error {
        return Err(error.into());
    }

    let items = build_items_by_date(&entries, &state.tz);

    let document = match build_export_document(scope, &items, &state.program_name) {
        ExportOutcome::Ready(document) => document,
        ExportOutcome::Empty { message } => {
            tracing::debug!(?scope, tenant = ?viewer.tenant(), "Nothing to export");
            return Ok(Json(serde_json::json!({ "message": message })).into_response());
        }
    };

    let artifact = export_with_fallback(
        state.pdf_sink.as_deref(),
        state.print_sink.as_ref(),
        &document,
    )?;

    tracing::info!(
        file = %artifact.file_name,
        content_type = artifact.content_type,
        rows = document.rows.len(),
        "Exported calendar"
    );

    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.file_name),
            ),
        ],
        artifact.bytes,
    )
        .into_response())
}
