//! Month calendar handler.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use indicative_core::calendar::{CalendarMonth, ItemsByDate, MonthView, Role, Viewer};
use indicative_core::storage::DateRange;

use crate::{handlers::AppError, state::AppState};

/// Query parameters identifying who is looking at the calendar.
#[derive(Debug, Default, Deserialize)]
pub struct ViewerQuery {
    /// Tenant key. Absent or blank sees every tenant.
    pub tenant: Option<String>,
    /// Dashboard role (default: operations)
    pub role: Option<String>,
}

impl ViewerQuery {
    pub fn viewer(&self) -> Result<Viewer, AppError> {
        let role = match self.role.as_deref() {
            Some(role) if !role.trim().is_empty() => role.parse::<Role>()?,
            _ => Role::default(),
        };
        Ok(Viewer::new(self.tenant.clone(), role))
    }
}

/// Resolves `month`, defaulting to the current month in the display zone.
pub fn resolve_month(state: &AppState, month: Option<&str>) -> Result<CalendarMonth, AppError> {
    match month {
        Some(month) if !month.trim().is_empty() => Ok(month.parse::<CalendarMonth>()?),
        _ => Ok(CalendarMonth::current(Utc::now(), &state.tz)),
    }
}

/// Query parameters for the month view.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    /// Month to show (YYYY-MM, default: current month)
    pub month: Option<String>,
    #[serde(flatten)]
    pub viewer: ViewerQuery,
}

/// Month view response.
#[derive(Debug, Serialize)]
pub struct MonthResponse {
    pub month: CalendarMonth,
    pub range: DateRange,
    pub days: ItemsByDate,
    /// Set when entries could not be loaded. `days` is empty then.
    pub error: Option<String>,
}

/// Items of one month grouped by day (GET /api/calendar).
pub async fn month_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<MonthResponse>, AppError> {
    let month = resolve_month(&state, query.month.as_deref())?;
    let viewer = query.viewer.viewer()?;

    let view = MonthView::new(state.entry_repo.clone(), viewer, state.tz);
    view.load_month(month).await;
    let snapshot = view.snapshot().await;

    match &snapshot.error {
        Some(error) => tracing::warn!(
            month = %month,
            tenant = ?view.viewer().tenant(),
            error = %error,
            "Calendar fetch failed"
        ),
        None => tracing::debug!(
            month = %month,
            tenant = ?view.viewer().tenant(),
            role = %view.viewer().role,
            entries = snapshot.entries.len(),
            days = snapshot.items.len(),
            "Loaded calendar month"
        ),
    }

    Ok(Json(MonthResponse {
        month,
        range: month.range(),
        days: snapshot.items,
        error: snapshot.error.map(|e| e.to_string()),
    }))
}
