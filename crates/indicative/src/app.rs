use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{calendar::month_calendar, export::export_calendar, health::livez},
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION]);

    let api_routes = Router::new()
        .route("/calendar", get(month_calendar))
        .route("/calendar/export", get(export_calendar))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use indicative_core::calendar::{EntryDocument, RawTimestamp};
    use indicative_core::export::{ExportArtifact, ExportDocument, ExportError, ExportSink};
    use indicative_core::storage::StoredDocument;

    use crate::state::test_support::TestRepository;

    fn document(id: &str, tenant: &str, kind: &str, when: &str, status: &str) -> StoredDocument {
        StoredDocument::new(
            id,
            EntryDocument {
                participant_id: Some(format!("P-{id}")),
                intervention_id: Some("I1".to_string()),
                intervention_title: Some("Workshop".to_string()),
                area_of_support: Some("Finance".to_string()),
                entry_type: Some(kind.to_string()),
                subtitle: Some("Session 1".to_string()),
                coordinator_id: Some("C1".to_string()),
                implementation_date: Some(RawTimestamp::Text(when.to_string())),
                company_code: Some(tenant.to_string()),
                status: Some(status.to_string()),
                ..EntryDocument::default()
            },
        )
    }

    fn seeded_state() -> AppState {
        AppState::for_repository(TestRepository::with_documents(vec![
            document("g1", "RCM", "grouped", "2024-03-05T09:00:00Z", "confirmed"),
            document("g2", "RCM", "grouped", "2024-03-05T09:00:00Z", "cancelled"),
            document("s1", "RCM", "singular", "2024-03-15T10:00:00Z", "planned"),
            document("x1", "OTHER", "singular", "2024-03-20T10:00:00Z", "planned"),
            document("a1", "RCM", "singular", "2024-04-02T10:00:00Z", "planned"),
        ]))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_livez() {
        let response = get(create_app(AppState::default()), "/livez").await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_month_calendar_groups_and_scopes_by_tenant() {
        let app = create_app(seeded_state());

        let response = get(app, "/api/calendar?month=2024-03&tenant=RCM").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["month"], "2024-03");
        assert_eq!(json["range"]["start"], "2024-03-01");
        assert_eq!(json["range"]["end"], "2024-03-31");
        assert!(json["error"].is_null());

        let days = json["days"].as_object().unwrap();
        assert_eq!(
            days.keys().collect::<Vec<_>>(),
            vec!["2024-03-05", "2024-03-15"]
        );

        let workshop = &json["days"]["2024-03-05"][0];
        assert_eq!(workshop["kind"], "grouped");
        assert_eq!(workshop["participants"].as_array().unwrap().len(), 2);
        assert_eq!(workshop["base"]["status"], "processing");
    }

    #[tokio::test]
    async fn test_month_calendar_without_tenant_sees_everyone() {
        let app = create_app(seeded_state());

        let json = body_json(get(app, "/api/calendar?month=2024-03").await).await;

        assert!(json["days"]["2024-03-20"].is_array());
    }

    #[tokio::test]
    async fn test_month_calendar_reports_fetch_failure() {
        let app = create_app(AppState::for_repository(TestRepository::failing()));

        let response = get(app, "/api/calendar?month=2024-03").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert!(json["days"].as_object().unwrap().is_empty());
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to load calendar entries"));
    }

    #[tokio::test]
    async fn test_invalid_query_is_bad_request() {
        let app = create_app(AppState::default());

        let bad_month = get(app.clone(), "/api/calendar?month=2024-13").await;
        assert_eq!(bad_month.status(), StatusCode::BAD_REQUEST);

        let bad_role = get(app, "/api/calendar?month=2024-03&role=janitor").await;
        assert_eq!(bad_role.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(bad_role).await, "Unknown role: janitor");
    }

    #[tokio::test]
    async fn test_month_export_without_pdf_sink_uses_print_markup() {
        let app = create_app(seeded_state().without_pdf_sink());

        let response = get(app, "/api/calendar/export?scope=month&month=2024-03&tenant=RCM").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"growth-accelerator-indicative-202403.html\""
        );

        let html = body_text(response).await;
        assert!(html.contains("GROWTH ACCELERATOR INDICATIVE CALENDAR"));
        assert!(html.contains("2024-03-01 - 2024-03-31"));
        assert!(html.contains("<td>2024-03-15</td>"));
        assert!(!html.contains("2024-04-02"));
    }

    #[tokio::test]
    async fn test_month_keeps_entries_displayed_after_month() {
        let mut moved = document("m1", "RCM", "singular", "2024-04-02T10:00:00Z", "planned");
        moved.document.target_date = Some(RawTimestamp::Text("2024-03-10T10:00:00Z".to_string()));
        let state =
            AppState::for_repository(TestRepository::with_documents(vec![moved])).without_pdf_sink();

        let json = body_json(get(create_app(state.clone()), "/api/calendar?month=2024-03").await).await;
        assert_eq!(json["days"]["2024-04-02"].as_array().unwrap().len(), 1);

        let response = get(create_app(state), "/api/calendar/export?month=2024-03").await;
        let html = body_text(response).await;
        assert!(html.contains("2024-03-01 - 2024-03-31"));
        assert!(html.contains("<td>2024-04-02</td>"));
    }

    #[tokio::test]
    async fn test_export_all_uses_computed_bounds() {
        let app = create_app(seeded_state().without_pdf_sink());

        let response = get(app, "/api/calendar/export?scope=all&tenant=RCM").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("2024-03-05 - 2024-04-02"));
    }

    #[tokio::test]
    async fn test_empty_export_returns_message() {
        let app = create_app(seeded_state());

        let response = get(app, "/api/calendar/export?month=2023-01&tenant=RCM").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["message"], "No items to export for this month.");
    }

    #[tokio::test]
    async fn test_export_fetch_failure_is_error() {
        let app = create_app(AppState::for_repository(TestRepository::failing()));

        let response = get(app, "/api/calendar/export?scope=all").await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    struct UnavailableSink;

    impl ExportSink for UnavailableSink {
        fn render(&self, _document: &ExportDocument) -> Result<ExportArtifact, ExportError> {
            Err(ExportError::Unavailable("no fonts".to_string()))
        }
    }

    struct BlockedSink;

    impl ExportSink for BlockedSink {
        fn render(&self, _document: &ExportDocument) -> Result<ExportArtifact, ExportError> {
            Err(ExportError::Blocked("popups disabled".to_string()))
        }
    }

    #[tokio::test]
    async fn test_export_renders_pdf_by_default() {
        let app = create_app(seeded_state());

        let response = get(app, "/api/calendar/export?scope=all&tenant=RCM").await;
        assert_eq!(response.status(), StatusCode::OK);

        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"growth-accelerator-indicative-20240305-20240402.pdf\""
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_unavailable_pdf_sink_falls_back_to_print_markup() {
        let state = seeded_state().with_pdf_sink(Arc::new(UnavailableSink));
        let app = create_app(state);

        let response = get(app, "/api/calendar/export?month=2024-03&tenant=RCM").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_blocked_fallback_is_reported() {
        let mut state = seeded_state().without_pdf_sink();
        state.print_sink = Arc::new(BlockedSink);
        let app = create_app(state);

        let response = get(app, "/api/calendar/export?scope=all").await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_text(response).await, "Export blocked: popups disabled");
    }
}
