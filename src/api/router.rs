//! Service router.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints;
use crate::api::types::AppState;
use crate::config;

/// Build the service router.
pub fn app_router(state: AppState) -> Router {
    // Headroom over the PDF cap for multipart framing; the precise cap
    // is enforced in the analyze handler.
    let body_limit = config::MAX_UPLOAD_BYTES + 64 * 1024;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(endpoints::health::info))
        .route("/health", get(endpoints::health::check))
        .route("/analyze", post(endpoints::analyze::analyze))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::pipeline::extraction::pdf::make_test_pdf;
    use crate::pipeline::llm::MockLlmClient;
    use crate::pipeline::reconcile::ReferenceCatalog;

    fn test_state(llm: MockLlmClient) -> AppState {
        AppState::new(
            Arc::new(ReferenceCatalog::load_default().unwrap()),
            Arc::new(llm),
        )
    }

    fn multipart_request(
        uri: &str,
        field_name: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Request<Body> {
        let boundary = "bloodlens-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn service_info_shape() {
        let app = app_router(test_state(MockLlmClient::new()));
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["name"], "Bloodlens");
        assert_eq!(json["usage"], "POST a PDF to /analyze");
        assert!(!json["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn health_reports_backend_connectivity() {
        let app = app_router(test_state(MockLlmClient::new()));
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["backend_connected"], true);

        let app = app_router(test_state(MockLlmClient::disconnected()));
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let json = response_json(app.oneshot(req).await.unwrap()).await;
        assert_eq!(json["backend_connected"], false);
    }

    #[tokio::test]
    async fn analyze_rejects_missing_file_field() {
        let app = app_router(test_state(MockLlmClient::new()));
        let req = multipart_request("/analyze", "attachment", "report.pdf", b"%PDF-");

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert!(json["error"]["message"].as_str().unwrap().contains("file"));
    }

    #[tokio::test]
    async fn analyze_rejects_non_pdf_filename() {
        let app = app_router(test_state(MockLlmClient::new()));
        let req = multipart_request("/analyze", "file", "report.docx", b"not a pdf");

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Only PDF files are supported"));
    }

    #[tokio::test]
    async fn analyze_rejects_oversized_upload() {
        let app = app_router(test_state(MockLlmClient::new()));
        let oversized = vec![b'x'; crate::config::MAX_UPLOAD_BYTES + 1];
        let req = multipart_request("/analyze", "file", "report.pdf", &oversized);

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("File too large"));
    }

    #[tokio::test]
    async fn analyze_returns_503_when_backend_down() {
        let app = app_router(test_state(MockLlmClient::disconnected()));
        let pdf = make_test_pdf("Glucose: 92 mg/dL");
        let req = multipart_request("/analyze", "file", "report.pdf", &pdf);

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "BACKEND_UNAVAILABLE");
    }

    #[tokio::test]
    async fn analyze_rejects_report_without_biomarkers() {
        let llm = MockLlmClient::new().with_response(r#"{"biomarkers": []}"#);
        let app = app_router(test_state(llm));
        let pdf = make_test_pdf("Patient slept well. No labs drawn.");
        let req = multipart_request("/analyze", "file", "report.pdf", &pdf);

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("No biomarkers"));
    }

    #[tokio::test]
    async fn analyze_happy_path_returns_full_result() {
        let analysis = r#"{
            "summary": "Your glucose is slightly elevated.",
            "biomarker_explanations": [
                {"name": "glucose", "explanation": "Measures blood sugar.", "recommendation": "Recheck fasting."}
            ],
            "concerns": ["Elevated glucose"],
            "recommendations": ["Discuss with your doctor."]
        }"#;
        let llm = MockLlmClient::new()
            .with_response(r#"{"biomarkers": []}"#)
            .with_response(analysis);
        let app = app_router(test_state(llm));

        let pdf = make_test_pdf("Glucose: 112 mg/dL");
        let req = multipart_request("/analyze", "file", "report.pdf", &pdf);

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["summary"], "Your glucose is slightly elevated.");
        assert_eq!(json["biomarkers"][0]["name"], "Glucose");
        assert_eq!(json["biomarkers"][0]["status"], "high");
        assert_eq!(
            json["biomarkers"][0]["explanation"],
            "Measures blood sugar."
        );
        assert_eq!(json["concerns"][0], "Elevated glucose");
        assert!(json["disclaimer"]
            .as_str()
            .unwrap()
            .contains("informational purposes"));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = app_router(test_state(MockLlmClient::new()));
        let req = Request::builder()
            .uri("/nonexistent")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
