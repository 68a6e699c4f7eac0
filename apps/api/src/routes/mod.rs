pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::enhancement::handlers as enhancement;
use crate::export::handlers as export;
use crate::parser::handlers as parser;
use crate::scoring::handlers as scoring;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/capabilities", get(health::capabilities_handler))
        // Intake
        .route("/api/v1/resumes/parse", post(parser::handle_parse))
        .route("/api/v1/resumes/validate", post(scoring::handle_validate))
        // Scoring
        .route("/api/v1/resumes/score", post(scoring::handle_score))
        // Enhancement (requires GEMINI_API_KEY)
        .route("/api/v1/resumes/enhance", post(enhancement::handle_enhance))
        .route(
            "/api/v1/resumes/suggestions",
            post(enhancement::handle_suggestions),
        )
        .route("/api/v1/resumes/chat", post(enhancement::handle_chat))
        // Export
        .route("/api/v1/resumes/export/:format", post(export::handle_export))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::enhancement::Enhancer;
    use crate::export::docx::render_docx;
    use crate::export::pdf::{PdfRenderer, RenderError};
    use crate::llm_client::{LlmError, TextGenerator};
    use crate::models::{PersonalInfo, ResumeRecord};
    use crate::scoring::AtsScorer;
    use crate::templates::TemplateChoice;

    struct NoLatex;

    #[async_trait]
    impl PdfRenderer for NoLatex {
        async fn render(&self, _latex: &str) -> Result<Vec<u8>, RenderError> {
            Err(RenderError::ProgramMissing("pdflatex".to_string()))
        }

        async fn is_available(&self) -> bool {
            false
        }
    }

    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            Ok("Keep bullets short.".to_string())
        }
    }

    fn test_state(enhancer: Option<Enhancer>) -> AppState {
        AppState {
            config: Config {
                gemini_api_key: None,
                port: 0,
                rust_log: "info".to_string(),
                latex_program: "pdflatex".to_string(),
                render_timeout: Duration::from_secs(5),
                max_upload_bytes: 1024 * 1024,
            },
            scorer: Arc::new(AtsScorer::new()),
            enhancer,
            renderer: Arc::new(NoLatex),
            pdf_available: false,
        }
    }

    async fn send(app: Router, request: Request<Body>) -> Response {
        app.oneshot(request).await.unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(None));
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let response = send(app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_capabilities_reflect_state() {
        let app = build_router(test_state(None));
        let request = Request::get("/api/v1/capabilities").body(Body::empty()).unwrap();
        let body = json_body(send(app, request).await).await;
        assert_eq!(body["enhancement"], false);
        assert_eq!(body["pdf_export"], false);
        assert_eq!(body["templates"].as_array().unwrap().len(), 3);
        assert_eq!(body["templates"][1]["id"], "modern");
    }

    #[tokio::test]
    async fn test_score_empty_record() {
        let app = build_router(test_state(None));
        let response = send(app, post_json("/api/v1/resumes/score", json!({}))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["total"], 0);
        assert_eq!(body["completeness_passed"], false);
    }

    #[tokio::test]
    async fn test_validate_lists_missing_fields() {
        let app = build_router(test_state(None));
        let record = json!({"personal_info": {"name": "Jane", "email": "j@x.io"}});
        let response = send(app, post_json("/api/v1/resumes/validate", record)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.contains("phone") && message.contains("summary"));
    }

    #[tokio::test]
    async fn test_enhancement_disabled_without_key() {
        for uri in [
            "/api/v1/resumes/enhance",
            "/api/v1/resumes/suggestions",
        ] {
            let app = build_router(test_state(None));
            let response = send(app, post_json(uri, json!({}))).await;
            assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(json_body(response).await["error"]["code"], "ENHANCEMENT_DISABLED");
        }
    }

    #[tokio::test]
    async fn test_chat_with_generator() {
        let state = test_state(Some(Enhancer::new(Arc::new(EchoGenerator))));
        let app = build_router(state);
        let request = post_json("/api/v1/resumes/chat", json!({"question": "Too long?"}));
        let body = json_body(send(app, request).await).await;
        assert_eq!(body["answer"], "Keep bullets short.");
    }

    #[tokio::test]
    async fn test_enhance_reports_both_scores() {
        let state = test_state(Some(Enhancer::new(Arc::new(EchoGenerator))));
        let app = build_router(state);
        let record = json!({"summary": "Engineer.", "personal_info": {"name": "Jane"}});
        let response = send(app, post_json("/api/v1/resumes/enhance", record)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["original"]["summary"], "Engineer.");
        assert_eq!(body["enhanced"]["summary"], "Keep bullets short.");
        let delta = body["enhanced_score"]["total"].as_i64().unwrap()
            - body["original_score"]["total"].as_i64().unwrap();
        assert_eq!(body["improvement"].as_i64().unwrap(), delta);
    }

    #[tokio::test]
    async fn test_pdf_unavailable_but_docx_served() {
        let request = json!({"resume": {"personal_info": {"name": "Jane Doe"}}, "template": "template2"});

        let app = build_router(test_state(None));
        let response = send(app, post_json("/api/v1/resumes/export/pdf", request.clone())).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["error"]["code"], "PDF_UNAVAILABLE");

        let app = build_router(test_state(None));
        let response = send(app, post_json("/api/v1/resumes/export/docx", request)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"jane_doe_resume_modern.docx\""
        );
    }

    #[tokio::test]
    async fn test_parse_docx_upload() {
        let record = ResumeRecord {
            personal_info: PersonalInfo {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                ..Default::default()
            },
            summary: "Backend engineer with 8 years of experience.".to_string(),
            ..Default::default()
        };
        let docx = render_docx(&record, TemplateChoice::Professional).unwrap();

        let mut body = Vec::new();
        body.extend_from_slice(
            b"--XBOUNDARY\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cv.docx\"\r\nContent-Type: application/octet-stream\r\n\r\n",
        );
        body.extend_from_slice(&docx);
        body.extend_from_slice(b"\r\n--XBOUNDARY--\r\n");

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/resumes/parse")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();
        let response = send(build_router(test_state(None)), request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let parsed = json_body(response).await;
        assert_eq!(parsed["resume"]["personal_info"]["name"], "Jane Doe");
        assert_eq!(parsed["resume"]["personal_info"]["email"], "jane@example.com");
        assert_eq!(
            parsed["resume"]["summary"],
            "Backend engineer with 8 years of experience."
        );
        assert_eq!(parsed["sections_found"][0], "summary");
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_415() {
        let body = "--B\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cv.txt\"\r\n\r\nhello\r\n--B--\r\n";
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/resumes/parse")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=B")
            .body(Body::from(body))
            .unwrap();
        let response = send(build_router(test_state(None)), request).await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
