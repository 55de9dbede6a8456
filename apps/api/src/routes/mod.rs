pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::facts::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/extract", post(handlers::handle_extract))
        .route("/api/v1/extract/xlsx", post(handlers::handle_extract_xlsx))
        .route("/api/v1/normalize", post(handlers::handle_normalize))
        .route("/api/v1/export", post(handlers::handle_export))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extraction::oracle::{ExtractionOracle, OracleError, OracleRequest};
    use crate::extraction::pdf::single_page_pdf;
    use crate::facts::backfill::BackfillOptions;
    use crate::facts::models::RawFact;
    use crate::facts::schema::KEY_COUNT;
    use crate::llm_client::LlmError;

    const BODY_LIMIT: usize = 1024 * 1024;
    const BOUNDARY: &str = "X-BOUNDARY";

    /// Returns fixed facts, or fails the way an overloaded API does.
    enum CannedOracle {
        Facts(Vec<RawFact>),
        Overloaded,
    }

    #[async_trait]
    impl ExtractionOracle for CannedOracle {
        async fn extract(&self, request: OracleRequest<'_>) -> Result<Vec<RawFact>, OracleError> {
            assert_eq!(request.keys.len(), KEY_COUNT);
            assert!(!request.document_text.trim().is_empty());
            match self {
                CannedOracle::Facts(facts) => Ok(facts.clone()),
                CannedOracle::Overloaded => Err(OracleError::Llm(LlmError::Api {
                    status: 529,
                    message: "Overloaded".to_string(),
                })),
            }
        }
    }

    fn raw(key: &str, value: &str) -> RawFact {
        RawFact {
            key: key.to_string(),
            value: value.to_string(),
            context: Some(String::new()),
        }
    }

    fn resume_facts() -> CannedOracle {
        CannedOracle::Facts(vec![
            raw("First Name", "Vijay"),
            raw("Date of Birth", "1989-03-15"),
            raw("Age", "35"),
            raw("Shoe Size", "9"),
        ])
    }

    fn resume_pdf() -> Vec<u8> {
        single_page_pdf(&[
            "Vijay Kumar was born on March 15, 1989, in Jaipur, Rajasthan.",
            "His birthdate is formatted in ISO format for easy parsing.",
        ])
    }

    fn state_with(oracle: CannedOracle) -> AppState {
        AppState {
            oracle: Arc::new(oracle),
            config: Config {
                anthropic_api_key: "test-key".to_string(),
                anthropic_model: "test-model".to_string(),
                port: 0,
                rust_log: "debug".to_string(),
                max_upload_bytes: BODY_LIMIT,
                as_of_year: 2024,
            },
            backfill: BackfillOptions::default(),
        }
    }

    fn test_state() -> AppState {
        state_with(CannedOracle::Overloaded)
    }

    fn multipart_request(uri: &str, field: &str, filename: &str, data: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
Content-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(test_state(), request).await
    }

    #[tokio::test]
    async fn test_health() {
        let response = build_router(test_state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["service"], "factsheet-api");
        assert_eq!(json["schema_keys"], 37);
        assert_eq!(json["model"], "test-model");
    }

    #[tokio::test]
    async fn test_normalize_returns_37_rows() {
        let (status, body) = post_json(
            "/api/v1/normalize",
            json!({
                "source_text": "His birthdate is formatted in ISO format.",
                "facts": [
                    {"key": "Age", "value": 35, "context": ""},
                    {"key": "Current Salary", "value": "2,800,000"},
                    {"key": "Shoe Size", "value": "9"}
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["row_count"], 37);
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 37);
        assert_eq!(rows[5]["Key"], "Age");
        assert_eq!(rows[5]["Value"], "35 years");
        assert_eq!(
            rows[5]["Comments"],
            "As on year 2024. His birthdate is formatted in ISO format. "
        );
        assert_eq!(rows[15]["Value"], "2800000");
        assert_eq!(rows[36]["#"], 37);
    }

    #[tokio::test]
    async fn test_normalize_without_valid_facts_is_422() {
        let (status, body) = post_json(
            "/api/v1/normalize",
            json!({"source_text": "", "facts": [{"key": "Shoe Size", "value": "9"}]}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_normalize_then_export_round_trip() {
        let (_, body) = post_json(
            "/api/v1/normalize",
            json!({"facts": [{"key": "First Name", "value": "Vijay"}]}),
        )
        .await;
        let normalized: Value = serde_json::from_slice(&body).unwrap();

        let response = build_router(test_state())
            .oneshot(
                Request::post("/api/v1/export")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({"rows": normalized["rows"]}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Output.xlsx\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn test_export_rejects_incomplete_rows() {
        let (status, _) = post_json(
            "/api/v1/export",
            json!({"rows": [{"#": 1, "Key": "First Name", "Value": "Vijay", "Comments": ""}]}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extract_without_file_field_is_400() {
        let request = multipart_request("/api/v1/extract", "note", "note.txt", b"hello");
        let (status, _) = send(state_with(resume_facts()), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extract_rejects_non_pdf_upload() {
        let request = multipart_request("/api/v1/extract", "file", "cv.txt", b"plain text resume");
        let (status, body) = send(state_with(resume_facts()), request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "PDF_ERROR");
    }

    #[tokio::test]
    async fn test_extract_runs_oracle_through_pipeline() {
        let request = multipart_request("/api/v1/extract", "file", "cv.pdf", &resume_pdf());
        let (status, body) = send(state_with(resume_facts()), request).await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert!(json["extraction_id"].is_string());
        assert_eq!(json["row_count"], 37);

        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 37);
        assert_eq!(rows[0]["Value"], "Vijay");
        assert_eq!(rows[2]["Value"], "15 March 1989");
        assert_eq!(rows[5]["Key"], "Age");
        assert_eq!(rows[5]["Value"], "35 years");
        assert!(rows[5]["Comments"]
            .as_str()
            .unwrap()
            .starts_with("As on year 2024. His birthdate is formatted in ISO format"));
        assert_eq!(rows[6]["Comments"], "Emergency contact purposes. ");
    }

    #[tokio::test]
    async fn test_extract_oracle_failure_is_502() {
        let request = multipart_request("/api/v1/extract", "file", "cv.pdf", &resume_pdf());
        let (status, body) = send(state_with(CannedOracle::Overloaded), request).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "ORACLE_ERROR");
    }

    #[tokio::test]
    async fn test_extract_with_only_unknown_keys_is_422() {
        let oracle = CannedOracle::Facts(vec![raw("Shoe Size", "9"), raw("Favourite Colour", "Blue")]);
        let request = multipart_request("/api/v1/extract", "file", "cv.pdf", &resume_pdf());
        let (status, body) = send(state_with(oracle), request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_extract_xlsx_returns_attachment() {
        let request = multipart_request("/api/v1/extract/xlsx", "file", "cv.pdf", &resume_pdf());
        let response = build_router(state_with(resume_facts()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Output.xlsx\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn test_extract_xlsx_oracle_failure_is_502() {
        let request = multipart_request("/api/v1/extract/xlsx", "file", "cv.pdf", &resume_pdf());
        let (status, _) = send(state_with(CannedOracle::Overloaded), request).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
