//! Axum application setup.

use std::future::Future;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::web::{index_handler, static_handler};

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/reconcile", post(handlers::reconcile_api))
        .route("/columns", post(handlers::get_columns))
        .route("/health", get(handlers::health));

    Router::new()
        .route("/", get(index_handler).post(handlers::reconcile_form))
        .nest("/api", api_routes)
        .fallback(static_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(state.config.max_upload_bytes)),
        )
        .with_state(state)
}

/// Start the web server and run until `shutdown` resolves.
pub async fn run_server(
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::clone(&state.config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::state::ServerConfig;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    const BOUNDARY: &str = "recon-test-boundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a [u8]),
    }

    fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, filename, data) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n",
                            name, filename
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .unwrap()
    }

    fn router() -> Router {
        create_router(AppState::new(ServerConfig::default()))
    }

    const BANK: &[u8] = b"TransactionID,Amount\nT1,10\nT2,20\nT3,30\n";
    const LEDGER: &[u8] = b"TransactionID,Amount\nT2,20\nT3,31\nT4,40\n";

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[tokio::test]
    async fn test_health() {
        let response = router()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_index_lists_sample_columns() {
        let response = router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        for column in ["TransactionID", "Date", "Amount", "Description"] {
            assert!(html.contains(&format!("<option value=\"{}\">", column)));
        }
    }

    #[tokio::test]
    async fn test_form_returns_xlsx_attachment() {
        let request = multipart_request(
            "/",
            &[
                Part::File("file_a", "bank.csv", BANK),
                Part::File("file_b", "ledger.csv", LEDGER),
                Part::Text("primary_key", "TransactionID"),
                Part::Text("secondary_keys", "Amount"),
            ],
        );
        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("reconciliation_report.xlsx"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_form_missing_key_field() {
        let request = multipart_request(
            "/",
            &[
                Part::File("file_a", "bank.csv", BANK),
                Part::File("file_b", "ledger.csv", LEDGER),
            ],
        );
        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Missing files or key column.");
    }

    #[tokio::test]
    async fn test_form_blank_file_input_counts_as_missing() {
        let request = multipart_request(
            "/",
            &[
                Part::File("file_a", "bank.csv", BANK),
                Part::File("file_b", "", b""),
                Part::Text("primary_key", "TransactionID"),
            ],
        );
        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_form_key_absent_from_file() {
        let request = multipart_request(
            "/",
            &[
                Part::File("file_a", "bank.csv", BANK),
                Part::File("file_b", "ledger.csv", b"Ref,Amount\nT2,20\n"),
                Part::Text("primary_key", "TransactionID"),
            ],
        );
        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let text = body_text(response).await;
        assert!(text.contains("Primary key 'TransactionID' missing in"));
        assert!(text.contains("ledger.csv"));
    }

    #[tokio::test]
    async fn test_form_unreadable_file_is_server_error() {
        let request = multipart_request(
            "/",
            &[
                Part::File("file_a", "bank.pdf", b"%PDF-1.4"),
                Part::File("file_b", "ledger.csv", LEDGER),
                Part::Text("primary_key", "TransactionID"),
            ],
        );
        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.starts_with("Error processing files:"));
    }

    #[tokio::test]
    async fn test_api_reconcile_json() {
        let request = multipart_request(
            "/api/reconcile",
            &[
                Part::File("file_a", "bank.csv", BANK),
                Part::File("file_b", "ledger.csv", LEDGER),
                Part::Text("primary_key", "TransactionID"),
            ],
        );
        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        let sections = json["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0]["rows"].as_array().unwrap().len(), 2);
        assert_eq!(sections[1]["rows"].as_array().unwrap().len(), 1);
        assert_eq!(sections[2]["rows"].as_array().unwrap().len(), 1);
        assert!(json["run"]["run_id"].is_string());
    }

    #[tokio::test]
    async fn test_api_reconcile_errors_are_json() {
        let request = multipart_request(
            "/api/reconcile",
            &[Part::Text("primary_key", "TransactionID")],
        );
        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"], "missing_input");
    }

    #[tokio::test]
    async fn test_api_columns() {
        let request = multipart_request("/api/columns", &[Part::File("file", "bank.csv", BANK)]);
        let response = router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["columns"], serde_json::json!(["TransactionID", "Amount"]));
        assert_eq!(json["row_count"], 3);
    }

    #[tokio::test]
    async fn test_upload_limit() {
        let config = ServerConfig {
            max_upload_bytes: 64,
            ..ServerConfig::default()
        };
        let big = vec![b'x'; 1024];
        let request = multipart_request(
            "/",
            &[
                Part::File("file_a", "bank.csv", &big),
                Part::File("file_b", "ledger.csv", LEDGER),
                Part::Text("primary_key", "TransactionID"),
            ],
        );
        let response = create_router(AppState::new(config))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
