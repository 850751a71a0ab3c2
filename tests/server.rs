//! HTTP routes, driven in-process with a stub model.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use emoticart::server::{router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

const BOUNDARY: &str = "emoticart-test-boundary";

fn app() -> Router {
    app_with_limit(1024 * 1024)
}

fn app_with_limit(max_upload_bytes: usize) -> Router {
    router(AppState::new(common::pipeline(4)), max_upload_bytes)
}

fn multipart(field: &str, filename: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::post("/process_csv")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("valid request")
}

async fn send(request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    send_to(app(), request).await
}

async fn send_to(app: Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn analyze_returns_class_index() -> anyhow::Result<()> {
    let (status, body) = send(Request::get("/analyze?text=love%20it%20%2B%2B").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "sentiment": 1 }));

    let (status, body) = send(Request::get("/analyze?text=nope%20-").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "sentiment": 0 }));
    Ok(())
}

#[tokio::test]
async fn analyze_without_text_is_bad_request() -> anyhow::Result<()> {
    let (status, body) = send(Request::get("/analyze").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No text provided" }));
    Ok(())
}

#[tokio::test]
async fn analyze_model_failure_is_server_error() -> anyhow::Result<()> {
    let (status, body) = send(Request::get("/analyze?text=boom!").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap_or_default().contains("chunk 0"));
    Ok(())
}

#[tokio::test]
async fn process_csv_labels_rows() -> anyhow::Result<()> {
    let csv = "id,text\n1,works great +\n2,overpriced junk\n";
    let (status, body) = send(multipart("file", "reviews.csv", csv)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": 1, "text": "works great +", "sentiment": "Positive", "category": "functionality" },
            { "id": 2, "text": "overpriced junk", "sentiment": "Negative", "category": "price" }
        ])
    );
    Ok(())
}

#[tokio::test]
async fn process_csv_header_only_is_empty_array() -> anyhow::Result<()> {
    let (status, body) = send(multipart("file", "reviews.csv", "id,text")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn process_csv_rejects_bad_uploads() -> anyhow::Result<()> {
    let cases = [
        (multipart("upload", "reviews.csv", "text\nok"), "No file part in the request"),
        (multipart("file", "", "text\nok"), "No selected file"),
        (
            multipart("file", "reviews.txt", "text\nok"),
            "Invalid file format, only CSV files are allowed",
        ),
    ];

    for (request, expected) in cases {
        let (status, body) = send(request).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": expected }));
    }
    Ok(())
}

#[tokio::test]
async fn process_csv_without_text_column_is_bad_request() -> anyhow::Result<()> {
    let (status, body) = send(multipart("file", "reviews.csv", "id,review\n1,fine")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("'text'"));
    Ok(())
}

#[tokio::test]
async fn oversized_upload_is_payload_too_large() -> anyhow::Result<()> {
    let csv = format!("text\n{}\n", "works great +\n".repeat(200));
    let (status, body) = send_to(app_with_limit(256), multipart("file", "reviews.csv", &csv)).await?;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn health() -> anyhow::Result<()> {
    let (status, body) = send(Request::get("/health").body(Body::empty())?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
    Ok(())
}
