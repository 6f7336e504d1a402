//! Rate API integration tests.
//!
//! Run with: `cargo test -p freightdesk-api --test rates_test`

mod helpers;

use freightdesk_ingest::RateStore;
use helpers::{csv_upload, csv_upload_named, setup_test_app};
use serde_json::Value;
use uuid::Uuid;

const HEADER: &str = "Origin,Destination,Weight,ServiceType,Rate,Currency,EffectiveDate,ExpiryDate";

fn valid_csv() -> String {
    format!(
        "{}\nDubai,Riyadh,5kg,Express,45.00,USD,2023-01-01,2023-12-31\nJeddah,Doha,10kg,Standard,30.5,SAR,2023-06-01,2024-05-31",
        HEADER
    )
}

#[tokio::test]
async fn test_upload_valid_rate_file() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/api/v0/rates/files")
        .multipart(csv_upload(&valid_csv()))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("processed"));
    assert_eq!(body.get("filename").and_then(|v| v.as_str()), Some("rates.csv"));
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_upload_invalid_rate_file_returns_error_record() {
    let app = setup_test_app();
    let content = format!(
        "{}\nDubai,Riyadh,5kg,Express,abc,usd,2023-01-01,2023-12-31",
        HEADER
    );

    let response = app
        .server
        .post("/api/v0/rates/files")
        .multipart(csv_upload(&content))
        .await;

    // Validation failure is a domain outcome, not a transport error
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("error"));
    let errors: Vec<String> = body
        .get("errors")
        .and_then(|v| v.as_array())
        .expect("Expected 'errors' in response")
        .iter()
        .filter_map(|v| v.as_str().map(String::from))
        .collect();
    assert_eq!(
        errors,
        vec![
            "Row 2: Rate must be a number".to_string(),
            "Row 2: Currency must be a 3-letter code (e.g., USD)".to_string(),
        ]
    );

    // All-or-nothing: the rejected file owns no entries, checked against the
    // store directly rather than through the API
    let file_id = Uuid::parse_str(body.get("id").and_then(|v| v.as_str()).unwrap()).unwrap();
    let persisted = app.store.entries_for_file(file_id).await.unwrap();
    assert!(persisted.is_empty());
}

#[tokio::test]
async fn test_upload_rejects_non_csv_extension() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/api/v0/rates/files")
        .multipart(csv_upload_named(&valid_csv(), "rates.xlsx"))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_upload_without_file_part_is_bad_request() {
    let app = setup_test_app();

    let response = app
        .server
        .post("/api/v0/rates/files")
        .multipart(axum_test::multipart::MultipartForm::new())
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_upload_over_size_ceiling_is_rejected() {
    let app = setup_test_app();
    let oversize = "x".repeat(1024 * 1024 + 1);

    let response = app
        .server
        .post("/api/v0/rates/files")
        .multipart(csv_upload(&oversize))
        .await;

    assert_eq!(response.status_code(), 413);
}

#[tokio::test]
async fn test_list_rate_files_newest_first() {
    let app = setup_test_app();

    app.server
        .post("/api/v0/rates/files")
        .multipart(csv_upload_named(&valid_csv(), "first.csv"))
        .await;
    app.server
        .post("/api/v0/rates/files")
        .multipart(csv_upload_named(&valid_csv(), "second.csv"))
        .await;

    let response = app.server.get("/api/v0/rates/files").await;
    assert_eq!(response.status_code(), 200);
    let files: Vec<Value> = response.json();
    assert_eq!(files.len(), 2);
    assert_eq!(
        files[0].get("filename").and_then(|v| v.as_str()),
        Some("second.csv")
    );
    assert_eq!(
        files[1].get("filename").and_then(|v| v.as_str()),
        Some("first.csv")
    );
}

#[tokio::test]
async fn test_get_rate_file_and_entries() {
    let app = setup_test_app();

    let upload: Value = app
        .server
        .post("/api/v0/rates/files")
        .multipart(csv_upload(&valid_csv()))
        .await
        .json();
    let file_id = upload.get("id").and_then(|v| v.as_str()).unwrap().to_string();

    let file_response = app
        .server
        .get(&format!("/api/v0/rates/files/{}", file_id))
        .await;
    assert_eq!(file_response.status_code(), 200);

    let entries_response = app
        .server
        .get(&format!("/api/v0/rates/files/{}/entries", file_id))
        .await;
    assert_eq!(entries_response.status_code(), 200);
    let entries: Vec<Value> = entries_response.json();
    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0].get("origin").and_then(|v| v.as_str()),
        Some("Dubai")
    );
    assert_eq!(entries[0].get("rate").and_then(|v| v.as_f64()), Some(45.0));
    assert_eq!(
        entries[1].get("origin").and_then(|v| v.as_str()),
        Some("Jeddah")
    );
}

#[tokio::test]
async fn test_get_unknown_rate_file_is_not_found() {
    let app = setup_test_app();
    let response = app
        .server
        .get(&format!("/api/v0/rates/files/{}", Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_export_round_trips_through_upload() {
    let app = setup_test_app();

    let upload: Value = app
        .server
        .post("/api/v0/rates/files")
        .multipart(csv_upload(&valid_csv()))
        .await
        .json();
    let file_id = upload.get("id").and_then(|v| v.as_str()).unwrap().to_string();

    let export_response = app
        .server
        .get(&format!("/api/v0/rates/files/{}/export", file_id))
        .await;
    assert_eq!(export_response.status_code(), 200);
    let content_type = export_response.header("content-type");
    assert!(content_type
        .to_str()
        .expect("content-type header")
        .starts_with("text/csv"));

    let exported = export_response.text();
    let lines: Vec<&str> = exported.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], HEADER);

    // Re-uploading the export must validate cleanly
    let reupload: Value = app
        .server
        .post("/api/v0/rates/files")
        .multipart(csv_upload(&exported))
        .await
        .json();
    assert_eq!(
        reupload.get("status").and_then(|v| v.as_str()),
        Some("processed")
    );
}

#[tokio::test]
async fn test_update_rate_entry() {
    let app = setup_test_app();

    let upload: Value = app
        .server
        .post("/api/v0/rates/files")
        .multipart(csv_upload(&valid_csv()))
        .await
        .json();
    let file_id = upload.get("id").and_then(|v| v.as_str()).unwrap().to_string();

    let entries: Vec<Value> = app
        .server
        .get(&format!("/api/v0/rates/files/{}/entries", file_id))
        .await
        .json();
    let entry_id = entries[0].get("id").and_then(|v| v.as_str()).unwrap().to_string();

    let response = app
        .server
        .patch(&format!("/api/v0/rates/entries/{}", entry_id))
        .json(&serde_json::json!({ "rate": 52.25, "currency": "AED" }))
        .await;

    assert_eq!(response.status_code(), 200);
    let updated: Value = response.json();
    assert_eq!(updated.get("rate").and_then(|v| v.as_f64()), Some(52.25));
    assert_eq!(updated.get("currency").and_then(|v| v.as_str()), Some("AED"));
    assert_eq!(updated.get("origin").and_then(|v| v.as_str()), Some("Dubai"));
}

#[tokio::test]
async fn test_update_rate_entry_rejects_invalid_currency() {
    let app = setup_test_app();

    let response = app
        .server
        .patch(&format!("/api/v0/rates/entries/{}", Uuid::new_v4()))
        .json(&serde_json::json!({ "currency": "usd" }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_update_unknown_rate_entry_is_not_found() {
    let app = setup_test_app();

    let response = app
        .server
        .patch(&format!("/api/v0/rates/entries/{}", Uuid::new_v4()))
        .json(&serde_json::json!({ "rate": 10.0 }))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_health_and_openapi() {
    let app = setup_test_app();

    let health = app.server.get("/health").await;
    assert_eq!(health.status_code(), 200);

    let openapi = app.server.get("/api/openapi.json").await;
    assert_eq!(openapi.status_code(), 200);
    let spec: Value = openapi.json();
    assert!(spec.get("paths").is_some());
}
