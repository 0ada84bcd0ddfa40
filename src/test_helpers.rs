/// Shared test helpers for building the exchange through its HTTP API
///
/// Objects follow the ownership chain: Industries → Wastes → WasteRequests
/// (a request also points at the requesting industry).
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicI32, Ordering};
use tower::ServiceExt;

static NEXT_CODE: AtomicI32 = AtomicI32::new(1000);

/// Industry codes that do not collide within a test binary
pub fn unique_industry_code() -> i32 {
    NEXT_CODE.fetch_add(1, Ordering::Relaxed)
}

/// Extract response body as JSON for testing
pub async fn extract_response_body(response: axum::response::Response) -> (StatusCode, Value) {
    use axum::body::to_bytes;

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    let body: Value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| json!({"error": "Invalid JSON response"}));
    (status, body)
}

/// Sends a raw body with a JSON content type
pub async fn send_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: String,
) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    extract_response_body(response).await
}

pub async fn request_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: &Value,
) -> (StatusCode, Value) {
    send_json(app, method, uri, body.to_string()).await
}

/// Requests without a body (GET, DELETE, POST actions)
pub async fn call(app: &axum::Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    extract_response_body(response).await
}

pub async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    call(app, "GET", uri).await
}

/// Create a test industry with a fresh code
pub async fn create_test_industry(app: &axum::Router) -> Result<(i64, Value), String> {
    let code = unique_industry_code();
    create_test_industry_with_params(app, &format!("Test Industry {code}"), code, None).await
}

/// Create a test industry with customizable parameters
pub async fn create_test_industry_with_params(
    app: &axum::Router,
    name: &str,
    industry_code: i32,
    description: Option<&str>,
) -> Result<(i64, Value), String> {
    let mut industry_data = json!({
        "name": name,
        "industry_code": industry_code
    });

    if let Some(text) = description {
        industry_data["description"] = json!(text);
    }

    let (status, body) = request_json(app, "POST", "/api/industries", &industry_data).await;

    if status == StatusCode::CREATED {
        let industry_id = body["id"].as_i64().unwrap();
        Ok((industry_id, body))
    } else {
        Err(format!("Failed to create industry: Status {status}, Body: {body}"))
    }
}

/// Create a test waste of 500 kg of Metal
pub async fn create_test_waste(
    app: &axum::Router,
    industry_id: i64,
) -> Result<(i64, Value), String> {
    create_test_waste_with_params(app, "Steel Scrap", "Metal", 500.0, "kg", industry_id).await
}

/// Create a test waste with customizable parameters
pub async fn create_test_waste_with_params(
    app: &axum::Router,
    name: &str,
    waste_type: &str,
    quantity: f64,
    unit: &str,
    industry_id: i64,
) -> Result<(i64, Value), String> {
    let waste_data = json!({
        "name": name,
        "waste_type": waste_type,
        "quantity": quantity,
        "unit": unit,
        "industry_id": industry_id
    });

    let (status, body) = request_json(app, "POST", "/api/wastes", &waste_data).await;

    if status == StatusCode::CREATED {
        let waste_id = body["id"].as_i64().unwrap();
        Ok((waste_id, body))
    } else {
        Err(format!("Failed to create waste: Status {status}, Body: {body}"))
    }
}

/// Create a pending request from `industry_id` for `quantity` of `waste_id`
pub async fn create_test_request(
    app: &axum::Router,
    industry_id: i64,
    waste_id: i64,
    quantity: f64,
) -> Result<(i64, Value), String> {
    let request_data = json!({
        "industry_id": industry_id,
        "waste_id": waste_id,
        "quantity_requested": quantity,
        "details": "Requested by test helper"
    });

    let (status, body) = request_json(
        app,
        "POST",
        "/api/dashboard/waste-requests",
        &request_data,
    )
    .await;

    if status == StatusCode::CREATED {
        let request_id = body["id"].as_i64().unwrap();
        Ok((request_id, body))
    } else {
        Err(format!("Failed to create waste request: Status {status}, Body: {body}"))
    }
}
