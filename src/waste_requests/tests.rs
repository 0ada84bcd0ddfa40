use crate::config::test_helpers::{setup_test_app, setup_test_app_with_db};
use crate::test_helpers::{
    call, create_test_industry, create_test_request, create_test_waste,
    create_test_waste_with_params, get_json, request_json,
};
use axum::http::StatusCode;
use serde_json::json;

const REQUESTS: &str = "/api/dashboard/waste-requests";

/// Supplier with 500 kg of Metal plus a second industry asking for it
async fn exchange(app: &axum::Router) -> (i64, i64, i64) {
    let (supplier_id, _) = create_test_industry(app).await.unwrap();
    let (requester_id, _) = create_test_industry(app).await.unwrap();
    let (waste_id, _) = create_test_waste(app, supplier_id).await.unwrap();
    (supplier_id, requester_id, waste_id)
}

async fn waste_quantity(app: &axum::Router, waste_id: i64) -> f64 {
    let (status, body) = get_json(app, &format!("/api/wastes/{waste_id}")).await;
    assert_eq!(status, StatusCode::OK, "Failed to read waste: {body:?}");
    body["quantity"].as_f64().unwrap()
}

#[tokio::test]
async fn test_create_request_starts_pending_with_relations() {
    let app = setup_test_app().await;
    let (_, requester_id, waste_id) = exchange(&app).await;

    let (request_id, body) = create_test_request(&app, requester_id, waste_id, 100.0)
        .await
        .unwrap();

    assert_eq!(body["status"], "pending");
    assert_eq!(body["quantity_requested"], 100.0);
    assert_eq!(body["details"], "Requested by test helper");
    assert_eq!(body["industry"]["id"], requester_id);
    assert_eq!(body["waste"]["id"], waste_id);
    assert!(body["created_at"].is_string());

    let (status, fetched) = get_json(&app, &format!("{REQUESTS}/{request_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], request_id);
    assert_eq!(waste_quantity(&app, waste_id).await, 500.0, "Filing a request must not touch stock");
}

#[tokio::test]
async fn test_create_request_validation() {
    let app = setup_test_app().await;
    let (_, requester_id, waste_id) = exchange(&app).await;

    let (status, body) = request_json(
        &app,
        "POST",
        REQUESTS,
        &json!({"waste_id": waste_id, "quantity_requested": 5.0}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Industry ID and Waste ID are required");

    let (status, _) = request_json(
        &app,
        "POST",
        REQUESTS,
        &json!({"industry_id": requester_id, "waste_id": waste_id}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = request_json(
        &app,
        "POST",
        REQUESTS,
        &json!({"industry_id": requester_id, "waste_id": waste_id, "quantity_requested": 0}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Zero quantity should be rejected");

    let (status, body) = request_json(
        &app,
        "POST",
        REQUESTS,
        &json!({"industry_id": requester_id, "waste_id": 9999, "quantity_requested": 5.0}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Waste with id 9999 not found");

    let (status, _) = request_json(
        &app,
        "POST",
        REQUESTS,
        &json!({"industry_id": 9999, "waste_id": waste_id, "quantity_requested": 5.0}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_approve_decrements_stock() {
    let app = setup_test_app().await;
    let (_, requester_id, waste_id) = exchange(&app).await;
    let (request_id, _) = create_test_request(&app, requester_id, waste_id, 100.0)
        .await
        .unwrap();

    let (status, body) = call(&app, "POST", &format!("{REQUESTS}/{request_id}/approve")).await;
    assert_eq!(status, StatusCode::OK, "Approval failed: {body:?}");
    assert_eq!(body["status"], "approved");
    assert_eq!(body["waste"]["quantity"], 400.0);

    assert_eq!(waste_quantity(&app, waste_id).await, 400.0);
}

#[tokio::test]
async fn test_approve_with_insufficient_stock_changes_nothing() {
    let app = setup_test_app().await;
    let (_, requester_id, waste_id) = exchange(&app).await;
    let (request_id, _) = create_test_request(&app, requester_id, waste_id, 600.0)
        .await
        .unwrap();

    let (status, body) = call(&app, "POST", &format!("{REQUESTS}/{request_id}/approve")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Insufficient waste quantity in stock"),
        "Unexpected error: {body:?}"
    );

    let (_, request) = get_json(&app, &format!("{REQUESTS}/{request_id}")).await;
    assert_eq!(request["status"], "pending");
    assert_eq!(waste_quantity(&app, waste_id).await, 500.0);
}

#[tokio::test]
async fn test_approve_exact_stock_leaves_zero() {
    let app = setup_test_app().await;
    let (_, requester_id, waste_id) = exchange(&app).await;
    let (request_id, _) = create_test_request(&app, requester_id, waste_id, 500.0)
        .await
        .unwrap();

    let (status, _) = call(&app, "POST", &format!("{REQUESTS}/{request_id}/approve")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(waste_quantity(&app, waste_id).await, 0.0);

    let (_, available) = get_json(&app, "/api/wastes/available").await;
    assert!(available.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_only_pending_requests_change_status() {
    let app = setup_test_app().await;
    let (_, requester_id, waste_id) = exchange(&app).await;
    let (request_id, _) = create_test_request(&app, requester_id, waste_id, 50.0)
        .await
        .unwrap();

    let (status, _) = call(&app, "POST", &format!("{REQUESTS}/{request_id}/approve")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, "POST", &format!("{REQUESTS}/{request_id}/approve")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Second approval must fail");
    assert_eq!(body["rule"], "pending_only");

    let (status, _) = call(&app, "POST", &format!("{REQUESTS}/{request_id}/reject")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(waste_quantity(&app, waste_id).await, 450.0, "Stock is decremented once");
}

#[tokio::test]
async fn test_reject_leaves_stock_alone() {
    let app = setup_test_app().await;
    let (_, requester_id, waste_id) = exchange(&app).await;
    let (request_id, _) = create_test_request(&app, requester_id, waste_id, 50.0)
        .await
        .unwrap();

    let (status, body) = call(&app, "POST", &format!("{REQUESTS}/{request_id}/reject")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "rejected");
    assert_eq!(waste_quantity(&app, waste_id).await, 500.0);

    let (status, _) = call(&app, "POST", &format!("{REQUESTS}/{request_id}/approve")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Rejected requests stay rejected");
}

#[tokio::test]
async fn test_approve_unknown_request_is_404() {
    let app = setup_test_app().await;

    let (status, body) = call(&app, "POST", &format!("{REQUESTS}/4242/approve")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Waste request with id 4242 not found");
}

#[tokio::test]
async fn test_status_endpoint_validates_and_guards_stock() {
    let app = setup_test_app().await;
    let (_, requester_id, waste_id) = exchange(&app).await;
    let (request_id, _) = create_test_request(&app, requester_id, waste_id, 120.0)
        .await
        .unwrap();
    let uri = format!("{REQUESTS}/{request_id}/status");

    let (status, body) = request_json(&app, "PATCH", &uri, &json!({"status": "completed"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "status");

    let (status, body) = request_json(&app, "PATCH", &uri, &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Status is required");

    let (status, body) = request_json(&app, "PATCH", &uri, &json!({"status": "Approved"})).await;
    assert_eq!(status, StatusCode::OK, "Status update failed: {body:?}");
    assert_eq!(body["status"], "approved");
    assert_eq!(waste_quantity(&app, waste_id).await, 380.0);

    let (status, _) = request_json(&app, "PATCH", &uri, &json!({"status": "approved"})).await;
    assert_eq!(status, StatusCode::OK, "Repeating the current status is a no-op");
    assert_eq!(waste_quantity(&app, waste_id).await, 380.0);

    let (status, _) = request_json(&app, "PATCH", &uri, &json!({"status": "pending"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Approved requests cannot reopen");
}

#[tokio::test]
async fn test_generic_update_applies_the_stock_guard() {
    let app = setup_test_app().await;
    let (supplier_id, requester_id, _) = exchange(&app).await;
    let (waste_id, _) = create_test_waste_with_params(&app, "Offcuts", "Wood", 30.0, "kg", supplier_id)
        .await
        .unwrap();
    let (request_id, _) = create_test_request(&app, requester_id, waste_id, 10.0)
        .await
        .unwrap();
    let uri = format!("{REQUESTS}/{request_id}");

    // Raising the quantity and approving in one call checks the new quantity
    let (status, body) = request_json(
        &app,
        "PUT",
        &uri,
        &json!({"quantity_requested": 40.0, "status": "approved"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Guard bypassed: {body:?}");
    assert_eq!(body["rule"], "sufficient_stock");

    let (_, request) = get_json(&app, &uri).await;
    assert_eq!(request["quantity_requested"], 10.0, "Failed update must roll back field edits");
    assert_eq!(request["status"], "pending");

    let (status, body) = request_json(
        &app,
        "PATCH",
        &uri,
        &json!({"details": "Pickup on Monday", "status": "approved"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Update failed: {body:?}");
    assert_eq!(body["details"], "Pickup on Monday");
    assert_eq!(waste_quantity(&app, waste_id).await, 20.0);

    let (status, _) = request_json(&app, "PATCH", &uri, &json!({"quantity_requested": 5.0})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Quantity is frozen once approved");

    let (status, body) = request_json(&app, "PATCH", &uri, &json!({"details": "Picked up"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["details"], "Picked up");

    let (status, body) = request_json(&app, "PUT", &uri, &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data provided");
}

/// Both approvals are in flight at once; the single test connection runs
/// them one after the other, and the second must see the reduced stock.
#[tokio::test]
async fn test_queued_approvals_never_oversell() {
    let (app, _db) = setup_test_app_with_db().await;
    let (_, requester_id, waste_id) = exchange(&app).await;
    let (first, _) = create_test_request(&app, requester_id, waste_id, 300.0)
        .await
        .unwrap();
    let (second, _) = create_test_request(&app, requester_id, waste_id, 300.0)
        .await
        .unwrap();

    let first_uri = format!("{REQUESTS}/{first}/approve");
    let second_uri = format!("{REQUESTS}/{second}/approve");
    let ((first_status, _), (second_status, _)) = tokio::join!(
        call(&app, "POST", &first_uri),
        call(&app, "POST", &second_uri)
    );

    let approvals = [first_status, second_status]
        .iter()
        .filter(|status| **status == StatusCode::OK)
        .count();
    assert_eq!(approvals, 1, "Exactly one approval fits in 500 kg");
    assert_eq!(waste_quantity(&app, waste_id).await, 200.0);

    let (_, stats) = get_json(&app, &format!("{REQUESTS}/stats")).await;
    assert_eq!(stats["approved"], 1);
    assert_eq!(stats["pending"], 1);
}

#[tokio::test]
async fn test_list_filters_by_status_newest_first() {
    let app = setup_test_app().await;
    let (_, requester_id, waste_id) = exchange(&app).await;
    let (first, _) = create_test_request(&app, requester_id, waste_id, 10.0).await.unwrap();
    let (second, _) = create_test_request(&app, requester_id, waste_id, 20.0).await.unwrap();
    let (third, _) = create_test_request(&app, requester_id, waste_id, 30.0).await.unwrap();

    call(&app, "POST", &format!("{REQUESTS}/{second}/reject")).await;

    let (status, all) = get_json(&app, REQUESTS).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|request| request["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![third, second, first]);

    let (_, pending) = get_json(&app, &format!("{REQUESTS}?status=pending")).await;
    assert_eq!(pending.as_array().unwrap().len(), 2);

    let (_, rejected) = get_json(&app, &format!("{REQUESTS}?status=REJECTED")).await;
    assert_eq!(rejected.as_array().unwrap().len(), 1);
    assert_eq!(rejected[0]["id"], second);

    let (status, _) = get_json(&app, &format!("{REQUESTS}?status=archived")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stats) = get_json(&app, &format!("{REQUESTS}/stats")).await;
    assert_eq!(stats, json!({"pending": 2, "approved": 0, "rejected": 1}));
}

#[tokio::test]
async fn test_delete_request_keeps_stock() {
    let app = setup_test_app().await;
    let (_, requester_id, waste_id) = exchange(&app).await;
    let (request_id, _) = create_test_request(&app, requester_id, waste_id, 100.0)
        .await
        .unwrap();
    call(&app, "POST", &format!("{REQUESTS}/{request_id}/approve")).await;

    let (status, body) = call(&app, "DELETE", &format!("{REQUESTS}/{request_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Waste request {request_id} deleted successfully"));

    let (status, _) = get_json(&app, &format!("{REQUESTS}/{request_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(waste_quantity(&app, waste_id).await, 400.0);

    let (status, _) = call(&app, "DELETE", &format!("{REQUESTS}/{request_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
