use super::models::{WasteCreate, WasteUpdate};
use crate::config::test_helpers::{setup_test_app, setup_test_app_with_db};
use crate::test_helpers::{
    call, create_test_industry, create_test_request, create_test_waste,
    create_test_waste_with_params, get_json, request_json,
};
use crate::{waste_requests, wastes};
use axum::http::StatusCode;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

#[test]
fn test_legacy_field_spellings_are_accepted() {
    let create: WasteCreate = serde_json::from_value(json!({
        "name": "Scrap Metal",
        "wasteType": "Metal",
        "Quantity": 500,
        "Unit": "kg",
        "industry_id": 1
    }))
    .unwrap();
    assert_eq!(create.waste_type.as_deref(), Some("Metal"));
    assert_eq!(create.quantity, Some(500.0));
    assert_eq!(create.unit.as_deref(), Some("kg"));

    let update: WasteUpdate = serde_json::from_value(json!({"notes": null})).unwrap();
    assert_eq!(update.notes, Some(None));
    assert!(!update.is_empty());
}

#[tokio::test]
async fn test_waste_crud_operations() {
    let app = setup_test_app().await;
    let (industry_id, _) = create_test_industry(&app).await.unwrap();

    let (status, body) = request_json(
        &app,
        "POST",
        "/api/wastes",
        &json!({
            "name": "Plastic Pellets",
            "wasteType": "Plastic",
            "unit": "kg",
            "notes": "Clean, sorted",
            "industry_id": industry_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Failed to create waste: {body:?}");
    assert_eq!(body["waste_type"], "Plastic");
    assert_eq!(body["quantity"], 0.0, "Quantity defaults to zero");
    assert_eq!(body["industry"]["id"], industry_id);
    assert_eq!(body["waste_requests"], json!([]));
    let waste_id = body["id"].as_i64().unwrap();

    let (status, fetched) = get_json(&app, &format!("/api/wastes/{waste_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["notes"], "Clean, sorted");

    let (status, updated) = request_json(
        &app,
        "PUT",
        &format!("/api/wastes/{waste_id}"),
        &json!({"quantity": 300.0, "notes": null}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "Update failed: {updated:?}");
    assert_eq!(updated["quantity"], 300.0);
    assert!(updated["notes"].is_null());
    assert_eq!(updated["name"], "Plastic Pellets");

    let (status, body) = call(&app, "DELETE", &format!("/api/wastes/{waste_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Waste {waste_id} deleted successfully"));

    let (status, _) = get_json(&app, &format!("/api/wastes/{waste_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_waste_validation() {
    let (app, db) = setup_test_app_with_db().await;
    let (industry_id, _) = create_test_industry(&app).await.unwrap();

    let (status, body) = request_json(
        &app,
        "POST",
        "/api/wastes",
        &json!({"name": "Scrap", "unit": "kg", "industry_id": industry_id}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name, waste_type, and unit are required");

    let (status, _) = request_json(
        &app,
        "POST",
        "/api/wastes",
        &json!({"name": "Scrap", "waste_type": "Metal", "unit": "kg"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "industry_id is required");

    let (status, _) = request_json(
        &app,
        "POST",
        "/api/wastes",
        &json!({"name": "Scrap", "waste_type": "Metal", "unit": "kg", "quantity": -1, "industry_id": industry_id}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "Negative stock must be rejected");

    let (status, body) = request_json(
        &app,
        "POST",
        "/api/wastes",
        &json!({"name": "Scrap", "waste_type": "Metal", "unit": "kg", "industry_id": 9999}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Industry with id 9999 not found");

    assert_eq!(wastes::models::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_waste_revalidates_industry() {
    let app = setup_test_app().await;
    let (industry_id, _) = create_test_industry(&app).await.unwrap();
    let (other_id, _) = create_test_industry(&app).await.unwrap();
    let (waste_id, _) = create_test_waste(&app, industry_id).await.unwrap();
    let uri = format!("/api/wastes/{waste_id}");

    let (status, _) = request_json(&app, "PUT", &uri, &json!({"industry_id": 9999})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = request_json(&app, "PUT", &uri, &json!({"industry_id": other_id})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["industry"]["id"], other_id);

    let (status, _) = request_json(&app, "PUT", &uri, &json!({"unit": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = request_json(&app, "PUT", &uri, &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data provided");
}

#[tokio::test]
async fn test_delete_waste_cascades_to_requests() {
    let (app, db) = setup_test_app_with_db().await;
    let (supplier_id, _) = create_test_industry(&app).await.unwrap();
    let (requester_id, _) = create_test_industry(&app).await.unwrap();
    let (waste_id, _) = create_test_waste(&app, supplier_id).await.unwrap();
    let (request_id, _) = create_test_request(&app, requester_id, waste_id, 25.0)
        .await
        .unwrap();

    let (_, waste) = get_json(&app, &format!("/api/wastes/{waste_id}")).await;
    assert_eq!(waste["waste_requests"][0]["id"], request_id);

    let (status, _) = call(&app, "DELETE", &format!("/api/wastes/{waste_id}")).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(waste_requests::models::Entity::find().count(&db).await.unwrap(), 0);
    let (status, _) = get_json(&app, &format!("/api/industries/{supplier_id}")).await;
    assert_eq!(status, StatusCode::OK, "The owning industry survives");
}

#[tokio::test]
async fn test_listing_filters_and_aggregates() {
    let app = setup_test_app().await;
    let (steel_id, _) = create_test_industry(&app).await.unwrap();
    let (glass_id, _) = create_test_industry(&app).await.unwrap();

    create_test_waste_with_params(&app, "Scrap Metal", "Metal", 500.0, "kg", steel_id)
        .await
        .unwrap();
    create_test_waste_with_params(&app, "Aluminium Offcuts", "Metal", 150.0, "kg", steel_id)
        .await
        .unwrap();
    create_test_waste_with_params(&app, "Glass Shards", "Glass", 0.0, "kg", glass_id)
        .await
        .unwrap();

    let (_, all) = get_json(&app, "/api/wastes").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, owned) = get_json(&app, &format!("/api/wastes?industry_id={steel_id}")).await;
    assert_eq!(owned.as_array().unwrap().len(), 2);

    let (status, _) = get_json(&app, "/api/wastes?industry_id=steel").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, metal) = get_json(&app, "/api/wastes/type/Metal").await;
    assert_eq!(metal.as_array().unwrap().len(), 2);

    let (_, available) = get_json(&app, "/api/wastes/available").await;
    let available = available.as_array().unwrap();
    assert_eq!(available.len(), 2);
    assert!(available.iter().all(|waste| waste["quantity"].as_f64().unwrap() > 0.0));

    let (status, totals) = get_json(&app, "/api/wastes/total-quantity").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals, json!({"total_quantity": 650.0, "total_types": 2}));

    let (_, count) = get_json(&app, "/api/wastes/count").await;
    assert_eq!(count, json!({"count": 3}));
}

#[tokio::test]
async fn test_total_quantity_on_empty_inventory() {
    let app = setup_test_app().await;

    let (status, totals) = get_json(&app, "/api/wastes/total-quantity").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals, json!({"total_quantity": 0.0, "total_types": 0}));
}
