use super::models::{TotalQuantity, Waste, WasteCreate, WasteFilter, WasteUpdate};
use super::services;
use crate::common::errors::BusinessResult;
use crate::common::extract::{ApiJson, ApiQuery, IdPath};
use crate::common::models::{CountResponse, ErrorResponse, MessageResponse};
use crate::common::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_wastes, create_waste))
        .routes(routes!(list_wastes_by_type))
        .routes(routes!(list_available_wastes))
        .routes(routes!(get_total_quantity))
        .routes(routes!(count_wastes))
        .routes(routes!(get_waste, update_waste, delete_waste))
        .with_state(state.clone())
}

#[utoipa::path(
    get,
    path = "/",
    params(("industry_id" = Option<i32>, Query, description = "Only wastes listed by this industry")),
    responses(
        (status = OK, description = "Wastes with their industry and requests", body = Vec<Waste>),
        (status = BAD_REQUEST, description = "Malformed filter", body = ErrorResponse)
    ),
    tag = "wastes",
    summary = "List wastes"
)]
pub async fn list_wastes(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<WasteFilter>,
) -> BusinessResult<Json<Vec<Waste>>> {
    Ok(Json(services::list(&state.db, filter.industry_id).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = i32, Path, description = "Waste ID")),
    responses(
        (status = OK, description = "The waste", body = Waste),
        (status = NOT_FOUND, description = "Waste not found", body = ErrorResponse)
    ),
    tag = "wastes",
    summary = "Get waste"
)]
pub async fn get_waste(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> BusinessResult<Json<Waste>> {
    Ok(Json(services::get_one(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = WasteCreate,
    responses(
        (status = CREATED, description = "Waste listed", body = Waste),
        (status = BAD_REQUEST, description = "Missing or invalid fields", body = ErrorResponse),
        (status = NOT_FOUND, description = "Industry not found", body = ErrorResponse)
    ),
    tag = "wastes",
    summary = "Create waste"
)]
pub async fn create_waste(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<WasteCreate>,
) -> BusinessResult<(StatusCode, Json<Waste>)> {
    let waste = services::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(waste)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = i32, Path, description = "Waste ID")),
    request_body = WasteUpdate,
    responses(
        (status = OK, description = "Waste updated", body = Waste),
        (status = BAD_REQUEST, description = "Empty body or invalid fields", body = ErrorResponse),
        (status = NOT_FOUND, description = "Waste or industry not found", body = ErrorResponse)
    ),
    tag = "wastes",
    summary = "Update waste"
)]
pub async fn update_waste(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<WasteUpdate>,
) -> BusinessResult<Json<Waste>> {
    Ok(Json(services::update(&state.db, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = i32, Path, description = "Waste ID")),
    responses(
        (status = OK, description = "Waste and its requests deleted", body = MessageResponse),
        (status = NOT_FOUND, description = "Waste not found", body = ErrorResponse)
    ),
    tag = "wastes",
    summary = "Delete waste"
)]
pub async fn delete_waste(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> BusinessResult<Json<MessageResponse>> {
    services::delete(&state.db, id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Waste {id} deleted successfully"
    ))))
}

#[utoipa::path(
    get,
    path = "/type/{waste_type}",
    params(("waste_type" = String, Path, description = "Exact waste type, e.g. Metal")),
    responses(
        (status = OK, description = "Wastes of this type", body = Vec<Waste>)
    ),
    tag = "wastes",
    summary = "List wastes by type"
)]
pub async fn list_wastes_by_type(
    State(state): State<AppState>,
    Path(waste_type): Path<String>,
) -> BusinessResult<Json<Vec<Waste>>> {
    Ok(Json(services::list_by_type(&state.db, &waste_type).await?))
}

#[utoipa::path(
    get,
    path = "/available",
    responses(
        (status = OK, description = "Wastes with a positive quantity", body = Vec<Waste>)
    ),
    tag = "wastes",
    summary = "List available wastes"
)]
pub async fn list_available_wastes(State(state): State<AppState>) -> BusinessResult<Json<Vec<Waste>>> {
    Ok(Json(services::list_available(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/total-quantity",
    responses(
        (status = OK, description = "Summed quantity and number of distinct types", body = TotalQuantity)
    ),
    tag = "wastes",
    summary = "Total waste quantity"
)]
pub async fn get_total_quantity(State(state): State<AppState>) -> BusinessResult<Json<TotalQuantity>> {
    Ok(Json(services::total_quantity(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/count",
    responses(
        (status = OK, description = "Number of wastes", body = CountResponse)
    ),
    tag = "wastes",
    summary = "Count wastes"
)]
pub async fn count_wastes(State(state): State<AppState>) -> BusinessResult<Json<CountResponse>> {
    let count = services::count(&state.db).await?;
    Ok(Json(CountResponse { count }))
}
