use super::models::{
    RequestFilter, RequestStatus, StatusCounts, StatusUpdate, WasteRequest, WasteRequestCreate,
    WasteRequestUpdate,
};
use super::services;
use crate::common::errors::BusinessResult;
use crate::common::extract::{ApiJson, ApiQuery, IdPath};
use crate::common::models::{ErrorResponse, LimitParams, MessageResponse};
use crate::common::validation::clamp_limit;
use crate::common::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_requests, create_request))
        .routes(routes!(request_stats))
        .routes(routes!(recent_requests))
        .routes(routes!(get_request, update_request, patch_request, delete_request))
        .routes(routes!(approve_request))
        .routes(routes!(reject_request))
        .routes(routes!(update_request_status))
        .with_state(state.clone())
}

#[utoipa::path(
    get,
    path = "/",
    params(("status" = Option<String>, Query, description = "pending, approved or rejected")),
    responses(
        (status = OK, description = "Requests, newest first", body = Vec<WasteRequest>),
        (status = BAD_REQUEST, description = "Unknown status filter", body = ErrorResponse)
    ),
    tag = "waste-requests",
    summary = "List waste requests"
)]
pub async fn list_requests(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<RequestFilter>,
) -> BusinessResult<Json<Vec<WasteRequest>>> {
    let status = filter
        .status
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(str::parse::<RequestStatus>)
        .transpose()?;
    Ok(Json(services::list(&state.db, status).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = i32, Path, description = "Waste request ID")),
    responses(
        (status = OK, description = "The request", body = WasteRequest),
        (status = NOT_FOUND, description = "Request not found", body = ErrorResponse)
    ),
    tag = "waste-requests",
    summary = "Get waste request"
)]
pub async fn get_request(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> BusinessResult<Json<WasteRequest>> {
    Ok(Json(services::get_one(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = WasteRequestCreate,
    responses(
        (status = CREATED, description = "Request filed as pending", body = WasteRequest),
        (status = BAD_REQUEST, description = "Missing or invalid fields", body = ErrorResponse),
        (status = NOT_FOUND, description = "Industry or waste not found", body = ErrorResponse)
    ),
    tag = "waste-requests",
    summary = "Create waste request"
)]
pub async fn create_request(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<WasteRequestCreate>,
) -> BusinessResult<(StatusCode, Json<WasteRequest>)> {
    let request = services::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = i32, Path, description = "Waste request ID")),
    request_body = WasteRequestUpdate,
    responses(
        (status = OK, description = "Request updated", body = WasteRequest),
        (status = BAD_REQUEST, description = "Invalid status, illegal transition or insufficient stock", body = ErrorResponse),
        (status = NOT_FOUND, description = "Request not found", body = ErrorResponse)
    ),
    tag = "waste-requests",
    summary = "Update waste request"
)]
pub async fn update_request(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<WasteRequestUpdate>,
) -> BusinessResult<Json<WasteRequest>> {
    Ok(Json(services::update(&state.db, id, payload).await?))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    params(("id" = i32, Path, description = "Waste request ID")),
    request_body = WasteRequestUpdate,
    responses(
        (status = OK, description = "Request updated", body = WasteRequest),
        (status = BAD_REQUEST, description = "Invalid status, illegal transition or insufficient stock", body = ErrorResponse),
        (status = NOT_FOUND, description = "Request not found", body = ErrorResponse)
    ),
    tag = "waste-requests",
    summary = "Partially update waste request"
)]
pub async fn patch_request(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<WasteRequestUpdate>,
) -> BusinessResult<Json<WasteRequest>> {
    Ok(Json(services::update(&state.db, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = i32, Path, description = "Waste request ID")),
    responses(
        (status = OK, description = "Request deleted", body = MessageResponse),
        (status = NOT_FOUND, description = "Request not found", body = ErrorResponse)
    ),
    tag = "waste-requests",
    summary = "Delete waste request"
)]
pub async fn delete_request(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> BusinessResult<Json<MessageResponse>> {
    services::delete(&state.db, id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Waste request {id} deleted successfully"
    ))))
}

#[utoipa::path(
    post,
    path = "/{id}/approve",
    params(("id" = i32, Path, description = "Waste request ID")),
    responses(
        (status = OK, description = "Request approved and stock decremented", body = WasteRequest),
        (status = BAD_REQUEST, description = "Request not pending or stock too low", body = ErrorResponse),
        (status = NOT_FOUND, description = "Request not found", body = ErrorResponse)
    ),
    tag = "waste-requests",
    summary = "Approve waste request"
)]
pub async fn approve_request(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> BusinessResult<Json<WasteRequest>> {
    Ok(Json(services::approve(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/{id}/reject",
    params(("id" = i32, Path, description = "Waste request ID")),
    responses(
        (status = OK, description = "Request rejected", body = WasteRequest),
        (status = BAD_REQUEST, description = "Request not pending", body = ErrorResponse),
        (status = NOT_FOUND, description = "Request not found", body = ErrorResponse)
    ),
    tag = "waste-requests",
    summary = "Reject waste request"
)]
pub async fn reject_request(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> BusinessResult<Json<WasteRequest>> {
    Ok(Json(services::reject(&state.db, id).await?))
}

#[utoipa::path(
    patch,
    path = "/{id}/status",
    params(("id" = i32, Path, description = "Waste request ID")),
    request_body = StatusUpdate,
    responses(
        (status = OK, description = "Status changed", body = WasteRequest),
        (status = BAD_REQUEST, description = "Missing or invalid status, illegal transition or insufficient stock", body = ErrorResponse),
        (status = NOT_FOUND, description = "Request not found", body = ErrorResponse)
    ),
    tag = "waste-requests",
    summary = "Set waste request status"
)]
pub async fn update_request_status(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<StatusUpdate>,
) -> BusinessResult<Json<WasteRequest>> {
    Ok(Json(services::set_status(&state.db, id, payload.status).await?))
}

#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = OK, description = "Number of requests per status", body = StatusCounts)
    ),
    tag = "waste-requests",
    summary = "Waste request statistics"
)]
pub async fn request_stats(State(state): State<AppState>) -> BusinessResult<Json<StatusCounts>> {
    Ok(Json(services::status_counts(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/recent-activity",
    params(("limit" = Option<u64>, Query, description = "Number of requests, 1 to 100 (default 10)")),
    responses(
        (status = OK, description = "Latest requests, newest first", body = Vec<WasteRequest>),
        (status = BAD_REQUEST, description = "Malformed limit", body = ErrorResponse)
    ),
    tag = "waste-requests",
    summary = "Recent waste requests"
)]
pub async fn recent_requests(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LimitParams>,
) -> BusinessResult<Json<Vec<WasteRequest>>> {
    let limit = clamp_limit(params.limit, services::RECENT_DEFAULT, services::RECENT_MAX);
    Ok(Json(services::recent(&state.db, limit).await?))
}
