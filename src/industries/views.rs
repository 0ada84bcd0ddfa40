use super::models::{Industry, IndustryCreate, IndustryUpdate, SearchParams};
use super::services;
use crate::common::errors::BusinessResult;
use crate::common::extract::{ApiJson, ApiQuery, IdPath};
use crate::common::models::{CountResponse, ErrorResponse, MessageResponse};
use crate::common::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_industries, create_industry))
        .routes(routes!(search_industries))
        .routes(routes!(count_industries))
        .routes(routes!(get_industry, update_industry, delete_industry))
        .with_state(state.clone())
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = OK, description = "All industries with their wastes and requests", body = Vec<Industry>)
    ),
    tag = "industries",
    summary = "List industries"
)]
pub async fn list_industries(State(state): State<AppState>) -> BusinessResult<Json<Vec<Industry>>> {
    Ok(Json(services::list(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = i32, Path, description = "Industry ID")),
    responses(
        (status = OK, description = "The industry", body = Industry),
        (status = NOT_FOUND, description = "Industry not found", body = ErrorResponse)
    ),
    tag = "industries",
    summary = "Get industry"
)]
pub async fn get_industry(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> BusinessResult<Json<Industry>> {
    Ok(Json(services::get_one(&state.db, id).await?))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = IndustryCreate,
    responses(
        (status = CREATED, description = "Industry created", body = Industry),
        (status = BAD_REQUEST, description = "Missing fields or duplicate industry_code", body = ErrorResponse)
    ),
    tag = "industries",
    summary = "Create industry"
)]
pub async fn create_industry(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<IndustryCreate>,
) -> BusinessResult<(StatusCode, Json<Industry>)> {
    let industry = services::create(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(industry)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = i32, Path, description = "Industry ID")),
    request_body = IndustryUpdate,
    responses(
        (status = OK, description = "Industry updated", body = Industry),
        (status = BAD_REQUEST, description = "Empty body or duplicate industry_code", body = ErrorResponse),
        (status = NOT_FOUND, description = "Industry not found", body = ErrorResponse)
    ),
    tag = "industries",
    summary = "Update industry"
)]
pub async fn update_industry(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(payload): ApiJson<IndustryUpdate>,
) -> BusinessResult<Json<Industry>> {
    Ok(Json(services::update(&state.db, id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = i32, Path, description = "Industry ID")),
    responses(
        (status = OK, description = "Industry and its wastes and requests deleted", body = MessageResponse),
        (status = NOT_FOUND, description = "Industry not found", body = ErrorResponse)
    ),
    tag = "industries",
    summary = "Delete industry"
)]
pub async fn delete_industry(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> BusinessResult<Json<MessageResponse>> {
    services::delete(&state.db, id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Industry {id} deleted successfully"
    ))))
}

#[utoipa::path(
    get,
    path = "/search",
    params(("q" = Option<String>, Query, description = "Case-insensitive fragment of the name")),
    responses(
        (status = OK, description = "Matching industries", body = Vec<Industry>)
    ),
    tag = "industries",
    summary = "Search industries by name"
)]
pub async fn search_industries(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> BusinessResult<Json<Vec<Industry>>> {
    Ok(Json(services::search(&state.db, params.q.as_deref()).await?))
}

#[utoipa::path(
    get,
    path = "/count",
    responses(
        (status = OK, description = "Number of industries", body = CountResponse)
    ),
    tag = "industries",
    summary = "Count industries"
)]
pub async fn count_industries(State(state): State<AppState>) -> BusinessResult<Json<CountResponse>> {
    let count = services::count(&state.db).await?;
    Ok(Json(CountResponse { count }))
}
