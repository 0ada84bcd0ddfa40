use super::models::{DashboardStats, TopIndustriesParams, TopIndustry};
use super::services;
use crate::common::errors::BusinessResult;
use crate::common::extract::ApiQuery;
use crate::common::models::{ErrorResponse, LimitParams};
use crate::common::state::AppState;
use crate::common::validation::clamp_limit;
use crate::waste_requests;
use crate::waste_requests::models::WasteRequest;
use axum::{Json, extract::State};
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(get_stats))
        .routes(routes!(get_top_industries))
        .routes(routes!(get_recent_activity))
        .with_state(state.clone())
}

#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = OK, description = "Entity counts, request statuses and quantity breakdowns", body = DashboardStats)
    ),
    tag = "dashboard",
    summary = "Dashboard statistics"
)]
pub async fn get_stats(State(state): State<AppState>) -> BusinessResult<Json<DashboardStats>> {
    Ok(Json(services::stats(&state.db).await?))
}

#[utoipa::path(
    get,
    path = "/top-industries",
    params(
        ("limit" = Option<u64>, Query, description = "Number of industries, 1 to 100 (default 5)"),
        ("by" = Option<String>, Query, description = "count (default) or quantity")
    ),
    responses(
        (status = OK, description = "Industries ranked by listed wastes", body = Vec<TopIndustry>),
        (status = BAD_REQUEST, description = "Malformed limit or ranking", body = ErrorResponse)
    ),
    tag = "dashboard",
    summary = "Top industries"
)]
pub async fn get_top_industries(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TopIndustriesParams>,
) -> BusinessResult<Json<Vec<TopIndustry>>> {
    let limit = clamp_limit(params.limit, services::TOP_DEFAULT, services::TOP_MAX);
    let by = params.by.unwrap_or_default();
    Ok(Json(services::top_industries(&state.db, by, limit).await?))
}

#[utoipa::path(
    get,
    path = "/recent-activity",
    params(("limit" = Option<u64>, Query, description = "Number of requests, 1 to 100 (default 10)")),
    responses(
        (status = OK, description = "Latest requests, newest first", body = Vec<WasteRequest>),
        (status = BAD_REQUEST, description = "Malformed limit", body = ErrorResponse)
    ),
    tag = "dashboard",
    summary = "Recent activity"
)]
pub async fn get_recent_activity(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LimitParams>,
) -> BusinessResult<Json<Vec<WasteRequest>>> {
    let limit = clamp_limit(
        params.limit,
        waste_requests::services::RECENT_DEFAULT,
        waste_requests::services::RECENT_MAX,
    );
    Ok(Json(waste_requests::services::recent(&state.db, limit).await?))
}
