use super::models::{HealthCheck, MessageResponse};
use crate::common::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use sea_orm::DatabaseConnection;
use utoipa_axum::{router::OpenApiRouter, routes};

const BANNER: &str = "EcoCycle API running";

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(index))
        .routes(routes!(health))
        .with_state(state.db.clone())
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = OK, description = "API banner", body = MessageResponse)
    )
)]
pub async fn index() -> Json<MessageResponse> {
    Json(MessageResponse::new(BANNER))
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = OK, description = "Service and database are reachable", body = HealthCheck),
        (status = SERVICE_UNAVAILABLE, description = "Database is unreachable", body = HealthCheck)
    )
)]
pub async fn health(State(db): State<DatabaseConnection>) -> (StatusCode, Json<HealthCheck>) {
    if let Err(err) = db.ping().await {
        tracing::warn!("Health check failed to reach the database: {err}");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthCheck {
                status: "error".to_string(),
                message: "Database unreachable".to_string(),
            }),
        );
    }

    (
        StatusCode::OK,
        Json(HealthCheck {
            status: "ok".to_string(),
            message: BANNER.to_string(),
        }),
    )
}
