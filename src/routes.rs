use crate::common::state::AppState;
use crate::config::Config;
use crate::{dashboard, industries, waste_requests, wastes};
use axum::Router;
use axum::http::HeaderValue;
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

pub fn build_router(db: &DatabaseConnection, config: &Config) -> Router {
    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "EcoCycle API",
            description = "Inventory and exchange of industrial waste between industries"
        ),
        tags(
            (name = "industries", description = "Industries taking part in the exchange"),
            (name = "wastes", description = "Waste stock listed by industries"),
            (name = "waste-requests", description = "Requests for listed waste and their approval"),
            (name = "dashboard", description = "Read-only aggregates")
        )
    )]
    struct ApiDoc;

    let app_state: AppState = AppState::new(db.clone());

    // Build the router with OpenAPI documentation
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(crate::common::views::router(&app_state)) // Root routes
        .nest("/api/industries", industries::views::router(&app_state))
        .nest("/api/wastes", wastes::views::router(&app_state))
        .nest(
            "/api/dashboard/waste-requests",
            waste_requests::views::router(&app_state),
        )
        .nest("/api/dashboard", dashboard::views::router(&app_state))
        .split_for_parts();

    router
        .merge(Scalar::with_url("/api/docs", api))
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// Any origin when none are configured, otherwise only the listed ones
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}
