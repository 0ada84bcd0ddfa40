use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Serialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

/// Body returned by DELETE endpoints
#[derive(ToSchema, Deserialize, Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(ToSchema, Deserialize, Serialize, Debug)]
pub struct CountResponse {
    pub count: u64,
}

/// `?limit=N` on feed endpoints
#[derive(Deserialize, Debug, Default)]
pub struct LimitParams {
    pub limit: Option<u64>,
}

/// Shape of every error body
#[derive(ToSchema, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
