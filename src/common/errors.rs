use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;

/// Error type shared by every handler; each variant maps to one HTTP status
#[derive(Debug, Clone, thiserror::Error)]
pub enum BusinessError {
    /// Missing or invalid user input (400 Bad Request)
    #[error("{message}")]
    ValidationError { field: String, message: String },
    /// Business rule violations such as insufficient stock (400 Bad Request)
    #[error("{message}")]
    BusinessRuleViolation { rule: String, message: String },
    /// Resource not found (404 Not Found)
    #[error("{resource} with id {id} not found")]
    NotFound { resource: String, id: String },
    /// Unique key already taken (400 Bad Request)
    #[error("{resource} with {detail} already exists")]
    Duplicate { resource: String, detail: String },
    /// Generic application error (500 Internal Server Error)
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl BusinessError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            BusinessError::ValidationError { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            BusinessError::BusinessRuleViolation { .. } => {
                (StatusCode::BAD_REQUEST, "BUSINESS_RULE_VIOLATION")
            }
            BusinessError::NotFound { .. } => (StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND"),
            BusinessError::Duplicate { .. } => (StatusCode::BAD_REQUEST, "DUPLICATE_RESOURCE"),
            BusinessError::InternalError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

/// Convert `BusinessError` to a JSON body of the form `{"error": ..., "code": ...}`
impl IntoResponse for BusinessError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Database details stay in the logs
        let message = if let BusinessError::InternalError { message } = &self {
            tracing::error!("Request failed: {message}");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        match &self {
            BusinessError::ValidationError { field, .. } => body["field"] = json!(field),
            BusinessError::BusinessRuleViolation { rule, .. } => body["rule"] = json!(rule),
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}

/// Maps `DbErr` to business errors with the resource name as context
pub struct ErrorMapper;

impl ErrorMapper {
    pub fn map_db_error(err: DbErr, context: &str) -> BusinessError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                return BusinessError::Duplicate {
                    resource: context.to_string(),
                    detail: "the same unique value".to_string(),
                };
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                return BusinessError::BusinessRuleViolation {
                    rule: "foreign_key".to_string(),
                    message: format!("{context} references a record that does not exist"),
                };
            }
            _ => {}
        }

        match err {
            DbErr::RecordNotFound(msg) => BusinessError::NotFound {
                resource: context.to_string(),
                id: Self::extract_id_from_message(&msg),
            },
            _ => BusinessError::InternalError {
                message: err.to_string(),
            },
        }
    }

    /// Pulls the first integer out of a message such as "Waste 12 not found"
    fn extract_id_from_message(msg: &str) -> String {
        msg.split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_ascii_digit()))
            .find(|word| !word.is_empty() && word.parse::<i64>().is_ok())
            .unwrap_or("unknown")
            .to_string()
    }
}

impl From<DbErr> for BusinessError {
    fn from(err: DbErr) -> Self {
        ErrorMapper::map_db_error(err, "Record")
    }
}

#[macro_export]
macro_rules! validation_error {
    ($field:expr, $message:expr) => {
        $crate::common::errors::BusinessError::ValidationError {
            field: $field.to_string(),
            message: $message.to_string(),
        }
    };
}

#[macro_export]
macro_rules! business_rule_violation {
    ($rule:expr, $message:expr) => {
        $crate::common::errors::BusinessError::BusinessRuleViolation {
            rule: $rule.to_string(),
            message: $message.to_string(),
        }
    };
}

#[macro_export]
macro_rules! not_found {
    ($resource:expr, $id:expr) => {
        $crate::common::errors::BusinessError::NotFound {
            resource: $resource.to_string(),
            id: $id.to_string(),
        }
    };
}

#[macro_export]
macro_rules! duplicate_resource {
    ($resource:expr, $detail:expr) => {
        $crate::common::errors::BusinessError::Duplicate {
            resource: $resource.to_string(),
            detail: $detail.to_string(),
        }
    };
}

/// Extension trait to add business error conversion to `DbErr`
pub trait DbErrorExt {
    fn to_business_error(self, context: &str) -> BusinessError;
}

impl DbErrorExt for DbErr {
    fn to_business_error(self, context: &str) -> BusinessError {
        ErrorMapper::map_db_error(self, context)
    }
}

/// Result type alias for business operations
pub type BusinessResult<T> = Result<T, BusinessError>;
