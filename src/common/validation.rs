use super::errors::{BusinessError, BusinessResult};

/// Returns the trimmed value, or a 400 carrying `message` when it is absent or blank
pub fn require_text(field: &str, value: Option<String>, message: &str) -> BusinessResult<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(crate::validation_error!(field, message)),
    }
}

/// Rejects blank replacements for a required text column
pub fn optional_text(field: &str, value: Option<String>) -> BusinessResult<Option<String>> {
    match value {
        Some(text) if text.trim().is_empty() => Err(crate::validation_error!(
            field,
            format!("{field} cannot be empty")
        )),
        Some(text) => Ok(Some(text.trim().to_string())),
        None => Ok(None),
    }
}

pub fn require<T>(field: &str, value: Option<T>, message: &str) -> BusinessResult<T> {
    value.ok_or_else(|| crate::validation_error!(field, message))
}

/// Stock levels may be zero but never negative
pub fn non_negative_quantity(field: &str, value: f64) -> BusinessResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(BusinessError::ValidationError {
            field: field.to_string(),
            message: format!("{field} must be a non-negative number"),
        })
    }
}

pub fn positive_quantity(field: &str, value: f64) -> BusinessResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BusinessError::ValidationError {
            field: field.to_string(),
            message: format!("{field} must be greater than zero"),
        })
    }
}

/// Clamps an optional `limit` query parameter into `1..=max`
pub fn clamp_limit(limit: Option<u64>, default: u64, max: u64) -> u64 {
    limit.unwrap_or(default).clamp(1, max)
}
