#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GripError>;

/// Errors surfaced by textgrip's fallible entry points.
///
/// The selection core itself never fails at runtime: a missing layout is
/// reported as `None` and treated as a no-op. Only configuration can be
/// rejected.
#[derive(Debug, Error)]
pub enum GripError {
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GripError {
    #[must_use]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GripError;

    #[test]
    fn invalid_constructor_formats_field_and_reason() {
        let error = GripError::invalid("density", "must be positive");
        assert_eq!(
            error.to_string(),
            "invalid config `density`: must be positive"
        );
    }

    #[test]
    fn json_errors_convert() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = GripError::from(err);
        assert!(matches!(error, GripError::Json(_)));
        assert!(error.to_string().starts_with("config JSON error"));
    }
}
