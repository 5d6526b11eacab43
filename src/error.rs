//! Error types shared by the trace manager, stores and plugin handlers

/// Errors surfaced by trace request operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceflowError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Traceflow already exists: {0}")]
    Conflict(String),

    #[error("Traceflow not found: {0}")]
    NotFound(String),

    #[error("Failed to reach cluster: {0}")]
    Transport(String),

    #[error("Invalid cluster configuration: {0}")]
    Configuration(String),

    #[error("Received action request for {plugin}, but no handler is defined for {action}")]
    UnsupportedAction { plugin: String, action: String },
}

impl TraceflowError {
    /// Build a validation error for an empty required field
    pub fn empty_field(field: &str) -> Self {
        Self::Validation(format!("{} must not be empty", field))
    }
}

/// Result type for trace request operations
pub type TraceflowResult<T> = Result<T, TraceflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_field_message() {
        let err = TraceflowError::empty_field("sourcePod");
        assert_eq!(
            err.to_string(),
            "Validation error: sourcePod must not be empty"
        );
    }
}
