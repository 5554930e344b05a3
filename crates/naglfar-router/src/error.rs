//! Error types for route registration

use thiserror::Error;

/// Errors raised while building the route registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The route template could not be compiled
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl RouterError {
    pub(crate) fn invalid(pattern: &str, reason: impl Into<String>) -> Self {
        RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
