//! Error types for the navigation layer

use naglfar_router::RouterError;
use thiserror::Error;

/// Errors raised while setting up navigation
///
/// Resolution itself never fails: its outcomes are statuses, see
/// [`RouteStatus`](crate::RouteStatus).
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error(transparent)]
    Router(#[from] RouterError),

    #[error("invalid router configuration: {0}")]
    Config(#[from] toml::de::Error),
}
