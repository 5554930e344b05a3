//! Location types shared by the resolver, the state machine and providers

use naglfar_router::{Params, Query};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome status of one resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum RouteStatus {
    /// 200: matched and every action succeeded
    Resolved,
    /// 302: an exact redirect applies
    Redirect,
    /// 404: no route matched
    NotFound,
    /// 500: at least one action failed
    Failed,
}

impl RouteStatus {
    /// Numeric status code
    pub fn code(self) -> u16 {
        match self {
            RouteStatus::Resolved => 200,
            RouteStatus::Redirect => 302,
            RouteStatus::NotFound => 404,
            RouteStatus::Failed => 500,
        }
    }
}

impl From<RouteStatus> for u16 {
    fn from(status: RouteStatus) -> Self {
        status.code()
    }
}

impl TryFrom<u16> for RouteStatus {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            200 => Ok(RouteStatus::Resolved),
            302 => Ok(RouteStatus::Redirect),
            404 => Ok(RouteStatus::NotFound),
            500 => Ok(RouteStatus::Failed),
            other => Err(format!("unsupported route status {other}")),
        }
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A location as reported by a navigation provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    #[serde(default)]
    pub search: String,
}

impl Location {
    /// Builds a location from a raw `path?search` string
    pub fn parse(raw: &str) -> Self {
        let (pathname, search) = naglfar_router::split_location(raw);
        Self {
            pathname: pathname.to_string(),
            search: search.to_string(),
        }
    }

    /// `pathname` followed by `search`
    pub fn href(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }
}

/// Payload of a `ROUTE_ENTERED` message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPayload {
    pub pathname: String,
    #[serde(default)]
    pub search: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RouteStatus>,
}

impl LocationPayload {
    pub fn new(location: &Location, status: RouteStatus) -> Self {
        Self {
            pathname: location.pathname.clone(),
            search: location.search.clone(),
            status: Some(status),
        }
    }
}

/// The navigation state consumers read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationState {
    #[serde(default)]
    pub pathname: String,
    #[serde(default)]
    pub search: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RouteStatus>,
    /// Parameters merged across all matches, later matches win
    #[serde(default)]
    pub params: Params,
    #[serde(default)]
    pub query: Query,
    #[serde(default)]
    pub initialized: bool,
    /// Path of a navigation that started but has not been committed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entering: Option<String>,
}
