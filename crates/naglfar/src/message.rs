//! Message vocabulary exchanged with the host store

use naglfar_router::Params;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::location::LocationPayload;

pub const ROUTER_INITIALIZED: &str = "ROUTER_INITIALIZED";
pub const ROUTE_ENTERING: &str = "ROUTE_ENTERING";
pub const ROUTE_ENTERED: &str = "ROUTE_ENTERED";

/// Dispatched for routes registered without an action
pub const MATCHED_ROUTE_WITH_NO_ACTIONS: &str = "MATCHED_ROUTE_WITH_NO_ACTIONS";

/// Older spellings still emitted by some hosts
const LEGACY_INITIALIZED: &str = "INITIALISED_ROUTER";
const LEGACY_ENTERING: &str = "ENTERING_ROUTE";
const LEGACY_ENTERED: &str = "ENTERED_ROUTE";

/// A dispatchable message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,
    /// Route params merged into a message template at dispatch time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

impl Message {
    /// A message with no payload
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Value::Null,
            params: None,
        }
    }

    /// A message carrying a JSON payload
    pub fn with_payload(kind: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self {
            kind: kind.into(),
            payload: payload.into(),
            params: None,
        }
    }

    /// A message whose payload is the given route params
    pub fn with_params_payload(kind: impl Into<String>, params: &Params) -> Self {
        Self::with_payload(kind, params_to_value(params))
    }

    /// Copy of this message with `params` set
    pub fn merged_with(&self, params: &Params) -> Self {
        Self {
            params: Some(params.clone()),
            ..self.clone()
        }
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

/// Converts route params into a JSON object
pub fn params_to_value(params: &Params) -> Value {
    Value::Object(
        params
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect::<Map<String, Value>>(),
    )
}

/// Lifecycle events understood by the navigation state machine
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationEvent {
    Initialized,
    Entering(String),
    Entered(LocationPayload),
}

impl NavigationEvent {
    /// Recognizes a navigation message
    ///
    /// Returns `None` for unrelated messages and for navigation messages whose
    /// payload cannot be decoded.
    pub fn from_message(message: &Message) -> Option<Self> {
        match message.kind.as_str() {
            ROUTER_INITIALIZED | LEGACY_INITIALIZED => Some(NavigationEvent::Initialized),
            ROUTE_ENTERING | LEGACY_ENTERING => match &message.payload {
                Value::String(path) => Some(NavigationEvent::Entering(path.clone())),
                other => {
                    warn!(payload = %other, "ignoring entering message without a path");
                    None
                }
            },
            ROUTE_ENTERED | LEGACY_ENTERED => {
                match serde_json::from_value::<LocationPayload>(message.payload.clone()) {
                    Ok(payload) => Some(NavigationEvent::Entered(payload)),
                    Err(e) => {
                        warn!(error = %e, "ignoring entered message with undecodable payload");
                        None
                    }
                }
            }
            _ => None,
        }
    }

    /// Builds the message for this event
    pub fn into_message(self) -> Message {
        match self {
            NavigationEvent::Initialized => Message::new(ROUTER_INITIALIZED),
            NavigationEvent::Entering(path) => Message::with_payload(ROUTE_ENTERING, path),
            NavigationEvent::Entered(payload) => Message::with_payload(
                ROUTE_ENTERED,
                serde_json::to_value(payload).unwrap_or(Value::Null),
            ),
        }
    }
}

pub fn router_initialized() -> Message {
    NavigationEvent::Initialized.into_message()
}

pub fn route_entering(path: &str) -> Message {
    NavigationEvent::Entering(path.to_string()).into_message()
}

pub fn route_entered(payload: LocationPayload) -> Message {
    NavigationEvent::Entered(payload).into_message()
}
