//! Navigation state machine
//!
//! A reducer over the three lifecycle messages. Anything else passes through
//! untouched so the reducer composes with a host store that handles unrelated
//! message types.

use naglfar_router::{parse_query, query_fragment, Params, Query};
use serde::{Deserialize, Serialize};

use crate::context::RouterContext;
use crate::location::{LocationPayload, LocationState, RouteStatus};
use crate::message::{Message, NavigationEvent};

/// State slice owned by the router
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouterState {
    /// Absent until the first navigation message is reduced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationState>,
}

impl RouterState {
    pub fn status(&self) -> Option<RouteStatus> {
        self.location.as_ref().and_then(|l| l.status)
    }

    /// `pathname + search` once the router is initialized, empty before
    pub fn current_path(&self) -> String {
        match &self.location {
            Some(location) if location.initialized => {
                format!("{}{}", location.pathname, location.search)
            }
            _ => String::new(),
        }
    }

    /// Path of a navigation started but not yet committed
    pub fn pending_path(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| l.entering.as_deref())
    }

    pub fn is_entering(&self) -> bool {
        self.pending_path().is_some()
    }

    pub fn params(&self) -> Option<&Params> {
        self.location.as_ref().map(|l| &l.params)
    }

    pub fn query(&self) -> Option<&Query> {
        self.location.as_ref().map(|l| &l.query)
    }
}

/// Applies one message to the router state
pub fn reduce(context: &RouterContext, state: RouterState, message: &Message) -> RouterState {
    let Some(event) = NavigationEvent::from_message(message) else {
        return state;
    };

    let location = match event {
        NavigationEvent::Initialized => LocationState {
            initialized: true,
            ..state.location.unwrap_or_default()
        },
        NavigationEvent::Entering(path) => LocationState {
            entering: Some(path),
            ..state.location.unwrap_or_default()
        },
        NavigationEvent::Entered(payload) => {
            build_location_state(context, &payload, state.location.as_ref())
        }
    };

    RouterState {
        location: Some(location),
    }
}

/// Derives the committed location state for an entered location
///
/// Status, params and query are recomputed from `pathname + search` without
/// running any action. A status carried by the payload wins over the derived
/// one. Fields of `previous` not recomputed here are kept, except `entering`.
pub fn build_location_state(
    context: &RouterContext,
    payload: &LocationPayload,
    previous: Option<&LocationState>,
) -> LocationState {
    let derived = context.match_status(&format!("{}{}", payload.pathname, payload.search));
    let base = previous.cloned().unwrap_or_default();

    LocationState {
        pathname: payload.pathname.clone(),
        search: payload.search.clone(),
        status: Some(payload.status.unwrap_or(derived.status)),
        params: derived.merged_params(),
        query: parse_query(query_fragment(&payload.search)),
        entering: None,
        ..base
    }
}
