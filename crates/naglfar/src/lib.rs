//! # Naglfar
//!
//! Route resolution and navigation state for message-driven applications.
//!
//! - [`RouterContext`] owns the routes and redirects of one application
//! - [`LocationResolver`] matches a location, dispatches one message per
//!   matched action and joins the asynchronous ones into a status
//! - [`reduce`] folds the lifecycle messages into a [`RouterState`]
//! - [`NavigationController`] binds a [`NavigationProvider`] to all of the above
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use naglfar::{RouterContext, RouteStatus};
//!
//! let context = Arc::new(RouterContext::new());
//! context.register_route("/a/:animal", "ANIMAL_SELECTED").unwrap();
//! context.register_redirect("/zoo", "/a/lion");
//!
//! assert_eq!(context.match_status("/a/tiger/?lang=en").status, RouteStatus::Resolved);
//! assert_eq!(context.match_status("/zoo").status, RouteStatus::Redirect);
//! assert_eq!(context.match_status("/nowhere").status, RouteStatus::NotFound);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod action;
pub mod config;
pub mod context;
pub mod controller;
pub mod dispatch;
mod error;
pub mod fragment;
pub mod history;
pub mod link;
pub mod location;
pub mod message;
pub mod resolver;
pub mod state;
pub mod store;

// ============================================================================
// Re-exports
// ============================================================================

pub use action::{Action, ActionFuture, IntoActions, Invocation};
pub use config::{RouteConfig, RouterConfig};
pub use context::{MatchStatus, RouterContext};
pub use controller::{EnteringNavigator, LocationListener, NavigationController, NavigationProvider};
pub use dispatch::{Dispatch, Dispatcher};
pub use error::NavigationError;
pub use fragment::{Condition, Fragment, FragmentTarget};
pub use history::MemoryHistory;
pub use link::Link;
pub use location::{Location, LocationPayload, LocationState, RouteStatus};
pub use message::{
    route_entered, route_entering, router_initialized, Message, NavigationEvent,
    MATCHED_ROUTE_WITH_NO_ACTIONS, ROUTER_INITIALIZED, ROUTE_ENTERED, ROUTE_ENTERING,
};
pub use resolver::{LocationResolver, Resolution};
pub use state::{build_location_state, reduce, RouterState};
pub use store::{RouterStore, Subscriber};

pub use naglfar_router::{
    normalize_path, parse_query, Params, Query, QueryValue, RouteMatch, RouterError,
};
