//! The router context owned by the application's composition root
//!
//! Holds the route and redirect registry. Share it by `Arc` with the
//! resolver, the state machine and the controller.

use naglfar_router::{normalize_path, split_location, Params, PatternRegistry, RouteMatch, RouterError};
use parking_lot::RwLock;
use tracing::debug;

use crate::action::{Action, IntoActions};
use crate::config::RouterConfig;
use crate::error::NavigationError;
use crate::location::RouteStatus;

/// Synchronous part of a resolution: redirect check and route matching
#[derive(Debug, Clone)]
pub struct MatchStatus {
    pub status: RouteStatus,
    pub matches: Vec<RouteMatch<Action>>,
    pub redirect_url: Option<String>,
}

impl MatchStatus {
    /// Params of every match merged in discovery order, later matches win
    pub fn merged_params(&self) -> Params {
        self.matches.iter().fold(Params::new(), |mut acc, m| {
            acc.extend(m.params.iter().map(|(k, v)| (k.clone(), v.clone())));
            acc
        })
    }
}

/// Route and redirect registry for one application
#[derive(Debug, Default)]
pub struct RouterContext {
    registry: RwLock<PatternRegistry<Action>>,
}

impl RouterContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a context and registers the configured redirects and routes
    pub fn from_config(config: &RouterConfig) -> Result<Self, NavigationError> {
        let context = Self::new();

        for (from, to) in &config.redirects {
            context.register_redirect(from, to);
        }

        for route in &config.routes {
            let actions: Vec<Action> = if route.actions.is_empty() {
                vec![Action::Noop]
            } else {
                route.actions.iter().map(|kind| Action::from(kind.as_str())).collect()
            };
            context.register_route(&route.pattern, actions)?;
        }

        debug!(
            redirects = config.redirects.len(),
            routes = config.routes.len(),
            "router context built from config"
        );
        Ok(context)
    }

    /// Registers a route; a key registered before keeps its first actions
    ///
    /// Returns whether the route was newly added.
    pub fn register_route(&self, key: &str, actions: impl IntoActions) -> Result<bool, RouterError> {
        self.registry.write().register_route(key, actions.into_actions())
    }

    /// Registers a route without an action
    pub fn register_path(&self, key: &str) -> Result<bool, RouterError> {
        self.register_route(key, Action::Noop)
    }

    /// Registers an exact-path redirect, replacing any earlier destination
    pub fn register_redirect(&self, from: &str, to: &str) {
        self.registry.write().register_redirect(from, to);
    }

    /// Redirect sources then route keys, in registration order
    pub fn whitelist(&self) -> Vec<String> {
        self.registry.read().whitelist()
    }

    pub fn contains_route(&self, key: &str) -> bool {
        self.registry.read().contains_route(key)
    }

    pub fn redirect_for(&self, path: &str) -> Option<String> {
        self.registry.read().redirect_for(path).map(str::to_string)
    }

    /// Every `(params, action)` pair for a normalized path
    pub fn find_matches(&self, path: &str) -> Vec<RouteMatch<Action>> {
        self.registry.read().find_matches(path)
    }

    /// Matches a raw path against one registered key
    pub fn match_route(&self, key: &str, raw_path: &str) -> Option<Params> {
        let (path, _) = split_location(raw_path);
        self.registry.read().match_route(key, &normalize_path(path))
    }

    /// Normalizes the path, checks redirects, then matches routes
    ///
    /// The search part of `raw_path` is ignored. A redirect short-circuits
    /// matching: its `matches` are always empty.
    pub fn match_status(&self, raw_path: &str) -> MatchStatus {
        let (path, _) = split_location(raw_path);
        let path = normalize_path(path);
        let registry = self.registry.read();

        if let Some(url) = registry.redirect_for(&path) {
            return MatchStatus {
                status: RouteStatus::Redirect,
                matches: Vec::new(),
                redirect_url: Some(url.to_string()),
            };
        }

        let matches = registry.find_matches(&path);
        let status = if matches.is_empty() {
            RouteStatus::NotFound
        } else {
            RouteStatus::Resolved
        };

        MatchStatus {
            status,
            matches,
            redirect_url: None,
        }
    }
}
