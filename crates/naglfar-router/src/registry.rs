//! Ordered route and redirect registry
//!
//! Routes are keyed by their original template string and kept in
//! registration order. Unlike a first-match router, every matching entry
//! contributes to the result, so a layout route and a content route can both
//! apply to the same path.

use std::collections::HashMap;

use tracing::debug;

use crate::error::RouterError;
use crate::route::{Params, RoutePattern};

/// A registered route with its bound actions
#[derive(Debug, Clone)]
pub struct RouteEntry<A> {
    /// Original route key
    pub key: String,
    /// Compiled pattern
    pub pattern: RoutePattern,
    /// Actions run when the pattern matches, in registration order
    pub actions: Vec<A>,
}

/// One matched `(params, action)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<A> {
    pub params: Params,
    pub action: A,
}

/// Registry of route patterns and fixed-path redirects
///
/// Generic over the action type so matching stays independent of how actions
/// are dispatched.
#[derive(Debug, Clone)]
pub struct PatternRegistry<A> {
    routes: Vec<RouteEntry<A>>,
    route_index: HashMap<String, usize>,
    redirects: Vec<(String, String)>,
    redirect_index: HashMap<String, usize>,
}

impl<A> Default for PatternRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> PatternRegistry<A> {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            route_index: HashMap::new(),
            redirects: Vec::new(),
            redirect_index: HashMap::new(),
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Registers a route key with its actions
    ///
    /// Returns `Ok(false)` without touching anything when the key is already
    /// registered: the first registration stays in effect.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] when the key cannot be compiled.
    ///
    /// # Examples
    ///
    /// ```
    /// use naglfar_router::PatternRegistry;
    ///
    /// let mut registry = PatternRegistry::new();
    /// assert!(registry.register_route("/a/:animal", vec!["first"]).unwrap());
    /// assert!(!registry.register_route("/a/:animal", vec!["second"]).unwrap());
    ///
    /// let matches = registry.find_matches("/a/lion");
    /// assert_eq!(matches.len(), 1);
    /// assert_eq!(matches[0].action, "first");
    /// ```
    pub fn register_route(&mut self, key: &str, actions: Vec<A>) -> Result<bool, RouterError> {
        if self.route_index.contains_key(key) {
            debug!(route = key, "route already registered, keeping first registration");
            return Ok(false);
        }

        let pattern = RoutePattern::compile(key)?;
        debug!(route = key, actions = actions.len(), "registered route");

        self.route_index.insert(key.to_string(), self.routes.len());
        self.routes.push(RouteEntry {
            key: key.to_string(),
            pattern,
            actions,
        });
        Ok(true)
    }

    /// Registers a redirect from an exact path to a destination
    ///
    /// Last write wins; an overwritten source keeps its original position in
    /// [`whitelist`](Self::whitelist).
    pub fn register_redirect(&mut self, from: &str, to: &str) {
        debug!(from, to, "registered redirect");

        match self.redirect_index.get(from) {
            Some(&idx) => self.redirects[idx].1 = to.to_string(),
            None => {
                self.redirect_index.insert(from.to_string(), self.redirects.len());
                self.redirects.push((from.to_string(), to.to_string()));
            }
        }
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Redirect destination for an exact (already normalized) path
    pub fn redirect_for(&self, path: &str) -> Option<&str> {
        self.redirect_index
            .get(path)
            .map(|&idx| self.redirects[idx].1.as_str())
    }

    /// Whether a route key has been registered
    pub fn contains_route(&self, key: &str) -> bool {
        self.route_index.contains_key(key)
    }

    /// Registered route entries, in registration order
    pub fn routes(&self) -> &[RouteEntry<A>] {
        &self.routes
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no route has been registered
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All redirect sources followed by all route keys, in registration order
    ///
    /// Useful as an allow-list for collaborators such as a prefetcher.
    pub fn whitelist(&self) -> Vec<String> {
        self.redirects
            .iter()
            .map(|(from, _)| from.clone())
            .chain(self.routes.iter().map(|entry| entry.key.clone()))
            .collect()
    }

    /// Matches a path against one specific registered route
    ///
    /// Returns `None` when the key is unknown or the path does not match.
    pub fn match_route(&self, key: &str, path: &str) -> Option<Params> {
        self.route_index
            .get(key)
            .and_then(|&idx| self.routes[idx].pattern.matches(path))
    }
}

impl<A: Clone> PatternRegistry<A> {
    /// Finds every registered route matching a normalized path
    ///
    /// Entries are visited in registration order; each matching entry yields
    /// one record per bound action, in the entry's action order.
    pub fn find_matches(&self, path: &str) -> Vec<RouteMatch<A>> {
        self.routes
            .iter()
            .filter_map(|entry| entry.pattern.matches(path).map(|params| (entry, params)))
            .flat_map(|(entry, params)| {
                entry.actions.iter().map(move |action| RouteMatch {
                    params: params.clone(),
                    action: action.clone(),
                })
            })
            .collect()
    }
}
