//! Route-scoped fragments
//!
//! A fragment is a piece of view shown only for a route or for a status.
//! Declaring a route fragment registers its route, so a view tree can be the
//! only place routes are defined.

use std::fmt;
use std::sync::Arc;

use naglfar_router::RouterError;

use crate::action::IntoActions;
use crate::context::RouterContext;
use crate::location::RouteStatus;
use crate::state::RouterState;

/// Extra predicate a fragment must satisfy to render
pub type Condition = Arc<dyn Fn(&RouterState) -> bool + Send + Sync>;

/// What a fragment is shown for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentTarget {
    /// A registered route key, shown while the current location matches it
    Route(String),
    /// A resolution status, e.g. a 404 page
    Status(RouteStatus),
}

impl FragmentTarget {
    /// Declares a route fragment and registers its route
    ///
    /// A key registered earlier keeps its original actions.
    pub fn declare_route(
        context: &RouterContext,
        key: &str,
        actions: impl IntoActions,
    ) -> Result<Self, RouterError> {
        context.register_route(key, actions)?;
        Ok(Self::Route(key.to_string()))
    }

    pub fn status(status: RouteStatus) -> Self {
        Self::Status(status)
    }

    /// Whether the target matches the committed location
    ///
    /// Route targets need a 200 status and a match on
    /// [`RouterState::current_path`], which stays empty until the router is
    /// initialized. Status targets only compare the status.
    pub fn is_visible(&self, context: &RouterContext, state: &RouterState) -> bool {
        let Some(status) = state.status() else {
            return false;
        };

        match self {
            Self::Status(target) => status == *target,
            Self::Route(key) => {
                let path = state.current_path();
                status == RouteStatus::Resolved
                    && !path.is_empty()
                    && context.match_route(key, &path).is_some()
            }
        }
    }
}

impl From<RouteStatus> for FragmentTarget {
    fn from(status: RouteStatus) -> Self {
        Self::Status(status)
    }
}

/// A target plus an optional render condition
#[derive(Clone)]
pub struct Fragment {
    target: FragmentTarget,
    condition: Option<Condition>,
}

impl Fragment {
    pub fn new(target: impl Into<FragmentTarget>) -> Self {
        Self {
            target: target.into(),
            condition: None,
        }
    }

    /// Declares a route fragment, registering its route
    pub fn route(
        context: &RouterContext,
        key: &str,
        actions: impl IntoActions,
    ) -> Result<Self, RouterError> {
        FragmentTarget::declare_route(context, key, actions).map(Self::new)
    }

    /// Renders only while `condition` holds for the state
    pub fn when<F>(mut self, condition: F) -> Self
    where
        F: Fn(&RouterState) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Arc::new(condition));
        self
    }

    pub fn target(&self) -> &FragmentTarget {
        &self.target
    }

    pub fn is_visible(&self, context: &RouterContext, state: &RouterState) -> bool {
        self.condition.as_ref().map_or(true, |condition| condition(state))
            && self.target.is_visible(context, state)
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("target", &self.target)
            .field("condition", &self.condition.is_some())
            .finish()
    }
}
