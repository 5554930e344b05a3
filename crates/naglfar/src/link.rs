//! Navigation links

use std::sync::Arc;

use crate::controller::NavigationController;
use crate::resolver::Resolution;
use crate::state::RouterState;

/// A link to a route, as rendered by a view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub to: String,
    /// Carry the current search string over to the target
    pub persist_query: bool,
    /// Replace the current history entry instead of pushing one
    pub replace_location: bool,
}

impl Link {
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            persist_query: true,
            replace_location: false,
        }
    }

    pub fn persist_query(mut self, persist: bool) -> Self {
        self.persist_query = persist;
        self
    }

    pub fn replace_location(mut self, replace: bool) -> Self {
        self.replace_location = replace;
        self
    }

    /// Path the link navigates to from the given state
    pub fn target(&self, state: &RouterState) -> String {
        match state.location.as_ref() {
            Some(location) if self.persist_query => format!("{}{}", self.to, location.search),
            _ => self.to.clone(),
        }
    }

    /// Whether the link points at the committed pathname
    ///
    /// Never active before the router is initialized.
    pub fn is_active(&self, state: &RouterState) -> bool {
        state
            .location
            .as_ref()
            .is_some_and(|location| location.initialized && location.pathname == self.to)
    }

    pub fn follow(&self, controller: &Arc<NavigationController>, state: &RouterState) {
        controller.navigate_to(&self.target(state), self.replace_location);
    }

    pub async fn prefetch(
        &self,
        controller: &Arc<NavigationController>,
        state: &RouterState,
    ) -> Resolution {
        controller.prefetch(&self.target(state)).await
    }
}
