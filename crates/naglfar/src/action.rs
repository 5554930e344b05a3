//! Actions bound to routes
//!
//! Every shape an action can take is fixed when it is registered, so the
//! resolver never inspects values at dispatch time to find out what they are.

use futures::future::BoxFuture;
use naglfar_router::Params;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::message::{Message, MATCHED_ROUTE_WITH_NO_ACTIONS};

/// Future returned by an asynchronous action
pub type ActionFuture = BoxFuture<'static, anyhow::Result<Message>>;

type SyncHandler = Arc<dyn Fn(&Params) -> anyhow::Result<Message> + Send + Sync>;
type AsyncHandler = Arc<dyn Fn(Params) -> ActionFuture + Send + Sync>;

/// An action run when its route matches
#[derive(Clone)]
pub enum Action {
    /// Registered without an action; dispatches the no-action marker
    Noop,
    /// Bare message type, params become the payload
    Type(String),
    /// Message template, params are merged in at dispatch time
    Template(Message),
    /// Synchronous callable producing a message from the params
    Sync(SyncHandler),
    /// Asynchronous callable, joined before the resolution reports success
    Async(AsyncHandler),
}

/// What invoking an action produced
pub enum Invocation {
    Ready(anyhow::Result<Message>),
    Pending(ActionFuture),
}

impl Action {
    /// Wraps a synchronous callable
    ///
    /// ```
    /// use naglfar::{Action, Message};
    ///
    /// let action = Action::sync(|params| Ok(Message::with_params_payload("FOOD_SELECTED", params)));
    /// ```
    pub fn sync<F>(handler: F) -> Self
    where
        F: Fn(&Params) -> anyhow::Result<Message> + Send + Sync + 'static,
    {
        Action::Sync(Arc::new(handler))
    }

    /// Wraps an asynchronous callable
    ///
    /// The message it resolves to is dispatched as soon as it completes.
    pub fn future<F, Fut>(handler: F) -> Self
    where
        F: Fn(Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Message>> + Send + 'static,
    {
        Action::Async(Arc::new(move |params| -> ActionFuture { Box::pin(handler(params)) }))
    }

    /// Whether the resolver must wait for this action
    pub fn is_async(&self) -> bool {
        matches!(self, Action::Async(_))
    }

    /// Produces the message (or the pending future) for a set of params
    pub fn invoke(&self, params: &Params) -> Invocation {
        match self {
            Action::Noop => Invocation::Ready(Ok(Message::with_params_payload(
                MATCHED_ROUTE_WITH_NO_ACTIONS,
                params,
            ))),
            Action::Type(kind) => {
                Invocation::Ready(Ok(Message::with_params_payload(kind.as_str(), params)))
            }
            Action::Template(template) => Invocation::Ready(Ok(template.merged_with(params))),
            Action::Sync(handler) => Invocation::Ready(handler(params)),
            Action::Async(handler) => Invocation::Pending(handler(params.clone())),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Noop => f.write_str("Noop"),
            Action::Type(kind) => f.debug_tuple("Type").field(kind).finish(),
            Action::Template(message) => f.debug_tuple("Template").field(message).finish(),
            Action::Sync(_) => f.write_str("Sync(..)"),
            Action::Async(_) => f.write_str("Async(..)"),
        }
    }
}

impl From<&str> for Action {
    fn from(kind: &str) -> Self {
        Action::Type(kind.to_string())
    }
}

impl From<String> for Action {
    fn from(kind: String) -> Self {
        Action::Type(kind)
    }
}

impl From<Message> for Action {
    fn from(template: Message) -> Self {
        Action::Template(template)
    }
}

/// Anything that can be bound to a route: one action, several, or none
pub trait IntoActions {
    fn into_actions(self) -> Vec<Action>;
}

impl IntoActions for Action {
    fn into_actions(self) -> Vec<Action> {
        vec![self]
    }
}

impl IntoActions for Vec<Action> {
    fn into_actions(self) -> Vec<Action> {
        self
    }
}

impl IntoActions for Option<Action> {
    fn into_actions(self) -> Vec<Action> {
        vec![self.unwrap_or(Action::Noop)]
    }
}

impl IntoActions for &str {
    fn into_actions(self) -> Vec<Action> {
        vec![Action::from(self)]
    }
}

impl IntoActions for String {
    fn into_actions(self) -> Vec<Action> {
        vec![Action::from(self)]
    }
}

impl IntoActions for Message {
    fn into_actions(self) -> Vec<Action> {
        vec![Action::Template(self)]
    }
}
