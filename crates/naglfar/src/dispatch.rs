//! The host dispatch contract

use std::sync::Arc;

use crate::message::Message;

/// Receives messages produced by the router
///
/// Typically implemented by the host's message store. Any `Fn(Message)`
/// closure is a dispatcher too.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, message: Message);
}

impl<F> Dispatch for F
where
    F: Fn(Message) + Send + Sync,
{
    fn dispatch(&self, message: Message) {
        self(message)
    }
}

/// Shared handle to a dispatcher
pub type Dispatcher = Arc<dyn Dispatch>;
