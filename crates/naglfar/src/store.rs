//! Minimal host store
//!
//! Reduces every message into a [`RouterState`], keeps the message log and
//! triggers the controller's lazy start. Hosts with their own store call
//! [`reduce`] and [`NavigationController::after_dispatch`] themselves.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::config::RouterConfig;
use crate::context::RouterContext;
use crate::controller::{NavigationController, NavigationProvider};
use crate::dispatch::{Dispatch, Dispatcher};
use crate::message::Message;
use crate::state::{reduce, RouterState};

/// Called after each message with the state it produced
pub type Subscriber = Arc<dyn Fn(&RouterState, &Message) + Send + Sync>;

pub struct RouterStore {
    context: Arc<RouterContext>,
    state: RwLock<RouterState>,
    log: Mutex<Vec<Message>>,
    subscribers: RwLock<Vec<Subscriber>>,
    controller: RwLock<Weak<NavigationController>>,
}

impl RouterStore {
    pub fn new(context: Arc<RouterContext>) -> Arc<Self> {
        Self::with_state(context, RouterState::default())
    }

    /// Starts from a state rendered elsewhere, typically on the server
    pub fn with_state(context: Arc<RouterContext>, state: RouterState) -> Arc<Self> {
        Arc::new(Self {
            context,
            state: RwLock::new(state),
            log: Mutex::new(Vec::new()),
            subscribers: RwLock::new(Vec::new()),
            controller: RwLock::new(Weak::new()),
        })
    }

    /// Builds a store and a controller dispatching into it
    ///
    /// The store only keeps a weak reference: hold on to the controller.
    pub fn connect<P>(
        provider: P,
        context: Arc<RouterContext>,
        config: &RouterConfig,
    ) -> (Arc<Self>, Arc<NavigationController>)
    where
        P: NavigationProvider + 'static,
    {
        let store = Self::new(Arc::clone(&context));
        let controller =
            NavigationController::activate(provider, context, store.dispatcher(), config);
        store.attach(&controller);
        (store, controller)
    }

    /// Calls `controller.after_dispatch()` after every message from now on
    pub fn attach(&self, controller: &Arc<NavigationController>) {
        *self.controller.write() = Arc::downgrade(controller);
    }

    pub fn dispatcher(self: &Arc<Self>) -> Dispatcher {
        Arc::clone(self) as Dispatcher
    }

    pub fn context(&self) -> &Arc<RouterContext> {
        &self.context
    }

    pub fn state(&self) -> RouterState {
        self.state.read().clone()
    }

    /// Every message dispatched so far, in order
    pub fn messages(&self) -> Vec<Message> {
        self.log.lock().clone()
    }

    pub fn message_kinds(&self) -> Vec<String> {
        self.log.lock().iter().map(|m| m.kind.clone()).collect()
    }

    pub fn subscribe(&self, subscriber: Subscriber) {
        self.subscribers.write().push(subscriber);
    }
}

impl Dispatch for RouterStore {
    fn dispatch(&self, message: Message) {
        // the log is appended under the state lock so it follows reduction order
        let state = {
            let mut state = self.state.write();
            *state = reduce(&self.context, std::mem::take(&mut *state), &message);
            self.log.lock().push(message.clone());
            state.clone()
        };
        debug!(kind = %message.kind, "message reduced");

        let subscribers = self.subscribers.read().clone();
        for subscriber in subscribers {
            subscriber(&state, &message);
        }

        let controller = self.controller.read().upgrade();
        if let Some(controller) = controller {
            controller.after_dispatch();
        }
    }
}
