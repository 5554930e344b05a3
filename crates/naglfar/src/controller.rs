//! Navigation controller
//!
//! Binds a [`NavigationProvider`] to the resolver. Every location change the
//! provider reports is resolved on the tokio runtime and committed with a
//! `ROUTE_ENTERED` message, or followed by a `replace` when it redirects.
//!
//! Overlapping navigations are not serialized. Each one commits when its
//! actions settle, so the last `ROUTE_ENTERED` dispatched wins even if it
//! belongs to an older navigation.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::config::RouterConfig;
use crate::context::RouterContext;
use crate::dispatch::Dispatcher;
use crate::location::{Location, LocationPayload, RouteStatus};
use crate::message::{route_entered, route_entering, router_initialized, Message};
use crate::resolver::{LocationResolver, Resolution};

/// Callback invoked with every new location
pub type LocationListener = Arc<dyn Fn(Location) + Send + Sync>;

/// Source of locations: a browser history, a memory stack, a test double
pub trait NavigationProvider: Send + Sync {
    fn location(&self) -> Location;
    fn push(&self, path: &str);
    fn replace(&self, path: &str);
    fn listen(&self, listener: LocationListener);
}

impl<P: NavigationProvider + ?Sized> NavigationProvider for Arc<P> {
    fn location(&self) -> Location {
        (**self).location()
    }

    fn push(&self, path: &str) {
        (**self).push(path)
    }

    fn replace(&self, path: &str) {
        (**self).replace(path)
    }

    fn listen(&self, listener: LocationListener) {
        (**self).listen(listener)
    }
}

// ============================================================================
// Entering decorator
// ============================================================================

/// Dispatches `ROUTE_ENTERING` before every push or replace
pub struct EnteringNavigator<P> {
    inner: P,
    dispatch: Dispatcher,
}

impl<P> EnteringNavigator<P> {
    pub fn new(inner: P, dispatch: Dispatcher) -> Self {
        Self { inner, dispatch }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: NavigationProvider> NavigationProvider for EnteringNavigator<P> {
    fn location(&self) -> Location {
        self.inner.location()
    }

    fn push(&self, path: &str) {
        self.dispatch.dispatch(route_entering(path));
        self.inner.push(path);
    }

    fn replace(&self, path: &str) {
        self.dispatch.dispatch(route_entering(path));
        self.inner.replace(path);
    }

    fn listen(&self, listener: LocationListener) {
        self.inner.listen(listener);
    }
}

// ============================================================================
// Controller
// ============================================================================

pub struct NavigationController {
    navigator: EnteringNavigator<Arc<dyn NavigationProvider>>,
    resolver: LocationResolver,
    dispatch: Dispatcher,
    /// Runtime navigation tasks are spawned on, from whichever thread
    runtime: RwLock<Option<Handle>>,
    /// Location changes reported while no runtime was reachable
    deferred: Mutex<Vec<Location>>,
    /// Set once the initialization resolution has been spawned
    started: AtomicBool,
}

impl NavigationController {
    /// Wraps `provider` and subscribes to its location changes
    ///
    /// Nothing is resolved yet: the current location is resolved on the first
    /// [`after_dispatch`](Self::after_dispatch) call. When called inside a tokio
    /// runtime, that runtime runs every navigation task.
    pub fn activate<P>(
        provider: P,
        context: Arc<RouterContext>,
        dispatch: Dispatcher,
        config: &RouterConfig,
    ) -> Arc<Self>
    where
        P: NavigationProvider + 'static,
    {
        let provider: Arc<dyn NavigationProvider> = Arc::new(provider);
        let runtime = Handle::try_current().ok();
        let controller = Arc::new(Self {
            navigator: EnteringNavigator::new(provider, Arc::clone(&dispatch)),
            resolver: LocationResolver::new(context),
            dispatch,
            runtime: RwLock::new(runtime),
            deferred: Mutex::new(Vec::new()),
            started: AtomicBool::new(config.server_rendered),
        });

        let weak: Weak<Self> = Arc::downgrade(&controller);
        controller.navigator.listen(Arc::new(move |location| {
            if let Some(controller) = weak.upgrade() {
                controller.on_location_change(location);
            }
        }));

        debug!(
            server_rendered = config.server_rendered,
            runtime = controller.runtime.read().is_some(),
            "navigation controller activated"
        );
        controller
    }

    /// Runs navigation tasks on `handle` from now on
    ///
    /// For hosts that activate the controller before their runtime exists.
    pub fn bind_runtime(self: &Arc<Self>, handle: Handle) {
        *self.runtime.write() = Some(handle);
        self.run_deferred();
    }

    pub fn context(&self) -> &Arc<RouterContext> {
        self.resolver.context()
    }

    pub fn location(&self) -> Location {
        self.navigator.location()
    }

    /// Whether the initialization resolution has been started
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Hook for the host's dispatch pipeline, called after every message
    ///
    /// The first call that reaches a runtime starts the single initialization
    /// resolution. Location changes deferred for lack of a runtime run first.
    pub fn after_dispatch(self: &Arc<Self>) {
        self.run_deferred();

        if self.started.swap(true, Ordering::AcqRel) {
            return;
        }

        let controller = Arc::clone(self);
        let spawned = self.spawn("initialization", async move {
            controller.initialize().await;
        });
        if !spawned {
            self.started.store(false, Ordering::Release);
        }
    }

    pub fn push(&self, path: &str) {
        self.navigator.push(path);
    }

    pub fn replace(&self, path: &str) {
        self.navigator.replace(path);
    }

    /// Pushes `path`, or replaces the current entry when `replace` is set
    pub fn navigate_to(&self, path: &str, replace: bool) {
        if replace {
            self.replace(path);
        } else {
            self.push(path);
        }
    }

    /// Runs the actions bound to `path` and discards their messages
    pub async fn prefetch(&self, path: &str) -> Resolution {
        let discard: Dispatcher = Arc::new(|message: Message| {
            debug!(kind = %message.kind, "prefetched message discarded");
        });
        self.resolver.prefetch(path, &discard).await
    }

    async fn initialize(&self) {
        let href = self.navigator.location().href();
        let resolution = self.resolver.resolve_location(&href, &self.dispatch).await;

        info!(path = %href, status = %resolution.status, "router initialized");
        self.dispatch.dispatch(router_initialized());
    }

    fn on_location_change(self: &Arc<Self>, location: Location) {
        let controller = Arc::clone(self);
        let task_location = location.clone();
        let spawned = self.spawn("location change", async move {
            controller.enter(task_location).await;
        });
        if !spawned {
            self.deferred.lock().push(location);
        }
    }

    async fn enter(&self, location: Location) {
        let href = location.href();
        let resolution = self.resolver.resolve_location(&href, &self.dispatch).await;

        match resolution {
            Resolution {
                status: RouteStatus::Redirect,
                url: Some(url),
            } => self.navigator.replace(&url),
            Resolution { status, .. } => {
                debug!(path = %href, %status, "route entered");
                self.dispatch
                    .dispatch(route_entered(LocationPayload::new(&location, status)));
            }
        }
    }

    fn run_deferred(self: &Arc<Self>) {
        if self.handle().is_none() {
            return;
        }
        let deferred = std::mem::take(&mut *self.deferred.lock());
        for location in deferred {
            self.on_location_change(location);
        }
    }

    fn handle(&self) -> Option<Handle> {
        self.runtime
            .read()
            .clone()
            .or_else(|| Handle::try_current().ok())
    }

    /// Returns false, leaving `task` unrun, when no runtime is reachable
    fn spawn<F>(&self, what: &'static str, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match self.handle() {
            Some(handle) => {
                handle.spawn(task);
                true
            }
            None => {
                warn!(task = what, "no tokio runtime, navigation task deferred");
                false
            }
        }
    }
}
