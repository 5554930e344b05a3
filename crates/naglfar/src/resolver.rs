//! Location resolution: match, dispatch, join
//!
//! One resolution normalizes the path, short-circuits on a redirect, matches
//! every registered route, dispatches one message per matched action and waits
//! for all asynchronous actions before reporting a status. It never fails:
//! action errors degrade the status to 500 and are only logged.

use futures::future::join_all;
use naglfar_router::RouteMatch;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::action::Invocation;
use crate::context::{MatchStatus, RouterContext};
use crate::dispatch::Dispatcher;
use crate::location::RouteStatus;

/// Outcome of one resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub status: RouteStatus,
    /// Redirect destination, set only for [`RouteStatus::Redirect`]
    pub url: Option<String>,
}

impl Resolution {
    fn status(status: RouteStatus) -> Self {
        Self { status, url: None }
    }
}

/// Runs resolutions against a shared [`RouterContext`]
#[derive(Debug, Clone)]
pub struct LocationResolver {
    context: Arc<RouterContext>,
}

impl LocationResolver {
    pub fn new(context: Arc<RouterContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Arc<RouterContext> {
        &self.context
    }

    /// Resolves a raw `path?search` location
    ///
    /// Ready messages are dispatched immediately, in match order. Messages of
    /// asynchronous actions are dispatched as each one completes; the call
    /// returns once all of them have settled.
    pub async fn resolve_location(&self, raw_path: &str, dispatch: &Dispatcher) -> Resolution {
        let MatchStatus {
            status,
            matches,
            redirect_url,
        } = self.context.match_status(raw_path);

        match status {
            RouteStatus::Redirect => {
                info!(from = raw_path, to = ?redirect_url, "redirecting");
                return Resolution {
                    status,
                    url: redirect_url,
                };
            }
            RouteStatus::NotFound => {
                debug!(path = raw_path, "no route matched");
                return Resolution::status(status);
            }
            _ => {}
        }

        debug!(path = raw_path, matches = matches.len(), "dispatching matched actions");

        let mut failed = false;
        let mut pending = Vec::new();

        for RouteMatch { params, action } in matches {
            match action.invoke(&params) {
                Invocation::Ready(Ok(message)) => dispatch.dispatch(message),
                Invocation::Ready(Err(e)) => {
                    warn!(path = raw_path, error = %e, "route action failed");
                    failed = true;
                }
                Invocation::Pending(fut) => {
                    let dispatch = Arc::clone(dispatch);
                    pending.push(async move {
                        let message = fut.await?;
                        dispatch.dispatch(message);
                        Ok::<(), anyhow::Error>(())
                    });
                }
            }
        }

        for result in join_all(pending).await {
            if let Err(e) = result {
                warn!(path = raw_path, error = %e, "async route action failed");
                failed = true;
            }
        }

        if failed {
            Resolution::status(RouteStatus::Failed)
        } else {
            Resolution::status(RouteStatus::Resolved)
        }
    }

    /// Runs the actions of a link target without navigating
    ///
    /// A redirect is reported but not followed.
    pub async fn prefetch(&self, raw_path: &str, dispatch: &Dispatcher) -> Resolution {
        debug!(path = raw_path, "prefetching");
        self.resolve_location(raw_path, dispatch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::message::Message;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::time::Duration;

    fn recorder() -> (Dispatcher, Arc<Mutex<Vec<Message>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let dispatch: Dispatcher = Arc::new(move |message: Message| sink.lock().push(message));
        (dispatch, log)
    }

    fn delayed(kind: &'static str, millis: u64) -> Action {
        Action::future(move |params| async move {
            tokio::time::sleep(Duration::from_millis(millis)).await;
            Ok(Message::with_params_payload(kind, &params))
        })
    }

    #[tokio::test]
    async fn test_sync_action_resolves_200() {
        let context = Arc::new(RouterContext::new());
        context
            .register_route(
                "/t1/:test1",
                Action::sync(|params| Ok(Message::with_params_payload("firstRouteThunkSuccess", params))),
            )
            .unwrap();
        context
            .register_route("/t3/:test3", vec![delayed("second", 1), delayed("third", 1)])
            .unwrap();
        let resolver = LocationResolver::new(context);
        let (dispatch, log) = recorder();

        let resolution = resolver.resolve_location("/t1/123", &dispatch).await;

        assert_eq!(resolution, Resolution { status: RouteStatus::Resolved, url: None });
        let log = log.lock();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].kind, "firstRouteThunkSuccess");
        assert_eq!(log[0].payload, json!({"test1": "123"}));
    }

    #[tokio::test]
    async fn test_async_messages_dispatch_in_completion_order() {
        let context = Arc::new(RouterContext::new());
        context
            .register_route("/t3/:test3", vec![delayed("slow", 30), delayed("fast", 1)])
            .unwrap();
        let resolver = LocationResolver::new(context);
        let (dispatch, log) = recorder();

        let resolution = resolver.resolve_location("/t3/cat", &dispatch).await;

        assert_eq!(resolution.status, RouteStatus::Resolved);
        let kinds: Vec<_> = log.lock().iter().map(|m| m.kind.clone()).collect();
        assert_eq!(kinds, vec!["fast", "slow"]);
    }

    #[tokio::test]
    async fn test_rejected_future_yields_500_after_siblings_settle() {
        let context = Arc::new(RouterContext::new());
        context
            .register_route(
                "/bad/:id",
                vec![
                    Action::future(|_| async {
                        Err::<Message, _>(anyhow::anyhow!("backend unavailable"))
                    }),
                    delayed("sibling", 10),
                ],
            )
            .unwrap();
        let resolver = LocationResolver::new(context);
        let (dispatch, log) = recorder();

        let resolution = resolver.resolve_location("/bad/1", &dispatch).await;

        assert_eq!(resolution, Resolution { status: RouteStatus::Failed, url: None });
        assert_eq!(log.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_failing_sync_action_yields_500() {
        let context = Arc::new(RouterContext::new());
        context
            .register_route(
                "/bad",
                vec![Action::sync(|_| anyhow::bail!("boom")), Action::from("STILL_SENT")],
            )
            .unwrap();
        let resolver = LocationResolver::new(context);
        let (dispatch, log) = recorder();

        let resolution = resolver.resolve_location("/bad", &dispatch).await;

        assert_eq!(resolution.status, RouteStatus::Failed);
        assert_eq!(log.lock()[0].kind, "STILL_SENT");
    }

    #[tokio::test]
    async fn test_redirect_runs_no_actions() {
        let context = Arc::new(RouterContext::new());
        context.register_route("/t2", "T2_ACTION").unwrap();
        context.register_redirect("/t2", "/t3");
        let resolver = LocationResolver::new(context);
        let (dispatch, log) = recorder();

        let resolution = resolver.resolve_location("/t2/", &dispatch).await;

        assert_eq!(
            resolution,
            Resolution { status: RouteStatus::Redirect, url: Some("/t3".to_string()) }
        );
        assert!(log.lock().is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_path_is_404() {
        let resolver = LocationResolver::new(Arc::new(RouterContext::new()));
        let (dispatch, log) = recorder();

        let resolution = resolver.resolve_location("/nowhere", &dispatch).await;

        assert_eq!(resolution, Resolution { status: RouteStatus::NotFound, url: None });
        assert!(log.lock().is_empty());
    }

    #[tokio::test]
    async fn test_prefetch_reports_redirect_without_following() {
        let context = Arc::new(RouterContext::new());
        context.register_route("/a/:animal", "ANIMAL_SELECTED").unwrap();
        context.register_redirect("/old", "/a/lion");
        let resolver = LocationResolver::new(context);
        let (dispatch, log) = recorder();

        let redirect = resolver.prefetch("/old", &dispatch).await;
        assert_eq!(redirect.url.as_deref(), Some("/a/lion"));
        assert!(log.lock().is_empty());

        let resolved = resolver.prefetch("/a/lion", &dispatch).await;
        assert_eq!(resolved.status, RouteStatus::Resolved);
        assert_eq!(log.lock()[0].kind, "ANIMAL_SELECTED");
    }

    #[tokio::test]
    async fn test_string_and_template_actions() {
        let context = Arc::new(RouterContext::new());
        context.register_route("/a/:animal", "ANIMAL_SELECTED").unwrap();
        context
            .register_route("/v/:vehicle", Message::with_payload("VEHICLE_SELECTED", "test"))
            .unwrap();
        let resolver = LocationResolver::new(context);
        let (dispatch, log) = recorder();

        resolver.resolve_location("/a/lion", &dispatch).await;
        resolver.resolve_location("/v/jeep?x=1", &dispatch).await;

        let log = log.lock();
        assert_eq!(log[0].payload, json!({"animal": "lion"}));
        assert_eq!(log[1].payload, json!("test"));
        assert_eq!(
            log[1].params.as_ref().and_then(|p| p.get("vehicle")).map(String::as_str),
            Some("jeep")
        );
    }
}
