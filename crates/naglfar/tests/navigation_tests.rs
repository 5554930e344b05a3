//! Integration tests for naglfar
//!
//! Drive a store, a controller and an in-memory history together:
//! - Lazy initialization on the first host message
//! - Entering, action and entered messages of one navigation
//! - Redirects followed through a second navigation cycle
//! - Failures, fragments and overlapping navigations

use std::sync::Arc;
use std::time::Duration;

use naglfar::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn delayed(kind: &'static str, millis: u64) -> Action {
    Action::future(move |params| async move {
        tokio::time::sleep(Duration::from_millis(millis)).await;
        Ok(Message::with_params_payload(kind, &params))
    })
}

fn context() -> Arc<RouterContext> {
    let context = Arc::new(RouterContext::new());
    context
        .register_route(
            "/t1/:test1",
            Action::sync(|params| Ok(Message::with_params_payload("firstRouteThunkSuccess", params))),
        )
        .unwrap();
    context
        .register_route("/t3/:test3", vec![delayed("second", 25), delayed("third", 1)])
        .unwrap();
    context.register_redirect("/t2", "/t3/cat");
    context
}

async fn wait_for(store: &RouterStore, kind: &str, count: usize) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while store.message_kinds().iter().filter(|k| k.as_str() == kind).count() < count {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .expect("timed out waiting for message");
}

fn kinds_after(store: &RouterStore, skip: usize) -> Vec<String> {
    store.message_kinds().into_iter().skip(skip).collect()
}

// ============================================================================
// Initialization
// ============================================================================

#[tokio::test]
async fn test_first_host_message_starts_initialization() {
    init_tracing();
    let history = Arc::new(MemoryHistory::new("/t1/123"));
    let (store, _controller) = RouterStore::connect(
        Arc::clone(&history),
        context(),
        &RouterConfig::default(),
    );
    assert_eq!(store.state(), RouterState::default());

    store.dispatch(Message::new("APP_STARTED"));
    wait_for(&store, ROUTER_INITIALIZED, 1).await;
    store.dispatch(Message::new("SOMETHING_ELSE"));
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(
        store.message_kinds(),
        vec!["APP_STARTED", "firstRouteThunkSuccess", ROUTER_INITIALIZED, "SOMETHING_ELSE"]
    );
    assert_eq!(store.messages()[1].payload, json!({"test1": "123"}));

    let state = store.state();
    assert!(state.location.as_ref().unwrap().initialized);
    // initialization commits no location
    assert_eq!(state.status(), None);
    assert_eq!(state.current_path(), "");
}

#[test]
fn test_first_message_before_runtime_still_initializes() {
    init_tracing();
    let (store, controller) = RouterStore::connect(
        MemoryHistory::new("/t1/123"),
        context(),
        &RouterConfig::default(),
    );

    store.dispatch(Message::new("APP_STARTED"));
    controller.push("/t1/7");
    assert!(!controller.is_started());
    assert_eq!(store.state().pending_path(), Some("/t1/7"));

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    rt.block_on(async {
        store.dispatch(Message::new("RUNTIME_UP"));
        wait_for(&store, ROUTER_INITIALIZED, 1).await;
        wait_for(&store, ROUTE_ENTERED, 1).await;
    });

    let state = store.state();
    assert!(!state.is_entering());
    assert_eq!(state.current_path(), "/t1/7");
}

// ============================================================================
// Navigation
// ============================================================================

#[tokio::test]
async fn test_push_runs_full_lifecycle() {
    init_tracing();
    let (store, controller) = RouterStore::connect(
        MemoryHistory::new("/t1/1"),
        context(),
        &RouterConfig::default(),
    );
    store.dispatch(Message::new("APP_STARTED"));
    wait_for(&store, ROUTER_INITIALIZED, 1).await;
    let before = store.messages().len();

    controller.push("/t3/dog?test=123");
    assert!(store.state().is_entering());
    wait_for(&store, ROUTE_ENTERED, 1).await;

    assert_eq!(
        kinds_after(&store, before),
        vec![ROUTE_ENTERING, "third", "second", ROUTE_ENTERED]
    );

    let location = store.state().location.unwrap();
    assert_eq!(location.status, Some(RouteStatus::Resolved));
    assert_eq!(location.params.get("test3").map(String::as_str), Some("dog"));
    assert_eq!(location.query.get("test"), Some(&QueryValue::Int(123)));
    assert_eq!(location.entering, None);
    assert!(location.initialized);
    assert_eq!(store.state().current_path(), "/t3/dog?test=123");
}

#[tokio::test]
async fn test_redirect_triggers_second_cycle() {
    init_tracing();
    let history = Arc::new(MemoryHistory::new("/"));
    let (store, controller) = RouterStore::connect(
        Arc::clone(&history),
        context(),
        &RouterConfig {
            server_rendered: true,
            ..Default::default()
        },
    );

    controller.push("/t2/");
    wait_for(&store, ROUTE_ENTERED, 1).await;

    let entering: Vec<_> = store
        .messages()
        .into_iter()
        .filter(|m| m.is(ROUTE_ENTERING))
        .map(|m| m.payload)
        .collect();
    assert_eq!(entering, vec![json!("/t2/"), json!("/t3/cat")]);

    assert_eq!(history.location().pathname, "/t3/cat");
    assert_eq!(history.len(), 2);

    let state = store.state();
    assert_eq!(state.location.as_ref().unwrap().pathname, "/t3/cat");
    assert_eq!(state.status(), Some(RouteStatus::Resolved));
    assert!(!store.message_kinds().contains(&ROUTER_INITIALIZED.to_string()));
}

#[tokio::test]
async fn test_history_traversal_resolves_without_entering() {
    init_tracing();
    let history = Arc::new(MemoryHistory::new("/t1/1"));
    let (store, controller) = RouterStore::connect(
        Arc::clone(&history),
        context(),
        &RouterConfig {
            server_rendered: true,
            ..Default::default()
        },
    );

    controller.push("/t1/2");
    wait_for(&store, ROUTE_ENTERED, 1).await;
    assert!(history.back());
    wait_for(&store, ROUTE_ENTERED, 2).await;

    let entering = store
        .message_kinds()
        .iter()
        .filter(|k| k.as_str() == ROUTE_ENTERING)
        .count();
    assert_eq!(entering, 1);
    assert_eq!(
        store.state().params().and_then(|p| p.get("test1")).cloned(),
        Some("1".to_string())
    );
}

// ============================================================================
// Failures and fragments
// ============================================================================

#[tokio::test]
async fn test_failed_and_missing_routes_drive_fragments() {
    init_tracing();
    let context = context();
    let profile = FragmentTarget::declare_route(
        &context,
        "/profile/:id",
        Action::future(|_| async { Err::<Message, _>(anyhow::anyhow!("profile service down")) }),
    )
    .unwrap();
    let t1 = FragmentTarget::declare_route(&context, "/t1/:test1", Action::Noop).unwrap();
    let not_found = FragmentTarget::from(RouteStatus::NotFound);
    let failed = FragmentTarget::from(RouteStatus::Failed);

    let (store, controller) = RouterStore::connect(
        MemoryHistory::new("/"),
        Arc::clone(&context),
        &RouterConfig {
            server_rendered: true,
            ..Default::default()
        },
    );
    // server-rendered state arrives already initialized
    store.dispatch(router_initialized());

    controller.push("/profile/7");
    wait_for(&store, ROUTE_ENTERED, 1).await;
    let state = store.state();
    assert_eq!(state.status(), Some(RouteStatus::Failed));
    assert!(failed.is_visible(&context, &state));
    assert!(!profile.is_visible(&context, &state));

    controller.navigate_to("/missing", true);
    wait_for(&store, ROUTE_ENTERED, 2).await;
    let state = store.state();
    assert!(not_found.is_visible(&context, &state));
    assert!(!t1.is_visible(&context, &state));

    controller.push("/t1/5");
    wait_for(&store, ROUTE_ENTERED, 3).await;
    let state = store.state();
    assert!(t1.is_visible(&context, &state));
    assert!(!not_found.is_visible(&context, &state));
}

// ============================================================================
// Overlapping navigations
// ============================================================================

/// Navigations are not serialized: the slower, older one commits last and
/// its location is the one left in state.
#[tokio::test]
async fn test_overlapping_navigations_last_commit_wins() {
    init_tracing();
    let context = Arc::new(RouterContext::new());
    context.register_route("/slow", delayed("SLOW_LOADED", 50)).unwrap();
    context.register_route("/fast", delayed("FAST_LOADED", 1)).unwrap();
    let history = Arc::new(MemoryHistory::new("/"));
    let (store, controller) = RouterStore::connect(
        Arc::clone(&history),
        context,
        &RouterConfig {
            server_rendered: true,
            ..Default::default()
        },
    );

    controller.push("/slow");
    controller.push("/fast");
    wait_for(&store, ROUTE_ENTERED, 2).await;

    let committed: Vec<_> = store
        .messages()
        .into_iter()
        .filter(|m| m.is(ROUTE_ENTERED))
        .map(|m| m.payload["pathname"].clone())
        .collect();
    assert_eq!(committed, vec![json!("/fast"), json!("/slow")]);

    assert_eq!(history.location().pathname, "/fast");
    assert_eq!(store.state().location.unwrap().pathname, "/slow");
}

#[tokio::test]
async fn test_link_follows_with_persisted_query() {
    init_tracing();
    let history = Arc::new(MemoryHistory::new("/t1/1?lang=en"));
    let (store, controller) = RouterStore::connect(
        Arc::clone(&history),
        context(),
        &RouterConfig::default(),
    );
    store.dispatch(Message::new("APP_STARTED"));
    wait_for(&store, ROUTER_INITIALIZED, 1).await;

    controller.replace("/t1/1?lang=en");
    wait_for(&store, ROUTE_ENTERED, 1).await;

    let link = Link::new("/t1/2").replace_location(true);
    link.follow(&controller, &store.state());
    wait_for(&store, ROUTE_ENTERED, 2).await;

    assert_eq!(history.len(), 1);
    assert_eq!(store.state().current_path(), "/t1/2?lang=en");
    assert!(link.is_active(&store.state()));
}
