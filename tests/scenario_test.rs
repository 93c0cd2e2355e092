//! End-to-end routing scenarios against the in-memory session and
//! navigation tree.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crepaway_core::{
    mocks::RecordingEventEmitter,
    traits::{LaunchLink, NavigationContainer, SessionStore},
    types::{
        InboundLink, Intent, MenuType, NavigationAction, NotificationPayload, OrderFlow,
        RouteEntry, RouteParams, Screen, SessionSnapshot, DELIVERY_TAKEAWAY_ROUTE,
        DINE_IN_ROUTE,
    },
    EventType,
};
use crepaway_linking::{LinkResolver, LinkSubscriber};
use crepaway_store::{InMemoryNavigationContainer, InMemorySessionStore};

struct App {
    session: Arc<InMemorySessionStore>,
    container: Arc<InMemoryNavigationContainer>,
    events: Arc<RecordingEventEmitter>,
    resolver: LinkResolver,
}

fn app(session: SessionSnapshot) -> App {
    let session = Arc::new(InMemorySessionStore::new(session));
    let container = Arc::new(InMemoryNavigationContainer::new(
        session.clone() as Arc<dyn SessionStore>
    ));
    let events = Arc::new(RecordingEventEmitter::new());
    let resolver = LinkResolver::builder(
        session.clone() as Arc<dyn SessionStore>,
        container.clone() as Arc<dyn NavigationContainer>,
    )
    .with_event_emitter(events.clone())
    .build()
    .unwrap();

    App {
        session,
        container,
        events,
        resolver,
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(200)).await;
}

#[tokio::test(start_paused = true)]
async fn test_takeaway_order_notification_from_flow_selection() {
    let app = app(SessionSnapshot::logged_in().with_branch(7).with_address(3));
    assert_eq!(app.container.current_route().as_deref(), Some("OrderTypeSelection"));

    let tap = InboundLink::from_line(r#"{"screen":"order_details","order_type":"takeaway","id":55}"#)
        .unwrap();
    assert!(app.resolver.handle(&tap));

    // The switch lands first; the dispatch waits for the settle delay.
    let session = app.session.state();
    assert_eq!(session.active_order_flow, Some(OrderFlow::Takeaway));
    assert_eq!(session.menu_type, Some(MenuType::Takeaway));
    assert_eq!(session.cart_flow, Some(OrderFlow::Takeaway));
    assert_eq!(session.selected_branch, None);
    assert_eq!(session.selected_address, None);
    assert!(app.resolver.pending().is_some());
    assert!(app.container.history().is_empty());

    settle().await;

    let expected = vec![
        RouteEntry::new("Orders", RouteParams::none()),
        RouteEntry::new("OrderDetails", RouteParams::with_id(Some(55))),
    ];
    assert_eq!(
        app.container.history(),
        vec![NavigationAction::Reset {
            container: DELIVERY_TAKEAWAY_ROUTE.into(),
            routes: expected.clone(),
        }]
    );
    assert_eq!(app.container.stack(DELIVERY_TAKEAWAY_ROUTE), expected);
    assert!(app.resolver.pending().is_none());
    assert_eq!(app.events.count(EventType::PendingReplayed), 1);
    assert_eq!(app.events.count(EventType::NavigationDispatched), 1);
}

#[tokio::test(start_paused = true)]
async fn test_takeaway_order_link_from_flow_selection() {
    let app = app(SessionSnapshot::logged_in());

    assert!(app.resolver.open_url("crepaway://takeaway/orders/55"));
    settle().await;

    assert_eq!(
        app.container.stack(DELIVERY_TAKEAWAY_ROUTE),
        vec![
            RouteEntry::new("Orders", RouteParams::none()),
            RouteEntry::new("OrderDetails", RouteParams::with_id(Some(55))),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_delivery_link_while_dining_in_goes_to_flow_selection() {
    let app = app(SessionSnapshot::logged_in().with_active_flow(OrderFlow::DineIn));
    assert_eq!(app.container.current_route().as_deref(), Some("DineIn"));

    assert!(app.resolver.open_url("crepaway://delivery/orders"));
    settle().await;

    // The intent is dropped: the user picks a flow and nothing follows.
    assert_eq!(app.session.state().active_order_flow, None);
    assert_eq!(app.container.current_route().as_deref(), Some("OrderTypeSelection"));
    assert!(app.container.history().is_empty());
    assert!(app.resolver.pending().is_none());
    assert_eq!(app.events.count(EventType::FlowCleared), 1);
}

#[tokio::test(start_paused = true)]
async fn test_latest_switch_wins() {
    let app = app(SessionSnapshot::logged_in());

    assert!(app.resolver.switch_and_navigate(
        OrderFlow::Takeaway,
        MenuType::Takeaway,
        Screen::Orders,
        &Intent::new(Screen::Orders),
    ));
    assert!(app.resolver.switch_and_navigate(
        OrderFlow::DineIn,
        MenuType::DineIn,
        Screen::DineInCheckout,
        &Intent::new(Screen::DineInCheckout),
    ));
    settle().await;

    assert_eq!(
        app.container.history(),
        vec![NavigationAction::Navigate {
            path: vec![DINE_IN_ROUTE.into(), "DineInCheckout".into()],
            params: RouteParams::none(),
        }]
    );
    assert_eq!(app.session.state().active_order_flow, Some(OrderFlow::DineIn));
    assert_eq!(app.events.count(EventType::PendingSuperseded), 1);
    assert_eq!(app.events.count(EventType::PendingReplayed), 1);
}

#[tokio::test(start_paused = true)]
async fn test_table_notification_forces_dine_in() {
    let app = app(SessionSnapshot::logged_in().with_cart(OrderFlow::Delivery, true));

    let (tx, rx) = mpsc::channel(4);
    let launch = InboundLink::Notification(NotificationPayload::new("Table"));
    let subscriber = LinkSubscriber::new(app.resolver.clone())
        .spawn(Arc::new(LaunchLink::new(Some(launch))), rx);
    drop(tx);

    assert_eq!(subscriber.await.unwrap(), 1);
    settle().await;

    let session = app.session.state();
    assert_eq!(session.active_order_flow, Some(OrderFlow::DineIn));
    assert_eq!(session.menu_type, Some(MenuType::DineIn));
    assert_eq!(session.cart_flow, Some(OrderFlow::DineIn));
    assert_eq!(app.events.count(EventType::CartFlowConflict), 1);
    assert_eq!(
        app.container.history(),
        vec![NavigationAction::Navigate {
            path: vec![DINE_IN_ROUTE.into(), "DineInTable".into()],
            params: RouteParams::none(),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_links_before_login_are_lost() {
    let app = app(SessionSnapshot::default());

    assert!(!app.resolver.open_url("crepaway://delivery/orders/9"));
    app.session.set_logged_in(true);
    settle().await;

    assert!(app.container.history().is_empty());
    assert_eq!(app.session.state().active_order_flow, None);
    assert_eq!(app.events.count(EventType::NavigationRejected), 1);
}

#[tokio::test(start_paused = true)]
async fn test_same_flow_links_dispatch_immediately() {
    let app = app(SessionSnapshot::logged_in().with_active_flow(OrderFlow::Delivery));

    assert!(app.resolver.open_url("https://app.crepaway.com/delivery/home"));
    assert!(app.resolver.open_url("crepaway://delivery/profile/wallet"));
    assert!(!app.resolver.open_url("crepaway://delivery/orders/abc"));

    assert!(app.resolver.pending().is_none());
    assert_eq!(app.container.history().len(), 2);
    let names: Vec<_> = app
        .container
        .stack(DELIVERY_TAKEAWAY_ROUTE)
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, vec!["Profile", "Wallet"]);
}
