//! Flow resolver.
//!
//! Reconciles a canonical intent with the session and the navigation
//! container, then either dispatches through a stack navigator, sends the
//! user back to flow selection, or hands off to the flow switcher.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crepaway_core::{
    config::LinkingConfig,
    events::{EventType, NavigationEvent},
    traits::{EventEmitter, NavigationContainer, NoOpEventEmitter, SessionStore},
    types::{InboundLink, Intent, MenuType, NotificationPayload, OrderFlow, TopRoute},
    Result,
};

use crate::deferred::DeferredSlot;
use crate::navigators::{DeliveryTakeawayNavigator, DineInNavigator, StackNavigator};
use crate::parser::LinkParser;

/// Intent parked while a flow switch settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingIntent {
    pub intent: Intent,
    /// Flow switches performed on behalf of this intent so far.
    pub attempt: u32,
}

pub(crate) struct ResolverInner {
    pub(crate) parser: LinkParser,
    pub(crate) session: Arc<dyn SessionStore>,
    pub(crate) container: Arc<dyn NavigationContainer>,
    pub(crate) events: Arc<dyn EventEmitter>,
    pub(crate) pending: DeferredSlot<PendingIntent>,
    pub(crate) max_settle_attempts: u32,
    pub(crate) delivery: DeliveryTakeawayNavigator,
    pub(crate) dine_in: DineInNavigator,
}

/// Deep-link and notification resolver.
///
/// Cheap to clone; clones share the pending slot and collaborators.
#[derive(Clone)]
pub struct LinkResolver {
    pub(crate) inner: Arc<ResolverInner>,
}

impl LinkResolver {
    /// Start building a resolver around the two required collaborators.
    pub fn builder(
        session: Arc<dyn SessionStore>,
        container: Arc<dyn NavigationContainer>,
    ) -> LinkResolverBuilder {
        LinkResolverBuilder::new(session, container)
    }

    /// Resolve any inbound link.
    pub fn handle(&self, link: &InboundLink) -> bool {
        match link {
            InboundLink::Url(raw) => self.open_url(raw),
            InboundLink::Notification(payload) => self.open_notification(payload),
        }
    }

    /// Parse a deep-link URL and navigate to it. Unparseable links are
    /// ignored.
    pub fn open_url(&self, raw: &str) -> bool {
        self.emit(NavigationEvent::new(EventType::LinkReceived, json!({ "url": raw })).with_source("url"));

        match self.inner.parser.parse(raw) {
            Some(intent) => self.navigate(&intent),
            None => {
                self.emit(
                    NavigationEvent::new(EventType::LinkDiscarded, json!({ "url": raw }))
                        .with_source("url"),
                );
                false
            }
        }
    }

    /// Decode a tapped notification and navigate to it. Unknown screens abort
    /// before anything is touched.
    pub fn open_notification(&self, payload: &NotificationPayload) -> bool {
        self.emit(
            NavigationEvent::new(EventType::LinkReceived, json!({ "screen": payload.screen }))
                .with_source("notification"),
        );

        match Intent::from_notification(payload) {
            Ok(intent) => self.navigate(&intent),
            Err(e) => {
                tracing::debug!(screen = %payload.screen, error = %e, "Discarding notification");
                self.emit(
                    NavigationEvent::new(
                        EventType::LinkDiscarded,
                        json!({ "screen": payload.screen, "reason": e.to_string() }),
                    )
                    .with_source("notification"),
                );
                false
            }
        }
    }

    /// Navigate to `intent` given the current session and route.
    ///
    /// Returns whether navigation was accepted, not whether the target screen
    /// ends up rendered: a flow switch counts as accepted even though the
    /// final dispatch happens after the settle delay.
    pub fn navigate(&self, intent: &Intent) -> bool {
        self.resolve(intent, 0)
    }

    /// Intent waiting for a flow switch to settle, if any.
    pub fn pending(&self) -> Option<Intent> {
        self.inner.pending.peek().map(|p| p.intent)
    }

    pub(crate) fn resolve(&self, intent: &Intent, attempt: u32) -> bool {
        let inner = &self.inner;

        if !inner.container.is_ready() {
            return self.reject(intent, "navigation container not ready");
        }

        let session = match inner.session.snapshot() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session");
                return self.reject(intent, "session unavailable");
            }
        };
        if !session.is_logged_in {
            return self.reject(intent, "not logged in");
        }

        let flow = intent
            .order_flow
            .or(session.active_order_flow)
            .unwrap_or(OrderFlow::Delivery);
        let menu_type: MenuType = intent.menu_type.unwrap_or_else(|| flow.menu_type());
        let route = inner.container.current_route();

        tracing::debug!(
            screen = %intent.screen,
            flow = %flow,
            menu_type = %menu_type,
            active_flow = ?session.active_order_flow,
            route = ?route,
            attempt,
            "Resolving intent"
        );

        match (TopRoute::classify(route.as_deref()), flow.is_dine_in()) {
            (TopRoute::DeliveryTakeaway, false) => {
                if session.active_order_flow != Some(flow) {
                    self.force_flow_selection(intent, flow, "flow differs from active flow")
                } else {
                    self.dispatch(&inner.delivery, intent)
                }
            }
            (TopRoute::DineIn, true) => self.dispatch(&inner.dine_in, intent),
            (TopRoute::DeliveryTakeaway, true) | (TopRoute::DineIn, false) => {
                self.force_flow_selection(intent, flow, "intent targets the other container")
            }
            (TopRoute::Other(_), _) => {
                self.switch_flow(flow, menu_type, intent.screen, intent, attempt)
            }
        }
    }

    fn dispatch(&self, navigator: &dyn StackNavigator, intent: &Intent) -> bool {
        match navigator.dispatch(self.inner.container.as_ref(), intent.screen, intent) {
            Ok(()) => {
                tracing::info!(
                    container = navigator.container_route(),
                    screen = %intent.screen,
                    target_id = ?intent.target_id,
                    "Navigated to intent"
                );
                self.emit(NavigationEvent::new(
                    EventType::NavigationDispatched,
                    json!({
                        "container": navigator.container_route(),
                        "screen": intent.screen,
                        "target_id": intent.target_id,
                    }),
                ));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, screen = %intent.screen, "Navigation dispatch failed");
                self.reject(intent, "dispatch failed")
            }
        }
    }

    /// Clear the active flow so the user lands on flow selection. The intent
    /// is dropped, not parked.
    fn force_flow_selection(&self, intent: &Intent, flow: OrderFlow, reason: &str) -> bool {
        if let Err(e) = self.inner.session.clear_active_flow() {
            tracing::warn!(error = %e, "Failed to clear active flow");
            return self.reject(intent, "session write failed");
        }

        // TODO: park the intent here too once flow selection can replay it;
        // today the user only lands on flow selection.
        tracing::info!(
            screen = %intent.screen,
            flow = %flow,
            reason,
            "Cleared active flow, dropping intent"
        );
        self.emit(NavigationEvent::new(
            EventType::FlowCleared,
            json!({ "screen": intent.screen, "flow": flow, "reason": reason }),
        ));
        true
    }

    pub(crate) fn reject(&self, intent: &Intent, reason: &str) -> bool {
        tracing::debug!(screen = %intent.screen, reason, "Navigation rejected");
        self.emit(NavigationEvent::new(
            EventType::NavigationRejected,
            json!({ "screen": intent.screen, "reason": reason }),
        ));
        false
    }

    pub(crate) fn emit(&self, event: NavigationEvent) {
        self.inner.events.emit(event);
    }
}

/// Builder for [`LinkResolver`].
pub struct LinkResolverBuilder {
    session: Arc<dyn SessionStore>,
    container: Arc<dyn NavigationContainer>,
    config: LinkingConfig,
    settle_delay: Option<Duration>,
    events: Option<Arc<dyn EventEmitter>>,
}

impl LinkResolverBuilder {
    pub fn new(session: Arc<dyn SessionStore>, container: Arc<dyn NavigationContainer>) -> Self {
        Self {
            session,
            container,
            config: LinkingConfig::default(),
            settle_delay: None,
            events: None,
        }
    }

    /// Set the linking configuration.
    pub fn with_config(mut self, config: LinkingConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the configured settle delay.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = Some(delay);
        self
    }

    /// Set the event emitter.
    pub fn with_event_emitter(mut self, events: Arc<dyn EventEmitter>) -> Self {
        self.events = Some(events);
        self
    }

    /// Build the resolver. Fails when none of the configured prefixes parse.
    pub fn build(self) -> Result<LinkResolver> {
        let parser = LinkParser::new(self.config.prefixes.as_slice())?;
        let settle_delay = self
            .settle_delay
            .unwrap_or_else(|| Duration::from_millis(self.config.settle_delay_ms));

        Ok(LinkResolver {
            inner: Arc::new(ResolverInner {
                parser,
                session: self.session,
                container: self.container,
                events: self.events.unwrap_or_else(|| Arc::new(NoOpEventEmitter)),
                pending: DeferredSlot::new(settle_delay),
                max_settle_attempts: self.config.max_settle_attempts.max(1),
                delivery: DeliveryTakeawayNavigator,
                dine_in: DineInNavigator,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crepaway_core::{
        mocks::{MockNavigationContainer, MockSessionStore, RecordingEventEmitter, SessionMutation},
        types::{
            NavigationAction, RouteEntry, RouteParams, Screen, SessionSnapshot,
            DELIVERY_TAKEAWAY_ROUTE, DINE_IN_ROUTE,
        },
    };

    struct Harness {
        session: Arc<MockSessionStore>,
        container: Arc<MockNavigationContainer>,
        events: Arc<RecordingEventEmitter>,
        resolver: LinkResolver,
    }

    fn harness(session: SessionSnapshot, route: &str) -> Harness {
        let session = Arc::new(MockSessionStore::new(session));
        let container = Arc::new(MockNavigationContainer::on_route(route));
        let events = Arc::new(RecordingEventEmitter::new());
        let resolver = LinkResolver::builder(session.clone(), container.clone())
            .with_event_emitter(events.clone())
            .build()
            .unwrap();
        Harness {
            session,
            container,
            events,
            resolver,
        }
    }

    fn every_intent() -> Vec<Intent> {
        let screens = [
            Screen::Home,
            Screen::OfferDetails,
            Screen::OrderDetails,
            Screen::TrackOrder,
            Screen::DineInTable,
            Screen::DineInOrder,
        ];
        let mut intents = Vec::new();
        for screen in screens {
            intents.push(Intent::new(screen).with_target_id(1));
            for flow in [OrderFlow::Delivery, OrderFlow::Takeaway, OrderFlow::DineIn] {
                intents.push(Intent::new(screen).in_flow(flow).with_target_id(1));
            }
        }
        intents
    }

    #[tokio::test]
    async fn test_logged_out_rejects_everything() {
        for route in [DELIVERY_TAKEAWAY_ROUTE, DINE_IN_ROUTE, "OrderTypeSelection"] {
            let h = harness(SessionSnapshot::default().with_active_flow(OrderFlow::Delivery), route);
            for intent in every_intent() {
                assert!(!h.resolver.navigate(&intent), "{:?} on {}", intent, route);
            }
            assert!(h.session.mutations().is_empty());
            assert!(h.container.actions().is_empty());
            assert_eq!(h.resolver.pending(), None);
        }
    }

    #[tokio::test]
    async fn test_not_ready_rejects() {
        let h = harness(SessionSnapshot::logged_in(), "OrderTypeSelection");
        h.container.set_ready(false);

        assert!(!h.resolver.navigate(&Intent::default_home()));
        assert!(h.session.mutations().is_empty());
        assert_eq!(h.events.count(EventType::NavigationRejected), 1);
    }

    #[tokio::test]
    async fn test_matching_flow_dispatches_delivery_stack() {
        let h = harness(
            SessionSnapshot::logged_in().with_active_flow(OrderFlow::Takeaway),
            DELIVERY_TAKEAWAY_ROUTE,
        );
        let intent = Intent::new(Screen::Orders).in_flow(OrderFlow::Takeaway);

        assert!(h.resolver.navigate(&intent));
        assert_eq!(
            h.container.actions(),
            vec![NavigationAction::Navigate {
                path: vec!["DeliveryTakeaway".into(), "Orders".into()],
                params: Default::default(),
            }]
        );
        assert!(h.session.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_navigate_is_idempotent() {
        let h = harness(
            SessionSnapshot::logged_in().with_active_flow(OrderFlow::Delivery),
            DELIVERY_TAKEAWAY_ROUTE,
        );
        let intent = Intent::new(Screen::TrackOrder).with_target_id(9);

        assert!(h.resolver.navigate(&intent));
        assert!(h.resolver.navigate(&intent));

        let actions = h.container.actions();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0], actions[1]);
        assert!(h.session.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_intent_without_flow_uses_session_flow() {
        let h = harness(
            SessionSnapshot::logged_in().with_active_flow(OrderFlow::DineIn),
            DINE_IN_ROUTE,
        );

        assert!(h.resolver.navigate(&Intent::new(Screen::DineInCheckout)));
        assert_eq!(
            h.container.actions()[0].focused(),
            Some("DineInCheckout")
        );
    }

    #[tokio::test]
    async fn test_cross_flow_in_delivery_container_clears_flow() {
        let h = harness(
            SessionSnapshot::logged_in().with_active_flow(OrderFlow::Delivery),
            DELIVERY_TAKEAWAY_ROUTE,
        );
        let intent = Intent::new(Screen::Orders).in_flow(OrderFlow::Takeaway);

        assert!(h.resolver.navigate(&intent));
        assert_eq!(h.session.mutations(), vec![SessionMutation::ClearActiveFlow]);
        assert!(h.container.actions().is_empty());
        assert_eq!(h.resolver.pending(), None);
        assert_eq!(h.events.count(EventType::FlowCleared), 1);
    }

    #[tokio::test]
    async fn test_delivery_intent_in_dine_in_container_clears_flow() {
        let h = harness(
            SessionSnapshot::logged_in().with_active_flow(OrderFlow::DineIn),
            DINE_IN_ROUTE,
        );
        let intent = Intent::new(Screen::Orders).in_flow(OrderFlow::Delivery);

        assert!(h.resolver.navigate(&intent));
        assert_eq!(h.session.mutations(), vec![SessionMutation::ClearActiveFlow]);
        assert!(h.container.actions().is_empty());
        assert_eq!(h.resolver.pending(), None);
    }

    #[tokio::test]
    async fn test_dine_in_intent_in_delivery_container_clears_flow() {
        let h = harness(
            SessionSnapshot::logged_in().with_active_flow(OrderFlow::Delivery),
            DELIVERY_TAKEAWAY_ROUTE,
        );

        assert!(h.resolver.navigate(&Intent::new(Screen::DineInTable).in_flow(OrderFlow::DineIn)));
        assert_eq!(h.session.mutations(), vec![SessionMutation::ClearActiveFlow]);
    }

    #[tokio::test]
    async fn test_session_write_failure_rejects() {
        let h = harness(
            SessionSnapshot::logged_in().with_active_flow(OrderFlow::Delivery),
            DELIVERY_TAKEAWAY_ROUTE,
        );
        h.session.fail_writes(true);

        assert!(!h.resolver.navigate(&Intent::new(Screen::Orders).in_flow(OrderFlow::Takeaway)));
        assert_eq!(h.events.count(EventType::FlowCleared), 0);
    }

    #[tokio::test]
    async fn test_open_url_discards_garbage() {
        let h = harness(SessionSnapshot::logged_in(), DELIVERY_TAKEAWAY_ROUTE);

        assert!(!h.resolver.open_url("https://evil.example/delivery/orders"));
        assert!(!h.resolver.open_url("crepaway://delivery/orders/track/abc"));
        assert_eq!(h.events.count(EventType::LinkDiscarded), 2);
        assert!(h.session.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_notification_screen_aborts_before_mutation() {
        let h = harness(SessionSnapshot::logged_in(), "OrderTypeSelection");

        let payload = NotificationPayload::new("loyalty_points").with_order_type("takeaway");
        assert!(!h.resolver.open_notification(&payload));
        assert!(h.session.mutations().is_empty());
        assert_eq!(h.resolver.pending(), None);
        assert_eq!(
            h.events.types(),
            vec![EventType::LinkReceived, EventType::LinkDiscarded]
        );
    }

    #[tokio::test]
    async fn test_detail_notification_without_id_is_discarded() {
        let h = harness(
            SessionSnapshot::logged_in().with_active_flow(OrderFlow::Delivery),
            DELIVERY_TAKEAWAY_ROUTE,
        );

        assert!(!h.resolver.open_notification(&NotificationPayload::new("order_details")));
        assert!(!h.resolver.open_notification(&NotificationPayload::new("TrackOrder")));
        assert!(h.container.actions().is_empty());
        assert!(h.session.mutations().is_empty());
        assert_eq!(h.events.count(EventType::LinkDiscarded), 2);

        assert!(h
            .resolver
            .open_notification(&NotificationPayload::new("order_details").with_id(12)));
        assert_eq!(
            h.container.actions(),
            vec![NavigationAction::Reset {
                container: DELIVERY_TAKEAWAY_ROUTE.into(),
                routes: vec![
                    RouteEntry::new("Orders", RouteParams::none()),
                    RouteEntry::new("OrderDetails", RouteParams::with_id(Some(12))),
                ],
            }]
        );
    }

    #[test]
    fn test_settle_delay_override_survives_config() {
        let session = Arc::new(MockSessionStore::new(SessionSnapshot::logged_in()));
        let container = Arc::new(MockNavigationContainer::on_route(DELIVERY_TAKEAWAY_ROUTE));

        let resolver = LinkResolver::builder(session.clone(), container.clone())
            .with_settle_delay(Duration::from_micros(2500))
            .with_config(LinkingConfig {
                settle_delay_ms: 900,
                ..LinkingConfig::default()
            })
            .build()
            .unwrap();
        assert_eq!(resolver.inner.pending.delay(), Duration::from_micros(2500));

        let configured = LinkResolver::builder(session, container)
            .with_config(LinkingConfig {
                settle_delay_ms: 900,
                ..LinkingConfig::default()
            })
            .build()
            .unwrap();
        assert_eq!(configured.inner.pending.delay(), Duration::from_millis(900));
    }
}
