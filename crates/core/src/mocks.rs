//! Mock implementations of core traits for testing.
//!
//! This module provides recording mocks for every collaborator trait so the
//! resolver can be exercised without a mounted UI tree.

use std::sync::Mutex;

use crate::{
    events::{EventType, NavigationEvent},
    traits::{EventEmitter, NavigationContainer, SessionStore},
    types::{MenuType, NavigationAction, OrderFlow, SessionSnapshot},
    Error, Result,
};

// =============================================================================
// Mock Session Store
// =============================================================================

/// Mutation recorded by [`MockSessionStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMutation {
    SetOrderFlow(OrderFlow, MenuType),
    ClearActiveFlow,
    SetCartFlow(OrderFlow),
    ClearSelectedBranch,
    ClearSelectedAddress,
}

/// Session store that applies mutations to a snapshot and records them.
pub struct MockSessionStore {
    state: Mutex<SessionSnapshot>,
    mutations: Mutex<Vec<SessionMutation>>,
    fail_writes: Mutex<bool>,
}

impl MockSessionStore {
    pub fn new(state: SessionSnapshot) -> Self {
        Self {
            state: Mutex::new(state),
            mutations: Mutex::new(Vec::new()),
            fail_writes: Mutex::new(false),
        }
    }

    /// Logged-out session.
    pub fn logged_out() -> Self {
        Self::new(SessionSnapshot::default())
    }

    /// Replace the whole session.
    pub fn set_state(&self, state: SessionSnapshot) {
        *self.state.lock().unwrap() = state;
    }

    pub fn state(&self) -> SessionSnapshot {
        self.state.lock().unwrap().clone()
    }

    /// Mutations applied so far, in order.
    pub fn mutations(&self) -> Vec<SessionMutation> {
        self.mutations.lock().unwrap().clone()
    }

    /// Make every write fail with a session store error.
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    fn apply(&self, mutation: SessionMutation) -> Result<()> {
        if *self.fail_writes.lock().unwrap() {
            return Err(Error::session_store("mock write failure"));
        }

        let mut state = self.state.lock().unwrap();
        match &mutation {
            SessionMutation::SetOrderFlow(flow, menu) => {
                state.active_order_flow = Some(*flow);
                state.menu_type = Some(*menu);
            }
            SessionMutation::ClearActiveFlow => {
                state.active_order_flow = None;
                state.menu_type = None;
            }
            SessionMutation::SetCartFlow(flow) => state.cart_flow = Some(*flow),
            SessionMutation::ClearSelectedBranch => state.selected_branch = None,
            SessionMutation::ClearSelectedAddress => state.selected_address = None,
        }
        self.mutations.lock().unwrap().push(mutation);
        Ok(())
    }
}

impl SessionStore for MockSessionStore {
    fn snapshot(&self) -> Result<SessionSnapshot> {
        Ok(self.state())
    }

    fn set_order_flow(&self, flow: OrderFlow, menu_type: MenuType) -> Result<()> {
        self.apply(SessionMutation::SetOrderFlow(flow, menu_type))
    }

    fn clear_active_flow(&self) -> Result<()> {
        self.apply(SessionMutation::ClearActiveFlow)
    }

    fn set_cart_flow(&self, flow: OrderFlow) -> Result<()> {
        self.apply(SessionMutation::SetCartFlow(flow))
    }

    fn clear_selected_branch(&self) -> Result<()> {
        self.apply(SessionMutation::ClearSelectedBranch)
    }

    fn clear_selected_address(&self) -> Result<()> {
        self.apply(SessionMutation::ClearSelectedAddress)
    }
}

// =============================================================================
// Mock Navigation Container
// =============================================================================

/// Navigation container with a fixed top route that records dispatches.
pub struct MockNavigationContainer {
    ready: Mutex<bool>,
    route: Mutex<Option<String>>,
    actions: Mutex<Vec<NavigationAction>>,
}

impl MockNavigationContainer {
    /// Ready container focused on `route`.
    pub fn on_route(route: &str) -> Self {
        Self {
            ready: Mutex::new(true),
            route: Mutex::new(Some(route.to_string())),
            actions: Mutex::new(Vec::new()),
        }
    }

    /// Container that has not mounted yet.
    pub fn not_ready() -> Self {
        Self {
            ready: Mutex::new(false),
            route: Mutex::new(None),
            actions: Mutex::new(Vec::new()),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        *self.ready.lock().unwrap() = ready;
    }

    pub fn set_route(&self, route: &str) {
        *self.route.lock().unwrap() = Some(route.to_string());
    }

    /// Dispatches received so far, in order.
    pub fn actions(&self) -> Vec<NavigationAction> {
        self.actions.lock().unwrap().clone()
    }
}

impl NavigationContainer for MockNavigationContainer {
    fn is_ready(&self) -> bool {
        *self.ready.lock().unwrap()
    }

    fn current_route(&self) -> Option<String> {
        self.route.lock().unwrap().clone()
    }

    fn dispatch(&self, action: NavigationAction) -> Result<()> {
        self.actions.lock().unwrap().push(action);
        Ok(())
    }
}

// =============================================================================
// Mock Event Emitter
// =============================================================================

/// Event emitter that keeps every event.
#[derive(Default)]
pub struct RecordingEventEmitter {
    events: Mutex<Vec<NavigationEvent>>,
}

impl RecordingEventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<NavigationEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Event types in emission order.
    pub fn types(&self) -> Vec<EventType> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type)
            .collect()
    }

    pub fn count(&self, event_type: EventType) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }
}

impl EventEmitter for RecordingEventEmitter {
    fn emit(&self, event: NavigationEvent) {
        self.events.lock().unwrap().push(event);
    }
}
