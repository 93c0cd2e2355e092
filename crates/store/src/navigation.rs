//! In-memory navigation container.
//!
//! Models the app's root navigator: the top-level route is derived from the
//! session (auth, flow selection, or one of the flow containers), and each
//! container keeps its own nested stacks keyed by path.

use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crepaway_core::{
    traits::{NavigationContainer, SessionStore},
    types::{
        NavigationAction, OrderFlow, RouteEntry, AUTH_ROUTE, DELIVERY_TAKEAWAY_ROUTE,
        DINE_IN_ROUTE, FLOW_SELECTION_ROUTE,
    },
    Error, Result,
};

/// Navigation tree kept in process memory.
pub struct InMemoryNavigationContainer {
    session: Arc<dyn SessionStore>,
    ready: AtomicBool,
    /// Stack per navigator path, e.g. `DineIn/DineInOrderStack`.
    stacks: DashMap<String, Vec<RouteEntry>>,
    history: Mutex<Vec<NavigationAction>>,
}

impl InMemoryNavigationContainer {
    /// Create a mounted container whose root follows `session`.
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self {
            session,
            ready: AtomicBool::new(true),
            stacks: DashMap::new(),
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Nested stack of a navigator, outermost entry first.
    pub fn stack(&self, navigator: &str) -> Vec<RouteEntry> {
        self.stacks
            .get(navigator)
            .map(|r| r.value().clone())
            .unwrap_or_default()
    }

    /// Every action applied so far.
    pub fn history(&self) -> Vec<NavigationAction> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn root_route(&self) -> &'static str {
        match self.session.snapshot() {
            Ok(session) if !session.is_logged_in => AUTH_ROUTE,
            Ok(session) => match session.active_order_flow {
                None => FLOW_SELECTION_ROUTE,
                Some(OrderFlow::Delivery | OrderFlow::Takeaway) => DELIVERY_TAKEAWAY_ROUTE,
                Some(OrderFlow::DineIn) => DINE_IN_ROUTE,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Session unavailable, showing auth");
                AUTH_ROUTE
            }
        }
    }

    fn apply(&self, action: &NavigationAction) {
        match action {
            NavigationAction::Navigate { path, params } => {
                let Some((leaf, parents)) = path.split_last() else {
                    return;
                };
                if parents.is_empty() {
                    return;
                }
                let mut stack = self.stacks.entry(parents.join("/")).or_default();
                // Navigating to a screen already in the stack pops back to it.
                match stack.iter().position(|entry| &entry.name == leaf) {
                    Some(index) => {
                        stack.truncate(index + 1);
                        stack[index].params = params.clone();
                    }
                    None => stack.push(RouteEntry::new(leaf.clone(), params.clone())),
                }
            }
            NavigationAction::Reset { container, routes } => {
                self.stacks.insert(container.clone(), routes.clone());
            }
        }
    }
}

impl NavigationContainer for InMemoryNavigationContainer {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn current_route(&self) -> Option<String> {
        self.is_ready().then(|| self.root_route().to_string())
    }

    fn dispatch(&self, action: NavigationAction) -> Result<()> {
        if !self.is_ready() {
            return Err(Error::navigation("navigation container is not mounted"));
        }

        let root = self.root_route();
        if action.container() != Some(root) {
            return Err(Error::navigation(format!(
                "action for {:?} not handled while {} is shown",
                action.container(),
                root
            )));
        }

        self.apply(&action);
        tracing::debug!(root, focused = ?action.focused(), "Applied navigation action");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(action);
        Ok(())
    }
}
